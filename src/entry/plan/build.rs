use crate::args::{AttackArgs, Command, HistoryAction};
use crate::config::{build_attack_plan, load_config, resolve_tag_plan};
use crate::error::{AppError, AppResult, ValidationError};

use super::types::RunPlan;

pub(crate) fn build_plan(command: Option<Command>, attack: AttackArgs) -> AppResult<RunPlan> {
    let args = match command {
        None => attack,
        Some(Command::Attack(args)) => args,
        Some(Command::Dashboard) => return Ok(RunPlan::Dashboard),
        Some(Command::History { action }) => {
            return Ok(match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => RunPlan::HistoryList,
                HistoryAction::Clear => RunPlan::HistoryClear,
            });
        }
        Some(Command::Examples) => return Ok(RunPlan::Examples),
        Some(Command::Version) => return Ok(RunPlan::Version),
    };

    if args.result {
        resolve_tag_plan(&args)?;
        let tag = args.tag.ok_or_else(|| {
            AppError::validation(ValidationError::TagRequired { flag: "result" })
        })?;
        return Ok(RunPlan::ShowResult { tag });
    }

    let file = load_config(args.config.as_deref())?;
    let plan = build_attack_plan(&args, file.as_ref())?;
    Ok(RunPlan::Attack(Box::new(plan)))
}
