use crate::config::AttackPlan;

/// One resolved invocation of the binary.
pub(in crate::entry) enum RunPlan {
    Attack(Box<AttackPlan>),
    ShowResult { tag: String },
    Dashboard,
    HistoryList,
    HistoryClear,
    Examples,
    Version,
}

/// Process exit codes.
pub(in crate::entry) const EXIT_SUCCESS: u8 = 0;
pub(in crate::entry) const EXIT_FAILURE: u8 = 1;
pub(in crate::entry) const EXIT_USAGE: u8 = 2;
pub(in crate::entry) const EXIT_REGRESSION: u8 = 3;
