use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::Method;
use tracing::{debug, warn};

use crate::args::{
    AttackArgs, DEFAULT_CONCURRENCY, DEFAULT_METHOD, DEFAULT_REQUESTS, DEFAULT_TIMEOUT_SECS,
    ProfileSettings, parse_header,
};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::http::{Header, Target};
use crate::storage::{TagKind, load_urls, read_file};

use super::parse::parse_duration_value;
use super::run::{AttackPlan, RunConfig, TagPlan, Termination};
use super::types::{ConfigFile, DurationValue};

pub const MAX_HEADERS: usize = 64;
pub const MAX_HEADER_NAME_LEN: usize = 128;
pub const MAX_HEADER_VALUE_LEN: usize = 512;

/// Merges built-in defaults, the config file, the profile and CLI flags (in
/// increasing priority) into a validated [`AttackPlan`].
///
/// # Errors
///
/// Returns an error when a value is missing, malformed or out of range, or
/// when a referenced file cannot be read.
pub fn build_attack_plan(args: &AttackArgs, file: Option<&ConfigFile>) -> AppResult<AttackPlan> {
    let empty = ConfigFile::default();
    let file = file.unwrap_or(&empty);
    let tag = resolve_tag_plan(args)?;

    let targets = resolve_targets(args, file)?;
    let method = resolve_method(args.method.as_deref().or(file.method.as_deref()))?;
    let headers = resolve_headers(args, file)?;
    let body = resolve_body(args, file)?;

    let profile = args.profile.or(file.profile).map(|profile| profile.settings());
    let termination = resolve_termination(args, file, profile.as_ref())?;

    let concurrency = args
        .concurrency
        .or_else(|| profile.as_ref().map(|settings| settings.concurrency))
        .or(file.concurrency)
        .unwrap_or(DEFAULT_CONCURRENCY);
    let concurrency = NonZeroUsize::new(concurrency)
        .ok_or_else(|| AppError::validation(ValidationError::ConcurrencyZero))?;

    let rps = match args.rps.or(file.rps) {
        Some(value) => Some(
            NonZeroU32::new(value).ok_or_else(|| AppError::validation(ValidationError::RpsZero))?,
        ),
        None => None,
    };

    let ramp_up = match args.ramp_up {
        Some(value) => value,
        None => file_duration(file.ramp_up.as_ref(), "ramp_up")?.unwrap_or(Duration::ZERO),
    };
    let timeout = match args.timeout {
        Some(value) => value,
        None => file_duration(file.timeout.as_ref(), "timeout")?
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    };
    if timeout.is_zero() {
        return Err(AppError::validation(ValidationError::TimeoutZero));
    }

    let run = RunConfig {
        targets,
        method,
        headers,
        body,
        termination,
        concurrency,
        rps,
        ramp_up,
        timeout,
        insecure: args.insecure || file.insecure.unwrap_or(false),
    };
    debug!(
        targets = run.targets.len(),
        concurrency = run.concurrency.get(),
        termination = ?run.termination,
        "Resolved run configuration."
    );

    Ok(AttackPlan {
        run,
        tag,
        quiet: args.quiet,
    })
}

/// Checks `--tag` and the flags that depend on it.
///
/// # Errors
///
/// Returns an error when a dependent flag has no tag, the tag is not a plain
/// name, or the threshold is negative.
pub fn resolve_tag_plan(args: &AttackArgs) -> AppResult<Option<TagPlan>> {
    let Some(tag) = args.tag.as_deref() else {
        let dependent = [
            (args.before, "before"),
            (args.after, "after"),
            (args.result, "result"),
            (args.threshold.is_some(), "threshold"),
        ];
        if let Some((_, flag)) = dependent.iter().find(|(set, _)| *set) {
            return Err(AppError::validation(ValidationError::TagRequired { flag: *flag }));
        }
        return Ok(None);
    };
    validate_tag(tag)?;

    if let Some(value) = args.threshold
        && (value.is_nan() || value < 0.0)
    {
        return Err(AppError::validation(ValidationError::InvalidThreshold {
            value,
        }));
    }
    if args.before && args.after {
        return Err(AppError::config(ConfigError::Conflict {
            left: "before",
            right: "after",
        }));
    }

    let kind = if args.before {
        TagKind::Before
    } else if args.after {
        TagKind::After
    } else {
        if !args.result {
            warn!("--tag '{}' has no effect without --before, --after or --result.", tag);
        }
        return Ok(None);
    };
    if kind == TagKind::Before && args.threshold.is_some() {
        warn!("--threshold only applies to --after runs; ignoring it.");
    }

    Ok(Some(TagPlan {
        tag: tag.to_owned(),
        kind,
        threshold: args.threshold,
    }))
}

/// Tags become directory names, so they must be a single path component.
///
/// # Errors
///
/// Returns an error for empty tags, `.`/`..`, or tags with separators.
pub fn validate_tag(tag: &str) -> AppResult<()> {
    let invalid = tag.trim().is_empty()
        || tag == "."
        || tag == ".."
        || tag.contains(['/', '\\'])
        || tag.contains('\0');
    if invalid {
        return Err(AppError::validation(ValidationError::InvalidTag {
            tag: tag.to_owned(),
        }));
    }
    Ok(())
}

fn resolve_targets(args: &AttackArgs, file: &ConfigFile) -> AppResult<Vec<Target>> {
    let raw_urls: Vec<String> = if let Some(path) = args.urls_file.as_deref() {
        urls_from_file(path)?
    } else if let Some(url) = args.url.as_deref() {
        vec![url.to_owned()]
    } else if let Some(path) = file.urls_file.as_deref() {
        urls_from_file(path)?
    } else {
        match (file.url.as_deref(), file.urls.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(AppError::config(ConfigError::Conflict {
                    left: "url",
                    right: "urls",
                }));
            }
            (Some(url), None) => vec![url.to_owned()],
            (None, Some(urls)) => urls.to_vec(),
            (None, None) => Vec::new(),
        }
    };
    if raw_urls.is_empty() {
        return Err(AppError::validation(ValidationError::MissingUrl));
    }

    let mut targets = Vec::with_capacity(raw_urls.len());
    for raw in &raw_urls {
        targets.push(Target::parse(raw)?);
    }
    Ok(targets)
}

fn urls_from_file(path: &Path) -> AppResult<Vec<String>> {
    let urls = load_urls(path);
    if urls.is_empty() {
        return Err(AppError::validation(ValidationError::UrlFileEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(urls)
}

/// Upper-cases and validates a method token.
///
/// # Errors
///
/// Returns an error when the token is empty or contains invalid characters.
pub fn resolve_method(value: Option<&str>) -> AppResult<Method> {
    let value = value.unwrap_or(DEFAULT_METHOD).trim().to_ascii_uppercase();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::InvalidMethod { value }));
    }
    Method::from_bytes(value.as_bytes())
        .map_err(|_err| AppError::validation(ValidationError::InvalidMethod { value }))
}

fn resolve_headers(args: &AttackArgs, file: &ConfigFile) -> AppResult<Vec<Header>> {
    let from_cli = !args.headers.is_empty();
    let raw_headers: &[String] = if from_cli {
        &args.headers
    } else {
        file.headers.as_deref().unwrap_or_default()
    };
    if raw_headers.len() > MAX_HEADERS {
        return Err(AppError::validation(ValidationError::TooManyHeaders {
            count: raw_headers.len(),
            max: MAX_HEADERS,
        }));
    }

    raw_headers
        .iter()
        .map(|raw| {
            validate_header(raw).map_err(|err| {
                if from_cli {
                    AppError::validation(err)
                } else {
                    AppError::config(ConfigError::InvalidHeader { source: err })
                }
            })
        })
        .collect()
}

/// Parses `Key: Value` and checks it against HTTP token rules and the
/// header size bounds.
///
/// # Errors
///
/// Returns an error for a missing colon, an invalid name or value, or a
/// name/value over the size bounds.
pub fn validate_header(raw: &str) -> Result<Header, ValidationError> {
    let (name, value) = parse_header(raw)?;
    if name.len() > MAX_HEADER_NAME_LEN {
        return Err(ValidationError::HeaderNameTooLong {
            name,
            max: MAX_HEADER_NAME_LEN,
        });
    }
    if value.len() > MAX_HEADER_VALUE_LEN {
        return Err(ValidationError::HeaderValueTooLong {
            name,
            max: MAX_HEADER_VALUE_LEN,
        });
    }
    if HeaderName::from_bytes(name.as_bytes()).is_err() {
        return Err(ValidationError::InvalidHeaderName { name });
    }
    if HeaderValue::from_str(&value).is_err() {
        return Err(ValidationError::InvalidHeaderValue { name });
    }
    Ok(Header::new(name, value))
}

fn resolve_body(args: &AttackArgs, file: &ConfigFile) -> AppResult<Option<Vec<u8>>> {
    if let Some(body) = args.body.as_ref() {
        return Ok(Some(body.as_bytes().to_vec()));
    }
    if let Some(path) = args.body_file.as_deref() {
        return body_from_file(path).map(Some);
    }
    match (file.body.as_ref(), file.body_file.as_deref()) {
        (Some(_), Some(_)) => Err(AppError::config(ConfigError::Conflict {
            left: "body",
            right: "body_file",
        })),
        (Some(body), None) => Ok(Some(body.as_bytes().to_vec())),
        (None, Some(path)) => body_from_file(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn body_from_file(path: &Path) -> AppResult<Vec<u8>> {
    read_file(path).ok_or_else(|| {
        AppError::validation(ValidationError::BodyFileMissing {
            path: PathBuf::from(path),
        })
    })
}

fn resolve_termination(
    args: &AttackArgs,
    file: &ConfigFile,
    profile: Option<&ProfileSettings>,
) -> AppResult<Termination> {
    let mut requests = file.requests;
    let mut duration = file_duration(file.duration.as_ref(), "duration")?;
    if let Some(settings) = profile {
        if settings.requests.is_some() {
            requests = settings.requests;
        }
        if settings.duration.is_some() {
            duration = settings.duration;
            requests = None;
        }
    }
    if args.requests.is_some() {
        requests = args.requests;
    }
    if args.duration.is_some() {
        duration = args.duration;
    }

    if let Some(duration) = duration.filter(|value| !value.is_zero()) {
        if args.requests.is_some() {
            debug!("Duration set; ignoring the request count.");
        }
        return Ok(Termination::Duration(duration));
    }
    NonZeroU64::new(requests.unwrap_or(DEFAULT_REQUESTS))
        .map(Termination::Requests)
        .ok_or_else(|| AppError::validation(ValidationError::RequestsZero))
}

fn file_duration(
    value: Option<&DurationValue>,
    field: &'static str,
) -> AppResult<Option<Duration>> {
    match value {
        None => Ok(None),
        Some(DurationValue::Seconds(secs)) => Ok(Some(Duration::from_secs(*secs))),
        Some(DurationValue::Text(text)) => parse_duration_value(text)
            .map(Some)
            .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err })),
    }
}
