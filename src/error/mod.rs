mod app;
mod config;
mod http;
mod storage;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use storage::StorageError;
pub use validation::ValidationError;
