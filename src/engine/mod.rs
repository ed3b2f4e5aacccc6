//! Request-scoped orchestration: resolve → fetch → score → aggregate → classify.
//!
//! Includes:
//! - `resolver`: name/coordinate resolution with region fallback.
//! - `fetcher`: the `ReadingFetcher` abstraction and its direct and station-network variants.
//! - `service`: `AqiEngine`, the entry point exposed to front-ends.

mod fetcher;
mod resolver;
mod service;

pub use fetcher::*;
pub use resolver::*;
pub use service::*;

use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Runs `fut` with a time budget, turning expiry into [`AppError::Timeout`].
pub(crate) async fn bounded<T>(
    operation: &str,
    limit: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!("{} exceeded {:?}", operation, limit);
            Err(AppError::Timeout {
                operation: operation.to_string(),
                after: limit,
            })
        },
    }
}
