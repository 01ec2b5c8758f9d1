//! Error types for the user-list engine.

use thiserror::Error;

/// Errors that can occur constructing the engine.
///
/// Running operations never error: invalid arguments and absent keys are
/// silent no-ops, and identity-source outages degrade to blank snapshots.
#[derive(Debug, Error)]
pub enum ListError {
    /// Collator initialization failed.
    #[error("collator error: {0}")]
    Collator(#[from] icu_collator::CollatorError),
}
