use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a processing callback reports when it does not succeed.
///
/// The variant is chosen by the callback; nothing here is inferred from error
/// messages.
#[derive(Error, Diagnostic, Debug)]
pub enum ProcessError {
    #[error("Requeue requested after {after:?}")]
    #[diagnostic(code(apkrecon_reconcile::requeue))]
    Requeue { after: Duration },

    #[error("Non-retriable: {reason}")]
    #[diagnostic(code(apkrecon_reconcile::non_retriable))]
    NonRetriable { reason: String },

    #[error(transparent)]
    #[diagnostic(code(apkrecon_reconcile::transient))]
    Transient(BoxError),
}

impl ProcessError {
    pub fn requeue(after: Duration) -> Self {
        Self::Requeue { after }
    }

    pub fn non_retriable(reason: impl Into<String>) -> Self {
        Self::NonRetriable {
            reason: reason.into(),
        }
    }

    pub fn transient(err: impl Into<BoxError>) -> Self {
        Self::Transient(err.into())
    }
}

impl From<BoxError> for ProcessError {
    fn from(err: BoxError) -> Self {
        Self::Transient(err)
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        Self::Transient(Box::new(err))
    }
}

/// Errors surfaced to the dispatcher so its own retry policy applies.
#[derive(Error, Diagnostic, Debug)]
pub enum ReconcileError {
    #[error("Failed to process `{key}`: {source}")]
    #[diagnostic(
        code(apkrecon_reconcile::transient_failure),
        help("The dispatcher retries this key with its own backoff")
    )]
    Transient {
        key: String,
        #[source]
        source: BoxError,
    },
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
