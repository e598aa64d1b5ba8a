use std::{error::Error, fmt, time::Duration};

use tracing::{debug, warn};

use crate::{
    error::{BoxError, ProcessError, ReconcileError},
    types::ProcessResponse,
};

/// Terminal state of one processing attempt.
#[derive(Debug)]
pub enum Outcome {
    Success,
    RequeueAfter(Duration),
    NonRetriable(String),
    TransientFailure(BoxError),
}

impl Outcome {
    /// Maps a callback result onto an outcome.
    pub fn classify(result: Result<(), ProcessError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(ProcessError::Requeue { after }) => Self::RequeueAfter(after),
            Err(ProcessError::NonRetriable { reason }) => Self::NonRetriable(reason),
            Err(ProcessError::Transient(err)) => Self::TransientFailure(err),
        }
    }

    /// Non-retriable outcome carrying the full source chain of `err` as reason.
    pub fn non_retriable_from(err: &(dyn Error + 'static)) -> Self {
        Self::NonRetriable(error_chain(err))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::RequeueAfter(_) => "requeue",
            Self::NonRetriable(_) => "non-retriable",
            Self::TransientFailure(_) => "transient",
        }
    }

    /// Converts the outcome into what the dispatcher sees.
    ///
    /// Success and non-retriable outcomes both produce an empty response so
    /// the dispatcher neither retries nor records a failure. Transient
    /// failures come back as errors for the dispatcher's own backoff.
    pub fn into_response(self, key: &str) -> Result<ProcessResponse, ReconcileError> {
        match self {
            Self::Success => {
                debug!(key, "processed");
                Ok(ProcessResponse::empty())
            }
            Self::RequeueAfter(after) => {
                let response = ProcessResponse::requeue(after);
                debug!(
                    key,
                    requeue_after_seconds = response.requeue_after_seconds,
                    "requeue requested"
                );
                Ok(response)
            }
            Self::NonRetriable(reason) => {
                warn!(key, reason = %reason, "non-retriable failure, not requeueing");
                Ok(ProcessResponse::empty())
            }
            Self::TransientFailure(source) => {
                debug!(key, error = %source, "transient failure");
                Err(ReconcileError::Transient {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::RequeueAfter(after) => write!(f, "requeue after {after:?}"),
            Self::NonRetriable(reason) => write!(f, "non-retriable: {reason}"),
            Self::TransientFailure(err) => write!(f, "transient: {err}"),
        }
    }
}

fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
