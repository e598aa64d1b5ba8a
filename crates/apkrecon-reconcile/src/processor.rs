use std::future::Future;

use apkrecon_key::{Key, KeyParser};
use tracing::{debug, warn};

use crate::{
    error::{ProcessError, ReconcileError},
    outcome::Outcome,
    types::{ProcessRequest, ProcessResponse},
};

/// Turns raw keys into parsed [`Key`]s, runs a callback on them and classifies
/// the result.
///
/// A reconciler holds no per-key state; every call is independent, and a
/// single instance (or its clones) can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Reconciler {
    parser: KeyParser,
}

impl Reconciler {
    pub fn new(parser: KeyParser) -> Self {
        Self {
            parser,
        }
    }

    pub fn parser(&self) -> &KeyParser {
        &self.parser
    }

    /// Handles one dispatcher request end to end.
    ///
    /// `ctx` is handed to `f` untouched; cancellation and deadlines are
    /// entirely up to the callback.
    pub async fn process<C, F, Fut>(
        &self,
        ctx: C,
        request: &ProcessRequest,
        f: F,
    ) -> Result<ProcessResponse, ReconcileError>
    where
        F: FnOnce(C, Key) -> Fut,
        Fut: Future<Output = Result<(), ProcessError>>,
    {
        debug!(key = %request.key, priority = request.priority, "processing");
        self.reconcile(ctx, &request.key, f)
            .await
            .into_response(&request.key)
    }

    /// Parses `raw` and, if it is well formed, invokes `f` on it.
    ///
    /// Malformed keys are non-retriable and never reach the callback.
    pub async fn reconcile<C, F, Fut>(&self, ctx: C, raw: &str, f: F) -> Outcome
    where
        F: FnOnce(C, Key) -> Fut,
        Fut: Future<Output = Result<(), ProcessError>>,
    {
        let key = match self.parser.parse(raw) {
            Ok(key) => key,
            Err(err) => {
                warn!(key = raw, error = %err, "rejecting malformed key");
                return Outcome::non_retriable_from(&err);
            }
        };

        let outcome = Outcome::classify(f(ctx, key).await);
        debug!(key = raw, outcome = outcome.kind(), "classified");
        outcome
    }
}
