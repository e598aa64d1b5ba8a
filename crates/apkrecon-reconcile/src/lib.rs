pub mod error;
pub mod outcome;
pub mod processor;
pub mod types;

pub use error::{BoxError, ProcessError, ReconcileError};
pub use outcome::Outcome;
pub use processor::Reconciler;
pub use types::*;
