use apkrecon_config::error::ConfigError;
use apkrecon_key::KeyError;
use apkrecon_reconcile::ReconcileError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("Invalid hex checksum: {0}")]
    #[diagnostic(
        code(apkrecon_cli::invalid_hex),
        help("Pass --index for APKINDEX `Q1...` checksums")
    )]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    #[diagnostic(code(apkrecon_cli::json))]
    Json(#[from] serde_json::Error),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(apkrecon_cli::io))]
    Io {
        action: String,
        source: std::io::Error,
    },
}

pub trait ErrorContext<T> {
    fn with_context<F>(self, context: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<F>(self, context: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| {
            CliError::Io {
                action: context(),
                source,
            }
        })
    }
}

pub type CliResult<T> = Result<T, CliError>;
