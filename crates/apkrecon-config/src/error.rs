use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(apkrecon_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(apkrecon_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(apkrecon_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("No architectures configured")]
    #[diagnostic(
        code(apkrecon_config::no_architectures),
        help("List at least one supported architecture, e.g. architectures = [\"x86_64\"]")
    )]
    NoArchitectures,

    #[error("Blank architecture entry")]
    #[diagnostic(
        code(apkrecon_config::blank_architecture),
        help("Remove empty strings from the architectures list")
    )]
    BlankArchitecture,

    #[error("Duplicate architecture: {0}")]
    #[diagnostic(
        code(apkrecon_config::duplicate_architecture),
        help("Each architecture must be listed once")
    )]
    DuplicateArchitecture(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(apkrecon_config::io))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
