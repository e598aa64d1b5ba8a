//! Error types for the key crate.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while splitting a package filename.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("Filename `{filename}` does not end with `.apk`")]
    #[diagnostic(code(apkrecon_key::missing_suffix))]
    MissingSuffix { filename: String },

    #[error("Filename `{filename}` needs at least two dashes (name-version-rN)")]
    #[diagnostic(code(apkrecon_key::too_few_dashes))]
    TooFewDashes { filename: String },

    #[error("Filename `{filename}` has an empty package name")]
    #[diagnostic(code(apkrecon_key::empty_name))]
    EmptyName { filename: String },

    #[error("Filename `{filename}` has an empty package version")]
    #[diagnostic(code(apkrecon_key::empty_version))]
    EmptyVersion { filename: String },
}

/// Errors that can occur while parsing keys or deriving digests.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key `{key}` has too few segments")]
    #[diagnostic(
        code(apkrecon_key::too_few_segments),
        help("Keys look like host/repo/arch/name-version-rN.apk")
    )]
    TooFewSegments { key: String },

    #[error("Key `{key}` has an empty host")]
    #[diagnostic(code(apkrecon_key::empty_host))]
    EmptyHost { key: String },

    #[error("Key `{key}` has no repository path")]
    #[diagnostic(
        code(apkrecon_key::empty_repo_path),
        help("At least one repository segment must sit between the host and the architecture")
    )]
    EmptyRepoPath { key: String },

    #[error("Unsupported architecture `{arch}` in key `{key}`")]
    #[diagnostic(
        code(apkrecon_key::unsupported_arch),
        help("Supported architectures come from the `architectures` config entry")
    )]
    UnsupportedArch { arch: String, key: String },

    #[error("Invalid filename in key `{key}`")]
    #[diagnostic(code(apkrecon_key::invalid_filename))]
    InvalidFilename {
        key: String,
        #[source]
        source: FilenameError,
    },

    #[error("Invalid URL for key `{key}`: {reason}")]
    #[diagnostic(code(apkrecon_key::invalid_url))]
    InvalidUrl { key: String, reason: String },

    #[error("Package `{package}` carries no checksum")]
    #[diagnostic(code(apkrecon_key::missing_checksum))]
    MissingChecksum { package: String },

    #[error("Invalid checksum `{checksum}`: {reason}")]
    #[diagnostic(
        code(apkrecon_key::invalid_checksum),
        help("APKINDEX checksums look like Q1 followed by base64-encoded SHA-1")
    )]
    InvalidChecksum { checksum: String, reason: String },
}

impl KeyError {
    /// Whether this error means the key itself is malformed.
    pub fn is_malformed_key(&self) -> bool {
        matches!(
            self,
            Self::TooFewSegments { .. }
                | Self::EmptyHost { .. }
                | Self::EmptyRepoPath { .. }
                | Self::UnsupportedArch { .. }
                | Self::InvalidFilename { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, KeyError>;
