use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::{
    arch::Architectures,
    error::{KeyError, Result},
    filename::parse_filename,
};

/// The package named by a key's final two segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Package {
    name: String,
    version: String,
    arch: String,
}

impl Package {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version as written in the filename, conventionally `{upstream}-r{revision}`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// `{name}-{version}.apk`
    pub fn filename(&self) -> String {
        format!("{}-{}.apk", self.name, self.version)
    }
}

/// A parsed package key: `{host}/{repo_path}/{arch}/{name}-{version}.apk`.
///
/// Only [`KeyParser::parse`] builds keys, so the architecture of every `Key`
/// has been checked against the parser's [`Architectures`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    host: String,
    repo_path: String,
    package: Package,
}

impl Key {
    /// Registry hostname, without scheme.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Slash-joined segments between the host and the architecture. Either a
    /// friendly name like `os` or a UIDP chain like `8f6d.../a1b2...`.
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    pub fn repo_segments(&self) -> impl Iterator<Item = &str> {
        self.repo_path.split('/')
    }

    pub fn arch(&self) -> &str {
        &self.package.arch
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn filename(&self) -> String {
        self.package.filename()
    }

    /// `https://{host}/{repo_path}/{arch}`
    pub fn repository_uri(&self) -> String {
        format!(
            "https://{}/{}/{}",
            self.host, self.repo_path, self.package.arch
        )
    }

    /// The key prefixed with an explicit `https` scheme.
    pub fn url(&self) -> Result<Url> {
        Url::parse(&format!("https://{self}")).map_err(|err| {
            KeyError::InvalidUrl {
                key: self.to_string(),
                reason: err.to_string(),
            }
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}-{}.apk",
            self.host, self.repo_path, self.package.arch, self.package.name, self.package.version
        )
    }
}

/// Parses key strings against a fixed set of supported architectures.
///
/// The architecture set is shared behind an [`Arc`], so cloning a parser is
/// cheap and clones may be used from any thread.
#[derive(Debug, Clone)]
pub struct KeyParser {
    architectures: Arc<Architectures>,
}

impl KeyParser {
    pub fn new(architectures: impl Into<Arc<Architectures>>) -> Self {
        Self {
            architectures: architectures.into(),
        }
    }

    pub fn architectures(&self) -> &Architectures {
        &self.architectures
    }

    /// Parses `host/repo[/repo...]/arch/name-version.apk`.
    ///
    /// No normalization happens: no case folding, no percent-decoding and no
    /// scheme stripping. For every key this accepts, `key.to_string()` gives
    /// back the input exactly.
    pub fn parse(&self, key: &str) -> Result<Key> {
        let segments: Vec<&str> = key.split('/').collect();
        if segments.len() < 4 {
            return Err(KeyError::TooFewSegments {
                key: key.to_string(),
            });
        }

        let host = segments[0];
        if host.is_empty() {
            return Err(KeyError::EmptyHost {
                key: key.to_string(),
            });
        }

        let filename = segments[segments.len() - 1];
        let arch = segments[segments.len() - 2];

        if !self.architectures.contains(arch) {
            return Err(KeyError::UnsupportedArch {
                arch: arch.to_string(),
                key: key.to_string(),
            });
        }

        let repo_path = segments[1..segments.len() - 2].join("/");
        if repo_path.is_empty() {
            return Err(KeyError::EmptyRepoPath {
                key: key.to_string(),
            });
        }

        let (name, version) = parse_filename(filename).map_err(|source| {
            KeyError::InvalidFilename {
                key: key.to_string(),
                source,
            }
        })?;

        trace!(key, host, repo_path = %repo_path, arch, name, version, "parsed key");

        Ok(Key {
            host: host.to_string(),
            repo_path,
            package: Package {
                name: name.to_string(),
                version: version.to_string(),
                arch: arch.to_string(),
            },
        })
    }
}
