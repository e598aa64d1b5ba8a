//! Status digests.
//!
//! The status store keys package records by a digest reference of the form
//! `apk.cgr.dev/__@sha256:{hash}`. Only the hash identifies anything; the host
//! and repository are fixed placeholders that give the reference a valid shape
//! and are never read back as locations.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{
    error::{KeyError, Result},
    key::Package,
};

pub const STATUS_HOST: &str = "apk.cgr.dev";
pub const STATUS_REPOSITORY: &str = "__";

/// Prefix of APKINDEX `C:` checksums: `Q1` followed by base64 SHA-1.
const INDEX_CHECKSUM_PREFIX: &str = "Q1";
const SHA1_LEN: usize = 20;

/// A digest reference: `{registry}/{repository}@sha256:{digest}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DigestRef {
    pub registry: String,
    pub repository: String,
    /// Lowercase hex SHA-256, 64 characters.
    pub digest: String,
}

impl DigestRef {
    /// The repository part without the digest, `{registry}/{repository}`.
    pub fn context(&self) -> String {
        format!("{}/{}", self.registry, self.repository)
    }
}

impl fmt::Display for DigestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@sha256:{}",
            self.registry, self.repository, self.digest
        )
    }
}

/// A package as known to a repository index, optionally with its content checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub arch: String,
    pub checksum: Option<Vec<u8>>,
}

impl From<&Package> for PackageRecord {
    fn from(package: &Package) -> Self {
        Self {
            name: package.name().to_string(),
            version: package.version().to_string(),
            arch: package.arch().to_string(),
            checksum: None,
        }
    }
}

impl PackageRecord {
    pub fn with_checksum(mut self, checksum: impl Into<Vec<u8>>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// Sets the checksum from an APKINDEX `C:` value such as
    /// `Q1qvTGHdzF6KLavt4PO0gs2a6pQ00=`.
    pub fn with_index_checksum(self, checksum: &str) -> Result<Self> {
        Ok(self.with_checksum(decode_index_checksum(checksum)?))
    }

    pub fn status_digest(&self) -> Result<DigestRef> {
        status_digest(self)
    }
}

/// Decodes an APKINDEX `Q1` checksum into the raw SHA-1 bytes.
pub fn decode_index_checksum(checksum: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &str| {
        KeyError::InvalidChecksum {
            checksum: checksum.to_string(),
            reason: reason.to_string(),
        }
    };

    let encoded = checksum
        .strip_prefix(INDEX_CHECKSUM_PREFIX)
        .ok_or_else(|| invalid("missing Q1 prefix"))?;
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| invalid(&err.to_string()))?;

    if bytes.len() != SHA1_LEN {
        return Err(invalid(&format!(
            "expected {SHA1_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    Ok(bytes)
}

/// Derives the status digest of `pkg` using the default placeholder host and
/// repository.
pub fn status_digest(pkg: &PackageRecord) -> Result<DigestRef> {
    status_digest_with(pkg, STATUS_HOST, STATUS_REPOSITORY)
}

/// Derives the status digest of `pkg`: SHA-256 of the hex-encoded checksum.
pub fn status_digest_with(
    pkg: &PackageRecord,
    registry: &str,
    repository: &str,
) -> Result<DigestRef> {
    let checksum = pkg
        .checksum
        .as_deref()
        .ok_or_else(|| KeyError::MissingChecksum {
            package: format!("{}-{}", pkg.name, pkg.version),
        })?;

    let mut hasher = Sha256::new();
    hasher.update(hex::encode(checksum).as_bytes());

    Ok(DigestRef {
        registry: registry.to_string(),
        repository: repository.to_string(),
        digest: hex::encode(hasher.finalize()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PackageRecord {
        PackageRecord {
            name: "glibc".to_string(),
            version: "2.42-r0".to_string(),
            arch: "x86_64".to_string(),
            checksum: None,
        }
    }

    #[test]
    fn test_status_digest() {
        let pkg = record().with_checksum(vec![0xde, 0xad, 0xbe, 0xef]);
        let digest = status_digest(&pkg).unwrap();

        assert_eq!(digest.registry, "apk.cgr.dev");
        assert_eq!(digest.repository, "__");
        assert_eq!(
            digest.digest,
            "2baf1f40105d9501fe319a8ec463fdf4325a2a5df445adf3f572f626253678c9"
        );
        assert_eq!(
            digest.to_string(),
            "apk.cgr.dev/__@sha256:2baf1f40105d9501fe319a8ec463fdf4325a2a5df445adf3f572f626253678c9"
        );
        assert_eq!(digest.context(), "apk.cgr.dev/__");
    }

    #[test]
    fn test_status_digest_is_deterministic() {
        let pkg = record().with_checksum(vec![1, 2, 3]);
        assert_eq!(pkg.status_digest().unwrap(), pkg.status_digest().unwrap());

        let other = record().with_checksum(vec![1, 2, 4]);
        assert_ne!(
            pkg.status_digest().unwrap().digest,
            other.status_digest().unwrap().digest
        );
    }

    #[test]
    fn test_status_digest_ignores_package_identity() {
        let a = record().with_checksum(vec![9; 20]);
        let mut b = a.clone();
        b.name = "musl".to_string();
        b.arch = "aarch64".to_string();
        assert_eq!(a.status_digest().unwrap(), b.status_digest().unwrap());
    }

    #[test]
    fn test_missing_checksum() {
        let result = status_digest(&record());
        assert_eq!(
            result,
            Err(KeyError::MissingChecksum {
                package: "glibc-2.42-r0".to_string()
            })
        );
    }

    #[test]
    fn test_status_digest_with_custom_placeholder() {
        let pkg = record().with_checksum(vec![0xde, 0xad, 0xbe, 0xef]);
        let digest = status_digest_with(&pkg, "status.example", "placeholder").unwrap();
        assert!(digest
            .to_string()
            .starts_with("status.example/placeholder@sha256:2baf1f40"));
    }

    #[test]
    fn test_index_checksum() {
        let pkg = record()
            .with_index_checksum("Q1qvTGHdzF6KLavt4PO0gs2a6pQ00=")
            .unwrap();

        assert_eq!(
            hex::encode(pkg.checksum.as_deref().unwrap()),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
        assert_eq!(
            pkg.status_digest().unwrap().digest,
            "48e0954096864b1bfbd37e84f954952ddcbde8b6a94373b7c17bae49e4e09c65"
        );
    }

    #[test]
    fn test_invalid_index_checksum() {
        for input in ["qvTGHdzF6KLavt4PO0gs2a6pQ00=", "Q1!!!", "Q1AAAA"] {
            assert!(matches!(
                decode_index_checksum(input),
                Err(KeyError::InvalidChecksum { .. })
            ));
        }
    }
}
