//! Package keys for APK packages hosted in container-registry-style repositories.
//!
//! A key looks like `apk.cgr.dev/os/x86_64/openssl-3.1.0-r5.apk`. This crate
//! parses keys into [`Key`] records, renders them back, validates the
//! architecture segment against a configured [`Architectures`] set and derives
//! [`DigestRef`]s used for cross-repository status lookups.

pub mod arch;
pub mod digest;
pub mod error;
pub mod filename;
pub mod key;

pub use arch::Architectures;
pub use digest::{
    decode_index_checksum, status_digest, status_digest_with, DigestRef, PackageRecord,
};
pub use error::{FilenameError, KeyError, Result};
pub use filename::parse_filename;
pub use key::{Key, KeyParser, Package};
