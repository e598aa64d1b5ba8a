use std::collections::BTreeSet;

/// Immutable set of supported package architectures.
///
/// Built once from the configured architecture list and shared read-only.
/// Membership is an exact string match; `x86_64` and `amd64` are distinct
/// unless both are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architectures {
    inner: BTreeSet<String>,
}

impl Architectures {
    pub fn new<I, S>(architectures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: architectures.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, arch: &str) -> bool {
        self.inner.contains(arch)
    }

    /// Iterates the architectures in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Architectures {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
