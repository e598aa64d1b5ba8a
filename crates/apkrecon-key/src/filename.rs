use crate::error::FilenameError;

const APK_SUFFIX: &str = ".apk";

/// Splits an `.apk` filename into `(name, version)`.
///
/// The split happens at the second-to-last dash, so the version is always the
/// last two dash-delimited groups (`{upstream}-r{revision}`) and the name keeps
/// any dashes or version-like pieces of its own: `python-3.11-3.11.8-r0.apk`
/// yields `("python-3.11", "3.11.8-r0")`.
///
/// The split is deterministic rather than semantically checked. A package
/// whose name ends in something that looks like a version group cannot be
/// told apart from one whose version has an extra group.
pub fn parse_filename(filename: &str) -> Result<(&str, &str), FilenameError> {
    let name_version =
        filename
            .strip_suffix(APK_SUFFIX)
            .ok_or_else(|| FilenameError::MissingSuffix {
                filename: filename.to_string(),
            })?;

    let mut dashes = name_version.rmatch_indices('-').map(|(idx, _)| idx);
    let split = match (dashes.next(), dashes.next()) {
        (Some(_), Some(idx)) => idx,
        _ => {
            return Err(FilenameError::TooFewDashes {
                filename: filename.to_string(),
            })
        }
    };

    let (name, version) = (&name_version[..split], &name_version[split + 1..]);

    if name.is_empty() {
        return Err(FilenameError::EmptyName {
            filename: filename.to_string(),
        });
    }
    if version.is_empty() {
        return Err(FilenameError::EmptyVersion {
            filename: filename.to_string(),
        });
    }

    Ok((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_filename() {
        assert_eq!(
            parse_filename("openssl-3.1.0-r5.apk").unwrap(),
            ("openssl", "3.1.0-r5")
        );
    }

    #[test]
    fn test_name_with_dashes() {
        assert_eq!(
            parse_filename("kubectl-bash-completion-1.29.5-r0.apk").unwrap(),
            ("kubectl-bash-completion", "1.29.5-r0")
        );
    }

    #[test]
    fn test_name_with_version_like_segment() {
        assert_eq!(
            parse_filename("python-3.11-3.11.8-r0.apk").unwrap(),
            ("python-3.11", "3.11.8-r0")
        );
    }

    #[test]
    fn test_trailing_numeric_name_segment() {
        // `foo-1` cannot be recognised as a name; the fixed rule wins.
        assert_eq!(
            parse_filename("foo-1-2.0-r0.apk").unwrap(),
            ("foo-1", "2.0-r0")
        );
    }

    #[test]
    fn test_one_dash_rejected() {
        assert_eq!(
            parse_filename("glibc-2.42.apk"),
            Err(FilenameError::TooFewDashes {
                filename: "glibc-2.42.apk".to_string()
            })
        );
    }

    #[test]
    fn test_missing_suffix() {
        assert!(matches!(
            parse_filename("glibc-2.42-r0.tar.gz"),
            Err(FilenameError::MissingSuffix { .. })
        ));
        assert!(matches!(
            parse_filename(""),
            Err(FilenameError::MissingSuffix { .. })
        ));
        assert!(matches!(
            parse_filename("glibc-2.42-r0.APK"),
            Err(FilenameError::MissingSuffix { .. })
        ));
    }

    #[test]
    fn test_empty_halves() {
        assert!(matches!(
            parse_filename("-2.42-r0.apk"),
            Err(FilenameError::EmptyName { .. })
        ));
        assert!(matches!(
            parse_filename("--.apk"),
            Err(FilenameError::EmptyName { .. })
        ));
        assert!(matches!(
            parse_filename("glibc-r0-.apk"),
            Ok(("glibc", "r0-"))
        ));
    }

    #[test]
    fn test_deterministic() {
        let first = parse_filename("py3-foo-bar-1.0-r2.apk");
        let second = parse_filename("py3-foo-bar-1.0-r2.apk");
        assert_eq!(first, second);
        assert_eq!(first.unwrap(), ("py3-foo-bar", "1.0-r2"));
    }
}
