/// Trims the patch component off a semver string, e.g. `"1.29.2"` → `"1.29"`.
///
/// Returns `None` when the input does not start with `major.minor.patch`
/// digits, so callers can skip release-gated questions instead of matching
/// against garbage.
pub fn trim_patch_version(full: &str) -> Option<&str> {
    let (major, rest) = full.split_once('.')?;
    let (minor, rest) = rest.split_once('.')?;
    if major.is_empty() || minor.is_empty() || rest.is_empty() {
        return None;
    }
    if !major.bytes().all(|b| b.is_ascii_digit()) || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !rest.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(&full[..major.len() + 1 + minor.len()])
}

#[cfg(test)]
mod tests {
    use super::trim_patch_version;

    #[test]
    fn trims_patch_component() {
        assert_eq!(trim_patch_version("1.29.2"), Some("1.29"));
        assert_eq!(trim_patch_version("0.4.0"), Some("0.4"));
        assert_eq!(trim_patch_version("10.0.12-beta"), Some("10.0"));
    }

    #[test]
    fn rejects_malformed_versions() {
        assert_eq!(trim_patch_version("1.29"), None);
        assert_eq!(trim_patch_version("one.two.three"), None);
        assert_eq!(trim_patch_version(""), None);
        assert_eq!(trim_patch_version("1..2"), None);
    }
}
