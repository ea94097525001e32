//! Domain name handling

/// Strip the root-zone dot from a fully-qualified domain name.
///
/// `_acme-challenge.example.com.` becomes `_acme-challenge.example.com`;
/// names without a trailing dot are returned unchanged. Only one dot is
/// removed, so `a.b..` becomes `a.b.`.
#[must_use]
pub fn normalize_fqdn(fqdn: &str) -> &str {
    fqdn.strip_suffix('.').unwrap_or(fqdn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_root_dot() {
        assert_eq!(
            normalize_fqdn("_acme-challenge.example.com."),
            "_acme-challenge.example.com"
        );
    }

    #[test]
    fn test_leaves_relative_name_alone() {
        assert_eq!(
            normalize_fqdn("_acme-challenge.example.com"),
            "_acme-challenge.example.com"
        );
    }

    #[test]
    fn test_inner_dots_untouched() {
        assert_eq!(normalize_fqdn("a.b.c."), "a.b.c");
    }

    #[test]
    fn test_empty_and_root() {
        assert_eq!(normalize_fqdn(""), "");
        assert_eq!(normalize_fqdn("."), "");
    }

    #[test]
    fn test_strips_only_one_dot() {
        assert_eq!(normalize_fqdn("a.b.."), "a.b.");
        assert_eq!(normalize_fqdn("example.com.."), "example.com.");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_fqdn("example.org.");
        assert_eq!(normalize_fqdn(once), once);
    }
}
