/// Canonical lookup form of a domain name: trimmed, ASCII-lowercased and
/// terminated by a single trailing dot.
pub fn to_fqdn(name: &str) -> String {
    let trimmed = name.trim();
    let mut fqdn = String::with_capacity(trimmed.len() + 1);
    fqdn.push_str(trimmed);
    fqdn.make_ascii_lowercase();
    if !fqdn.ends_with('.') {
        fqdn.push('.');
    }
    fqdn
}

/// Compares two names the way DNS does: case-insensitive, trailing dot optional.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fqdn_appends_dot() {
        assert_eq!(to_fqdn("example.com"), "example.com.");
    }

    #[test]
    fn test_to_fqdn_keeps_single_dot() {
        assert_eq!(to_fqdn("example.com."), "example.com.");
    }

    #[test]
    fn test_to_fqdn_lowercases_and_trims() {
        assert_eq!(to_fqdn("  WWW.Example.COM "), "www.example.com.");
    }

    #[test]
    fn test_to_fqdn_root() {
        assert_eq!(to_fqdn("."), ".");
        assert_eq!(to_fqdn(""), ".");
    }

    #[test]
    fn test_names_equal_ignores_case_and_dot() {
        assert!(names_equal("Example.com.", "example.COM"));
        assert!(!names_equal("a.example.com", "example.com"));
    }
}
