//! `piper capabilities`: show the capability table for a value

use crate::run::parse_value;

pub fn list(raw: &str) -> Vec<&'static str> {
    parse_value(raw).capabilities()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_kind_and_common_capabilities() {
        let names = list("\"text\"");
        assert!(names.contains(&"upcase"));
        assert!(names.contains(&"to_s"));
        assert!(!names.contains(&"map"));

        let names = list("[1, 2]");
        assert!(names.contains(&"map"));
    }
}
