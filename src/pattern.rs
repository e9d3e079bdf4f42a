use regex::Regex;

use crate::errors::ResolveError;

/// Characters allowed in a referenced parameter name.
const NAME_CHARS: &str = "[A-Za-z0-9_/]+";

/// Builds the matcher for `{{ ssm:<name> }}` references.
///
/// Without a name the pattern matches any reference and captures the
/// parameter name in the `name` group. With a name it only matches
/// references to that exact parameter, whatever their spacing. The name is
/// inserted as-is, so one that breaks the expression is reported as
/// `ResolveError::PatternCompile`.
pub fn reference_pattern(name: Option<&str>) -> Result<Regex, ResolveError> {
    let expr = match name {
        None => format!(r"\{{\{{ *ssm:(?P<name>{}) *\}}\}}", NAME_CHARS),
        Some(name) => format!(r"\{{\{{ *ssm:{} *\}}\}}", name),
    };
    Regex::new(&expr).map_err(|err| {
        debug!("Invalid regular expression used to resolve ssm parameters. Error: {}", err);
        ResolveError::from(err)
    })
}

/// Name captured by an unscoped pattern in a raw reference.
pub fn parameter_name<'t>(pattern: &Regex, reference: &'t str) -> Option<&'t str> {
    pattern
        .captures(reference)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_matches_any_spacing() {
        let pattern = reference_pattern(None).unwrap();
        assert!(pattern.is_match("{{ssm:/app/db/host}}"));
        assert!(pattern.is_match("{{  ssm:/app/db/host   }}"));
        assert!(pattern.is_match("{{ssm:plain_name01}}"));
        assert!(!pattern.is_match("{{ssm:}}"));
        assert!(!pattern.is_match("{{ssm:/app-db}}"));
        assert!(!pattern.is_match("{{ ssm: /app }}"));
        assert!(!pattern.is_match("{ssm:/app}"));
    }

    #[test]
    fn captures_name_behind_leading_spaces() {
        let pattern = reference_pattern(None).unwrap();
        assert_eq!(parameter_name(&pattern, "{{    ssm:/a/b }}"), Some("/a/b"));
        assert_eq!(parameter_name(&pattern, "{{ssm:x}}"), Some("x"));
        assert_eq!(parameter_name(&pattern, "no reference"), None);
    }

    #[test]
    fn scoped_matches_exact_name_only() {
        let pattern = reference_pattern(Some("/a")).unwrap();
        assert!(pattern.is_match("{{ssm:/a}}"));
        assert!(pattern.is_match("{{ ssm:/a }}"));
        assert!(!pattern.is_match("{{ssm:/ab}}"));
        assert!(!pattern.is_match("{{ssm:/b}}"));
    }

    #[test]
    fn scoped_reports_malformed_name() {
        match reference_pattern(Some("/a(")) {
            Err(ResolveError::PatternCompile(_)) => {}
            other => panic!("expected a compile error, got {:?}", other),
        }
    }
}
