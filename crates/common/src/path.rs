//! URL path templates such as `/widgets/{id}`

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// A path template with `{param}` placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate<'a>(&'a str);

impl<'a> PathTemplate<'a> {
    pub fn new(path: &'a str) -> Self {
        Self(path)
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> Vec<&'a str> {
        placeholder_pattern()
            .captures_iter(self.0)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Rewrite every placeholder with `replace(name)`
    pub fn substitute<F>(&self, mut replace: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        placeholder_pattern()
            .replace_all(self.0, |caps: &Captures| replace(&caps[1]))
            .into_owned()
    }

    /// Workflow file stem for an operation without an `operationId`
    ///
    /// `get` + `/widgets/{id}` becomes `get--widgets-{id}`.
    pub fn synthesized_operation_id(&self, method: &str) -> String {
        format!("{}-{}", method, self.0.replace('/', "-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let path = PathTemplate::new("/orgs/{org}/repos/{repo}/issues");
        assert_eq!(path.placeholders(), vec!["org", "repo"]);
        assert!(PathTemplate::new("/health").placeholders().is_empty());
    }

    #[test]
    fn test_substitute() {
        let path = PathTemplate::new("/widgets/{id}");
        let rewritten = path.substitute(|name| format!("${{{{ inputs.{} }}}}", name));
        assert_eq!(rewritten, "/widgets/${{ inputs.id }}");
    }

    #[test]
    fn test_synthesized_operation_id() {
        let path = PathTemplate::new("/widgets/{id}");
        assert_eq!(path.synthesized_operation_id("get"), "get--widgets-{id}");
    }
}
