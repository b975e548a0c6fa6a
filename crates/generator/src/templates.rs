//! Template loading and YAML filters

use std::collections::HashMap;
use swagger_actions_common::{GeneratorError, Result};
use tera::{Tera, Value};

/// Name the workflow template is registered under
pub const WORKFLOW_TEMPLATE: &str = "workflow.yml";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("yaml_quote", yaml_quote_filter);
    tera.register_filter("yaml_key", yaml_key_filter);

    tera.add_raw_template(
        WORKFLOW_TEMPLATE,
        include_str!("../templates/workflow.yml.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load workflow.yml template: {}", e))
    })?;

    Ok(tera)
}

/// Single-quoted YAML scalar on one line
pub fn yaml_quote(s: &str) -> String {
    let single_line = s
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    format!("'{}'", single_line.replace('\'', "''"))
}

/// Mapping key, quoted unless it reads back as the same plain string
pub fn yaml_key(s: &str) -> String {
    if is_plain_key(s) {
        s.to_string()
    } else {
        yaml_quote(s)
    }
}

fn is_plain_key(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !matches!(
            s.to_ascii_lowercase().as_str(),
            "true" | "false" | "null" | "yes" | "no" | "on" | "off"
        )
}

fn yaml_quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("yaml_quote filter expects a string"))?;

    Ok(Value::String(yaml_quote(s)))
}

fn yaml_key_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("yaml_key filter expects a string"))?;

    Ok(Value::String(yaml_key(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        assert!(tera.get_template_names().any(|n| n == WORKFLOW_TEMPLATE));
    }

    #[test]
    fn test_yaml_quote_doubles_single_quotes() {
        assert_eq!(yaml_quote("it's"), "'it''s'");
        assert_eq!(yaml_quote(""), "''");
    }

    #[test]
    fn test_yaml_quote_collapses_line_breaks() {
        assert_eq!(
            yaml_quote("First line.\n\n  Second line.\r\nThird"),
            "'First line. Second line. Third'"
        );
    }

    #[test]
    fn test_yaml_key() {
        assert_eq!(yaml_key("id"), "id");
        assert_eq!(yaml_key("customer.email"), "customer.email");
        assert_eq!(yaml_key("X-Request-Id"), "X-Request-Id");
        assert_eq!(yaml_key("on"), "'on'");
        assert_eq!(yaml_key("123"), "'123'");
        assert_eq!(yaml_key("a b"), "'a b'");
        assert_eq!(yaml_key("filter[name]"), "'filter[name]'");
    }
}
