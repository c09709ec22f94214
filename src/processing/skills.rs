//! Skill field normalization and numeric coercion
//!
//! Raw freelancer records come from a store that is loose about shapes: the
//! skills column may hold an array, a `;`/`,` delimited string, or nothing,
//! and numeric columns may hold strings or nulls. Everything here is total:
//! no input makes these functions fail.

use serde::Deserialize;
use serde_json::Value;

/// Skill column as it arrives from the store
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum SkillField {
    List(Vec<String>),
    Text(String),
    #[default]
    Missing,
}

impl From<Value> for SkillField {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => SkillField::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
            Value::String(s) => SkillField::Text(s),
            Value::Number(n) => SkillField::Text(n.to_string()),
            Value::Bool(b) => SkillField::Text(b.to_string()),
            Value::Null | Value::Object(_) => SkillField::Missing,
        }
    }
}

impl From<&str> for SkillField {
    fn from(text: &str) -> Self {
        SkillField::Text(text.to_string())
    }
}

impl From<Vec<&str>> for SkillField {
    fn from(items: Vec<&str>) -> Self {
        SkillField::List(items.into_iter().map(str::to_string).collect())
    }
}

impl SkillField {
    pub fn is_missing(&self) -> bool {
        matches!(self, SkillField::Missing)
    }
}

/// Canonical token string: lowercase, delimiters replaced, single spaces
pub fn to_token_string(field: &SkillField) -> String {
    let joined = match field {
        SkillField::Missing => return String::new(),
        SkillField::List(items) => items
            .iter()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join(" "),
        SkillField::Text(text) => text.to_lowercase().replace([';', ','], " "),
    };

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Human-readable skills for responses
pub fn to_display_string(field: &SkillField) -> String {
    match field {
        SkillField::List(items) => items.join(", "),
        SkillField::Text(text) => text.clone(),
        SkillField::Missing => String::new(),
    }
}

/// Numeric coercion that drops anything that is not a finite number
pub fn to_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub fn to_number_or_default(value: &Value, default: f64) -> f64 {
    to_number(value).unwrap_or(default)
}

/// Accepts string or numeric identifiers; integer ids keep their integer form
pub fn to_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_identifier(n)),
        _ => None,
    }
}

// Whole floats print as integers so `7.0` and `7` name the same freelancer
fn number_identifier(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
            format!("{}", v as i64)
        }
        _ => n.to_string(),
    }
}

/// Name shown in responses; strings pass through unchanged
pub fn to_display_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_is_joined_lowercase() {
        let field = SkillField::from(vec!["Python", "SQL"]);
        assert_eq!(to_token_string(&field), "python sql");
    }

    #[test]
    fn test_delimited_text() {
        assert_eq!(to_token_string(&"Python; SQL,Django".into()), "python sql django");
        assert_eq!(to_token_string(&"python; sql".into()), "python sql");
    }

    #[test]
    fn test_missing_and_empty() {
        assert_eq!(to_token_string(&SkillField::Missing), "");
        assert_eq!(to_token_string(&"".into()), "");
        assert_eq!(to_token_string(&" ; , ".into()), "");
        assert_eq!(to_token_string(&SkillField::List(vec![])), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            SkillField::from("  React;Node.js ,  TypeScript "),
            SkillField::from(vec!["Machine Learning", "  NLP"]),
            SkillField::from("c++"),
        ];

        for input in inputs {
            let once = to_token_string(&input);
            let twice = to_token_string(&SkillField::Text(once.clone()));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_deserialize_any_shape() {
        let list: SkillField = serde_json::from_value(json!(["Rust", 3, null])).unwrap();
        assert_eq!(list, SkillField::List(vec!["Rust".to_string(), "3".to_string()]));

        let text: SkillField = serde_json::from_value(json!("go;rust")).unwrap();
        assert_eq!(text, SkillField::Text("go;rust".to_string()));

        let missing: SkillField = serde_json::from_value(json!(null)).unwrap();
        assert!(missing.is_missing());

        let object: SkillField = serde_json::from_value(json!({"a": 1})).unwrap();
        assert!(object.is_missing());
    }

    #[test]
    fn test_display_string() {
        assert_eq!(to_display_string(&vec!["Python", "SQL"].into()), "Python, SQL");
        assert_eq!(to_display_string(&"python;sql".into()), "python;sql");
        assert_eq!(to_display_string(&SkillField::Missing), "");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(to_number_or_default(&json!(4.5), 0.0), 4.5);
        assert_eq!(to_number_or_default(&json!("3"), 0.0), 3.0);
        assert_eq!(to_number_or_default(&json!(" 2.5 "), 0.0), 2.5);
        assert_eq!(to_number_or_default(&json!("five"), 0.0), 0.0);
        assert_eq!(to_number_or_default(&json!(null), 0.0), 0.0);
        assert_eq!(to_number_or_default(&json!(true), 0.0), 0.0);
        assert_eq!(to_number_or_default(&json!("NaN"), 0.0), 0.0);
        assert_eq!(to_number_or_default(&json!("inf"), 1.0), 1.0);
        assert_eq!(to_number(&json!([1])), None);
    }

    #[test]
    fn test_identifier_coercion() {
        assert_eq!(to_identifier(&json!(42)), Some("42".to_string()));
        assert_eq!(to_identifier(&json!(" abc-1 ")), Some("abc-1".to_string()));
        assert_eq!(to_identifier(&json!("")), None);
        assert_eq!(to_identifier(&json!(null)), None);
        assert_eq!(to_identifier(&json!(1.0)), Some("1".to_string()));
        assert_eq!(to_identifier(&json!(-3.0)), Some("-3".to_string()));
        assert_eq!(to_identifier(&json!(1.5)), Some("1.5".to_string()));
    }

    #[test]
    fn test_display_name_is_verbatim() {
        assert_eq!(to_display_name(&json!(" ana ")), " ana ");
        assert_eq!(to_display_name(&json!(null)), "");
        assert_eq!(to_display_name(&json!(12)), "12");
    }
}
