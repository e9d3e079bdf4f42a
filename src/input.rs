use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ResolveError;

/// The two input shapes references are resolved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsmInput {
    Scalar(String),
    List(Vec<String>),
}

impl SsmInput {
    /// `None` for anything but a string or an array made only of strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(SsmInput::Scalar(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(SsmInput::List),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            SsmInput::Scalar(s) => Value::String(s),
            SsmInput::List(items) => Value::from(items),
        }
    }

    pub fn elements(&self) -> Vec<&str> {
        match self {
            SsmInput::Scalar(s) => vec![s.as_str()],
            SsmInput::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Applies `f` to every element, keeping shape, length and order.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        match self {
            SsmInput::Scalar(s) => SsmInput::Scalar(f(s.as_str())),
            SsmInput::List(items) => SsmInput::List(items.iter().map(|item| f(item.as_str())).collect()),
        }
    }
}

impl From<&str> for SsmInput {
    fn from(s: &str) -> Self {
        SsmInput::Scalar(s.to_string())
    }
}

impl From<String> for SsmInput {
    fn from(s: String) -> Self {
        SsmInput::Scalar(s)
    }
}

impl From<Vec<String>> for SsmInput {
    fn from(items: Vec<String>) -> Self {
        SsmInput::List(items)
    }
}

/// Decodes a resolved value into the caller's type.
pub fn reshape<T: DeserializeOwned>(value: Value) -> Result<T, ResolveError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn only_strings_and_string_lists_are_inputs() {
        assert_eq!(SsmInput::from_value(&json!("a")), Some(SsmInput::Scalar("a".into())));
        assert_eq!(
            SsmInput::from_value(&json!(["a", "b"])),
            Some(SsmInput::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(SsmInput::from_value(&json!([])), Some(SsmInput::List(vec![])));
        assert_eq!(SsmInput::from_value(&json!(["a", 1])), None);
        assert_eq!(SsmInput::from_value(&json!({"k": "v"})), None);
        assert_eq!(SsmInput::from_value(&json!(42)), None);
        assert_eq!(SsmInput::from_value(&Value::Null), None);
    }

    #[test]
    fn map_keeps_order_and_length() {
        let input = SsmInput::from(vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        let upper = input.map(|s| s.to_uppercase());
        assert_eq!(upper.elements(), vec!["X", "Y", "Z"]);
        assert_eq!(upper.into_value(), json!(["X", "Y", "Z"]));
    }

    #[test]
    fn reshape_fails_on_mismatched_shape() {
        let list: Vec<String> = reshape(json!(["a"])).unwrap();
        assert_eq!(list, vec!["a".to_string()]);

        match reshape::<Vec<String>>(json!("a")) {
            Err(ResolveError::Reshape(_)) => {}
            other => panic!("expected a reshape error, got {:?}", other),
        }
        assert!(reshape::<String>(json!(["a"])).is_err());
    }
}
