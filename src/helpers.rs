//! Helper functions callable from template bodies.

use indexmap::IndexMap;
use minijinja::value::{Rest, Value};
use minijinja::ErrorKind;

/// An ordered registry of named helper functions.
///
/// The registry is handed to the template set when it is built, so every
/// template set carries its own helpers.
#[derive(Debug, Clone, Default)]
pub struct Helpers {
    functions: IndexMap<String, Value>,
}

impl Helpers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in helpers `mkSlice` and `mkMap`.
    pub fn builtin() -> Self {
        let mut helpers = Self::new();
        helpers.register("mkSlice", Value::from_function(mk_slice));
        helpers.register("mkMap", Value::from_function(mk_map));
        helpers
    }

    /// Adds a callable under `name`, replacing any helper with that name.
    ///
    /// `function` is normally built with [`Value::from_function`].
    pub fn register<N: Into<String>>(&mut self, name: N, function: Value) -> &mut Self {
        self.functions.insert(name.into(), function);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl IntoIterator for Helpers {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.into_iter()
    }
}

/// Collects its arguments into a list, in call order.
///
/// ```text
/// {% for item in mkSlice("a", "b", "c") %}{{ item }}{% endfor %}
/// ```
pub fn mk_slice(args: Rest<Value>) -> Value {
    Value::from(args.0)
}

/// Decodes a JSON object into a map, keeping the key order of the text at
/// every nesting level.
///
/// ```text
/// {% set page = mkMap('{"title": "Home", "nav": true}') %}{{ page.title }}
/// ```
///
/// # Errors
/// * `ErrorKind::InvalidOperation` if `json` is not valid JSON or is not
///   an object
pub fn mk_map(json: &str) -> Result<Value, minijinja::Error> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "mkMap expects a JSON object")
            .with_source(e)
    })?;
    Ok(Value::from_serialize(&map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mk_slice_preserves_order() {
        let value = mk_slice(Rest(vec![
            Value::from(1),
            Value::from("x"),
            Value::from(true),
        ]));

        assert_eq!(value.len(), Some(3));
        let items: Vec<Value> = value.try_iter().unwrap().collect();
        assert_eq!(items, vec![Value::from(1), Value::from("x"), Value::from(true)]);
    }

    #[test]
    fn test_mk_slice_without_arguments() {
        assert_eq!(mk_slice(Rest(vec![])).len(), Some(0));
    }

    #[test]
    fn test_mk_map_decodes_object() {
        let value = mk_map(r#"{"k":1}"#).unwrap();
        assert_eq!(value.len(), Some(1));
        assert_eq!(value.get_attr("k").unwrap(), Value::from(1));
    }

    #[test]
    fn test_mk_map_keeps_nested_key_order() {
        let value = mk_map(r#"{"o":{"z":1,"a":2,"m":{"y":0,"b":0}}}"#).unwrap();
        let nested = value.get_attr("o").unwrap();
        let keys: Vec<Value> = nested.try_iter().unwrap().collect();
        assert_eq!(keys, vec![Value::from("z"), Value::from("a"), Value::from("m")]);

        let deeper = nested.get_attr("m").unwrap();
        let keys: Vec<Value> = deeper.try_iter().unwrap().collect();
        assert_eq!(keys, vec![Value::from("y"), Value::from("b")]);
    }

    #[test]
    fn test_mk_map_rejects_invalid_json() {
        let err = mk_map("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_mk_map_rejects_non_objects() {
        assert!(mk_map("[1, 2]").is_err());
        assert!(mk_map("42").is_err());
    }

    #[test]
    fn test_builtin_helpers() {
        let helpers = Helpers::builtin();
        assert_eq!(helpers.len(), 2);
        assert!(helpers.contains("mkSlice"));
        assert!(helpers.contains("mkMap"));
        assert!(Helpers::new().is_empty());
    }
}
