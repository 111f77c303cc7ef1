//! Shape probes over untyped payloads.
//!
//! The upstream model answers with whatever JSON it likes, so everything in
//! here works against `serde_json::Value` and reports shape facts without
//! ever panicking on a missing field.

use serde_json::{Map, Value};

/// Bilingual stat-key aliases folded into a canonical English key set once,
/// right after decode. The matchers and renderers only ever see the
/// canonical names.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("mínimo", "min"),
    ("máximo", "max"),
    ("média", "mean"),
];

/// Fold aliased keys into their canonical form, at every depth.
///
/// When a record carries both an alias and its canonical key, the first one
/// seen wins; nothing is ever overwritten.
pub fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let key = alias_target(&key).map(str::to_string).unwrap_or(key);
                out.entry(key).or_insert(canonicalize_keys(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

fn alias_target(key: &str) -> Option<&'static str> {
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// View an array-of-objects payload as a record list.
///
/// Returns `None` when the payload is not an array or any element is not an
/// object. An empty array yields an empty record list.
pub fn as_records(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    value.as_array()?.iter().map(Value::as_object).collect()
}

/// Whether a value is a JSON integer.
pub fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some() || value.as_u64().is_some()
}

/// Numeric view of a value, if it is a JSON number.
pub fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Column roles inferred across every record of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Columns whose every present value is a string.
    pub categorical: Vec<String>,
    /// Columns whose every present value is a JSON number.
    pub numeric: Vec<String>,
}

impl ColumnProfile {
    /// A generic bar chart needs at least one column of each role.
    pub fn is_chartable(&self) -> bool {
        !self.categorical.is_empty() && !self.numeric.is_empty()
    }
}

/// Infer column roles across all records, in first-seen key order.
///
/// A column observed with mixed kinds, or with nested values, belongs to
/// neither role. Numeric-looking strings stay categorical; only JSON numbers
/// count as numeric.
pub fn infer_columns(records: &[&Map<String, Value>]) -> ColumnProfile {
    #[derive(Clone, Copy, PartialEq)]
    enum Role {
        Numeric,
        Categorical,
        Excluded,
    }

    let mut order: Vec<String> = Vec::new();
    let mut roles: std::collections::HashMap<String, Role> = std::collections::HashMap::new();

    for record in records {
        for (key, value) in record.iter() {
            let observed = match value {
                Value::Number(_) => Role::Numeric,
                Value::String(_) => Role::Categorical,
                _ => Role::Excluded,
            };
            match roles.get(key.as_str()).copied() {
                None => {
                    order.push(key.clone());
                    roles.insert(key.clone(), observed);
                }
                Some(current) if current != observed => {
                    roles.insert(key.clone(), Role::Excluded);
                }
                Some(_) => {}
            }
        }
    }

    let mut profile = ColumnProfile::default();
    for key in order {
        match roles[&key] {
            Role::Numeric => profile.numeric.push(key),
            Role::Categorical => profile.categorical.push(key),
            Role::Excluded => {}
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonicalize_folds_portuguese_stat_keys() {
        let value = canonicalize_keys(json!({
            "Tempo": {"mínimo": 0, "máximo": 100, "média": 50.0}
        }));
        let stats = value.get("Tempo").unwrap();
        assert_eq!(stats.get("min"), Some(&json!(0)));
        assert_eq!(stats.get("max"), Some(&json!(100)));
        assert_eq!(stats.get("mean"), Some(&json!(50.0)));
        assert!(stats.get("mínimo").is_none());
    }

    #[test]
    fn canonicalize_recurses_into_arrays() {
        let value = canonicalize_keys(json!([{"média": 3}]));
        assert_eq!(value[0].get("mean"), Some(&json!(3)));
    }

    #[test]
    fn canonicalize_never_overwrites_an_existing_key() {
        let value = canonicalize_keys(json!({"v": {"min": 1, "mínimo": 2}}));
        assert_eq!(value["v"].get("min"), Some(&json!(1)));
        assert!(value["v"].get("mínimo").is_none());
    }

    #[test]
    fn as_records_rejects_mixed_arrays() {
        assert!(as_records(&json!([{"a": 1}, 2])).is_none());
        assert!(as_records(&json!("text")).is_none());
        assert_eq!(as_records(&json!([])).unwrap().len(), 0);
    }

    #[test]
    fn infer_columns_splits_roles_in_key_order() {
        let rows = json!([
            {"produto": "A", "total": 10, "nota": 4.5},
            {"produto": "B", "total": 20, "nota": 3.0}
        ]);
        let records = as_records(&rows).unwrap();
        let profile = infer_columns(&records);
        assert_eq!(profile.categorical, vec!["produto"]);
        assert_eq!(profile.numeric, vec!["total", "nota"]);
        assert!(profile.is_chartable());
    }

    #[test]
    fn infer_columns_excludes_mixed_and_nested_values() {
        let rows = json!([
            {"a": "x", "b": 1, "c": {"nested": true}},
            {"a": 2, "b": 2}
        ]);
        let records = as_records(&rows).unwrap();
        let profile = infer_columns(&records);
        assert!(profile.categorical.is_empty());
        assert_eq!(profile.numeric, vec!["b"]);
        assert!(!profile.is_chartable());
    }

    #[test]
    fn numeric_strings_stay_categorical() {
        let rows = json!([{"codigo": "123", "valor": 1.0}]);
        let records = as_records(&rows).unwrap();
        let profile = infer_columns(&records);
        assert_eq!(profile.categorical, vec!["codigo"]);
    }
}
