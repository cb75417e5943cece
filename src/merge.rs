use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::SchemafigError;
use crate::types::KeyPath;

/// Deep-merge `overlay` into `base`, in place.
///
/// Keys missing from `base` are moved over as-is. If both sides hold a mapping
/// for the same key, recurse. If both hold non-mappings, `overlay` wins.
/// A mapping on one side and a scalar or sequence on the other is a
/// [`MergeConflict`](SchemafigError::MergeConflict); keys merged before the
/// conflict stay merged.
pub fn deep_merge(
    base: &mut Map<String, Value>,
    overlay: Map<String, Value>,
) -> Result<(), SchemafigError> {
    merge_at(base, overlay, &KeyPath::default())
}

fn merge_at(
    base: &mut Map<String, Value>,
    overlay: Map<String, Value>,
    at: &KeyPath,
) -> Result<(), SchemafigError> {
    for (key, overlay_val) in overlay {
        let path = at.child(&key);
        match base.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(overlay_val);
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), overlay_val) {
                (Value::Object(base_tbl), Value::Object(overlay_tbl)) => {
                    merge_at(base_tbl, overlay_tbl, &path)?;
                }
                (Value::Object(_), _) | (_, Value::Object(_)) => {
                    return Err(SchemafigError::MergeConflict { path });
                }
                (base_val, overlay_val) => {
                    *base_val = overlay_val;
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn sample() -> Map<String, Value> {
        table(json!({"foo": 1, "bar": 2, "d": {"1": 1, "2": 2}}))
    }

    #[test]
    fn empty_overlay_leaves_base_unchanged() {
        let mut base = sample();
        deep_merge(&mut base, Map::new()).unwrap();
        assert_eq!(base, sample());
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let mut base = sample();
        deep_merge(&mut base, table(json!({"foo": 2}))).unwrap();
        assert_eq!(base["foo"], json!(2));
        assert_eq!(base["bar"], json!(2));
    }

    #[test]
    fn nested_tables_recurse() {
        let mut base = sample();
        deep_merge(&mut base, table(json!({"d": {"1": 11, "3": 33}}))).unwrap();
        assert_eq!(base["d"], json!({"1": 11, "2": 2, "3": 33}));
    }

    #[test]
    fn disjoint_keys_merge() {
        let mut base = table(json!({"host": "localhost"}));
        deep_merge(&mut base, table(json!({"port": 3000}))).unwrap();
        assert_eq!(base, table(json!({"host": "localhost", "port": 3000})));
    }

    #[test]
    fn sequences_are_replaced_not_concatenated() {
        let mut base = table(json!({"ts": [1, 2]}));
        deep_merge(&mut base, table(json!({"ts": [3]}))).unwrap();
        assert_eq!(base["ts"], json!([3]));
    }

    #[test]
    fn scalar_over_mapping_is_a_conflict() {
        let mut base = table(json!({"database": {"url": "x"}}));
        let err = deep_merge(&mut base, table(json!({"database": "flat"}))).unwrap_err();
        match err {
            SchemafigError::MergeConflict { path } => assert_eq!(path.to_string(), "database"),
            other => panic!("expected MergeConflict, got {other:?}"),
        }
    }

    #[test]
    fn mapping_over_scalar_reports_nested_path() {
        let mut base = table(json!({"a": {"b": 1}}));
        let err = deep_merge(&mut base, table(json!({"a": {"b": {"c": 2}}}))).unwrap_err();
        match err {
            SchemafigError::MergeConflict { path } => assert_eq!(path.to_string(), "a.b"),
            other => panic!("expected MergeConflict, got {other:?}"),
        }
    }

    #[test]
    fn sequential_merges_win_field_by_field() {
        let a = table(json!({"host": "a", "db": {"url": "pg://a", "pool": 5}}));
        let b = table(json!({"port": 1000, "db": {"pool": 10}}));
        let c = table(json!({"host": "c"}));

        let mut merged = Map::new();
        for source in [a, b, c] {
            deep_merge(&mut merged, source).unwrap();
        }
        assert_eq!(
            merged,
            table(json!({"host": "c", "port": 1000, "db": {"url": "pg://a", "pool": 10}}))
        );
    }

    #[test]
    fn deeply_nested_three_levels() {
        let mut base = table(json!({"a": {"b": {"c": {"val": 1, "other": "keep"}}}}));
        deep_merge(&mut base, table(json!({"a": {"b": {"c": {"val": 99}}}}))).unwrap();
        assert_eq!(base["a"]["b"]["c"], json!({"val": 99, "other": "keep"}));
    }
}
