//! Flatten a nested mapping into dotted `(key, value)` pairs.
//!
//! Mappings are descended into; every other value (scalars, `null`,
//! sequences) is a leaf. An empty mapping produces no pairs.
//!
//! ```text
//! {"s1": {"foo": 1}, "ts": [1, 2]}  →  [("s1.foo", 1), ("ts", [1, 2])]
//! ```

use serde_json::{Map, Value};

pub fn flatten(tree: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into("", tree, &mut out);
    out
}

fn flatten_into(prefix: &str, tree: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in tree {
        let dotted = dotted(prefix, key);
        match value {
            Value::Object(nested) => flatten_into(&dotted, nested, out),
            leaf => out.push((dotted, leaf.clone())),
        }
    }
}

fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
