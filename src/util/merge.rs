//! Recursive merge of JSON mapping trees.

use serde_json::{Map, Value};

/// Merge `patch` into `target`.
///
/// Objects merge key by key, recursively. `null` in the patch never
/// overwrites anything. Any other patch value replaces the target value
/// outright, arrays included.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (_, Value::Null) => {}
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                if value.is_null() {
                    continue;
                }
                if let Some(existing) = target.get_mut(key) {
                    deep_merge(existing, value);
                } else {
                    let mut fresh = if value.is_object() {
                        Value::Object(Map::new())
                    } else {
                        Value::Null
                    };
                    deep_merge(&mut fresh, value);
                    let _ = target.insert(key.clone(), fresh);
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
