//! Options merging for tasks.
//!
//! Layers, lowest to highest precedence:
//!
//! 1. options derived from the suite and task,
//! 2. a copy of the suite's options,
//! 3. the task-local `options` file.
//!
//! Suite options themselves are never merged with the group's: a suite-local
//! `options` file replaces the inherited ones outright (see the walker).

use serde_json::{Map, Value};

/// Deep-merges `overlay` into `base`.
///
/// Objects present on both sides merge by key and arrays present on both
/// sides merge by index, recursively; any other collision is won by
/// `overlay`. A longer array in `base` keeps its tail.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, incoming) in overlay {
        if let Some(existing) = base.get_mut(&key) {
            merge_value(existing, incoming);
        } else {
            base.insert(key, incoming);
        }
    }
}

fn merge_value(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => deep_merge(existing, incoming),
        (Value::Array(existing), Value::Array(incoming)) => {
            for (index, item) in incoming.into_iter().enumerate() {
                match existing.get_mut(index) {
                    Some(slot) => merge_value(slot, item),
                    None => existing.push(item),
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}

/// Computes a task's final options.
#[must_use]
pub fn task_options(
    derived: Map<String, Value>,
    suite: &Map<String, Value>,
    task_config: Option<Map<String, Value>>,
) -> Map<String, Value> {
    let mut options = derived;
    deep_merge(&mut options, suite.clone());
    if let Some(task_config) = task_config {
        deep_merge(&mut options, task_config);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn keys_from_both_sides_survive() {
        let mut base = obj(json!({"a": 1}));
        deep_merge(&mut base, obj(json!({"b": 2})));
        assert_eq!(Value::Object(base), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let mut base = obj(json!({"parser": {"plugins": ["jsx"], "strict": true}}));
        deep_merge(&mut base, obj(json!({"parser": {"strict": false, "ranges": true}})));
        assert_eq!(
            Value::Object(base),
            json!({"parser": {"plugins": ["jsx"], "strict": false, "ranges": true}})
        );
    }

    #[test]
    fn arrays_merge_by_index() {
        let mut base = obj(json!({"plugins": ["a", "b", "c"]}));
        deep_merge(&mut base, obj(json!({"plugins": ["z"]})));
        assert_eq!(Value::Object(base), json!({"plugins": ["z", "b", "c"]}));
    }

    #[test]
    fn array_elements_merge_recursively_and_extend() {
        let mut base = obj(json!({"presets": [{"name": "env", "loose": true}, "react"]}));
        deep_merge(
            &mut base,
            obj(json!({"presets": [{"loose": false, "spec": true}, "flow", "stage-0"]})),
        );
        assert_eq!(
            Value::Object(base),
            json!({"presets": [{"name": "env", "loose": false, "spec": true}, "flow", "stage-0"]})
        );
    }

    #[test]
    fn array_and_object_do_not_mix() {
        let mut base = obj(json!({"plugins": ["a"], "env": {"node": true}}));
        deep_merge(&mut base, obj(json!({"plugins": {"a": 1}, "env": ["browser"]})));
        assert_eq!(Value::Object(base), json!({"plugins": {"a": 1}, "env": ["browser"]}));
    }

    #[test]
    fn scalar_overrides_object_and_back() {
        let mut base = obj(json!({"env": {"node": true}, "mode": "loose"}));
        deep_merge(&mut base, obj(json!({"env": false, "mode": {"spec": true}})));
        assert_eq!(Value::Object(base), json!({"env": false, "mode": {"spec": true}}));
    }

    #[test]
    fn precedence_is_derived_then_suite_then_task() {
        let derived = obj(json!({"sourceFileName": "s/t/actual.js", "b": 0, "c": 0}));
        let suite = obj(json!({"b": 2, "c": 2}));
        let task = obj(json!({"c": 3}));

        let options = task_options(derived, &suite, Some(task));
        assert_eq!(Value::Object(options), json!({"sourceFileName": "s/t/actual.js", "b": 2, "c": 3}));
    }

    #[test]
    fn suite_options_are_copied_not_moved() {
        let suite = obj(json!({"nested": {"x": 1}}));
        let options = task_options(Map::new(), &suite, Some(obj(json!({"nested": {"y": 2}}))));
        assert_eq!(Value::Object(options), json!({"nested": {"x": 1, "y": 2}}));
        assert_eq!(Value::Object(suite), json!({"nested": {"x": 1}}));
    }
}
