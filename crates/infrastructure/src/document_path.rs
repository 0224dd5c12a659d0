//! Path addressing shared by the document store adapters.
//!
//! A path such as `/roles/abc` addresses nested object keys. The empty path
//! and `/` address the root.

use serde_json::{Map, Value};

pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

pub(crate) fn read_at(document: &Value, segments: &[&str]) -> Option<Value> {
    let mut current = document;
    for segment in segments {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current.clone())
}

/// Writes `value` at `segments`, creating intermediate objects and replacing
/// any non-object value found on the way.
pub(crate) fn write_at(document: &mut Option<Value>, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        *document = Some(value);
        return;
    };

    let mut current = document.get_or_insert_with(empty_object);
    for segment in parents {
        let Some(object) = ensure_object(current) else {
            return;
        };
        current = object.entry((*segment).to_owned()).or_insert_with(empty_object);
    }

    if let Some(object) = ensure_object(current) {
        object.insert((*last).to_owned(), value);
    }
}

/// Removes the value at `segments`. Returns true when something was removed.
pub(crate) fn remove_at(document: &mut Option<Value>, segments: &[&str]) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return document.take().is_some();
    };

    let Some(mut current) = document.as_mut() else {
        return false;
    };
    for segment in parents {
        let Some(next) = current
            .as_object_mut()
            .and_then(|object| object.get_mut(*segment))
        else {
            return false;
        };
        current = next;
    }

    current
        .as_object_mut()
        .is_some_and(|object| object.shift_remove(*last).is_some())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Replaces a non-object value with an empty object and returns its map.
fn ensure_object(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if !value.is_object() {
        *value = empty_object();
    }

    value.as_object_mut()
}
