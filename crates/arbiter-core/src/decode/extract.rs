use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt;

/// A top-level JSON object found in a reply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FoundObject {
    pub value: Value,
    /// Top-level keys repeated with differing values. `value` holds the last occurrence.
    pub conflicting_keys: Vec<String>,
}

impl<'de> Deserialize<'de> for FoundObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FoundObjectVisitor)
    }
}

struct FoundObjectVisitor;

impl<'de> Visitor<'de> for FoundObjectVisitor {
    type Value = FoundObject;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FoundObject, A::Error> {
        let mut map = Map::new();
        let mut conflicting_keys: Vec<String> = Vec::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            let conflicts = map.get(&key).is_some_and(|prev| *prev != value);
            if conflicts && !conflicting_keys.contains(&key) {
                conflicting_keys.push(key.clone());
            }
            map.insert(key, value);
        }
        Ok(FoundObject {
            value: Value::Object(map),
            conflicting_keys,
        })
    }
}

/// Collects every top-level JSON object embedded in `text`.
///
/// Prose, markdown fences and stray braces around the objects are skipped. Objects nested
/// inside an already collected object are not reported separately.
pub(crate) fn json_objects(text: &str) -> Vec<FoundObject> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find('{') {
        let start = cursor + rel;
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<FoundObject>();
        match stream.next() {
            Some(Ok(obj)) => {
                cursor = start + stream.byte_offset();
                found.push(obj);
            }
            _ => cursor = start + 1,
        }
    }

    found
}
