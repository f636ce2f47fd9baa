//! Upgrades of legacy lockfile documents to the current layout.
//!
//! - v1 had no `version` field; the whole document was the URL→hash map now
//!   found under `remote`.
//! - v2 kept npm data in a top-level `npm` object with `specifiers` (bare
//!   names) and `packages`. v3 moved them under `packages` and prefixed
//!   npm specifier keys and values with `npm:`.

use serde_json::Value;

pub(crate) type JsonMap = serde_json::Map<String, Value>;

pub(crate) fn transform1_to_2(json: JsonMap) -> JsonMap {
    let mut upgraded = JsonMap::new();
    upgraded.insert("version".to_string(), "2".into());
    upgraded.insert("remote".to_string(), json.into());
    upgraded
}

pub(crate) fn transform2_to_3(mut json: JsonMap) -> JsonMap {
    json.insert("version".to_string(), "3".into());
    if let Some(Value::Object(mut npm)) = json.remove("npm") {
        let mut packages = JsonMap::new();
        if let Some(npm_packages) = npm.remove("packages") {
            packages.insert("npm".to_string(), npm_packages);
        }
        if let Some(Value::Object(specifiers)) = npm.remove("specifiers") {
            let prefixed: JsonMap = specifiers
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(value) => {
                        Some((format!("npm:{key}"), Value::String(format!("npm:{value}"))))
                    }
                    _ => None,
                })
                .collect();
            if !prefixed.is_empty() {
                packages.insert("specifiers".to_string(), prefixed.into());
            }
        }
        json.insert("packages".to_string(), packages.into());
    }
    json
}
