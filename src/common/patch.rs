// src/common/patch.rs

use serde::{Deserialize, Deserializer};

/// Campo de patch que aceita `null`: ausente fica `None` (não mexe) e
/// `null` vira `Some(None)` (apaga). Use com `#[serde(default, deserialize_with = ...)]`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn apply_nullable<T>(field: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct NotePatch {
        #[serde(default, deserialize_with = "nullable")]
        tag: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: NotePatch = serde_json::from_value(json!({})).unwrap();
        let cleared: NotePatch = serde_json::from_value(json!({ "tag": null })).unwrap();
        let set: NotePatch = serde_json::from_value(json!({ "tag": "x" })).unwrap();

        assert_eq!(absent.tag, None);
        assert_eq!(cleared.tag, Some(None));
        assert_eq!(set.tag, Some(Some("x".to_string())));

        let mut field = Some("old".to_string());
        apply_nullable(&mut field, absent.tag);
        assert_eq!(field.as_deref(), Some("old"));
        apply_nullable(&mut field, cleared.tag);
        assert_eq!(field, None);
    }
}
