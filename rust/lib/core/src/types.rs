/// Generate a new document id (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Check that an id is well-formed for the store's native format:
/// 32 hexadecimal characters. Generated ids are lowercase but lookup
/// accepts either case.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Merge a JSON patch into a base value, RFC 7386 style.
///
/// `null` in the patch removes the key from `base`; objects merge
/// recursively; everything else overwrites.
pub fn merge_patch(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_obj {
            if value.is_null() {
                base_obj.remove(key);
            } else if value.is_object() {
                let entry = base_obj
                    .entry(key.clone())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                merge_patch(entry, value);
            } else {
                base_obj.insert(key.clone(), value.clone());
            }
        }
    } else {
        *base = patch.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("0123456789abcdef0123456789abcdef"));
        assert!(is_valid_id("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!is_valid_id("0123456789abcdef01234567"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("not-an-id"));
        assert!(!is_valid_id("g123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_merge_patch() {
        let mut base = serde_json::json!({"a": 1, "b": 2, "c": {"d": 3}});
        let patch = serde_json::json!({"b": null, "c": {"e": 4}, "f": 5});
        merge_patch(&mut base, &patch);
        assert_eq!(
            base,
            serde_json::json!({"a": 1, "c": {"d": 3, "e": 4}, "f": 5})
        );
    }

    #[test]
    fn test_merge_patch_scalars() {
        let mut base = serde_json::json!({"title": "old", "status": 0});
        let patch = serde_json::json!({"status": 2, "updatedAt": "2026-01-01T00:00:00+00:00"});
        merge_patch(&mut base, &patch);
        assert_eq!(base["title"], "old");
        assert_eq!(base["status"], 2);
        assert_eq!(base["updatedAt"], "2026-01-01T00:00:00+00:00");
    }
}
