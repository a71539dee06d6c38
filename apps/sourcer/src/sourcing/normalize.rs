//! Response normalization — flattens envelope nesting in enrichment results
//! and resolves a display name from varying profile shapes.
//!
//! Not a pipeline stage of its own; runs inline between enrichment and
//! scoring.

use serde_json::Value;

/// Wrapper key the enricher (and sometimes the provider itself) nests the
/// real profile under.
pub(crate) const ENVELOPE_KEY: &str = "data";

/// Canonical URL field a record must carry to stay in the pipeline.
pub(crate) const PROFILE_URL_FIELD: &str = "linkedin_url";

/// Sentinel display name when no name-ish field resolves.
const NAME_FALLBACK: &str = "N/A";

/// Unwraps up to two levels of envelope nesting to reach the actual profile
/// mapping. Already-flat mappings pass through unchanged.
pub fn unwrap_envelope(mut value: Value) -> Value {
    for _ in 0..2 {
        let inner = match value.as_object_mut() {
            Some(map) if map.get(ENVELOPE_KEY).is_some_and(Value::is_object) => {
                map.remove(ENVELOPE_KEY)
            }
            _ => None,
        };
        match inner {
            Some(inner) => value = inner,
            None => break,
        }
    }
    value
}

/// Flattens every raw record and drops those without a non-empty canonical
/// URL. The drop is silent: the enrichment stage already logged whatever
/// went wrong upstream.
pub fn normalize_profiles(raw: Vec<Value>) -> Vec<Value> {
    raw.into_iter()
        .map(unwrap_envelope)
        .filter(has_profile_url)
        .collect()
}

/// Resolves a display name from a normalized profile, in priority order:
/// `name`, `full_name`, `first_name` + `last_name` (trimmed), `headline`,
/// else `"N/A"`.
pub fn resolve_name(profile: &Value) -> String {
    for key in ["name", "full_name"] {
        if let Some(value) = non_empty_str(profile, key) {
            return value.to_string();
        }
    }

    let first = non_empty_str(profile, "first_name").unwrap_or("");
    let last = non_empty_str(profile, "last_name").unwrap_or("");
    let combined = format!("{first} {last}");
    let combined = combined.trim();
    if !combined.is_empty() {
        return combined.to_string();
    }

    if let Some(headline) = non_empty_str(profile, "headline") {
        return headline.to_string();
    }

    NAME_FALLBACK.to_string()
}

/// Extracts the canonical profile URL, if present and non-empty.
pub fn profile_url(profile: &Value) -> Option<&str> {
    non_empty_str(profile, PROFILE_URL_FIELD)
}

fn has_profile_url(profile: &Value) -> bool {
    profile_url(profile).is_some()
}

fn non_empty_str<'a>(profile: &'a Value, key: &str) -> Option<&'a str> {
    profile
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_profile_passes_through_unchanged() {
        let profile = json!({"linkedin_url": "https://linkedin.com/in/alice", "name": "Alice"});
        assert_eq!(unwrap_envelope(profile.clone()), profile);
    }

    #[test]
    fn test_single_envelope_is_unwrapped() {
        let inner = json!({"linkedin_url": "https://linkedin.com/in/alice"});
        let wrapped = json!({"data": inner});
        assert_eq!(unwrap_envelope(wrapped), inner);
    }

    #[test]
    fn test_double_envelope_is_unwrapped() {
        let inner = json!({"linkedin_url": "https://linkedin.com/in/alice"});
        let wrapped = json!({"data": {"data": inner}});
        assert_eq!(unwrap_envelope(wrapped), inner);
    }

    #[test]
    fn test_unwrap_is_idempotent_on_flat_input() {
        let profile = json!({"linkedin_url": "https://linkedin.com/in/alice"});
        let once = unwrap_envelope(profile.clone());
        let twice = unwrap_envelope(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_object_envelope_value_is_left_alone() {
        // A profile whose "data" field is a scalar is already the real record.
        let profile = json!({"linkedin_url": "https://linkedin.com/in/alice", "data": "premium"});
        assert_eq!(unwrap_envelope(profile.clone()), profile);
    }

    #[test]
    fn test_records_without_url_are_dropped() {
        let raw = vec![
            json!({"data": {"linkedin_url": "https://linkedin.com/in/alice"}}),
            json!({"data": {"name": "No Url"}}),
            json!({"data": {"linkedin_url": ""}}),
        ];
        let kept = normalize_profiles(raw);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            profile_url(&kept[0]),
            Some("https://linkedin.com/in/alice")
        );
    }

    #[test]
    fn test_resolve_name_prefers_name() {
        let profile = json!({"name": "Alice A", "full_name": "Alice Anderson"});
        assert_eq!(resolve_name(&profile), "Alice A");
    }

    #[test]
    fn test_resolve_name_falls_back_to_full_name() {
        let profile = json!({"name": "", "full_name": "Alice Anderson"});
        assert_eq!(resolve_name(&profile), "Alice Anderson");
    }

    #[test]
    fn test_resolve_name_concatenates_first_and_last() {
        let profile = json!({"first_name": "Alice", "last_name": "Anderson"});
        assert_eq!(resolve_name(&profile), "Alice Anderson");
    }

    #[test]
    fn test_resolve_name_trims_lone_first_name() {
        let profile = json!({"first_name": "Alice"});
        assert_eq!(resolve_name(&profile), "Alice");
    }

    #[test]
    fn test_resolve_name_trims_lone_last_name() {
        let profile = json!({"last_name": "Anderson"});
        assert_eq!(resolve_name(&profile), "Anderson");
    }

    #[test]
    fn test_resolve_name_falls_back_to_headline() {
        let profile = json!({"headline": "ML Engineer at Acme"});
        assert_eq!(resolve_name(&profile), "ML Engineer at Acme");
    }

    #[test]
    fn test_resolve_name_sentinel_when_nothing_resolves() {
        let profile = json!({"linkedin_url": "https://linkedin.com/in/mystery"});
        assert_eq!(resolve_name(&profile), "N/A");
    }
}
