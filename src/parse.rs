//! Lenient ingestion of externally supplied configuration.
//!
//! User settings arrive as loose JSON with snake_case keys, typically
//! straight from an editor-side settings object. Validation is per field
//! and per entry: anything malformed is dropped and logged at debug level,
//! so one bad key never invalidates the rest of the value. The merge
//! algebra downstream can therefore assume well-formed partials.

use crate::options::{ParamMap, PartialConfig, PartialFilterOptions, PartialSourceOptions};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Validate a loose settings value into a partial configuration.
///
/// Returns `None` when `raw` is not an object at all. Fields that fail
/// validation are left unset; entries of the four keyed maps are filtered
/// individually.
pub fn parse_partial_config(raw: &Value) -> Option<PartialConfig> {
    let map = raw.as_object()?;
    let mut partial = PartialConfig::default();

    if let Some(value) = map.get("sources") {
        partial.sources = parse_string_list("sources", value);
    }
    if let Some(value) = map.get("default_matchers") {
        partial.default_matchers = parse_string_list("default_matchers", value);
    }
    if let Some(value) = map.get("default_sorters") {
        partial.default_sorters = parse_string_list("default_sorters", value);
    }
    if let Some(value) = map.get("default_converters") {
        partial.default_converters = parse_string_list("default_converters", value);
    }
    if let Some(value) = map.get("source_options") {
        partial.source_options = parse_keyed("source_options", value, parse_source_options);
    }
    if let Some(value) = map.get("filter_options") {
        partial.filter_options = parse_keyed("filter_options", value, parse_filter_options);
    }
    if let Some(value) = map.get("source_params") {
        partial.source_params = parse_keyed("source_params", value, parse_params);
    }
    if let Some(value) = map.get("filter_params") {
        partial.filter_params = parse_keyed("filter_params", value, parse_params);
    }

    Some(partial)
}

/// A list field is taken only when every element is a string.
fn parse_string_list(field: &str, value: &Value) -> Option<Vec<String>> {
    let Some(items) = value.as_array() else {
        debug!(field, "dropping field: not a list");
        return None;
    };
    let strings: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    if strings.is_none() {
        debug!(field, "dropping field: non-string element");
    }
    strings
}

/// Validate a keyed override map entry by entry, dropping bad values.
fn parse_keyed<P>(
    field: &str,
    value: &Value,
    parse: impl Fn(&Value) -> Option<P>,
) -> Option<HashMap<String, P>> {
    let Some(entries) = value.as_object() else {
        debug!(field, "dropping field: not a map");
        return None;
    };
    let parsed = entries
        .iter()
        .filter_map(|(key, value)| match parse(value) {
            Some(parsed) => Some((key.clone(), parsed)),
            None => {
                debug!(field, key = %key, "dropping malformed entry");
                None
            }
        })
        .collect();
    Some(parsed)
}

fn parse_source_options(value: &Value) -> Option<PartialSourceOptions> {
    let map = value.as_object()?;
    let mut options = PartialSourceOptions::default();
    if let Some(mark) = map.get("mark").and_then(Value::as_str) {
        options.mark = Some(mark.to_string());
    }
    if let Some(value) = map.get("matchers") {
        options.matchers = parse_string_list("matchers", value);
    }
    if let Some(value) = map.get("sorters") {
        options.sorters = parse_string_list("sorters", value);
    }
    if let Some(value) = map.get("converters") {
        options.converters = parse_string_list("converters", value);
    }
    Some(options)
}

fn parse_filter_options(value: &Value) -> Option<PartialFilterOptions> {
    // Filters have no tunables yet; any map is accepted as an empty override.
    value.as_object().map(|_| PartialFilterOptions::default())
}

fn parse_params(value: &Value) -> Option<ParamMap> {
    value.as_object().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_input_is_rejected() {
        assert_eq!(parse_partial_config(&json!("sources")), None);
        assert_eq!(parse_partial_config(&json!(42)), None);
    }

    #[test]
    fn well_formed_fields_are_translated() {
        let parsed = parse_partial_config(&json!({
            "sources": ["around", "buffer"],
            "default_matchers": ["matcher_head"],
            "source_options": {
                "around": {"mark": "A", "matchers": ["matcher_fuzzy"]}
            },
            "source_params": {
                "around": {"maxSize": 300}
            }
        }))
        .unwrap();

        assert_eq!(
            parsed.sources,
            Some(vec!["around".to_string(), "buffer".to_string()])
        );
        assert_eq!(parsed.default_matchers, Some(vec!["matcher_head".to_string()]));

        let options = parsed.source_options.unwrap();
        assert_eq!(options["around"].mark.as_deref(), Some("A"));
        assert_eq!(
            options["around"].matchers,
            Some(vec!["matcher_fuzzy".to_string()])
        );

        let params = parsed.source_params.unwrap();
        assert_eq!(params["around"]["maxSize"], json!(300));
    }

    #[test]
    fn malformed_list_fields_are_dropped_whole() {
        let parsed = parse_partial_config(&json!({
            "sources": ["around", 3],
            "default_sorters": "sorter_rank"
        }))
        .unwrap();
        assert_eq!(parsed.sources, None);
        assert_eq!(parsed.default_sorters, None);
    }

    #[test]
    fn malformed_map_entries_are_dropped_per_key() {
        let parsed = parse_partial_config(&json!({
            "source_options": {
                "good": {"mark": "G"},
                "bad": "not a map"
            },
            "source_params": {
                "good": {"n": 1},
                "bad": [1, 2, 3]
            }
        }))
        .unwrap();

        let options = parsed.source_options.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options["good"].mark.as_deref(), Some("G"));

        let params = parsed.source_params.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["good"]["n"], json!(1));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let parsed = parse_partial_config(&json!({
            "sources": ["around"],
            "not_a_real_field": true
        }))
        .unwrap();
        assert_eq!(parsed.sources, Some(vec!["around".to_string()]));
        assert_eq!(parsed.filter_params, None);
    }

    #[test]
    fn filter_options_accept_any_map() {
        let parsed = parse_partial_config(&json!({
            "filter_options": {
                "matcher_head": {"anything": "goes"},
                "bad": 7
            }
        }))
        .unwrap();
        let options = parsed.filter_options.unwrap();
        assert_eq!(options.len(), 1);
        assert!(options.contains_key("matcher_head"));
    }
}
