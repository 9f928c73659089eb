//! Option schema and defaults.
//!
//! `CompletionConfig` is the total, resolved form the completion pipeline
//! consumes; `PartialConfig` is the same shape with every field optional,
//! the unit user customization is expressed in. Absent fields mean "no
//! opinion", never "empty"; the merge algebra depends on the distinction.

use crate::merge::{MergePartial, merge_keyed};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Arbitrary per-source or per-filter parameters, as loose JSON.
pub type ParamMap = serde_json::Map<String, Value>;

impl MergePartial for ParamMap {
    /// Shallow key overwrite; values are opaque to the merge.
    fn merge_partial(mut self, other: Self) -> Self {
        for (key, value) in other {
            self.insert(key, value);
        }
        self
    }
}

/// Options a source resolves to once defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceOptions {
    /// Short label shown next to candidates from this source.
    pub mark: String,
    pub matchers: Vec<String>,
    pub sorters: Vec<String>,
    pub converters: Vec<String>,
}

impl SourceOptions {
    /// Overwrite fields where `partial` holds an opinion.
    pub fn merge(self, partial: PartialSourceOptions) -> Self {
        Self {
            mark: partial.mark.unwrap_or(self.mark),
            matchers: partial.matchers.unwrap_or(self.matchers),
            sorters: partial.sorters.unwrap_or(self.sorters),
            converters: partial.converters.unwrap_or(self.converters),
        }
    }
}

/// Per-source option overrides as stored in configuration tiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSourceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converters: Option<Vec<String>>,
}

impl MergePartial for PartialSourceOptions {
    fn merge_partial(self, other: Self) -> Self {
        Self {
            mark: other.mark.or(self.mark),
            matchers: other.matchers.or(self.matchers),
            sorters: other.sorters.or(self.sorters),
            converters: other.converters.or(self.converters),
        }
    }
}

/// Options a filter resolves to.
///
/// No filter exposes tunables yet; fields land here once filters grow them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {}

impl FilterOptions {
    pub fn merge(self, _partial: PartialFilterOptions) -> Self {
        self
    }
}

/// Per-filter option overrides as stored in configuration tiers.
///
/// Empty for now, but round-trips through parse and merge so stored
/// overrides keep their shape when real fields appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFilterOptions {}

impl MergePartial for PartialFilterOptions {
    fn merge_partial(self, _other: Self) -> Self {
        self
    }
}

/// The resolved configuration for one (filetype, buffer) scope.
///
/// Every field is total: unset tiers leave the documented defaults (empty
/// lists, empty maps) in place. The values of the four keyed maps stay
/// partial: a source or filter only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionConfig {
    /// Ordered source names to activate.
    pub sources: Vec<String>,
    /// Matchers applied when a source does not override them.
    pub default_matchers: Vec<String>,
    /// Sorters applied when a source does not override them.
    pub default_sorters: Vec<String>,
    /// Converters applied when a source does not override them.
    pub default_converters: Vec<String>,
    pub source_options: HashMap<String, PartialSourceOptions>,
    pub filter_options: HashMap<String, PartialFilterOptions>,
    pub source_params: HashMap<String, ParamMap>,
    pub filter_params: HashMap<String, ParamMap>,
}

impl CompletionConfig {
    /// Overwrite-merge a partial on top of a total configuration.
    ///
    /// List fields are replaced wholesale when the partial names them; the
    /// four keyed maps merge per key so entries present on only one side
    /// survive.
    pub fn merge(self, partial: PartialConfig) -> Self {
        Self {
            sources: partial.sources.unwrap_or(self.sources),
            default_matchers: partial.default_matchers.unwrap_or(self.default_matchers),
            default_sorters: partial.default_sorters.unwrap_or(self.default_sorters),
            default_converters: partial.default_converters.unwrap_or(self.default_converters),
            source_options: merge_keyed(
                MergePartial::merge_partial,
                Some(self.source_options),
                partial.source_options,
            )
            .unwrap_or_default(),
            filter_options: merge_keyed(
                MergePartial::merge_partial,
                Some(self.filter_options),
                partial.filter_options,
            )
            .unwrap_or_default(),
            source_params: merge_keyed(
                MergePartial::merge_partial,
                Some(self.source_params),
                partial.source_params,
            )
            .unwrap_or_default(),
            filter_params: merge_keyed(
                MergePartial::merge_partial,
                Some(self.filter_params),
                partial.filter_params,
            )
            .unwrap_or_default(),
        }
    }
}

/// A configuration tier's worth of user opinion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_matchers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sorters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_converters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_options: Option<HashMap<String, PartialSourceOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_options: Option<HashMap<String, PartialFilterOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_params: Option<HashMap<String, ParamMap>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_params: Option<HashMap<String, ParamMap>>,
}

impl MergePartial for PartialConfig {
    fn merge_partial(self, other: Self) -> Self {
        Self {
            sources: other.sources.or(self.sources),
            default_matchers: other.default_matchers.or(self.default_matchers),
            default_sorters: other.default_sorters.or(self.default_sorters),
            default_converters: other.default_converters.or(self.default_converters),
            source_options: merge_keyed(
                MergePartial::merge_partial,
                self.source_options,
                other.source_options,
            ),
            filter_options: merge_keyed(
                MergePartial::merge_partial,
                self.filter_options,
                other.filter_options,
            ),
            source_params: merge_keyed(
                MergePartial::merge_partial,
                self.source_params,
                other.source_params,
            ),
            filter_params: merge_keyed(
                MergePartial::merge_partial,
                self.filter_params,
                other.filter_params,
            ),
        }
    }
}
