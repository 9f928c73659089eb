//! Layered store of user customization.
//!
//! Holds three precedence tiers of partial configuration: one global value,
//! one per filetype, one per buffer. `set` replaces a tier's value
//! wholesale; `patch` folds new opinion into whatever the tier already
//! holds. `resolve` is the only read path the completion pipeline needs:
//! it folds defaults and the applicable tiers into one total configuration.

use crate::merge::{MergePartial, fold_merge};
use crate::options::{CompletionConfig, PartialConfig};
use std::collections::HashMap;

/// Host-assigned buffer identifier.
pub type BufferId = u64;

/// Three-tier store of partial configurations.
///
/// The registry exclusively owns its tiers; all mutation goes through the
/// set/patch operations below, so resolution stays a pure function of the
/// stored values.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    global: PartialConfig,
    filetype: HashMap<String, PartialConfig>,
    buffer: HashMap<BufferId, PartialConfig>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective configuration for one (filetype, buffer) scope.
    ///
    /// Precedence, lowest to highest: built-in default, global, filetype,
    /// buffer. Scope keys with no stored value contribute nothing; they are
    /// absence of opinion, not an error.
    pub fn resolve(&self, filetype: &str, buffer: BufferId) -> CompletionConfig {
        fold_merge(
            CompletionConfig::merge,
            CompletionConfig::default,
            [
                Some(self.global.clone()),
                self.filetype.get(filetype).cloned(),
                self.buffer.get(&buffer).cloned(),
            ],
        )
    }

    /// Replace the global tier.
    pub fn set_global(&mut self, config: PartialConfig) -> &mut Self {
        self.global = config;
        self
    }

    /// Replace the tier for one filetype.
    pub fn set_filetype(&mut self, filetype: impl Into<String>, config: PartialConfig) -> &mut Self {
        self.filetype.insert(filetype.into(), config);
        self
    }

    /// Replace the tier for one buffer.
    pub fn set_buffer(&mut self, buffer: BufferId, config: PartialConfig) -> &mut Self {
        self.buffer.insert(buffer, config);
        self
    }

    /// Fold new opinion into the global tier.
    pub fn patch_global(&mut self, config: PartialConfig) -> &mut Self {
        self.global = std::mem::take(&mut self.global).merge_partial(config);
        self
    }

    /// Fold new opinion into one filetype's tier. Patching a filetype with
    /// no stored value starts from the empty partial.
    pub fn patch_filetype(
        &mut self,
        filetype: impl Into<String>,
        config: PartialConfig,
    ) -> &mut Self {
        let filetype = filetype.into();
        let existing = self.filetype.remove(&filetype).unwrap_or_default();
        self.filetype.insert(filetype, existing.merge_partial(config));
        self
    }

    /// Fold new opinion into one buffer's tier.
    pub fn patch_buffer(&mut self, buffer: BufferId, config: PartialConfig) -> &mut Self {
        let existing = self.buffer.remove(&buffer).unwrap_or_default();
        self.buffer.insert(buffer, existing.merge_partial(config));
        self
    }

    /// The stored global tier.
    pub fn global(&self) -> &PartialConfig {
        &self.global
    }

    /// All stored filetype tiers.
    pub fn filetypes(&self) -> &HashMap<String, PartialConfig> {
        &self.filetype
    }

    /// All stored buffer tiers.
    pub fn buffers(&self) -> &HashMap<BufferId, PartialConfig> {
        &self.buffer
    }
}
