//! Per-event decision making.
//!
//! The builder turns a host event into either "nothing actionable changed"
//! or a fresh input context paired with the configuration resolved for the
//! snapshot's scope. It retains exactly one previous snapshot; no deeper
//! history is kept.

use crate::error::HostError;
use crate::host::Host;
use crate::options::{CompletionConfig, PartialConfig};
use crate::registry::{BufferId, ConfigRegistry};
use crate::world::{self, EditorEvent, World};
use std::collections::HashMap;
use tracing::debug;

/// Input the completion pipeline acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Text before the cursor that candidates should match against.
    pub input: String,
}

/// Turns host events into actionable (context, configuration) pairs.
///
/// Owns the configuration registry and the last observed snapshot. Events
/// whose snapshot is negligible against the baseline produce nothing;
/// transitions caused by completion insertion or an active input-method
/// composition are suppressed even though state did change.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    last_world: World,
    registry: ConfigRegistry,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build over an explicitly constructed registry, e.g. one pre-loaded
    /// with startup customization.
    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self {
            last_world: World::initial(),
            registry,
        }
    }

    /// Process one host event.
    ///
    /// Returns `Ok(None)` when the event needs no recomputation, either
    /// because nothing the pipeline consumes changed or because the change
    /// is suppressed. Host query failures surface unchanged; the snapshot
    /// baseline is untouched in that case.
    ///
    /// Suppression is checked after the baseline update on purpose: a
    /// suppressed event still moves the baseline, so later events are not
    /// compared against a stale snapshot.
    pub async fn create_context(
        &mut self,
        host: &dyn Host,
        event: EditorEvent,
    ) -> Result<Option<(Context, CompletionConfig)>, HostError> {
        let world = world::capture(host, event).await?;

        if world::is_negligible(&self.last_world, &world) {
            debug!(event = ?world.event, "negligible state change, skipping");
            return Ok(None);
        }
        self.last_world = world.clone();

        if world.input_method_active || world.changed_by_completion {
            debug!(
                input_method = world.input_method_active,
                completion = world.changed_by_completion,
                "suppressed state change, skipping"
            );
            return Ok(None);
        }

        let config = self.registry.resolve(&world.filetype, world.buf_id);
        let context = Context { input: world.input };
        Ok(Some((context, config)))
    }

    /// The registry backing this builder.
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    // Tier accessors, re-exposed so callers apply and inspect user
    // customization without reaching into the registry.

    pub fn global(&self) -> &PartialConfig {
        self.registry.global()
    }

    pub fn filetypes(&self) -> &HashMap<String, PartialConfig> {
        self.registry.filetypes()
    }

    pub fn buffers(&self) -> &HashMap<BufferId, PartialConfig> {
        self.registry.buffers()
    }

    pub fn set_global(&mut self, config: PartialConfig) {
        self.registry.set_global(config);
    }

    pub fn set_filetype(&mut self, filetype: impl Into<String>, config: PartialConfig) {
        self.registry.set_filetype(filetype, config);
    }

    pub fn set_buffer(&mut self, buffer: BufferId, config: PartialConfig) {
        self.registry.set_buffer(buffer, config);
    }

    pub fn patch_global(&mut self, config: PartialConfig) {
        self.registry.patch_global(config);
    }

    pub fn patch_filetype(&mut self, filetype: impl Into<String>, config: PartialConfig) {
        self.registry.patch_filetype(filetype, config);
    }

    pub fn patch_buffer(&mut self, buffer: BufferId, config: PartialConfig) {
        self.registry.patch_buffer(buffer, config);
    }
}
