//! Point-in-time snapshots of observable editor state.
//!
//! A `World` is everything the engine needs to know about the editor at one
//! event instant. Capture fans the independent host queries out
//! concurrently and awaits them together; comparison of two snapshots
//! decides whether anything worth recomputing changed.

use crate::error::HostError;
use crate::host::{Host, INSERT_MODE};
use tracing::trace;

/// Host event names the engine distinguishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorEvent {
    /// Insert mode was just entered. The host may still report the previous
    /// mode at this instant, so capture does not trust the mode query here.
    InsertEnter,
    /// Text changed while inserting.
    TextChangedInsert,
    /// Text changed while the completion popup was open.
    TextChangedPopup,
    /// Explicit trigger outside any host autocommand; also the value before
    /// any event has been observed.
    #[default]
    Manual,
    /// Any other event the host forwards.
    Other(String),
}

impl EditorEvent {
    /// Map a host-side event name onto the typed variants.
    pub fn from_name(name: &str) -> Self {
        match name {
            "InsertEnter" => Self::InsertEnter,
            "TextChangedI" => Self::TextChangedInsert,
            "TextChangedP" => Self::TextChangedPopup,
            "Manual" => Self::Manual,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What the engine observed about the editor at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct World {
    pub buf_id: u64,
    pub filetype: String,
    pub event: EditorEvent,
    pub mode: String,
    pub input: String,
    /// The last edit was the host inserting an accepted completion.
    pub changed_by_completion: bool,
    /// An input-method composition is in progress.
    pub input_method_active: bool,
}

impl World {
    /// The snapshot from before any event has been observed.
    pub fn initial() -> Self {
        Self::default()
    }
}

/// Capture a fresh snapshot for `event`.
///
/// Mode resolves first because input extraction depends on it; the five
/// remaining queries have no dependencies among them and run concurrently,
/// jointly awaited. Any query failing fails the capture as a whole.
pub async fn capture(host: &dyn Host, event: EditorEvent) -> Result<World, HostError> {
    let mode = match event {
        EditorEvent::InsertEnter => INSERT_MODE.to_string(),
        _ => host.edit_mode().await?,
    };

    let (buf_id, filetype, input, input_method_option, completed_item) = tokio::try_join!(
        host.buf_id(),
        host.buf_filetype(),
        host.current_input(&mode),
        host.input_method_option(),
        host.last_completed_item(),
    )?;

    let changed_by_completion =
        event == EditorEvent::TextChangedPopup && !completed_item.is_empty();

    let world = World {
        buf_id,
        filetype,
        event,
        mode,
        input,
        changed_by_completion,
        input_method_active: input_method_option == 1,
    };
    trace!(?world, "captured editor state");
    Ok(world)
}

/// Whether the transition from `older` to `newer` warrants no recomputation.
///
/// Only buffer id, filetype, and input participate. Event, mode, and the
/// two flags are excluded: they feed the suppression decision, not the
/// "did anything change" decision.
pub fn is_negligible(older: &World, newer: &World) -> bool {
    older.buf_id == newer.buf_id
        && older.filetype == newer.filetype
        && older.input == newer.input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;
    use serde_json::json;

    fn host() -> StaticHost {
        StaticHost {
            buf_id: 3,
            filetype: "rust".to_string(),
            mode: "n".to_string(),
            input: "pri".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn event_names_map_onto_typed_variants() {
        assert_eq!(EditorEvent::from_name("InsertEnter"), EditorEvent::InsertEnter);
        assert_eq!(
            EditorEvent::from_name("TextChangedI"),
            EditorEvent::TextChangedInsert
        );
        assert_eq!(
            EditorEvent::from_name("TextChangedP"),
            EditorEvent::TextChangedPopup
        );
        assert_eq!(EditorEvent::from_name("Manual"), EditorEvent::Manual);
        assert_eq!(
            EditorEvent::from_name("CursorHold"),
            EditorEvent::Other("CursorHold".to_string())
        );
    }

    #[test]
    fn initial_worlds_are_negligible() {
        assert!(is_negligible(&World::initial(), &World::initial()));
    }

    #[test]
    fn input_growth_is_not_negligible() {
        let older = World {
            input: "a".to_string(),
            ..World::initial()
        };
        let newer = World {
            input: "ab".to_string(),
            ..World::initial()
        };
        assert!(!is_negligible(&older, &newer));
    }

    #[test]
    fn event_mode_and_flags_are_ignored() {
        let older = World::initial();
        let newer = World {
            event: EditorEvent::TextChangedInsert,
            mode: INSERT_MODE.to_string(),
            changed_by_completion: true,
            input_method_active: true,
            ..World::initial()
        };
        assert!(is_negligible(&older, &newer));
    }

    #[test]
    fn buffer_or_filetype_change_is_not_negligible() {
        let older = World::initial();
        let moved = World {
            buf_id: 2,
            ..World::initial()
        };
        assert!(!is_negligible(&older, &moved));

        let retyped = World {
            filetype: "rust".to_string(),
            ..World::initial()
        };
        assert!(!is_negligible(&older, &retyped));
    }

    #[tokio::test]
    async fn capture_fills_every_field() {
        let world = capture(&host(), EditorEvent::TextChangedInsert).await.unwrap();
        assert_eq!(world.buf_id, 3);
        assert_eq!(world.filetype, "rust");
        assert_eq!(world.mode, "n");
        assert_eq!(world.input, "pri");
        assert!(!world.changed_by_completion);
        assert!(!world.input_method_active);
    }

    #[tokio::test]
    async fn insert_enter_forces_insert_mode() {
        let world = capture(&host(), EditorEvent::InsertEnter).await.unwrap();
        assert_eq!(world.mode, INSERT_MODE);
    }

    #[tokio::test]
    async fn completion_side_effect_needs_popup_event_and_item() {
        let mut with_item = host();
        with_item.last_completed_item =
            json!({"word": "print"}).as_object().cloned().unwrap();

        let world = capture(&with_item, EditorEvent::TextChangedPopup).await.unwrap();
        assert!(world.changed_by_completion);

        // Same record on a different event is not a completion side effect.
        let world = capture(&with_item, EditorEvent::TextChangedInsert).await.unwrap();
        assert!(!world.changed_by_completion);

        // Popup event with an empty record is ordinary typing.
        let world = capture(&host(), EditorEvent::TextChangedPopup).await.unwrap();
        assert!(!world.changed_by_completion);
    }

    #[tokio::test]
    async fn input_method_option_of_one_sets_the_flag() {
        let mut composing = host();
        composing.input_method_option = 1;
        let world = capture(&composing, EditorEvent::TextChangedInsert).await.unwrap();
        assert!(world.input_method_active);

        let mut disabled = host();
        disabled.input_method_option = 2;
        let world = capture(&disabled, EditorEvent::TextChangedInsert).await.unwrap();
        assert!(!world.input_method_active);
    }
}
