//! Host editor query interface.
//!
//! The snapshot engine consumes the editor through this trait: a handful of
//! read-only point queries, each answered asynchronously over whatever
//! transport the embedding plugin uses. Queries with no data dependency are
//! fanned out concurrently by [`capture`](crate::world::capture).

use crate::error::HostError;
use crate::options::ParamMap;
use async_trait::async_trait;

/// Mode string hosts report while inserting text.
pub const INSERT_MODE: &str = "i";

/// Read-only, point-in-time queries against the host editor.
///
/// Implementations must not mutate host state; the engine assumes arbitrary
/// interleaving among in-flight queries is safe.
#[async_trait]
pub trait Host: Send + Sync {
    /// Identifier of the active buffer.
    async fn buf_id(&self) -> Result<u64, HostError>;

    /// Filetype option of the active buffer. Empty when unset.
    async fn buf_filetype(&self) -> Result<String, HostError>;

    /// The host's current edit mode.
    async fn edit_mode(&self) -> Result<String, HostError>;

    /// The portion of the current line completion should consider.
    /// Extraction depends on the resolved edit mode.
    async fn current_input(&self, mode: &str) -> Result<String, HostError>;

    /// Buffer-local numeric option describing input-method state.
    /// A value of 1 means a composition is in progress.
    async fn input_method_option(&self) -> Result<i64, HostError>;

    /// The record of the most recently inserted completion, empty when the
    /// last edit was not a completion insertion.
    async fn last_completed_item(&self) -> Result<ParamMap, HostError>;
}

/// Host backed by fixed values.
///
/// Useful in tests and for drivers that gather editor state up front and
/// replay it into the engine.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub buf_id: u64,
    pub filetype: String,
    pub mode: String,
    pub input: String,
    pub input_method_option: i64,
    pub last_completed_item: ParamMap,
}

#[async_trait]
impl Host for StaticHost {
    async fn buf_id(&self) -> Result<u64, HostError> {
        Ok(self.buf_id)
    }

    async fn buf_filetype(&self) -> Result<String, HostError> {
        Ok(self.filetype.clone())
    }

    async fn edit_mode(&self) -> Result<String, HostError> {
        Ok(self.mode.clone())
    }

    async fn current_input(&self, _mode: &str) -> Result<String, HostError> {
        Ok(self.input.clone())
    }

    async fn input_method_option(&self) -> Result<i64, HostError> {
        Ok(self.input_method_option)
    }

    async fn last_completed_item(&self) -> Result<ParamMap, HostError> {
        Ok(self.last_completed_item.clone())
    }
}
