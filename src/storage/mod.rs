use crate::{
    domain::{Board, BoardConfig},
    error::{CareflowError, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[cfg(feature = "file-storage")]
pub mod file_storage;

/// Key under which a board is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardId(Uuid);

impl BoardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BoardId {
    type Err = CareflowError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CareflowError::InvalidBoardId(s.to_string()))
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage trait for persisting boards and their configuration
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Checks if the storage has been initialized
    async fn is_initialized(&self) -> bool;

    /// Loads the board configuration, falling back to the defaults
    async fn load_config(&self) -> Result<BoardConfig>;

    /// Saves the board configuration
    async fn save_config(&self, config: &BoardConfig) -> Result<()>;

    /// Saves a board snapshot under `id`, replacing any previous one
    async fn save_board(&self, id: &BoardId, board: &Board) -> Result<()>;

    /// Loads a board snapshot verbatim
    async fn load_board(&self, id: &BoardId) -> Result<Board>;

    /// Lists the ids of all stored boards
    async fn list_board_ids(&self) -> Result<Vec<BoardId>>;

    /// Deletes a stored board
    async fn delete_board(&self, id: &BoardId) -> Result<()>;

    /// Creates and saves a board seeded from the stored configuration
    async fn create_board(&self) -> Result<(BoardId, Board)> {
        let board = Board::new(self.load_config().await?);
        let id = BoardId::new();
        self.save_board(&id, &board).await?;
        Ok((id, board))
    }
}
