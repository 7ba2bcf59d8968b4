use crate::{
    domain::{Board, BoardConfig, BoardSnapshot},
    error::{CareflowError, Result},
    storage::{BoardId, Storage},
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;

/// File-based storage: one pretty-printed JSON snapshot per board plus a
/// TOML configuration file
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const CAREFLOW_DIR: &'static str = ".careflow";
    const BOARDS_DIR: &'static str = "boards";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::CAREFLOW_DIR),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn board_file(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;

        if !self.config_file().exists() {
            self.save_config(&BoardConfig::default()).await?;
        }

        tracing::debug!(path = %self.root_path.display(), "initialized board storage");
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.config_file().exists()
    }

    async fn load_config(&self) -> Result<BoardConfig> {
        let config_file = self.config_file();

        if !config_file.exists() {
            return Ok(BoardConfig::default());
        }

        let contents = fs::read_to_string(&config_file).await?;
        let config: BoardConfig = toml::from_str(&contents)?;
        config.validate()?;

        Ok(config)
    }

    async fn save_config(&self, config: &BoardConfig) -> Result<()> {
        config.validate()?;
        self.ensure_directory_exists(&self.root_path).await?;

        let contents = toml::to_string_pretty(config)?;
        fs::write(self.config_file(), contents).await?;
        Ok(())
    }

    async fn save_board(&self, id: &BoardId, board: &Board) -> Result<()> {
        if !self.is_initialized().await {
            return Err(CareflowError::ProjectNotInitialized);
        }
        self.ensure_directory_exists(&self.boards_dir()).await?;

        let json = serde_json::to_string_pretty(&board.snapshot())?;
        fs::write(self.board_file(id), json).await?;

        tracing::debug!(board = %id, tasks = board.task_count(), "saved board");
        Ok(())
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        if !self.is_initialized().await {
            return Err(CareflowError::ProjectNotInitialized);
        }

        let board_file = self.board_file(id);
        if !board_file.exists() {
            return Err(CareflowError::BoardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&board_file).await?;
        let snapshot: BoardSnapshot = serde_json::from_str(&contents)?;
        let config = self.load_config().await?;

        Board::from_snapshot_with(config, snapshot)
    }

    async fn list_board_ids(&self) -> Result<Vec<BoardId>> {
        let boards_dir = self.boards_dir();

        if !boards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&boards_dir).await?;
        let mut ids: Vec<BoardId> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    match BoardId::from_str(stem) {
                        Ok(id) => ids.push(id),
                        Err(_) => {
                            tracing::warn!(path = %path.display(), "skipping unrecognised board file")
                        }
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let board_file = self.board_file(id);

        if !board_file.exists() {
            return Err(CareflowError::BoardNotFound(id.to_string()));
        }

        fs::remove_file(board_file).await?;
        Ok(())
    }
}
