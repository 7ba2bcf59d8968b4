//! # Careflow Core
//!
//! Board state manager for the care team kanban board.
//!
//! A [`Board`] owns ordered columns, each holding ordered tasks, and keeps
//! every task's `status` equal to the title of the column that holds it.
//! Mutations are available as methods returning [`Result`] and as
//! [`Operation`] values fed through [`reduce`], which turns refused
//! operations into logged no-ops. Persistence sits behind the [`Storage`]
//! trait.

pub mod domain;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig},
    column::{Column, ColumnId},
    drag::DragSession,
    reducer::{reduce, Operation},
    snapshot::{BoardSnapshot, ColumnSnapshot},
    task::{NewTask, Priority, Task, TaskId, TaskUpdate},
};
pub use error::{CareflowError, Result};
#[cfg(feature = "file-storage")]
pub use storage::file_storage::FileStorage;
pub use storage::{BoardId, Storage};
