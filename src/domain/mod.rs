pub mod board;
pub mod column;
pub mod drag;
pub mod reducer;
pub mod snapshot;
pub mod task;

pub use board::{Board, BoardConfig};
pub use column::{Column, ColumnId};
pub use drag::DragSession;
pub use reducer::{reduce, Operation};
pub use snapshot::{BoardSnapshot, ColumnSnapshot};
pub use task::{NewTask, Priority, Task, TaskId, TaskUpdate};
