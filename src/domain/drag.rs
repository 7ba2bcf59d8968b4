use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::domain::reducer::{reduce, Operation};
use crate::domain::task::TaskId;

/// Interim drag-and-drop state, held outside the board.
///
/// The board is only touched by [`DragSession::drop_on`], which commits a
/// single `MoveTask` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<TaskId>,
    hovered: Option<ColumnId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging a task, replacing any drag already in progress
    pub fn start(&mut self, task_id: TaskId) {
        tracing::debug!(task = %task_id, "drag started");
        self.dragged = Some(task_id);
        self.hovered = None;
    }

    /// Records the column under the pointer
    pub fn hover(&mut self, column_id: ColumnId) {
        if self.dragged.is_some() {
            self.hovered = Some(column_id);
        }
    }

    pub fn dragged(&self) -> Option<&TaskId> {
        self.dragged.as_ref()
    }

    pub fn hovered(&self) -> Option<&ColumnId> {
        self.hovered.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Drops the dragged task onto a column and ends the drag
    pub fn drop_on(&mut self, board: Board, column_id: ColumnId) -> Board {
        self.hovered = None;
        match self.dragged.take() {
            Some(task_id) => {
                tracing::debug!(task = %task_id, column = %column_id, "drag dropped");
                reduce(board, Operation::MoveTask { task_id, column_id })
            }
            None => board,
        }
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }
}
