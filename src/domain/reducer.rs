//! Board transitions as values: `reduce(Board, Operation) -> Board`.

use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::domain::task::{NewTask, TaskId, TaskUpdate};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single board mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Operation {
    CreateColumn,
    RenameColumn { column_id: ColumnId, title: String },
    DeleteColumn { column_id: ColumnId },
    CreateTask { column_id: ColumnId, fields: NewTask },
    UpdateTask { task_id: TaskId, fields: TaskUpdate },
    DeleteTask { task_id: TaskId },
    MoveTask { task_id: TaskId, column_id: ColumnId },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateColumn => "create_column",
            Self::RenameColumn { .. } => "rename_column",
            Self::DeleteColumn { .. } => "delete_column",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::MoveTask { .. } => "move_task",
        }
    }
}

impl Board {
    /// Applies an operation, reporting why it was refused
    pub fn try_apply(&mut self, op: Operation) -> Result<()> {
        match op {
            Operation::CreateColumn => {
                self.create_column();
            }
            Operation::RenameColumn { column_id, title } => self.rename_column(&column_id, title)?,
            Operation::DeleteColumn { column_id } => {
                self.delete_column(&column_id)?;
            }
            Operation::CreateTask { column_id, fields } => {
                self.create_task(&column_id, fields)?;
            }
            Operation::UpdateTask { task_id, fields } => self.update_task(&task_id, fields)?,
            Operation::DeleteTask { task_id } => {
                self.delete_task(&task_id)?;
            }
            Operation::MoveTask { task_id, column_id } => self.move_task(&task_id, &column_id)?,
        }
        Ok(())
    }

    /// Applies an operation and returns the next board. Refused operations
    /// leave the board as it was.
    pub fn apply(mut self, op: Operation) -> Self {
        let name = op.name();
        if let Err(err) = self.try_apply(op) {
            tracing::debug!(operation = name, error = %err, "ignored board operation");
        }
        self
    }
}

/// Computes the board that follows `op`
pub fn reduce(board: Board, op: Operation) -> Board {
    board.apply(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Priority;

    fn col(id: &str) -> ColumnId {
        ColumnId::from(id)
    }

    fn create(column: &str, title: &str) -> Operation {
        Operation::CreateTask {
            column_id: col(column),
            fields: NewTask::titled(title),
        }
    }

    fn replay(ops: Vec<Operation>) -> Board {
        ops.into_iter().fold(Board::default(), reduce)
    }

    #[test]
    fn test_reduce_sequence() {
        let board = replay(vec![
            create("col1", "Triage referral"),
            create("col1", "Schedule consult"),
            Operation::MoveTask {
                task_id: TaskId::new(1),
                column_id: col("col2"),
            },
            Operation::RenameColumn {
                column_id: col("col2"),
                title: "With Doctor".to_string(),
            },
        ]);

        let task = board.task(&TaskId::new(1)).unwrap();
        assert_eq!(task.status, "With Doctor");
        assert_eq!(board.tasks_in(&col("col1")).len(), 1);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_refused_operations_leave_board_unchanged() {
        let board = replay(vec![create("col1", "A")]);

        let refused = vec![
            create("col1", ""),
            create("col9", "B"),
            Operation::RenameColumn {
                column_id: col("col1"),
                title: "  ".to_string(),
            },
            Operation::DeleteColumn { column_id: col("col9") },
            Operation::UpdateTask {
                task_id: TaskId::new(1),
                fields: TaskUpdate::new().status("Archived"),
            },
            Operation::UpdateTask {
                task_id: TaskId::new(7),
                fields: TaskUpdate::new().title("Ghost"),
            },
            Operation::DeleteTask { task_id: TaskId::new(7) },
            Operation::MoveTask {
                task_id: TaskId::new(1),
                column_id: col("col9"),
            },
        ];

        for op in refused {
            let next = reduce(board.clone(), op.clone());
            assert_eq!(next, board, "{} changed the board", op.name());
        }
    }

    #[test]
    fn test_status_consistency_holds_after_every_step() {
        let ops = vec![
            Operation::CreateColumn,
            create("col1", "A"),
            create("col4", "B"),
            Operation::MoveTask {
                task_id: TaskId::new(1),
                column_id: col("col4"),
            },
            Operation::RenameColumn {
                column_id: col("col4"),
                title: "Awaiting Results".to_string(),
            },
            Operation::UpdateTask {
                task_id: TaskId::new(2),
                fields: TaskUpdate::new().status("Done").priority(Priority::Low),
            },
            Operation::DeleteColumn { column_id: col("col3") },
            create("col2", "C"),
            Operation::DeleteTask { task_id: TaskId::new(1) },
        ];

        let mut board = Board::default();
        for op in ops {
            board = reduce(board, op);
            assert!(board.check_invariants().is_ok());
            for column in board.columns() {
                for task in board.tasks_in(column.id()) {
                    assert_eq!(task.status, column.title());
                }
            }
        }
        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn test_previous_boards_are_untouched() {
        let before = replay(vec![create("col1", "A")]);
        let after = reduce(
            before.clone(),
            Operation::MoveTask {
                task_id: TaskId::new(1),
                column_id: col("col3"),
            },
        );

        assert_eq!(before.task(&TaskId::new(1)).unwrap().status, "To Do");
        assert_eq!(after.task(&TaskId::new(1)).unwrap().status, "Done");
    }

    #[test]
    fn test_operation_wire_format() {
        let json = r#"{"op":"moveTask","taskId":"task3","columnId":"col2"}"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert_eq!(
            op,
            Operation::MoveTask {
                task_id: TaskId::new(3),
                column_id: col("col2"),
            }
        );

        let op: Operation = serde_json::from_str(r#"{"op":"createColumn"}"#).unwrap();
        assert_eq!(op, Operation::CreateColumn);

        let json = r#"{"op":"createTask","columnId":"col1","fields":{"title":"Order labs","priority":"high","dueDate":"2024-09-01"}}"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        let Operation::CreateTask { fields, .. } = op else {
            panic!("expected createTask");
        };
        assert_eq!(fields.priority, Priority::High);
        assert!(fields.labels.is_empty());

        let bad = r#"{"op":"updateTask","taskId":"task1","fields":{"id":"task9"}}"#;
        assert!(serde_json::from_str::<Operation>(bad).is_err());
    }
}
