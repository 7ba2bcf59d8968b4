//! Exchange shape of a board: `{ columns: [{ id, title, tasks: [...] }] }`.

use crate::domain::board::{Board, BoardConfig};
use crate::domain::column::{Column, ColumnId};
use crate::domain::task::Task;
use crate::error::{CareflowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

impl Board {
    /// Copies the board into its exchange shape
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self
                .columns
                .iter()
                .map(|column| ColumnSnapshot {
                    id: column.id.clone(),
                    title: column.title.clone(),
                    tasks: column
                        .task_ids
                        .iter()
                        .filter_map(|id| self.tasks.get(id).cloned())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Restores a board using the default configuration for new columns
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        Self::from_snapshot_with(BoardConfig::default(), snapshot)
    }

    /// Restores a board verbatim.
    ///
    /// The config supplies the board name and the default column title; its
    /// seed columns are ignored. Blank or duplicate ids and tasks whose status
    /// differs from their column's title are rejected.
    pub fn from_snapshot_with(config: BoardConfig, snapshot: BoardSnapshot) -> Result<Self> {
        let invalid = |msg: String| -> Result<Self> { Err(CareflowError::InvalidSnapshot(msg)) };
        let mut board = Board::new(BoardConfig {
            columns: Vec::new(),
            ..config
        });
        let mut column_ids = HashSet::new();

        for column in snapshot.columns {
            if column.id.as_str().trim().is_empty() {
                return invalid("column with a blank id".to_string());
            }
            if !column_ids.insert(column.id.clone()) {
                return invalid(format!("duplicate column id {}", column.id));
            }

            let mut restored = Column::new(column.id, column.title);
            for task in column.tasks {
                if task.id.as_str().trim().is_empty() {
                    return invalid(format!("task with a blank id in column {}", restored.id));
                }
                if board.tasks.contains_key(&task.id) {
                    return invalid(format!("duplicate task id {}", task.id));
                }
                if task.status != restored.title {
                    return invalid(format!(
                        "task {} has status '{}' but sits in column '{}'",
                        task.id, task.status, restored.title
                    ));
                }
                restored.task_ids.push(task.id.clone());
                board.locations.insert(task.id.clone(), restored.id.clone());
                board.tasks.insert(task.id.clone(), task);
            }
            board.columns.push(restored);
        }

        board.next_column_number = board
            .columns
            .iter()
            .filter_map(|c| c.id.counter())
            .max()
            .map_or(1, |n| n.saturating_add(1));
        board.next_task_number = board
            .tasks
            .keys()
            .filter_map(|id| id.counter())
            .max()
            .map_or(1, |n| n.saturating_add(1));

        tracing::debug!(
            columns = board.columns.len(),
            tasks = board.tasks.len(),
            "restored board from snapshot"
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{NewTask, Priority, TaskId};
    use chrono::NaiveDate;

    const LEGACY_BOARD: &str = r#"{
        "columns": [
            {"id": "1", "title": "To Do", "tasks": [
                {"id": "k3j4h5l2m", "title": "Refill prescription", "description": "",
                 "priority": "high", "labels": ["pharmacy"], "dueDate": "2024-03-14",
                 "status": "To Do"}
            ]},
            {"id": "2", "title": "In Progress", "tasks": []},
            {"id": "3", "title": "Done", "tasks": []}
        ]
    }"#;

    #[test]
    fn test_snapshot_shape() {
        let mut board = Board::default();
        board
            .create_task(
                &ColumnId::from("col2"),
                NewTask::titled("Call lab").with_label("lab"),
            )
            .unwrap();

        let value = serde_json::to_value(board.snapshot()).unwrap();
        let columns = value["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1]["id"], "col2");
        assert_eq!(columns[1]["title"], "In Progress");
        assert_eq!(columns[1]["tasks"][0]["status"], "In Progress");
        assert_eq!(columns[1]["tasks"][0]["dueDate"], "");
        assert_eq!(columns[1]["tasks"][0]["priority"], "medium");
    }

    #[test]
    fn test_restore_is_verbatim() {
        let mut board = Board::default();
        let id = board
            .create_task(&ColumnId::from("col1"), NewTask::titled("A"))
            .unwrap();
        board.move_task(&id, &ColumnId::from("col3")).unwrap();

        let restored = Board::from_snapshot(board.snapshot()).unwrap();
        assert_eq!(restored.snapshot(), board.snapshot());
        assert!(restored.check_invariants().is_ok());
    }

    #[test]
    fn test_restore_legacy_ids() {
        let snapshot: BoardSnapshot = serde_json::from_str(LEGACY_BOARD).unwrap();
        let mut board = Board::from_snapshot(snapshot).unwrap();

        let task = board.task(&TaskId::from("k3j4h5l2m")).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 3, 14));

        assert_eq!(board.create_column().as_str(), "col1");
        let new_task = board
            .create_task(&ColumnId::from("1"), NewTask::titled("B"))
            .unwrap();
        assert_eq!(new_task.as_str(), "task1");
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_restore_resumes_counters() {
        let mut board = Board::default();
        for title in ["A", "B", "C"] {
            board
                .create_task(&ColumnId::from("col1"), NewTask::titled(title))
                .unwrap();
        }

        let mut restored = Board::from_snapshot(board.snapshot()).unwrap();
        assert_eq!(restored.create_column().as_str(), "col4");
        let id = restored
            .create_task(&ColumnId::from("col1"), NewTask::titled("D"))
            .unwrap();
        assert_eq!(id.as_str(), "task4");
    }

    #[test]
    fn test_restore_at_counter_limit_still_creates() {
        let json = r#"{"columns":[{"id":"col4294967295","title":"To Do","tasks":[
            {"id":"task4294967295","title":"A","status":"To Do"}]}]}"#;
        let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
        let mut board = Board::from_snapshot(snapshot).unwrap();
        assert_eq!(board.next_column_number, u32::MAX);

        let first = board.create_column();
        let second = board.create_column();
        assert_ne!(first.as_str(), "col4294967295");
        assert_ne!(first, second);

        let task = board
            .create_task(&ColumnId::from("col4294967295"), NewTask::titled("B"))
            .unwrap();
        assert_ne!(task.as_str(), "task4294967295");
        assert_eq!(board.task_count(), 2);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_restore_rejects_status_mismatch() {
        let mut snapshot: BoardSnapshot = serde_json::from_str(LEGACY_BOARD).unwrap();
        snapshot.columns[0].tasks[0].status = "Done".to_string();

        assert!(matches!(
            Board::from_snapshot(snapshot),
            Err(CareflowError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_restore_rejects_duplicates() {
        let mut snapshot: BoardSnapshot = serde_json::from_str(LEGACY_BOARD).unwrap();
        let mut copy = snapshot.columns[0].tasks[0].clone();
        copy.status = "In Progress".to_string();
        snapshot.columns[1].tasks.push(copy);
        assert!(Board::from_snapshot(snapshot).is_err());

        let mut snapshot: BoardSnapshot = serde_json::from_str(LEGACY_BOARD).unwrap();
        snapshot.columns[2].id = ColumnId::from("1");
        assert!(Board::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_restore_uses_config_defaults() {
        let config = BoardConfig {
            name: "Ward 4".to_string(),
            default_column_title: "Untitled".to_string(),
            columns: vec!["Ignored".to_string()],
        };
        let mut board = Board::from_snapshot_with(config, BoardSnapshot::default()).unwrap();

        assert_eq!(board.name(), "Ward 4");
        assert!(board.columns().is_empty());
        let id = board.create_column();
        assert_eq!(board.column(&id).unwrap().title(), "Untitled");
    }
}
