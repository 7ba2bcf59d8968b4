use crate::domain::column::{Column, ColumnId};
use crate::domain::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::error::{CareflowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    /// Title given to columns created with [`Board::create_column`]
    pub default_column_title: String,
    /// Seed column titles, left to right
    pub columns: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Care Team Board".to_string(),
            default_column_title: "New Column".to_string(),
            columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_column_title.trim().is_empty() {
            return Err(CareflowError::ConfigError(
                "default_column_title must not be blank".to_string(),
            ));
        }
        if let Some(pos) = self.columns.iter().position(|t| t.trim().is_empty()) {
            return Err(CareflowError::ConfigError(format!(
                "seed column {} has a blank title",
                pos + 1
            )));
        }
        Ok(())
    }
}

/// Kanban board state
///
/// Tasks are stored in a flat arena keyed by id. Columns only hold ordered
/// id lists, and `locations` maps every task to the column holding it. All
/// three are updated together by each operation, which validates its inputs
/// before touching any of them: a failed call leaves the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) name: String,
    pub(crate) default_column_title: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) locations: HashMap<TaskId, ColumnId>,
    pub(crate) next_column_number: u32,
    pub(crate) next_task_number: u32,
}

impl Board {
    /// Creates a board seeded with the configured columns
    pub fn new(config: BoardConfig) -> Self {
        let mut board = Self {
            name: config.name,
            default_column_title: config.default_column_title,
            columns: Vec::new(),
            tasks: HashMap::new(),
            locations: HashMap::new(),
            next_column_number: 1,
            next_task_number: 1,
        };
        for title in config.columns {
            let id = board.next_column_id();
            board.columns.push(Column::new(id, title));
        }
        board
    }

    /// Creates a board without any columns
    pub fn empty() -> Self {
        Self::new(BoardConfig {
            columns: Vec::new(),
            ..BoardConfig::default()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_column_title(&self) -> &str {
        &self.default_column_title
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// First column, left to right, with exactly this title
    pub fn column_by_title(&self, title: &str) -> Option<&Column> {
        self.column_index_by_title(title).map(|index| &self.columns[index])
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// The column currently holding the task
    pub fn column_of(&self, id: &TaskId) -> Option<&Column> {
        self.locations.get(id).and_then(|column| self.column(column))
    }

    /// Tasks of a column in display order
    pub fn tasks_in(&self, id: &ColumnId) -> Vec<&Task> {
        self.column(id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|task| self.tasks.get(task))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All tasks in board order: columns left to right, then top to bottom
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.columns
            .iter()
            .flat_map(move |column| column.task_ids.iter().filter_map(move |id| self.tasks.get(id)))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Appends a column with the default title and no tasks
    pub fn create_column(&mut self) -> ColumnId {
        let id = self.next_column_id();
        self.columns
            .push(Column::new(id.clone(), self.default_column_title.clone()));
        tracing::debug!(column = %id, "created column");
        id
    }

    /// Renames a column and rewrites the status of every task inside it
    pub fn rename_column(&mut self, id: &ColumnId, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CareflowError::BlankTitle);
        }
        let index = self.require_column(id)?;

        let column = &mut self.columns[index];
        for task_id in &column.task_ids {
            if let Some(task) = self.tasks.get_mut(task_id) {
                task.status = title.clone();
            }
        }
        column.title = title;
        Ok(())
    }

    /// Removes a column together with its tasks, returning how many tasks were discarded
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<usize> {
        let index = self.require_column(id)?;
        let column = self.columns.remove(index);

        for task_id in &column.task_ids {
            self.tasks.remove(task_id);
            self.locations.remove(task_id);
        }
        tracing::debug!(column = %id, discarded = column.task_ids.len(), "deleted column");
        Ok(column.task_ids.len())
    }

    /// Appends a new task to the end of a column
    pub fn create_task(&mut self, column_id: &ColumnId, fields: NewTask) -> Result<TaskId> {
        if fields.title.trim().is_empty() {
            return Err(CareflowError::BlankTitle);
        }
        let index = self.require_column(column_id)?;
        let id = self.next_task_id();

        let column = &mut self.columns[index];
        let task = Task::from_draft(id.clone(), fields, column.title.clone());
        column.task_ids.push(id.clone());
        self.locations.insert(id.clone(), column.id.clone());
        self.tasks.insert(id.clone(), task);

        tracing::debug!(task = %id, column = %column_id, "created task");
        Ok(id)
    }

    /// Merges `update` into a task.
    ///
    /// A status naming a different column's title moves the task to the end
    /// of that column. A status matching no column, or a blank title, rejects
    /// the whole update.
    pub fn update_task(&mut self, id: &TaskId, update: TaskUpdate) -> Result<()> {
        let source = self.require_task_column(id)?;
        if matches!(&update.title, Some(title) if title.trim().is_empty()) {
            return Err(CareflowError::BlankTitle);
        }

        let destination = match update.status.as_deref() {
            Some(status) if status != self.columns[source].title => Some(
                self.column_index_by_title(status)
                    .ok_or_else(|| CareflowError::UnknownStatus(status.to_string()))?,
            ),
            _ => None,
        };

        if let Some(task) = self.tasks.get_mut(id) {
            task.merge(update);
        }
        if let Some(destination) = destination {
            self.relocate(id, source, destination);
        }
        Ok(())
    }

    /// Removes a task from the board and returns it
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self.require_task_column(id)?;
        self.columns[index].remove_task(id);
        self.locations.remove(id);
        self.tasks
            .remove(id)
            .ok_or_else(|| CareflowError::TaskNotFound(id.to_string()))
    }

    /// Moves a task to the end of `destination`, which may be its current column
    pub fn move_task(&mut self, id: &TaskId, destination: &ColumnId) -> Result<()> {
        let source = self.require_task_column(id)?;
        let destination = self.require_column(destination)?;
        self.relocate(id, source, destination);
        Ok(())
    }

    /// Tasks matching `query` case-insensitively in title, description,
    /// priority, status or any label, in board order
    pub fn filter_tasks(&self, query: &str) -> Vec<&Task> {
        self.tasks().filter(|task| task.matches(query)).collect()
    }

    /// Verifies that the arena, the column lists and the location index agree
    pub fn check_invariants(&self) -> Result<()> {
        let violation = |msg: String| -> Result<()> { Err(CareflowError::InvariantViolation(msg)) };
        let mut column_ids = HashSet::new();
        let mut placed = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return violation(format!("column id {} appears twice", column.id));
            }
            for id in &column.task_ids {
                if !placed.insert(id) {
                    return violation(format!("task {} is placed more than once", id));
                }
                let Some(task) = self.tasks.get(id) else {
                    return violation(format!("task {} in column {} has no data", id, column.id));
                };
                if task.status != column.title {
                    return violation(format!(
                        "task {} has status '{}' but sits in column '{}'",
                        id, task.status, column.title
                    ));
                }
                if self.locations.get(id) != Some(&column.id) {
                    return violation(format!("task {} is indexed under the wrong column", id));
                }
            }
        }

        if placed.len() != self.tasks.len() || self.locations.len() != self.tasks.len() {
            return violation("some tasks are not placed in any column".to_string());
        }
        Ok(())
    }

    /// Counter ids first; once the counter is exhausted, random ids.
    fn next_column_id(&mut self) -> ColumnId {
        loop {
            let id = match self.next_column_number.checked_add(1) {
                Some(next) => {
                    let id = ColumnId::new(self.next_column_number);
                    self.next_column_number = next;
                    id
                }
                None => ColumnId::from(format!("col-{}", Uuid::new_v4().simple())),
            };
            if self.column(&id).is_none() {
                return id;
            }
        }
    }

    fn next_task_id(&mut self) -> TaskId {
        loop {
            let id = match self.next_task_number.checked_add(1) {
                Some(next) => {
                    let id = TaskId::new(self.next_task_number);
                    self.next_task_number = next;
                    id
                }
                None => TaskId::from(format!("task-{}", Uuid::new_v4().simple())),
            };
            if !self.tasks.contains_key(&id) {
                return id;
            }
        }
    }

    fn column_index_by_title(&self, title: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.title == title)
    }

    fn require_column(&self, id: &ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| CareflowError::ColumnNotFound(id.to_string()))
    }

    fn require_task_column(&self, id: &TaskId) -> Result<usize> {
        self.locations
            .get(id)
            .and_then(|column| self.columns.iter().position(|c| &c.id == column))
            .ok_or_else(|| CareflowError::TaskNotFound(id.to_string()))
    }

    /// Both indices must be valid and `id` must sit in `from`.
    fn relocate(&mut self, id: &TaskId, from: usize, to: usize) {
        self.columns[from].remove_task(id);
        self.columns[to].task_ids.push(id.clone());

        let destination = &self.columns[to];
        self.locations.insert(id.clone(), destination.id.clone());
        if let Some(task) = self.tasks.get_mut(id) {
            task.status = destination.title.clone();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
