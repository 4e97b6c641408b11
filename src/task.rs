use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task description cannot be empty")]
    EmptyDescription,
    #[error("'{0}' is not a valid status, expected one of: todo, in-progress, done")]
    InvalidStatus(String),
    #[error("Task with ID {0} does not exist")]
    NotFound(u32),
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(TaskError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: u32,
    description: String,
    status: Status,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    fn new(id: u32, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. [{}] {} (created: {}, updated: {})",
            self.id,
            self.status,
            self.description,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.updated_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

/// Ordered collection of tasks. Serializes as a bare JSON array, so the
/// on-disk file is exactly the task list with no envelope around it.
#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone)]
#[serde(transparent)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Next ID to assign: 1 for an empty collection, otherwise one past the
    /// largest existing ID. Deleted IDs are never handed out again unless the
    /// deleted task held the maximum.
    pub fn next_id(&self) -> u32 {
        self.tasks.iter().map(Task::id).max().map_or(1, |max| max + 1)
    }

    /// Appends a new task with the next ID and status `todo`, returning the
    /// assigned ID.
    pub fn add(&mut self, description: &str) -> Result<u32, TaskError> {
        if description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        let id = self.next_id();
        self.tasks.push(Task::new(id, description.to_string()));
        Ok(id)
    }

    /// Replaces the description of the task with the given ID.
    pub fn update(&mut self, id: u32, description: &str) -> Result<(), TaskError> {
        if description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        let task = self.find_by_id_mut(id)?;
        task.description = description.to_string();
        task.updated_at = Utc::now();
        Ok(())
    }

    /// Removes the task with the given ID, keeping the remaining tasks in
    /// their original order.
    pub fn delete(&mut self, id: u32) -> Result<(), TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        self.tasks.remove(index);
        Ok(())
    }

    /// Moves the task with the given ID to the given status.
    pub fn mark(&mut self, id: u32, status: Status) -> Result<(), TaskError> {
        let task = self.find_by_id_mut(id)?;
        task.status = status;
        task.updated_at = Utc::now();
        Ok(())
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn find_by_id_mut(&mut self, id: u32) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Tasks with the given status, in collection order. `None` keeps every
    /// task.
    pub fn iter_with_status(&self, filter: Option<Status>) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| filter.is_none_or(|status| task.status == status))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}


#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn parses_the_three_known_statuses() {
        assert_eq!("todo".parse::<Status>().unwrap(), Status::Todo);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
    }

    #[test]
    fn rejects_unknown_status_values() {
        let result = "bogus".parse::<Status>();

        assert!(matches!(result, Err(TaskError::InvalidStatus(ref s)) if s == "bogus"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for status in [Status::Todo, Status::InProgress, Status::Done] {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn repository_serializes_as_a_bare_array_with_wire_field_names() {
        let mut repo = TaskRepository::new();
        repo.add("Buy milk").unwrap();
        repo.add("Walk the dog").unwrap();
        repo.mark(2, Status::InProgress).unwrap();

        let json = serde_json::to_value(&repo).unwrap();

        let tasks = json.as_array().expect("file content should be a plain array");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0]["id"], 1);
        assert_eq!(tasks[0]["description"], "Buy milk");
        assert_eq!(tasks[0]["status"], "todo");
        assert!(tasks[0].get("createdAt").is_some());
        assert!(tasks[0].get("updatedAt").is_some());
        assert_eq!(tasks[1]["status"], "in-progress");
    }

    #[test]
    fn repository_deserializes_from_wire_format() {
        let json = r#"[
            {
                "id": 1,
                "description": "Task 1",
                "status": "in-progress",
                "createdAt": "2023-01-01T00:00:00Z",
                "updatedAt": "2023-01-02T00:00:00Z"
            },
            {
                "id": 4,
                "description": "Task 4",
                "status": "done",
                "createdAt": "2023-01-03T00:00:00Z",
                "updatedAt": "2023-01-03T00:00:00Z"
            }
        ]"#;

        let repo: TaskRepository = serde_json::from_str(json).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_id(1).unwrap().status(), Status::InProgress);
        assert_eq!(repo.find_by_id(4).unwrap().description(), "Task 4");
        assert_eq!(repo.next_id(), 5, "next_id follows the largest stored ID");
    }

    #[test]
    fn repository_round_trips_through_json() {
        let mut repo = TaskRepository::new();
        repo.add("Task 1").unwrap();
        repo.add("Task 2").unwrap();
        repo.mark(1, Status::Done).unwrap();
        repo.update(2, "Task 2, revised").unwrap();

        let json = serde_json::to_string_pretty(&repo).unwrap();
        let reloaded: TaskRepository = serde_json::from_str(&json).unwrap();

        assert_eq!(
            reloaded, repo,
            "Same tasks, same order, same field values after a round trip"
        );
    }
}
