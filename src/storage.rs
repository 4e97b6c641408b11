use crate::task::TaskRepository;
use log::info;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read task file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write task file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Task file '{}' is not valid task JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Seam between the durable file and the in-memory collection. Everything
/// above this trait works on a [`TaskRepository`] and never touches the
/// filesystem directly.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    fn load(&self) -> Result<TaskRepository, StorageError>;
    fn save(&self, tasks: &TaskRepository) -> Result<(), StorageError>;
}

/// Stores the whole collection as a pretty-printed JSON array in a single
/// file. An absent or zero-length file is the valid first-run state and loads
/// as the empty collection.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<TaskRepository, StorageError> {
        if !self.path.exists() {
            return Ok(TaskRepository::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        if contents.is_empty() {
            return Ok(TaskRepository::new());
        }
        let tasks: TaskRepository =
            serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        info!("Loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    fn save(&self, tasks: &TaskRepository) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source: source.into(),
        })?;
        fs::write(&self.path, json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
