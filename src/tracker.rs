use crate::storage::{Storage, StorageError};
use crate::task::{Status, Task, TaskError};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Runs each command as one load/apply/save cycle against the storage it was
/// constructed with. Mutations save the full resulting collection; on any
/// failure nothing is saved, so the file keeps its previous state. `list`
/// never saves.
pub struct TaskTracker<S: Storage> {
    storage: S,
}

impl<S: Storage> TaskTracker<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn add(&self, description: &str) -> Result<u32, Error> {
        let mut tasks = self.storage.load()?;
        let id = tasks.add(description)?;
        self.storage.save(&tasks)?;
        info!("Added task {}", id);
        Ok(id)
    }

    pub fn update(&self, id: u32, description: &str) -> Result<(), Error> {
        let mut tasks = self.storage.load()?;
        tasks.update(id, description)?;
        self.storage.save(&tasks)?;
        info!("Updated task {}", id);
        Ok(())
    }

    pub fn delete(&self, id: u32) -> Result<(), Error> {
        let mut tasks = self.storage.load()?;
        tasks.delete(id)?;
        self.storage.save(&tasks)?;
        info!("Deleted task {}", id);
        Ok(())
    }

    pub fn mark(&self, id: u32, status: Status) -> Result<(), Error> {
        let mut tasks = self.storage.load()?;
        tasks.mark(id, status)?;
        self.storage.save(&tasks)?;
        info!("Marked task {} as {}", id, status);
        Ok(())
    }

    pub fn list(&self, filter: Option<Status>) -> Result<Vec<Task>, Error> {
        let tasks = self.storage.load()?;
        Ok(tasks.iter_with_status(filter).cloned().collect())
    }
}
