use log::{error, info};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use uuid::Uuid;

use crate::error::Result;
use crate::provider::{ExternalSearch, JobProviderClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Queued,
    Running,
    Completed,
    NoResults,
    Cancelled,
    Failed(String),
}

/// What a worker sends back once `search_external` returns.
pub struct TaskOutcome {
    pub id: String,
    pub result: Result<ExternalSearch>,
}

/// Runs external searches on worker threads. Every task shares one client,
/// and so one salary cache.
pub struct SearchTasks {
    client: Arc<JobProviderClient>,
    statuses: Arc<Mutex<HashMap<String, TaskStatus>>>,
}

impl SearchTasks {
    pub fn new(client: Arc<JobProviderClient>) -> Self {
        SearchTasks {
            client,
            statuses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn submit<F>(&self, query: impl Into<String>, choose_count: F) -> (String, Receiver<TaskOutcome>)
    where
        F: FnOnce(usize) -> Option<usize> + Send + 'static,
    {
        let id = Uuid::new_v4().to_string();
        let query = query.into();
        let (tx, rx) = mpsc::channel();

        lock(&self.statuses).insert(id.clone(), TaskStatus::Queued);

        let client = self.client.clone();
        let statuses = self.statuses.clone();
        let task_id = id.clone();

        thread::spawn(move || {
            lock(&statuses).insert(task_id.clone(), TaskStatus::Running);
            info!("Task {} searching for '{}'", task_id, query);

            let result = client.search_external(&query, choose_count);

            let status = match &result {
                Ok(ExternalSearch::Found { records, .. }) => {
                    info!("Task {} completed with {} records", task_id, records.len());
                    TaskStatus::Completed
                }
                Ok(ExternalSearch::NoResults) => TaskStatus::NoResults,
                Ok(ExternalSearch::Cancelled) => TaskStatus::Cancelled,
                Err(e) => {
                    error!("Task {} failed: {}", task_id, e);
                    TaskStatus::Failed(e.to_string())
                }
            };
            lock(&statuses).insert(task_id.clone(), status);

            // Receiver may be gone if the caller stopped listening.
            let _ = tx.send(TaskOutcome { id: task_id, result });
        });

        (id, rx)
    }

    pub fn status(&self, id: &str) -> Option<TaskStatus> {
        lock(&self.statuses).get(id).cloned()
    }

    /// Drops a task's status entry. Call once its outcome has been received;
    /// entries are otherwise kept for the life of `SearchTasks`.
    pub fn forget(&self, id: &str) -> Option<TaskStatus> {
        lock(&self.statuses).remove(id)
    }

    pub fn tracked(&self) -> usize {
        lock(&self.statuses).len()
    }
}

fn lock(statuses: &Mutex<HashMap<String, TaskStatus>>) -> MutexGuard<'_, HashMap<String, TaskStatus>> {
    statuses.lock().unwrap_or_else(|e| e.into_inner())
}
