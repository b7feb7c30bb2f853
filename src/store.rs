// Task store: in-memory collection with write-through persistence

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::error::StoreError;
use crate::models::{Priority, Status, Task, TaskDraft, seed_tasks};
use crate::query::Query;
use crate::storage::{Storage, validate_key};

/// Key the collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Suffix of the key that keeps a stored value the store could not fully read
pub const BACKUP_SUFFIX: &str = "-backup";

/// Key under which the unreadable value stored at `key` is preserved
pub fn backup_key(key: &str) -> String {
    format!("{}{}", key, BACKUP_SUFFIX)
}

/// Handle returned by [`TaskStore::subscribe`]
pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&[Task])>;

#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Storage key for the serialized collection
    pub key: String,
    /// Seed the example tasks when nothing is stored; otherwise start empty
    pub seed_examples: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            seed_examples: true,
        }
    }
}

/// Sole owner of the task collection and its durable mirror.
///
/// Every mutation is applied in memory first, then the whole collection is
/// written through to storage. Storage failures are logged and counted but
/// never undo or block the in-memory change.
pub struct TaskStore<S: Storage> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
    persist_failures: usize,
    /// Raw stored value to copy under the backup key before the first overwrite
    pending_backup: Option<String>,
}

impl<S: Storage> TaskStore<S> {
    /// Load the collection from `storage`, seeding example tasks if empty
    pub fn initialize(storage: S) -> Self {
        Self::initialize_with(storage, StoreOptions::default())
    }

    /// Load the collection from `storage` under `options.key`.
    ///
    /// When nothing is stored the seed collection is written through. When the
    /// stored value cannot be read or decoded, the store starts from the seed
    /// and leaves the stored value alone until the first mutation. A value that
    /// decoded only partly, or not at all, is copied under [`backup_key`]
    /// before that mutation overwrites it.
    pub fn initialize_with(storage: S, options: StoreOptions) -> Self {
        if let Err(e) = validate_key(&options.key) {
            warn!(key = %options.key, error = %e, "Storage key rejected, persistence will fail");
        }

        let seed = || if options.seed_examples { seed_tasks() } else { Vec::new() };

        let mut pending_backup = None;
        let (tasks, write_seed) = match storage.read(&options.key) {
            Ok(Some(raw)) => match codec::decode_counted(&raw) {
                Ok(decoded) if decoded.is_lossless() => (decoded.tasks, false),
                Ok(decoded) => {
                    warn!(
                        key = %options.key,
                        skipped = decoded.skipped,
                        "Some stored tasks were unreadable, original kept for backup"
                    );
                    pending_backup = Some(raw);
                    (decoded.tasks, false)
                }
                Err(e) => {
                    warn!(key = %options.key, error = %e, "Stored tasks unreadable, starting from seed");
                    pending_backup = Some(raw);
                    (seed(), false)
                }
            },
            Ok(None) => {
                info!(key = %options.key, "No stored tasks, seeding");
                (seed(), true)
            }
            Err(e) => {
                warn!(key = %options.key, error = %e, "Storage unavailable, continuing in memory");
                (seed(), false)
            }
        };

        let mut store = Self {
            storage,
            key: options.key,
            tasks,
            observers: Vec::new(),
            next_subscription: 0,
            persist_failures: 0,
            pending_backup,
        };

        if write_seed {
            store.persist();
        }

        info!(key = %store.key, count = store.tasks.len(), "Task store initialized");
        store
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current collection in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run a composed query over a snapshot; the collection is not reordered
    pub fn query(&self, query: &Query) -> Vec<Task> {
        query.apply(&self.tasks)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Number of writes that failed since initialization
    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    /// True while a partly unreadable stored value still awaits its backup
    pub fn has_pending_backup(&self) -> bool {
        self.pending_backup.is_some()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Validate a draft, assign a fresh id and append it
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        draft.validate()?;

        let task = Task::from_draft(self.next_id(), draft);
        debug!(id = %task.id, title = %task.title, "create: appending task");
        self.tasks.push(task.clone());
        self.commit();

        Ok(task)
    }

    /// Replace the task with the same id wholesale
    pub fn update(&mut self, task: Task) -> Result<Task, StoreError> {
        task.validate()?;

        let index = self.position(&task.id)?;
        debug!(id = %task.id, "update: replacing task");
        self.tasks[index] = task.clone();
        self.commit();

        Ok(task)
    }

    pub fn update_priority(&mut self, id: &str, priority: Priority) -> Result<Task, StoreError> {
        let index = self.position(id)?;
        debug!(id, %priority, "update_priority");
        self.tasks[index].priority = priority;
        let task = self.tasks[index].clone();
        self.commit();

        Ok(task)
    }

    pub fn update_status(&mut self, id: &str, status: Status) -> Result<Task, StoreError> {
        let index = self.position(id)?;
        debug!(id, %status, "update_status");
        self.tasks[index].status = status;
        let task = self.tasks[index].clone();
        self.commit();

        Ok(task)
    }

    /// Remove a task, returning it. Absent ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete: no such task");
            return None;
        };

        let removed = self.tasks.remove(index);
        debug!(id, "delete: removed task");
        self.commit();

        Some(removed)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Call `observer` with the full collection after every mutation
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Task]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.tasks.iter().position(|t| t.id == id).ok_or_else(|| {
            debug!(id, "Task not found");
            StoreError::NotFound(id.to_string())
        })
    }

    /// UUID v7, regenerated on the (negligible) chance it is already taken
    fn next_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self) {
        self.persist();
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.tasks);
        }
    }

    fn persist(&mut self) {
        if let Some(raw) = self.pending_backup.take() {
            let backup = backup_key(&self.key);
            if let Err(e) = self.storage.write(&backup, &raw) {
                self.persist_failures += 1;
                warn!(
                    key = %self.key,
                    backup = %backup,
                    error = %e,
                    "Failed to back up stored tasks, not overwriting them"
                );
                self.pending_backup = Some(raw);
                return;
            }
            info!(key = %self.key, backup = %backup, "Backed up unreadable stored tasks");
        }

        let result = codec::encode(&self.tasks).and_then(|raw| self.storage.write(&self.key, &raw));
        if let Err(e) = result {
            self.persist_failures += 1;
            warn!(
                key = %self.key,
                failures = self.persist_failures,
                error = %e,
                "Failed to persist tasks, keeping changes in memory"
            );
        }
    }
}
