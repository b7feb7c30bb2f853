// Serialization of the task collection as a JSON array

use eyre::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::models::Task;

/// Encode the collection in insertion order
pub fn encode(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize tasks")
}

/// Tasks read from a stored payload plus the number of elements dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub tasks: Vec<Task>,
    pub skipped: usize,
}

impl Decoded {
    /// True when every stored element made it into `tasks`
    pub fn is_lossless(&self) -> bool {
        self.skipped == 0
    }
}

/// Decode a stored collection.
///
/// The payload must be a JSON array. Elements that are not valid task records
/// are skipped with a warning, as are later records repeating an earlier id.
pub fn decode(raw: &str) -> Result<Vec<Task>> {
    decode_counted(raw).map(|decoded| decoded.tasks)
}

/// Like [`decode`], but reports how many elements were skipped
pub fn decode_counted(raw: &str) -> Result<Decoded> {
    let values: Vec<Value> = serde_json::from_str(raw).context("Stored tasks are not a JSON array")?;

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(values.len());
    let mut skipped = 0;

    for (index, value) in values.into_iter().enumerate() {
        let task: Task = match serde_json::from_value(value) {
            Ok(t) => t,
            Err(e) => {
                warn!(index, error = ?e, "Failed to parse task record, skipping");
                skipped += 1;
                continue;
            }
        };

        if !seen.insert(task.id.clone()) {
            warn!(index, id = %task.id, "Duplicate task id, keeping first occurrence");
            skipped += 1;
            continue;
        }

        tasks.push(task);
    }

    debug!(count = tasks.len(), skipped, "Decoded tasks");
    Ok(Decoded { tasks, skipped })
}
