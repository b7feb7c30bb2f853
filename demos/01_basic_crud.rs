//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates creating, reading, updating and deleting tasks
//! with a file-backed TaskStore.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use taskboard::{FileStorage, Priority, Status, StoreOptions, TaskDraft, TaskStore};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("Taskboard Basic CRUD Example");
    println!("============================\n");
    println!("Store path: {}\n", store_path.display());

    // Start empty instead of with the example tasks
    let options = StoreOptions {
        seed_examples: false,
        ..Default::default()
    };
    let mut store = TaskStore::initialize_with(FileStorage::open(&store_path)?, options.clone());

    // CREATE
    println!("1. CREATE - Adding a task...");
    let task = store.create(
        TaskDraft::new("Write release notes", "Summarize the changes since 0.1")
            .due("2025-06-01")
            .priority(Priority::High),
    )?;
    println!("   Created task with ID: {}\n", task.id);

    // READ
    println!("2. READ - Retrieving the task...");
    match store.get(&task.id) {
        Some(found) => {
            println!("   - Title:    {}", found.title);
            println!("   - Due:      {}", found.due_date);
            println!("   - Priority: {}", found.priority);
            println!("   - Status:   {}", found.status);
        }
        None => println!("   Task not found!"),
    }
    println!();

    // UPDATE
    println!("3. UPDATE - Editing and completing the task...");
    let mut edited = task.clone();
    edited.description = "Summarize the changes since 0.1 and thank contributors".to_string();
    store.update(edited)?;
    store.update_status(&task.id, Status::Completed)?;
    println!("   Status is now: {}\n", store.get(&task.id).map(|t| t.status).unwrap_or_default());

    // VALIDATION
    println!("4. VALIDATION - Adding a task without a title...");
    if let Err(e) = store.create(TaskDraft::new("", "No title here")) {
        println!("   Rejected: {}\n", e);
    }

    // REOPEN
    println!("5. REOPEN - Loading the store from disk again...");
    let reopened = TaskStore::initialize_with(FileStorage::open(&store_path)?, options);
    println!("   {} task(s) on disk\n", reopened.len());

    // DELETE
    println!("6. DELETE - Removing the task...");
    let removed = store.delete(&task.id);
    println!("   Removed: {}", removed.is_some());
    println!("   Remaining: {}", store.len());

    Ok(())
}
