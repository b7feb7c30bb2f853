//! Example 02: Search, Filter and Sort
//!
//! This example demonstrates composing a query over the example tasks and
//! driving a debounced search session.
//!
//! Run with: cargo run --example 02_query

use eyre::Result;
use std::time::{Duration, Instant};
use taskboard::{Criterion, MemoryStorage, Priority, Query, SearchSession, SortOrder, Status, Task, TaskStore};

fn print_tasks(tasks: &[Task]) {
    for task in tasks {
        println!("   {}  {:<6}  {:<11}  {}", task.due_date, task.priority.as_str(), task.status.as_str(), task.title);
    }
    println!();
}

fn main() -> Result<()> {
    println!("Taskboard Query Example");
    println!("=======================\n");

    // Memory storage seeds the five example tasks
    let store = TaskStore::initialize(MemoryStorage::new());

    println!("All tasks, due date ascending:");
    print_tasks(&store.query(&Query::new()));

    println!("Completed tasks, latest due first:");
    let query = Query::new()
        .status(Criterion::Only(Status::Completed))
        .order(SortOrder::Desc);
    print_tasks(&store.query(&query));

    println!("High priority tasks matching \"search\":");
    let query = Query::new().search("search").priority(Criterion::Only(Priority::High));
    print_tasks(&store.query(&query));

    // A session collapses keystrokes into one search after the delay
    println!("Debounced search session:");
    let mut session = SearchSession::new(Duration::from_millis(300));
    let start = Instant::now();
    for (i, text) in ["b", "bu", "bug"].iter().enumerate() {
        session.type_query(*text, start + Duration::from_millis(i as u64 * 100));
    }
    println!("   Applied before delay: {}", session.tick(start + Duration::from_millis(250)));
    println!("   Applied after delay:  {}", session.tick(start + Duration::from_millis(600)));
    println!("   Search text: {:?}", session.search_text());
    print_tasks(&session.view(store.list()));

    Ok(())
}
