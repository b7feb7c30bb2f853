// taskboard - task list store with search, filter and sort over key-value persistence

pub mod cli;
pub mod codec;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

// Re-export main types for convenience
pub use error::StoreError;
pub use filter::{Criterion, Filter};
pub use models::{Priority, Status, Task, TaskDraft, parse_due_date, seed_tasks, today};
pub use query::{Query, SortOrder, filter, search, sort};
pub use session::SearchSession;
pub use storage::{Backend, FileStorage, MemoryStorage, SqliteStorage, Storage};
pub use store::{StoreOptions, TaskStore};
pub use validation::{Field, ValidationErrors};
