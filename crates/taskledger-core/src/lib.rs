//! taskledger-core
//!
//! In-process task tracking: a validated task entity, an in-memory store
//! with filtering/sorting/search, and a recurrence engine that schedules the
//! next occurrence when a repeating task is completed.
//!
//! # Modules
//! - **domain**: `Task`, `TaskId`, `Priority`, `Recurrence`, `TaskUpdate`, errors
//! - **ports**: the `Clock` seam (`SystemClock`, `FixedClock`)
//! - **recurrence**: next-occurrence arithmetic and successor construction
//! - **store**: `TaskStore`, `SharedTaskStore`, `TaskFilter`, `SortKey`, `StoreConfig`
//!
//! ```ignore
//! use taskledger_core::prelude::*;
//!
//! let mut store = TaskStore::new();
//! let id = store.add_task(NewTask::new("Buy groceries").with_priority(Priority::High))?;
//! store.toggle_completion(id)?;
//! let open = store.list_tasks(&TaskFilter::new().with_completed(false), SortKey::DueDateAsc);
//! ```

pub mod domain;
pub mod ports;
pub mod recurrence;
pub mod store;

/// The types most callers need.
pub mod prelude {
    pub use crate::domain::{
        NewTask, Priority, Recurrence, Spelled, Task, TaskError, TaskId, TaskUpdate,
        ValidationError,
    };
    pub use crate::ports::{Clock, FixedClock, SystemClock};
    pub use crate::store::{SharedTaskStore, SortKey, StoreConfig, TaskFilter, TaskStore};
}
