//! Domain model: task entity, identifiers, enumerations and errors.

pub mod errors;
pub mod ids;
pub mod priority;
pub mod recurrence;
pub mod task;
pub mod update;

pub use self::errors::{TaskError, ValidationError};
pub use self::ids::TaskId;
pub use self::priority::Priority;
pub use self::recurrence::Recurrence;
pub use self::task::{NewTask, Task};
pub use self::update::{Spelled, TaskUpdate};
