//! Task board domain module (cleaning and maintenance work items).
//!
//! Pure domain logic: no IO, no HTTP, no storage.

pub mod task;

pub use task::{ApprovalStatus, NewTask, Priority, Task, TaskKind, TaskStatus, TaskUpdate};
