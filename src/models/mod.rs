pub mod task;
pub mod user;

pub use task::{Task, TaskFilter, TaskInput, TaskPriority, TaskStatus};
pub use user::User;
