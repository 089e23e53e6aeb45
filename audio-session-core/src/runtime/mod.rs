pub mod broadcaster;
pub mod thread_scheduler;
