pub mod audio_resource;
pub mod capture_session;
pub mod interruption_source;
pub mod scheduler;
pub mod session_delegate;
