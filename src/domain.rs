// Domain layer modules
pub mod contact_message;

// Re-exports
pub use contact_message::{ContactMessage, ValidationError};
