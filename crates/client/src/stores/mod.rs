//! Global client-side state stores.

pub mod messages;

pub use messages::{ChatMessages, MESSAGES};
