//! Shared wire types for the chatline client: API data models, the hub
//! protocol, and the error taxonomy.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
