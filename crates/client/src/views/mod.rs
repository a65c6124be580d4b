//! View components.
//!
//! These are thin wiring over the session store, the API client, and the
//! hub; layout and form polish live outside this crate's concerns.

pub mod chat;
pub mod home;
pub mod login;
pub mod register;

pub use chat::ChatView;
pub use home::Home;
pub use login::Login;
pub use register::Register;
