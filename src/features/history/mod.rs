//! Session history.
//!
//! Finished stopwatch runs become immutable sessions, kept in a list that is
//! restored from and fully re-persisted to a blob store.

pub mod codec;
pub mod session;
pub mod store;

pub use session::Session;
pub use store::SessionStore;
