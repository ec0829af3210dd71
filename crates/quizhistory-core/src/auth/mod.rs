//! Authentication session consumed by the score write path.
//!
//! Sessions are issued by the host application's login flow and persisted
//! to `session.json` in the cache directory. This crate only reads them.

pub mod session;

pub use session::{Session, SessionData};
