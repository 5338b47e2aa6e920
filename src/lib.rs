//! Keeps a UI store consistent with the execution state of a debugged program.
//!
//! Debugger events (running, paused at a frame, exited, command results) enter a
//! [`session::Session`], which applies them to a [`store::Store`] that views render from.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod model;
pub mod session;
pub mod store;
pub mod view;

pub use error::Error;
pub use session::{Session, SessionBuilder};
