//! Interface to the debugger command transport.

pub mod channel;
pub mod mi;

use crate::error::Error;

/// Value of a monotonic session counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Tag attached to an outgoing command batch, a transport must echo it back with every
/// response produced by the batch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Incremented on every binary load.
    pub binary: Generation,
    /// Incremented on every execution state transition.
    pub execution: Generation,
}

/// Lifetime of data carried by a response.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Data is valid while the same binary is loaded (source files, timestamps).
    Binary,
    /// Data is valid only until the next state transition (stack, locals, registers).
    Execution,
}

impl Tag {
    /// Return true if a response tagged with `self` must not be applied at `current` state.
    pub fn is_stale(&self, current: Tag, scope: Scope) -> bool {
        match scope {
            Scope::Binary => self.binary < current.binary,
            Scope::Execution => self.binary < current.binary || self.execution < current.execution,
        }
    }
}

/// One or many debugger commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commands(pub Vec<String>);

impl From<&str> for Commands {
    fn from(cmd: &str) -> Self {
        Self(vec![cmd.to_string()])
    }
}

impl From<String> for Commands {
    fn from(cmd: String) -> Self {
        Self(vec![cmd])
    }
}

impl From<Vec<String>> for Commands {
    fn from(cmds: Vec<String>) -> Self {
        Self(cmds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBatch {
    pub tag: Tag,
    pub commands: Vec<String>,
}

impl CommandBatch {
    pub fn new(tag: Tag, commands: impl Into<Commands>) -> Self {
        let Commands(commands) = commands.into();
        Self { tag, commands }
    }
}

/// Debugger command gateway. All requests are fire-and-forget, results arrive later
/// as [`crate::session::event::DebuggerEvent`].
pub trait CommandGateway {
    /// Send a command batch to the debugger.
    fn issue(&mut self, batch: CommandBatch) -> Result<(), Error>;

    /// Request modification time of a file,
    /// result arrives as [`crate::session::event::Response::LastModified`].
    fn request_last_modified(&mut self, tag: Tag, path: &str) -> Result<(), Error>;

    /// Fixed sequence of read-only queries that refreshes everything a paused view shows.
    fn build_refresh_after_pause_commands(&self) -> Vec<String> {
        mi::refresh_state_for_pause()
    }

    /// Commands that set inferior arguments and load a binary with its symbols.
    fn build_load_binary_commands(&self, path: &str, arguments: &[String]) -> Vec<String> {
        mi::load_binary_and_arguments(path, arguments)
    }
}
