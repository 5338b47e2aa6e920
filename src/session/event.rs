use crate::cache::AsmLine;
use crate::gateway::{Scope, Tag};
use crate::model::{ConsoleKind, Frame, FramePayload, LocalVariable, SourceFile, ThreadInfo};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Result of a previously issued request, tagged with the tag of its batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Stack(Vec<Frame>),
    Threads {
        current_thread_id: Option<u32>,
        threads: Vec<ThreadInfo>,
    },
    Locals(Vec<LocalVariable>),
    Registers(IndexMap<String, String>),
    /// Memory (or instruction) contents at an address.
    Memory {
        addr: String,
        contents: String,
    },
    SourceFilePaths(Vec<String>),
    SourceFile(SourceFile),
    Disassembly {
        fullname: Option<String>,
        instructions: Vec<AsmLine>,
    },
    LastModified(DateTime<Utc>),
    InferiorPid(u32),
}

impl Response {
    /// Lifetime of the response data. Everything the exit reset clears lives
    /// only as long as the current execution.
    pub fn scope(&self) -> Scope {
        match self {
            Response::Stack(_)
            | Response::Threads { .. }
            | Response::Locals(_)
            | Response::Registers(_)
            | Response::Memory { .. }
            | Response::InferiorPid(_)
            | Response::Disassembly { fullname: None, .. } => Scope::Execution,
            Response::SourceFilePaths(_)
            | Response::SourceFile(_)
            | Response::Disassembly { .. }
            | Response::LastModified(_) => Scope::Binary,
        }
    }
}

/// Everything that comes from the debugger side.
#[derive(Clone, Debug, PartialEq)]
pub enum DebuggerEvent {
    Running,
    Paused(FramePayload),
    Exited,
    Output {
        kind: ConsoleKind,
        lines: Vec<String>,
    },
    Response {
        tag: Tag,
        response: Response,
    },
}

/// Debugger backend callbacks.
pub trait EventHook {
    fn on_running(&self);
    fn on_paused(&self, frame: FramePayload);
    fn on_exited(&self);
    fn on_output(&self, kind: ConsoleKind, lines: Vec<String>);
    fn on_response(&self, tag: Tag, response: Response);
}

/// Events in arrival order.
pub type EventQueue = Arc<Mutex<VecDeque<DebuggerEvent>>>;

/// Hook that pushes backend events into a queue, the queue is drained
/// by [`crate::session::Session::poll_events`].
pub struct QueueHook {
    event_queue: EventQueue,
}

impl QueueHook {
    pub fn new(event_queue: EventQueue) -> Self {
        Self { event_queue }
    }

    fn push(&self, event: DebuggerEvent) {
        self.event_queue.lock().unwrap().push_back(event);
    }
}

impl EventHook for QueueHook {
    fn on_running(&self) {
        self.push(DebuggerEvent::Running);
    }

    fn on_paused(&self, frame: FramePayload) {
        self.push(DebuggerEvent::Paused(frame));
    }

    fn on_exited(&self) {
        self.push(DebuggerEvent::Exited);
    }

    fn on_output(&self, kind: ConsoleKind, lines: Vec<String>) {
        self.push(DebuggerEvent::Output { kind, lines });
    }

    fn on_response(&self, tag: Tag, response: Response) {
        self.push(DebuggerEvent::Response { tag, response });
    }
}
