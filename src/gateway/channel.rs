//! Message passing gateway between the UI thread and a debugger transport thread.

use crate::error::Error;
use crate::gateway::{CommandBatch, CommandGateway, Tag};
use crate::session::event::DebuggerEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};

pub enum Request {
    Commands(CommandBatch),
    LastModified { tag: Tag, path: String },
    Exit,
}

/// Transport side of an exchanger: receives requests, sends debugger events back.
pub struct TransportEnd {
    requests: Receiver<Request>,
    events: Sender<DebuggerEvent>,
}

impl TransportEnd {
    /// Wait for the next request, return `None` if the gateway is dropped.
    pub fn next_request(&self) -> Option<Request> {
        self.requests.recv().ok()
    }

    pub fn send_event(&self, event: DebuggerEvent) {
        _ = self.events.send(event);
    }
}

/// UI side of an exchanger.
pub struct ChannelGateway {
    messaging_enabled: AtomicBool,
    requests: Sender<Request>,
    events: Receiver<DebuggerEvent>,
}

impl ChannelGateway {
    #[inline(always)]
    pub fn is_messaging_enabled(&self) -> bool {
        self.messaging_enabled.load(Ordering::Relaxed)
    }

    /// Enable messaging between UI and transport.
    #[inline(always)]
    pub fn enable_messaging(&self) {
        self.messaging_enabled.store(true, Ordering::Relaxed);
    }

    /// Disable messaging, all requests will return [`Error::MessagingDisabled`] error.
    #[inline(always)]
    pub fn disable_messaging(&self) {
        self.messaging_enabled.store(false, Ordering::Relaxed);
    }

    fn send(&self, request: Request) -> Result<(), Error> {
        if !self.is_messaging_enabled() {
            return Err(Error::MessagingDisabled);
        }
        let generation = match &request {
            Request::Commands(batch) => batch.tag.execution.0,
            Request::LastModified { tag, .. } => tag.execution.0,
            Request::Exit => 0,
        };
        self.requests
            .send(request)
            .map_err(|_| Error::TransportClosed(generation))
    }

    /// Ask the transport to stop.
    pub fn send_exit(&self) {
        _ = self.requests.send(Request::Exit);
    }

    /// Return next debugger event or `None` if no events yet.
    pub fn poll_event(&self) -> Option<DebuggerEvent> {
        self.events.try_recv().ok()
    }
}

impl CommandGateway for ChannelGateway {
    fn issue(&mut self, batch: CommandBatch) -> Result<(), Error> {
        self.send(Request::Commands(batch))
    }

    fn request_last_modified(&mut self, tag: Tag, path: &str) -> Result<(), Error> {
        self.send(Request::LastModified {
            tag,
            path: path.to_string(),
        })
    }
}

/// Create an exchanger pair.
///
/// [`TransportEnd`] must be used at the transport thread: it handles incoming
/// requests and forwards debugger output as events.
/// [`ChannelGateway`] must be used at the UI side, sends requests and receives events.
pub fn exchanger() -> (TransportEnd, ChannelGateway) {
    let (req_tx, req_rx) = channel::<Request>();
    let (event_tx, event_rx) = channel::<DebuggerEvent>();
    (
        TransportEnd {
            requests: req_rx,
            events: event_tx,
        },
        ChannelGateway {
            messaging_enabled: AtomicBool::new(true),
            requests: req_tx,
            events: event_rx,
        },
    )
}
