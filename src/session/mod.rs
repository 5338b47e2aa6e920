//! Session state controller: turns debugger lifecycle events into store mutations.

pub mod event;

use crate::cache;
use crate::config::Config;
use crate::console::logger::LogBuffer;
use crate::console::{ConsoleBuffer, ConsoleLines};
use crate::gateway::{mi, CommandBatch, CommandGateway, Commands, Scope, Tag};
use crate::model::{BinaryTarget, ConsoleKind, ExecutionState, Frame, FramePayload, RenderMode};
use crate::store::keys::{
    Binary, CurrentAssemblyAddress, CurrentRegisterValues, CurrentThreadId,
    DisassemblyForMissingFile, FullnameToRender, InferiorPid, InferiorProgram,
    LineOfSourceToFlash, Locals, MemoryCache, PausedOnFrame, PreviousRegisterValues,
    RefreshStateAfterConsoleCommand, RenderFocusMode, RootVariableTree, SelectedFrameNum, Stack,
    Threads,
};
use crate::store::Store;
use crate::view;
use crate::weak_error;
use event::{DebuggerEvent, EventQueue, Response};
use log::debug;

#[derive(Default)]
pub struct SessionBuilder {
    config: Config,
    logs: Option<LogBuffer>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    /// Drain records captured by a [`crate::console::logger::ConsoleLogger`] into the console.
    pub fn with_logs(self, logs: LogBuffer) -> Self {
        Self {
            logs: Some(logs),
            ..self
        }
    }

    /// Create a session. Store is brought to the initial (exited) state.
    pub fn build<S: Store, G: CommandGateway>(self, store: S, gateway: G) -> Session<S, G> {
        let mut session = Session {
            store,
            gateway,
            console: ConsoleBuffer::new(self.config.max_console_entries),
            config: self.config,
            tag: Tag::default(),
            logs: self.logs,
        };
        session
            .store
            .set::<RefreshStateAfterConsoleCommand>(session.config.refresh_after_console_command);
        session.notify_exited();
        session
    }
}

/// Debugging session as seen by the UI.
///
/// All operations run synchronously on a caller thread, commands are handed to the gateway
/// and their results are expected later as [`DebuggerEvent`].
pub struct Session<S: Store, G: CommandGateway> {
    store: S,
    gateway: G,
    config: Config,
    console: ConsoleBuffer,
    /// Tag of the current state, attached to every outgoing batch.
    tag: Tag,
    logs: Option<LogBuffer>,
}

impl<S: Store, G: CommandGateway> Session<S, G> {
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn into_parts(self) -> (S, G) {
        (self.store, self.gateway)
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.store.get::<InferiorProgram>()
    }

    fn next_execution(&mut self) {
        self.tag.execution = self.tag.execution.next();
    }

    fn issue(&mut self, commands: impl Into<Commands>) {
        let batch = CommandBatch::new(self.tag, commands);
        weak_error!(self.gateway.issue(batch), "issue commands:");
    }

    /// Reset everything that exists only while the inferior is paused.
    fn clear_program_state(&mut self) {
        self.store.set::<LineOfSourceToFlash>(None);
        self.store.set::<PausedOnFrame>(Frame::EMPTY);
        self.store.set::<SelectedFrameNum>(0);
        self.store.set::<CurrentThreadId>(None);
        self.store.set::<Stack>(vec![]);
        self.store.set::<Threads>(vec![]);
        self.store.set::<MemoryCache>(Default::default());
        self.store.set::<Locals>(vec![]);
    }

    pub fn notify_running(&mut self) {
        debug!(target: "session", "inferior running");
        self.next_execution();
        self.store.set::<InferiorProgram>(ExecutionState::Running);
        self.clear_program_state();
    }

    /// Inferior stopped at `frame`. After the store is updated, state of the paused program
    /// is requested from the debugger.
    pub fn notify_paused(&mut self, frame: FramePayload) {
        let frame = Frame::from(frame);
        debug!(
            target: "session",
            "inferior paused at {}:{}",
            frame.fullname.as_deref().unwrap_or("??"),
            frame.line.map(|l| l.to_string()).unwrap_or_else(|| "??".to_string()),
        );

        self.next_execution();
        self.store.set::<InferiorProgram>(ExecutionState::Paused);
        self.store.set::<RenderFocusMode>(RenderMode::PausedFrame);
        self.store.set::<FullnameToRender>(frame.fullname.clone());
        self.store.set::<LineOfSourceToFlash>(frame.line);
        self.store.set::<CurrentAssemblyAddress>(frame.addr.clone());
        self.store.set::<PausedOnFrame>(frame);
        view::make_current_line_visible(&mut self.store);

        self.refresh_state_for_pause();
    }

    pub fn notify_exited(&mut self) {
        debug!(target: "session", "inferior exited");
        self.next_execution();
        self.store.set::<InferiorProgram>(ExecutionState::Exited);
        self.store.set::<DisassemblyForMissingFile>(vec![]);
        self.store.set::<RootVariableTree>(None);
        self.store.set::<PreviousRegisterValues>(Default::default());
        self.store.set::<CurrentRegisterValues>(Default::default());
        self.store.set::<InferiorPid>(None);
        self.clear_program_state();
    }

    /// Load a new binary. Session is reset to the exited state before any load command is
    /// issued, responses related to a previous binary are ignored from now on.
    pub fn load_binary(&mut self, path: &str, arguments: &[String]) {
        debug!(target: "session", "load binary {path} with arguments {arguments:?}");

        cache::clear_source_files(&mut self.store);
        cache::invalidate_assembly(&mut self.store);
        self.tag.binary = self.tag.binary.next();
        self.store.set::<Binary>(Some(BinaryTarget {
            path: path.to_string(),
            arguments: arguments.to_vec(),
            language: self.config.default_language,
            last_modified: None,
        }));
        self.notify_exited();

        let mut cmds = self.gateway.build_load_binary_commands(path, arguments);
        if self.config.auto_add_breakpoint_to_main {
            cmds.push(mi::BREAK_INSERT_MAIN.to_string());
        }
        cmds.push(mi::BREAK_LIST.to_string());
        self.issue(cmds);

        weak_error!(
            self.gateway.request_last_modified(self.tag, path),
            "request binary modification time:"
        );
    }

    /// Request everything a paused view shows.
    pub fn refresh_state_for_pause(&mut self) {
        let cmds = self.gateway.build_refresh_after_pause_commands();
        self.issue(cmds);
    }

    /// Send a user command, followed by a state refresh if it is enabled.
    pub fn execute_console_command(&mut self, command: &str) {
        if self.store.get::<RefreshStateAfterConsoleCommand>() {
            let mut cmds = vec![command.to_string()];
            cmds.extend(self.gateway.build_refresh_after_pause_commands());
            self.issue(cmds);
        } else {
            self.issue(command);
        }
    }

    pub fn fetch_source_files(&mut self) {
        cache::begin_source_files_fetch(&mut self.store);
        self.issue(mi::LIST_SOURCE_FILES);
    }

    pub fn invalidate_assembly(&mut self) {
        cache::invalidate_assembly(&mut self.store);
    }

    pub fn clear_console(&mut self) {
        self.console.clear(&mut self.store);
    }

    pub fn add_console_entries(
        &mut self,
        lines: impl Into<ConsoleLines>,
        kind: impl Into<ConsoleKind>,
    ) {
        self.console.append(&mut self.store, lines, kind);
    }

    /// Move captured log records into the console.
    pub fn flush_logs(&mut self) {
        if let Some(logs) = &self.logs {
            self.console.append_logs(&mut self.store, logs);
        }
    }

    /// Open a file in the source view.
    pub fn view_file(&mut self, fullname: &str, line: Option<&str>) {
        view::set_user_focus(&mut self.store, fullname, line);
    }

    pub fn set_line_state(&mut self, line: Option<&str>) {
        view::set_flash_line(&mut self.store, line);
    }

    pub fn handle_event(&mut self, event: DebuggerEvent) {
        match event {
            DebuggerEvent::Running => self.notify_running(),
            DebuggerEvent::Paused(frame) => self.notify_paused(frame),
            DebuggerEvent::Exited => self.notify_exited(),
            DebuggerEvent::Output { kind, lines } => self.add_console_entries(lines, kind),
            DebuggerEvent::Response { tag, response } => {
                self.apply_response(tag, response);
            }
        }
    }

    /// Handle all queued events in arrival order, return number of handled events.
    pub fn poll_events(&mut self, queue: &EventQueue) -> usize {
        let events: Vec<_> = queue.lock().unwrap().drain(..).collect();
        let count = events.len();
        events.into_iter().for_each(|event| self.handle_event(event));
        self.flush_logs();
        count
    }

    /// Apply a response to the store. Return false if response is outdated and ignored.
    pub fn apply_response(&mut self, tag: Tag, response: Response) -> bool {
        let scope = match &response {
            // falls through to the disassembly for missing file, which the exit reset clears
            Response::Disassembly { fullname, .. }
                if !cache::is_cached(&self.store, fullname.as_deref()) =>
            {
                Scope::Execution
            }
            response => response.scope(),
        };
        if tag.is_stale(self.tag, scope) {
            debug!(
                target: "session",
                "drop stale response (tag {tag:?}, current {:?})",
                self.tag
            );
            return false;
        }

        match response {
            Response::Stack(frames) => self.store.set::<Stack>(frames),
            Response::Threads {
                current_thread_id,
                threads,
            } => {
                self.store.set::<CurrentThreadId>(current_thread_id);
                self.store.set::<Threads>(threads);
            }
            Response::Locals(locals) => self.store.set::<Locals>(locals),
            Response::Registers(values) => {
                let previous = self.store.get::<CurrentRegisterValues>();
                self.store.set::<PreviousRegisterValues>(previous);
                self.store.set::<CurrentRegisterValues>(values);
            }
            Response::Memory { addr, contents } => {
                self.store.update::<MemoryCache, _>(|cache| {
                    cache.insert(addr, contents);
                });
            }
            Response::SourceFilePaths(paths) => {
                cache::set_source_file_paths(&mut self.store, paths)
            }
            Response::SourceFile(file) => cache::cache_source_file(&mut self.store, file),
            Response::Disassembly {
                fullname,
                instructions,
            } => cache::set_disassembly(&mut self.store, fullname.as_deref(), instructions),
            Response::LastModified(ts) => {
                self.store.update::<Binary, _>(|binary| {
                    if let Some(binary) = binary {
                        binary.last_modified = Some(ts);
                    }
                });
            }
            Response::InferiorPid(pid) => self.store.set::<InferiorPid>(Some(pid)),
        }

        true
    }
}
