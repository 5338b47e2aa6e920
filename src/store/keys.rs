use crate::model::{
    BinaryTarget, ConsoleEntry, ExecutionState, Frame, LocalVariable, RenderMode, SourceFile,
    ThreadInfo,
};
use crate::store_keys;
use indexmap::IndexMap;
use std::collections::BTreeMap;

store_keys! {
    // --------------------------------- execution state -------------------------------------------
    /// Lifecycle state of the inferior.
    InferiorProgram: ExecutionState = ExecutionState::Exited, "inferior_program";
    /// Frame the inferior is paused at, empty if there is no paused frame.
    PausedOnFrame: Frame = Frame::EMPTY, "paused_on_frame";
    SelectedFrameNum: usize = 0, "selected_frame_num";
    CurrentThreadId: Option<u32> = None, "current_thread_id";
    Stack: Vec<Frame> = vec![], "stack";
    Threads: Vec<ThreadInfo> = vec![], "threads";
    Locals: Vec<LocalVariable> = vec![], "locals";
    /// Cached memory reads (and single instruction disassembly) keyed by address.
    MemoryCache: BTreeMap<String, String> = BTreeMap::new(), "memory_cache";
    /// Reference to the root of an expanded variable tree.
    RootVariableTree: Option<String> = None, "root_gdb_tree_var";
    PreviousRegisterValues: IndexMap<String, String> = IndexMap::new(), "previous_register_values";
    CurrentRegisterValues: IndexMap<String, String> = IndexMap::new(), "current_register_values";
    InferiorPid: Option<u32> = None, "inferior_pid";

    // --------------------------------- rendering focus -------------------------------------------
    RenderFocusMode: RenderMode = RenderMode::PausedFrame, "render_paused_frame_or_user_selection";
    FullnameToRender: Option<String> = None, "fullname_to_render";
    LineOfSourceToFlash: Option<u64> = None, "line_of_source_to_flash";
    /// Transient flag, tells a source view that focus is fresh and must be scrolled into view.
    MakeCurrentLineVisible: bool = false, "make_current_line_visible";
    CurrentAssemblyAddress: Option<String> = None, "current_assembly_address";

    // --------------------------------- console ---------------------------------------------------
    ConsoleEntries: Vec<ConsoleEntry> = vec![], "gdb_console_entries";
    RefreshStateAfterConsoleCommand: bool = true, "refresh_state_after_sending_console_command";

    // --------------------------------- binary and sources ----------------------------------------
    Binary: Option<BinaryTarget> = None, "inferior_binary";
    SourceFilePaths: Vec<String> = vec![], "source_file_paths";
    /// True while a source file list request is in flight.
    FetchingSourceFiles: bool = false, "fetching_source_files";
    CachedSourceFiles: Vec<SourceFile> = vec![], "cached_source_files";
    DisassemblyForMissingFile: Vec<String> = vec![], "disassembly_for_missing_file";

    // --------------------------------- modal -----------------------------------------------------
    ShowModal: bool = false, "show_modal";
    ModalHeader: Option<String> = None, "modal_header";
    ModalBody: Option<String> = None, "modal_body";
}
