use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Lifecycle state of the inferior program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumString, Display, IntoStaticStr)]
pub enum ExecutionState {
    #[strum(serialize = "running")]
    Running,
    #[strum(serialize = "paused")]
    Paused,
    /// No process exists, this is also the state before anything is loaded.
    #[default]
    #[strum(serialize = "exited")]
    Exited,
}

/// Frame as it arrives from the debugger, every field may be missing.
///
/// Defaulting rules applied by [`Frame::from`]:
/// * `fullname`, `addr`, `func` are moved as is, absent stays absent
/// * `line` is parsed with [`parse_line`], absent or malformed value becomes absent
/// * `level` is parsed as an integer, absent or malformed value becomes absent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FramePayload {
    pub fullname: Option<String>,
    pub line: Option<String>,
    pub addr: Option<String>,
    pub func: Option<String>,
    pub level: Option<String>,
}

impl FramePayload {
    pub const EMPTY: FramePayload = FramePayload {
        fullname: None,
        line: None,
        addr: None,
        func: None,
        level: None,
    };

    pub fn with_fullname(self, fullname: impl Into<String>) -> Self {
        Self {
            fullname: Some(fullname.into()),
            ..self
        }
    }

    pub fn with_line(self, line: impl Into<String>) -> Self {
        Self {
            line: Some(line.into()),
            ..self
        }
    }

    pub fn with_addr(self, addr: impl Into<String>) -> Self {
        Self {
            addr: Some(addr.into()),
            ..self
        }
    }

    pub fn with_func(self, func: impl Into<String>) -> Self {
        Self {
            func: Some(func.into()),
            ..self
        }
    }
}

/// Validated execution point of a paused inferior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Full path to the source file.
    pub fullname: Option<String>,
    pub line: Option<u64>,
    /// Instruction address, kept in the debugger's textual form (like `0x0000555555555131`).
    pub addr: Option<String>,
    pub func: Option<String>,
    /// Frame number in the call stack, 0 is the innermost frame.
    pub level: Option<u32>,
}

impl Frame {
    pub const EMPTY: Frame = Frame {
        fullname: None,
        line: None,
        addr: None,
        func: None,
        level: None,
    };

    pub fn is_empty(&self) -> bool {
        self == &Self::EMPTY
    }
}

impl From<FramePayload> for Frame {
    fn from(payload: FramePayload) -> Self {
        Frame {
            fullname: payload.fullname,
            line: payload
                .line
                .as_deref()
                .and_then(|line| crate::muted_error!(parse_line(line))),
            addr: payload.addr,
            func: payload.func,
            level: payload
                .level
                .as_deref()
                .and_then(|level| crate::muted_error!(level.trim().parse::<u32>())),
        }
    }
}

/// Parse a line number the way the frontend always did: leading whitespace and an
/// optional `+` are skipped, then the leading run of decimal digits is taken,
/// trailing garbage is ignored (`"42abc"` is line 42).
pub fn parse_line(raw: &str) -> Result<u64, Error> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end]
        .parse::<u64>()
        .map_err(|_| Error::InvalidLine(raw.to_string()))
}

/// What the source view renders: the frame the program stopped at, or a file the user opened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumString, Display, IntoStaticStr)]
pub enum RenderMode {
    #[default]
    #[strum(serialize = "paused_frame")]
    PausedFrame,
    #[strum(serialize = "user_selection")]
    UserSelection,
}

/// Kind tag of a console entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleKind {
    /// Regular debugger output.
    Output,
    Error,
    /// Command typed by the user.
    Command,
    /// Messages of the frontend itself.
    Internal,
    Other(String),
}

impl ConsoleKind {
    pub fn as_str(&self) -> &str {
        match self {
            ConsoleKind::Output => "output",
            ConsoleKind::Error => "error",
            ConsoleKind::Command => "command",
            ConsoleKind::Internal => "internal",
            ConsoleKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ConsoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConsoleKind {
    fn from(tag: &str) -> Self {
        match tag {
            "output" => ConsoleKind::Output,
            "error" => ConsoleKind::Error,
            "command" => ConsoleKind::Command,
            "internal" => ConsoleKind::Internal,
            other => ConsoleKind::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub kind: ConsoleKind,
    pub value: String,
}

/// Source file of the loaded binary with its lazily fetched disassembly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub fullname: String,
    pub lines: Vec<String>,
    /// Disassembly text keyed by source line number.
    pub assembly: BTreeMap<u64, String>,
}

impl SourceFile {
    pub fn new(fullname: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            fullname: fullname.into(),
            lines,
            assembly: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadInfo {
    pub id: u32,
    pub target_id: Option<String>,
    pub name: Option<String>,
    pub frame: Frame,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalVariable {
    pub name: String,
    pub value: Option<String>,
    pub r#type: Option<String>,
}

/// Source language of the inferior, used by views for highlighting.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumString, Display, IntoStaticStr, Deserialize,
)]
pub enum Language {
    #[default]
    #[strum(serialize = "c_family")]
    #[serde(rename = "c_family")]
    CFamily,
    #[strum(serialize = "rust")]
    #[serde(rename = "rust")]
    Rust,
    #[strum(serialize = "go")]
    #[serde(rename = "go")]
    Go,
}

/// Executable loaded into the debugger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryTarget {
    pub path: String,
    pub arguments: Vec<String>,
    pub language: Language,
    /// Modification time of the executable file, arrives asynchronously after load.
    pub last_modified: Option<DateTime<Utc>>,
}
