//! Canonical GDB/MI command sequences.

use itertools::Itertools;

pub const LIST_SOURCE_FILES: &str = "-file-list-exec-source-files";
pub const BREAK_INSERT_MAIN: &str = "-break-insert main";
pub const BREAK_LIST: &str = "-break-list";

/// Queries issued after every stop: call stack, locals, current thread and register values.
pub fn refresh_state_for_pause() -> Vec<String> {
    vec![
        "-stack-list-frames".to_string(),
        "-stack-list-variables --simple-values".to_string(),
        "-thread-info".to_string(),
        "-data-list-register-values x".to_string(),
    ]
}

/// Set inferior arguments (before the binary is loaded) and load executable with its symbols.
pub fn load_binary_and_arguments(path: &str, arguments: &[String]) -> Vec<String> {
    let args = arguments.iter().map(|arg| quote(arg)).join(" ");
    vec![
        format!("-exec-arguments {args}").trim_end().to_string(),
        format!("-file-exec-and-symbols {}", quote(path)),
    ]
}

/// Quote a command parameter as a C string if it contains whitespace or quotes.
pub fn quote(param: &str) -> String {
    let needs_quotes = param.is_empty()
        || param
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if !needs_quotes {
        return param.to_string();
    }

    let mut quoted = String::with_capacity(param.len() + 2);
    quoted.push('"');
    for c in param.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
