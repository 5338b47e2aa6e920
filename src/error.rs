#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- gateway errors --------------------------------------------
    #[error("messaging disabled")]
    MessagingDisabled,
    #[error("transport closed, command batch {0} dropped")]
    TransportClosed(u64),

    // --------------------------------- payload errors --------------------------------------------
    #[error("invalid line number `{0}`")]
    InvalidLine(String),

    // --------------------------------- configuration errors --------------------------------------
    #[error("read config file: {0}")]
    ConfigRead(#[from] std::io::Error),
    #[error("parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $target: expr, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: $target, "{:#}", e);
                None
            }
        }
    };
    ($log_fn: path, $target: expr, $res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: $target, concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!(log::warn, "session", $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::warn, "session", $res, $msg)
    };
}

/// Transforms `Result` into `Option` and put error into debug logs if it occurs.
#[macro_export]
macro_rules! muted_error {
    ($res: expr) => {
        $crate::_error!(log::debug, "session", $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::debug, "session", $res, $msg)
    };
}
