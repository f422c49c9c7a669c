//! Top-level error type (`spec.md` §7): only the handful of failures that can
//! stop the window manager before it ever opens an event loop.

use std::fmt;

#[derive(Debug)]
pub enum WmError {
    DisplayOpenFailed,
    AnotherWmRunning,
}

impl fmt::Display for WmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WmError::DisplayOpenFailed => write!(f, "could not open X display (is $DISPLAY set?)"),
            WmError::AnotherWmRunning => write!(f, "another window manager is already running"),
        }
    }
}

impl std::error::Error for WmError {}
