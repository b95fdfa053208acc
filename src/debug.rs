/*
    Level-gated diagnostic output, written to stderr
*/

use std::cell::RefCell;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl DebugLevel {
    // Maps a count of `-v` flags to a level. Errors are always shown.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => DebugLevel::Error,
            1 => DebugLevel::Info,
            2 => DebugLevel::Debug,
            _ => DebugLevel::Trace,
        }
    }
}

impl Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugLevel::None => write!(f, "NONE"),
            DebugLevel::Error => write!(f, "ERROR"),
            DebugLevel::Warn => write!(f, "WARN"),
            DebugLevel::Info => write!(f, "INFO"),
            DebugLevel::Debug => write!(f, "DEBUG"),
            DebugLevel::Trace => write!(f, "TRACE"),
        }
    }
}

struct DebugConfig {
    level: DebugLevel,
    module_filters: Vec<String>,
}

thread_local! {
    static DEBUG_CONFIG: RefCell<DebugConfig> = const {
        RefCell::new(DebugConfig {
            level: DebugLevel::None,
            module_filters: Vec::new(),
        })
    };
}

pub fn set_debug_level(level: DebugLevel) {
    DEBUG_CONFIG.with(|config| config.borrow_mut().level = level);
}

// Only modules whose tag contains one of the filters will print
pub fn add_module_filter(module: &str) {
    DEBUG_CONFIG.with(|config| config.borrow_mut().module_filters.push(module.to_string()));
}

pub fn clear_module_filters() {
    DEBUG_CONFIG.with(|config| config.borrow_mut().module_filters.clear());
}

pub fn is_debug_enabled(level: DebugLevel, module: &str) -> bool {
    DEBUG_CONFIG.with(|config| {
        let config = config.borrow();
        if config.level < level {
            return false;
        }
        config.module_filters.is_empty()
            || config.module_filters.iter().any(|filter| module.contains(filter.as_str()))
    })
}

#[macro_export]
macro_rules! debug {
    ($level:expr, $module:expr, $($arg:tt)*) => {
        if $crate::debug::is_debug_enabled($level, $module) {
            eprintln!("[{}:{}] {}", $level, $module, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! debug_info {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::debug::DebugLevel::Info, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_debug {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::debug::DebugLevel::Debug, $module, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($module:expr, $($arg:tt)*) => {
        $crate::debug!($crate::debug::DebugLevel::Trace, $module, $($arg)*)
    };
}
