use std::cell::Cell;

use gloo::console;
use shared::LogLevel;

thread_local! {
    static THRESHOLD: Cell<LogLevel> = const { Cell::new(LogLevel::Warn) };
}

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    /// Set the minimum level that reaches the console
    pub fn init(level: LogLevel) {
        THRESHOLD.with(|threshold| threshold.set(level));
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn enabled(level: LogLevel) -> bool {
        THRESHOLD.with(|threshold| level >= threshold.get())
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => console::debug!(line),
            LogLevel::Info => console::info!(line),
            LogLevel::Warn => console::warn!(line),
            LogLevel::Error => console::error!(line),
        }
    }
}
