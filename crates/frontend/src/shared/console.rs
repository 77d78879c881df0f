//! In-page console log, mirrored to the browser console via the `log` facade.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            ConsoleLevel::Info => "console__entry--info",
            ConsoleLevel::Warn => "console__entry--warn",
            ConsoleLevel::Error => "console__entry--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub id: u64,
    pub level: ConsoleLevel,
    pub timestamp: String,
    pub message: String,
}

/// Ordered log store shared via context; the console pane renders it,
/// oldest first.
#[derive(Clone, Copy)]
pub struct ConsoleService {
    pub entries: RwSignal<Vec<ConsoleEntry>>,
    next_id: RwSignal<u64>,
}

impl ConsoleService {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(vec![]),
            next_id: RwSignal::new(0),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Error, message.into());
    }

    fn push(&self, level: ConsoleLevel, message: String) {
        match level {
            ConsoleLevel::Info => log::info!("{}", message),
            ConsoleLevel::Warn => log::warn!("{}", message),
            ConsoleLevel::Error => log::error!("{}", message),
        }

        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        let entry = ConsoleEntry {
            id,
            level,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            message,
        };
        self.entries.update(|entries| entries.push(entry));
    }
}

impl Default for ConsoleService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleLevel;

    #[test]
    fn level_css_classes_are_distinct() {
        let classes = [
            ConsoleLevel::Info.css_class(),
            ConsoleLevel::Warn.css_class(),
            ConsoleLevel::Error.css_class(),
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in classes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
