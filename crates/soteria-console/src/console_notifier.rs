//! 터미널 알림 어댑터.

use soteria_core::ports::notifier::{Notifier, ToastLevel};

/// `Notifier` 포트 구현: 에러는 stderr, 나머지는 stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn format(level: ToastLevel, message: &str) -> String {
        let icon = match level {
            ToastLevel::Info => "ℹ️ ",
            ToastLevel::Success => "✅",
            ToastLevel::Error => "❌",
        };
        format!("{icon} {message}")
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        let line = Self::format(level, message);
        match level {
            ToastLevel::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}
