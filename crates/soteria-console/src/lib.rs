//! # soteria-console
//!
//! Soteria 관리 콘솔.
//! 토스트, nginx 설정 화면, 명령줄 인터페이스, 서브커맨드 핸들러.

pub mod cli;
pub mod commands;
pub mod console_notifier;
pub mod settings;
pub mod toaster;
