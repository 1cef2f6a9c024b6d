//! 사용자 알림(토스트) 포트.
//!
//! 구현: `soteria-console` crate (터미널 출력)

use std::fmt;

/// 토스트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// 일시적인 사용자 알림 인터페이스
///
/// 알림 표시는 실패해도 호출자에게 영향을 주지 않는다.
pub trait Notifier: Send + Sync {
    /// 알림 한 건 표시
    fn notify(&self, level: ToastLevel, message: &str);
}
