//! Soteria 콘솔 핵심 에러 타입.
//!
//! 서버가 돌려준 상태 코드 에러와 전송/설정 에러를 하나의 타입으로 묶는다.
//! 재시도 정책은 없으며, 에러는 그대로 호출자에게 전파된다.

use thiserror::Error;

/// 서버 응답 상태 코드.
///
/// 모든 API 응답은 `{ status, description, data }` 봉투로 감싸져 오며,
/// `status`가 아래 OK 계열이 아니면 실패로 취급한다.
pub mod status {
    /// 정상 처리
    pub const OK: i64 = 100;
    /// 배포(빌드) 시작됨
    pub const OK_DEPLOY_STARTED: i64 = 101;
    /// 부분 성공
    pub const OK_PARTIALLY: i64 = 102;

    pub const ERROR_GENERIC: i64 = 1000;
    pub const ERROR_NOT_INITIALIZED: i64 = 1001;
    pub const ERROR_USER_NOT_INITIALIZED: i64 = 1101;
    pub const ERROR_NOT_AUTHORIZED: i64 = 1102;
    pub const ERROR_ALREADY_EXIST: i64 = 1103;
    pub const ERROR_BAD_NAME: i64 = 1104;
    /// 비밀번호 불일치: 강제 로그아웃 대상
    pub const WRONG_PASSWORD: i64 = 1105;
    /// 인증 토큰 무효: 재로그인 훅 트리거
    pub const AUTH_TOKEN_INVALID: i64 = 1106;
    pub const VERIFICATION_FAILED: i64 = 1107;
    pub const ILLEGAL_OPERATION: i64 = 1108;
    pub const BUILD_ERROR: i64 = 1109;
    pub const ILLEGAL_PARAMETER: i64 = 1110;
    pub const NOT_FOUND: i64 = 1111;
    pub const AUTHENTICATION_FAILED: i64 = 1112;
    /// 로그인 시도 과다 (백오프): 강제 로그아웃 대상
    pub const PASSWORD_BACK_OFF: i64 = 1113;
    /// 2단계 인증 토큰 필요
    pub const OTP_REQUIRED: i64 = 1114;
    pub const PRO_API_KEY_INVALIDATED: i64 = 1115;
    /// 상태 코드가 없는 응답
    pub const UNKNOWN_ERROR: i64 = 1999;

    /// 성공 계열 상태 코드인지 판별
    pub fn is_success(status: i64) -> bool {
        matches!(status, OK | OK_DEPLOY_STARTED | OK_PARTIALLY)
    }
}

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 서버가 OK가 아닌 상태 코드로 요청을 거부함
    #[error("API 에러 ({status}): {message}")]
    Api {
        /// 서버 상태 코드 (`status` 모듈 참조)
        status: i64,
        /// 서버가 보낸 설명
        message: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃, 비정상 HTTP 응답)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 인증 에러 (로그인되지 않음 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 저장된 비밀번호가 없어 재로그인 불가
    #[error("No saved password. Ignore if initial call.")]
    NoSavedPassword,

    /// 클라이언트가 파기되어 응답이 무시됨
    #[error("요청 취소됨: 클라이언트가 파기됨")]
    Cancelled,

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 서버 상태 코드 에러 생성
    pub fn api(status: i64, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// 서버 상태 코드 (API 에러일 때만)
    pub fn api_status(&self) -> Option<i64> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 서버 메시지 (API 에러일 때만)
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// 강제 로그아웃이 필요한 에러인지 판별
    ///
    /// 비밀번호 불일치와 백오프만 해당한다. 잘못된 비밀번호로
    /// 재로그인을 반복하지 않도록 자격증명을 지워야 한다.
    pub fn forces_logout(&self) -> bool {
        matches!(
            self.api_status(),
            Some(status::WRONG_PASSWORD) | Some(status::PASSWORD_BACK_OFF)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses() {
        assert!(status::is_success(status::OK));
        assert!(status::is_success(status::OK_DEPLOY_STARTED));
        assert!(status::is_success(status::OK_PARTIALLY));
        assert!(!status::is_success(status::AUTH_TOKEN_INVALID));
        assert!(!status::is_success(status::UNKNOWN_ERROR));
    }

    #[test]
    fn only_password_errors_force_logout() {
        assert!(CoreError::api(status::WRONG_PASSWORD, "wrong").forces_logout());
        assert!(CoreError::api(status::PASSWORD_BACK_OFF, "slow down").forces_logout());
        assert!(!CoreError::api(status::AUTH_TOKEN_INVALID, "expired").forces_logout());
        assert!(!CoreError::Network("down".to_string()).forces_logout());
    }

    #[test]
    fn api_accessors() {
        let err = CoreError::api(status::NOT_FOUND, "app not found");
        assert_eq!(err.api_status(), Some(1111));
        assert_eq!(err.api_message(), Some("app not found"));
        assert_eq!(CoreError::Cancelled.api_status(), None);
    }
}
