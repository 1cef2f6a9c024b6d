//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 요청 타임아웃, 콘솔 동작(디버그 모드, 재시작 대기 시간) 등
//! 런타임 설정을 정의한다. 설정 파일은 [`crate::config_manager`]가 관리하며
//! 환경 변수와 CLI 인자가 순서대로 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API 경로 접두사
pub const API_PREFIX: &str = "/api/v2";

/// 서버 URL 환경 변수
pub const ENV_API_URL: &str = "SOTERIA_API_URL";

/// 디버그 모드 환경 변수 (값이 비어 있지 않으면 활성)
pub const ENV_DEBUG: &str = "SOTERIA_DEBUG";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 서버 연결 설정
    pub server: ServerConfig,
    /// 콘솔 동작 설정
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 대시보드 도메인 (예: "https://soteria.example.com")
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// 콘솔 동작 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// 디버그 모드: 에러 토스트와 함께 전체 에러를 로그로 남긴다
    #[serde(default)]
    pub debug: bool,
    /// nginx 설정 저장 후 서비스 재시작 대기 시간 (초)
    #[serde(default = "default_restart_countdown_secs")]
    pub restart_countdown_secs: u64,
    /// 인증 토큰을 디스크에 보관할지
    #[serde(default = "default_true")]
    pub persist_token: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            debug: false,
            restart_countdown_secs: default_restart_countdown_secs(),
            persist_token: true,
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_restart_countdown_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:3000".to_string(),
                request_timeout_ms: default_request_timeout_ms(),
            },
            console: ConsoleConfig::default(),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 재시작 대기 시간을 Duration으로 반환
    pub fn restart_countdown(&self) -> Duration {
        Duration::from_secs(self.console.restart_countdown_secs)
    }

    /// API 기본 URL (후행 `/` 제거 + `/api/v2`)
    pub fn api_url(&self) -> String {
        format!("{}{}", self.server.base_url.trim_end_matches('/'), API_PREFIX)
    }

    /// 환경 변수로 설정 덮어쓰기
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// 주어진 조회 함수로 설정 덮어쓰기 (테스트용 분리)
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.server.base_url = url;
        }
        if lookup(ENV_DEBUG).is_some_and(|v| !v.is_empty()) {
            self.console.debug = true;
        }
    }
}
