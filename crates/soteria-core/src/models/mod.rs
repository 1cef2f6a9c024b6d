//! Soteria API 도메인 모델.
//!
//! 콘솔과 서버 간 주고받는 요청/응답 구조체를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현하며
//! 서버의 camelCase 필드명을 따른다.

pub mod app;
pub mod nginx;
pub mod one_click;
pub mod pro;
pub mod registry;
pub mod system;

use serde::{Deserialize, Serialize};

/// 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 인증 토큰 (`x-soteria-auth` 헤더 값)
    pub token: String,
}

