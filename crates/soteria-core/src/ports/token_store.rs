//! 인증 토큰 저장소 포트.
//!
//! 구현: [`crate::token_store`] (파일, 메모리)

use crate::error::CoreError;

/// 콘솔 실행 간 인증 토큰을 보관하는 저장소
pub trait TokenStore: Send + Sync {
    /// 저장된 토큰 (없으면 None)
    fn load(&self) -> Option<String>;

    /// 토큰 저장
    fn save(&self, token: &str) -> Result<(), CoreError>;

    /// 저장된 토큰 삭제
    fn clear(&self) -> Result<(), CoreError>;
}
