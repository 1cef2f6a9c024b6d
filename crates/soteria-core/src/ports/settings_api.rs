//! 시스템 설정 API 포트.
//!
//! 구현: `soteria-network` crate (`ApiManager`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::nginx::NginxConfig;

/// nginx 설정 화면이 사용하는 API
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// 현재 nginx 설정 조회 (기본 템플릿 + 사용자 정의 값)
    async fn get_nginx_config(&self) -> Result<NginxConfig, CoreError>;

    /// 사용자 정의 값 저장
    ///
    /// 성공하면 서버가 nginx를 재구성하고 서비스를 재시작한다.
    async fn set_nginx_config(
        &self,
        custom_base: &str,
        custom_soteria: &str,
    ) -> Result<(), CoreError>;
}
