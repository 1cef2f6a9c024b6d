//! 도커 레지스트리 모델.

use serde::{Deserialize, Serialize};

/// 레지스트리 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryType {
    /// Soteria가 직접 호스팅하는 레지스트리
    #[serde(rename = "LOCAL_REG")]
    Local,
    /// 외부 레지스트리 (Docker Hub, GHCR 등)
    #[serde(rename = "REMOTE_REG")]
    Remote,
}

/// 레지스트리 정보
///
/// 새 레지스트리 추가 시 `id`는 비워 두고 서버가 할당한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryInfo {
    #[serde(default)]
    pub id: String,
    pub registry_user: String,
    pub registry_password: String,
    pub registry_domain: String,
    #[serde(default)]
    pub registry_image_prefix: String,
    pub registry_type: RegistryType,
}

/// 레지스트리 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistriesResponse {
    pub registries: Vec<RegistryInfo>,
    /// 기본 push 레지스트리 ID (없으면 push 비활성)
    pub default_push_registry_id: Option<String>,
}

impl RegistriesResponse {
    /// 기본 push 레지스트리
    pub fn default_push_registry(&self) -> Option<&RegistryInfo> {
        let id = self.default_push_registry_id.as_deref()?;
        self.registries.iter().find(|r| r.id == id)
    }

    /// 자체 호스팅 레지스트리가 활성화되어 있는지
    pub fn has_self_hosted(&self) -> bool {
        self.registries
            .iter()
            .any(|r| r.registry_type == RegistryType::Local)
    }
}
