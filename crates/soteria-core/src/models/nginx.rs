//! nginx 리버스 프록시 설정 모델.
//!
//! 기본 설정(`/etc/nginx/nginx.conf`)과 Soteria 루트 설정
//! (`/etc/nginx/conf.d/soteria-root.conf`) 두 섹션으로 구성된다.
//! 각 섹션은 서버 기본 템플릿과 사용자 정의 값을 함께 가진다.

use serde::{Deserialize, Serialize};

/// nginx 컨테이너 내 기본 설정 파일 경로
pub const BASE_CONFIG_PATH: &str = "/etc/nginx/nginx.conf";

/// nginx 컨테이너 내 Soteria 루트 설정 파일 경로
pub const SOTERIA_CONFIG_PATH: &str = "/etc/nginx/conf.d/soteria-root.conf";

/// 설정 섹션 하나
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NginxConfigSection {
    /// 서버 기본 템플릿 (EJS)
    pub by_default: String,
    /// 사용자 정의 값 (비어 있으면 기본 템플릿 사용)
    pub custom_value: String,
}

impl NginxConfigSection {
    /// 사용자 정의 값이 있는지
    pub fn is_customized(&self) -> bool {
        !self.custom_value.is_empty()
    }

    fn load_default(&mut self) {
        self.custom_value = self.by_default.clone();
    }
}

/// nginx 설정 전체
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NginxConfig {
    pub base_config: NginxConfigSection,
    pub soteria_config: NginxConfigSection,
}

impl NginxConfig {
    /// 두 섹션 모두 기본 템플릿을 사용자 정의 값으로 복사
    pub fn load_defaults(&mut self) {
        self.base_config.load_default();
        self.soteria_config.load_default();
    }

    /// 어느 한 섹션이라도 사용자 정의 값이 있는지
    pub fn has_custom_values(&self) -> bool {
        self.base_config.is_customized() || self.soteria_config.is_customized()
    }
}

/// 설정 저장 요청: 사용자 정의 값만 전송한다
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNginxConfigRequest {
    pub base_config: CustomValue,
    pub soteria_config: CustomValue,
}

/// `{ customValue }` 래퍼
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomValue {
    pub custom_value: String,
}

impl SetNginxConfigRequest {
    pub fn new(custom_base: &str, custom_soteria: &str) -> Self {
        Self {
            base_config: CustomValue {
                custom_value: custom_base.to_string(),
            },
            soteria_config: CustomValue {
                custom_value: custom_soteria.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NginxConfig {
        serde_json::from_str(
            r#"{
                "baseConfig": {"byDefault": "worker_processes auto;", "customValue": ""},
                "soteriaConfig": {"byDefault": "server { listen 80; }", "customValue": ""}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn load_defaults_copies_templates() {
        let mut config = sample();
        assert!(!config.has_custom_values());

        config.load_defaults();
        assert_eq!(config.base_config.custom_value, "worker_processes auto;");
        assert_eq!(config.soteria_config.custom_value, "server { listen 80; }");
        assert!(config.has_custom_values());
    }

    #[test]
    fn one_customized_section_is_enough() {
        let mut config = sample();
        config.soteria_config.custom_value = "# tuned".to_string();
        assert!(config.has_custom_values());
    }

    #[test]
    fn set_request_wire_shape() {
        let req = SetNginxConfigRequest::new("base", "root");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "baseConfig": {"customValue": "base"},
                "soteriaConfig": {"customValue": "root"}
            })
        );
    }
}
