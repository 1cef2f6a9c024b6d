//! 앱 정의 모델.
//!
//! 서버에 등록된 컨테이너 앱의 정의와 빌드/실행 로그를 표현.
//! 서버 JSON 필드명(camelCase)을 그대로 따른다.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// `null`을 기본값으로 받아들인다
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 환경 변수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// 영속 볼륨 매핑
///
/// `volume_name`과 `host_path` 중 하나만 채워진다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// 컨테이너 내부 경로
    pub container_path: String,
    /// 도커 볼륨 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
    /// 호스트 경로 바인드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_path: Option<String>,
    /// 모델에 없는 필드 (`mode` 등), 갱신 시 그대로 돌려보낸다
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 포트 매핑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
    /// 모델에 없는 필드 (`protocol`, `publishMode` 등)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 커스텀 도메인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomain {
    pub public_domain: String,
    #[serde(default)]
    pub has_ssl: bool,
}

/// HTTP 기본 인증 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAuth {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Git 저장소 정보 (push 웹훅용)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoInfo {
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
}

/// push 웹훅 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPushWebhook {
    pub repo_info: RepoInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_webhook_token: Option<String>,
}

/// 앱 배포 토큰 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDeployTokenConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_deploy_token: Option<String>,
}

/// 앱 태그
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTag {
    pub tag_name: String,
}

/// 배포된 버전 기록
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    pub version: u32,
    #[serde(default)]
    pub deployed_image_name: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub git_hash: Option<String>,
}

/// 앱 정의
///
/// 서버가 내려주는 필드 중 콘솔이 다루는 것만 타입으로 정의하며,
/// 누락된 필드는 기본값으로 채운다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppDefinition {
    pub app_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_persistent_data: bool,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub instance_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub soteria_definition_relative_file_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub networks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub env_vars: Vec<EnvVar>,
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<Volume>,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<PortMapping>,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<AppVersion>,
    #[serde(deserialize_with = "null_as_default")]
    pub deployed_version: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub not_expose_as_web_app: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_domain: Vec<CustomDomain>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_default_sub_domain_ssl: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub force_ssl: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub websocket_support: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub container_http_port: u16,
    pub pre_deploy_function: Option<String>,
    pub service_update_override: Option<String>,
    pub custom_nginx_config: Option<String>,
    pub redirect_domain: Option<String>,
    pub node_id: Option<String>,
    pub http_auth: Option<HttpAuth>,
    pub app_push_webhook: Option<AppPushWebhook>,
    pub app_deploy_token_config: Option<AppDeployTokenConfig>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<AppTag>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_app_building: bool,
    /// 모델에 없는 서버 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 앱 정의 갱신 요청
///
/// 서버는 이 필드들만 받아 앱 설정을 덮어쓴다. 빌드 상태나
/// 버전 기록처럼 서버가 관리하는 필드는 포함되지 않는다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppDefinitionRequest {
    pub app_name: String,
    pub instance_count: u32,
    pub soteria_definition_relative_file_path: String,
    pub not_expose_as_web_app: bool,
    pub force_ssl: bool,
    pub websocket_support: bool,
    pub volumes: Vec<Volume>,
    pub ports: Vec<PortMapping>,
    pub custom_nginx_config: Option<String>,
    pub app_push_webhook: Option<AppPushWebhook>,
    pub node_id: Option<String>,
    pub pre_deploy_function: Option<String>,
    pub service_update_override: Option<String>,
    pub container_http_port: u16,
    pub description: Option<String>,
    pub http_auth: Option<HttpAuth>,
    pub env_vars: Vec<EnvVar>,
    pub app_deploy_token_config: Option<AppDeployTokenConfig>,
    pub tags: Vec<AppTag>,
    pub redirect_domain: Option<String>,
}

impl UpdateAppDefinitionRequest {
    /// 앱 정의에서 갱신 가능한 필드만 추출
    pub fn from_definition(app_name: &str, def: &AppDefinition) -> Self {
        Self {
            app_name: app_name.to_string(),
            instance_count: def.instance_count,
            soteria_definition_relative_file_path: def
                .soteria_definition_relative_file_path
                .clone(),
            not_expose_as_web_app: def.not_expose_as_web_app,
            force_ssl: def.force_ssl,
            websocket_support: def.websocket_support,
            volumes: def.volumes.clone(),
            ports: def.ports.clone(),
            custom_nginx_config: def.custom_nginx_config.clone(),
            app_push_webhook: def.app_push_webhook.clone(),
            node_id: def.node_id.clone(),
            pre_deploy_function: def.pre_deploy_function.clone(),
            service_update_override: def.service_update_override.clone(),
            container_http_port: def.container_http_port,
            description: def.description.clone(),
            http_auth: def.http_auth.clone(),
            env_vars: def.env_vars.clone(),
            app_deploy_token_config: def.app_deploy_token_config.clone(),
            tags: def.tags.clone(),
            redirect_domain: def.redirect_domain.clone(),
        }
    }
}

/// 배포 정의 (`soteria-definition` 파일 내용)
///
/// 이미지 이름, Dockerfile 라인, 템플릿 중 하나로 빌드 방식을 지정한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoteriaDefinition {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl SoteriaDefinition {
    /// 이미 빌드된 이미지를 배포하는 정의
    pub fn from_image(image_name: &str) -> Self {
        Self {
            schema_version: 2,
            image_name: Some(image_name.to_string()),
            ..Default::default()
        }
    }
}

/// 전체 앱 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppDefinitionsResponse {
    pub app_definitions: Vec<AppDefinition>,
    pub root_domain: String,
    pub soteria_sub_domain: String,
    pub default_nginx_config: String,
}

impl AppDefinitionsResponse {
    /// 이름으로 앱 정의 검색
    pub fn find(&self, app_name: &str) -> Option<&AppDefinition> {
        self.app_definitions
            .iter()
            .find(|d| d.app_name.as_deref() == Some(app_name))
    }
}

/// 빌드 로그 묶음
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildLogLines {
    pub lines: Vec<String>,
    pub first_line_number: i64,
}

/// 빌드 상태 + 로그 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildLogs {
    pub is_app_building: bool,
    pub is_build_failed: bool,
    pub logs: BuildLogLines,
}

/// 실행 로그 응답 (hex 인코딩)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppLogs {
    pub logs: String,
}

impl AppLogs {
    /// hex 로그를 UTF-8 텍스트로 디코딩
    ///
    /// 도커 로그 프레임에 섞인 제어 바이트는 손실 변환으로 남긴다.
    pub fn decode(&self) -> Result<String, CoreError> {
        let bytes = hex::decode(self.logs.trim()).map_err(|e| CoreError::Validation {
            field: "logs".to_string(),
            message: format!("hex 디코딩 실패: {e}"),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// 미사용 이미지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedImage {
    pub id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 미사용 이미지 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnusedImagesResponse {
    pub unused_images: Vec<UnusedImage>,
}
