//! Soteria REST API 파사드.
//!
//! 서버의 모든 엔드포인트를 타입이 있는 메서드로 감싼다.
//! 각 메서드는 요청 하나를 만들어 [`HttpClient`]에 넘길 뿐이며
//! 캐싱이나 재시도는 하지 않는다.

use async_trait::async_trait;
use serde_json::json;
use soteria_core::config::AppConfig;
use soteria_core::error::CoreError;
use soteria_core::models::app::{
    AppDefinition, AppDefinitionsResponse, AppLogs, BuildLogs, SoteriaDefinition,
    UnusedImagesResponse, UpdateAppDefinitionRequest,
};
use soteria_core::models::nginx::{NginxConfig, SetNginxConfigRequest};
use soteria_core::models::one_click::{OneClickAppList, OneClickAppTemplate, OneClickRepositories};
use soteria_core::models::pro::{
    ProConfig, ProConfigs, ProFeaturesState, TwoFactorAuthRequest, TwoFactorAuthResponse,
};
use soteria_core::models::registry::{RegistriesResponse, RegistryInfo};
use soteria_core::models::system::{
    AddDockerNodeRequest, BackupToken, LoadBalancerInfo, NodesResponse, SoteriaInfo, VersionInfo,
};
use soteria_core::ports::settings_api::SettingsApi;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::AuthSession;
use crate::http_client::{ApiRequest, FilePart, HttpClient};

/// 백업 다운로드 파일 이름
const BACKUP_FILE_NAME: &str = "backup.tar";

/// 소스 업로드 폼 필드
const SOURCE_FILE_FIELD: &str = "sourceFile";

/// 빌드를 백그라운드로 넘기는 `detached=1` 플래그
fn detached(request: ApiRequest, enabled: bool) -> ApiRequest {
    if enabled {
        request.query("detached", "1")
    } else {
        request
    }
}

/// API 파사드
///
/// 인스턴스마다 자체 HTTP 클라이언트를 갖지만 인증 세션은 공유한다.
#[derive(Debug)]
pub struct ApiManager {
    http: HttpClient,
}

impl ApiManager {
    /// 설정과 공유 세션으로 파사드 생성
    pub fn new(config: &AppConfig, session: Arc<AuthSession>) -> Result<Self, CoreError> {
        let api_url = config.api_url();
        debug!("API URL: {api_url}");
        let http = HttpClient::new(&api_url, session, config.request_timeout())?;
        Ok(Self { http })
    }

    /// API 루트 URL
    pub fn api_base_url(&self) -> &str {
        self.http.base_url()
    }

    /// 파사드 파기: 진행 중인 요청 결과는 버려진다
    pub fn destroy(&self) {
        self.http.destroy();
    }

    /// 현재 토큰
    pub fn auth_token_string(&self) -> String {
        self.http.session().auth_token()
    }

    /// 토큰 교체 (빈 문자열이면 로그아웃)
    pub fn set_auth_token(&self, token: &str) {
        self.http.session().set_auth_token(token);
    }

    pub fn is_logged_in(&self) -> bool {
        self.http.session().is_logged_in()
    }

    /// 공유 인증 세션
    pub fn session(&self) -> &Arc<AuthSession> {
        self.http.session()
    }

    // ── 인증 ──

    /// 비밀번호(+OTP)로 로그인
    pub async fn get_auth_token(
        &self,
        password: &str,
        otp_token: Option<&str>,
    ) -> Result<(), CoreError> {
        self.http.login(password, otp_token).await?;
        info!("로그인 완료");
        Ok(())
    }

    pub async fn change_pass(&self, old_password: &str, new_password: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/changepassword",
                json!({ "oldPassword": old_password, "newPassword": new_password }),
            ))
            .await
    }

    // ── Pro 기능 ──

    pub async fn get_pro_features_state(&self) -> Result<ProFeaturesState, CoreError> {
        self.http.fetch(ApiRequest::get("/user/pro/state")).await
    }

    pub async fn set_pro_api_key(&self, api_key: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post("/user/pro/apikey", json!({ "apiKey": api_key })))
            .await
    }

    pub async fn get_pro_configs(&self) -> Result<ProConfigs, CoreError> {
        self.http.fetch(ApiRequest::get("/user/pro/configs")).await
    }

    pub async fn set_pro_configs(&self, configs: &ProConfig) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/pro/configs",
                json!({ "proConfigs": configs }),
            ))
            .await
    }

    pub async fn get_otp_status(&self) -> Result<TwoFactorAuthResponse, CoreError> {
        self.http.fetch(ApiRequest::get("/user/pro/otp")).await
    }

    pub async fn set_otp_status(
        &self,
        request: &TwoFactorAuthRequest,
    ) -> Result<TwoFactorAuthResponse, CoreError> {
        self.http
            .fetch(ApiRequest::post("/user/pro/otp", serde_json::to_value(request)?))
            .await
    }

    // ── 시스템 ──

    pub async fn get_soteria_info(&self) -> Result<SoteriaInfo, CoreError> {
        self.http.fetch(ApiRequest::get("/user/system/info")).await
    }

    pub async fn update_root_domain(&self, root_domain: &str, force: bool) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/changerootdomain",
                json!({ "rootDomain": root_domain, "force": force }),
            ))
            .await
    }

    pub async fn enable_root_ssl(&self, email_address: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/enablessl",
                json!({ "emailAddress": email_address }),
            ))
            .await
    }

    pub async fn force_ssl(&self, is_enabled: bool) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/forcessl",
                json!({ "isEnabled": is_enabled }),
            ))
            .await
    }

    pub async fn get_load_balancer_info(&self) -> Result<LoadBalancerInfo, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/system/loadbalancerinfo"))
            .await
    }

    /// NetData 모니터링 설정 (서버 정의 자유 형식)
    pub async fn get_net_data_info(&self) -> Result<serde_json::Value, CoreError> {
        self.http.fetch(ApiRequest::get("/user/system/netdata")).await
    }

    pub async fn update_net_data_info(&self, net_data_info: &serde_json::Value) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/netdata",
                json!({ "netDataInfo": net_data_info }),
            ))
            .await
    }

    pub async fn get_version_info(&self) -> Result<VersionInfo, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/system/versioninfo"))
            .await
    }

    pub async fn perform_update(&self, latest_version: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/versioninfo",
                json!({ "latestVersion": latest_version }),
            ))
            .await
    }

    pub async fn create_backup(&self) -> Result<BackupToken, CoreError> {
        self.http
            .fetch(ApiRequest::post(
                "/user/system/createbackup",
                json!({ "postDownloadFileName": BACKUP_FILE_NAME }),
            ))
            .await
    }

    pub async fn get_nginx_config(&self) -> Result<NginxConfig, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/system/nginxconfig"))
            .await
    }

    pub async fn set_nginx_config(
        &self,
        custom_base: &str,
        custom_soteria: &str,
    ) -> Result<(), CoreError> {
        let body = serde_json::to_value(SetNginxConfigRequest::new(custom_base, custom_soteria))?;
        self.http
            .execute(ApiRequest::post("/user/system/nginxconfig", body))
            .await
    }

    // ── 앱 ──

    pub async fn get_all_apps(&self) -> Result<AppDefinitionsResponse, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/apps/appDefinitions"))
            .await
    }

    pub async fn fetch_build_logs(&self, app_name: &str) -> Result<BuildLogs, CoreError> {
        self.http
            .fetch(ApiRequest::get(format!("/user/apps/appData/{app_name}")))
            .await
    }

    pub async fn fetch_app_logs_in_hex(&self, app_name: &str) -> Result<AppLogs, CoreError> {
        self.http
            .fetch(
                ApiRequest::get(format!("/user/apps/appData/{app_name}/logs"))
                    .query("encoding", "hex"),
            )
            .await
    }

    /// 소스 tarball 업로드 (항상 detached 빌드)
    pub async fn upload_app_data(
        &self,
        app_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), CoreError> {
        let file = FilePart {
            field: SOURCE_FILE_FIELD.to_string(),
            file_name: file_name.to_string(),
            bytes,
        };
        self.http
            .execute(detached(
                ApiRequest::upload(format!("/user/apps/appData/{app_name}"), file),
                true,
            ))
            .await
    }

    /// 배포 정의 내용으로 배포
    ///
    /// 정의는 JSON 문자열로 직렬화되어 전송된다.
    pub async fn upload_soteria_definition_content(
        &self,
        app_name: &str,
        definition: &SoteriaDefinition,
        git_hash: &str,
        is_detached: bool,
    ) -> Result<(), CoreError> {
        let content = serde_json::to_string(definition)?;
        self.http
            .execute(detached(
                ApiRequest::post(
                    format!("/user/apps/appData/{app_name}"),
                    json!({ "soteriaDefinitionContent": content, "gitHash": git_hash }),
                ),
                is_detached,
            ))
            .await
    }

    pub async fn update_config_and_save(
        &self,
        app_name: &str,
        definition: &AppDefinition,
    ) -> Result<(), CoreError> {
        let body = serde_json::to_value(UpdateAppDefinitionRequest::from_definition(
            app_name, definition,
        ))?;
        self.http
            .execute(ApiRequest::post("/user/apps/appDefinitions/update", body))
            .await
    }

    pub async fn rename_app(&self, old_app_name: &str, new_app_name: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/apps/appDefinitions/rename",
                json!({ "oldAppName": old_app_name, "newAppName": new_app_name }),
            ))
            .await
    }

    pub async fn register_new_app(
        &self,
        app_name: &str,
        has_persistent_data: bool,
        is_detached: bool,
    ) -> Result<(), CoreError> {
        self.http
            .execute(detached(
                ApiRequest::post(
                    "/user/apps/appDefinitions/register",
                    json!({ "appName": app_name, "hasPersistentData": has_persistent_data }),
                ),
                is_detached,
            ))
            .await
    }

    /// 앱 삭제, `volumes`에 나열된 볼륨도 함께 삭제
    pub async fn delete_app(&self, app_name: &str, volumes: &[String]) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/apps/appDefinitions/delete",
                json!({ "appName": app_name, "volumes": volumes }),
            ))
            .await
    }

    pub async fn enable_ssl_for_base_domain(&self, app_name: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/apps/appDefinitions/enablebasedomainssl",
                json!({ "appName": app_name }),
            ))
            .await
    }

    pub async fn attach_new_custom_domain_to_app(
        &self,
        app_name: &str,
        custom_domain: &str,
    ) -> Result<(), CoreError> {
        self.app_domain_call("/user/apps/appDefinitions/customdomain", app_name, custom_domain)
            .await
    }

    pub async fn enable_ssl_for_custom_domain(
        &self,
        app_name: &str,
        custom_domain: &str,
    ) -> Result<(), CoreError> {
        self.app_domain_call(
            "/user/apps/appDefinitions/enablecustomdomainssl",
            app_name,
            custom_domain,
        )
        .await
    }

    pub async fn remove_custom_domain(
        &self,
        app_name: &str,
        custom_domain: &str,
    ) -> Result<(), CoreError> {
        self.app_domain_call(
            "/user/apps/appDefinitions/removecustomdomain",
            app_name,
            custom_domain,
        )
        .await
    }

    async fn app_domain_call(
        &self,
        path: &str,
        app_name: &str,
        custom_domain: &str,
    ) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                path,
                json!({ "appName": app_name, "customDomain": custom_domain }),
            ))
            .await
    }

    pub async fn get_unused_images(
        &self,
        most_recent_limit: u32,
    ) -> Result<UnusedImagesResponse, CoreError> {
        self.http
            .fetch(
                ApiRequest::get("/user/apps/appDefinitions/unusedImages")
                    .query("mostRecentLimit", most_recent_limit.to_string()),
            )
            .await
    }

    pub async fn delete_images(&self, image_ids: &[String]) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/apps/appDefinitions/deleteImages",
                json!({ "imageIds": image_ids }),
            ))
            .await
    }

    /// 웹훅 경로로 빌드 강제 실행
    ///
    /// `webhook_path`는 서버가 발급한 경로(쿼리 포함)를 그대로 사용한다.
    pub async fn force_build(&self, webhook_path: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(webhook_path, json!({})))
            .await
    }

    // ── 레지스트리 ──

    pub async fn get_docker_registries(&self) -> Result<RegistriesResponse, CoreError> {
        self.http.fetch(ApiRequest::get("/user/registries")).await
    }

    pub async fn enable_self_hosted_docker_registry(&self) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/selfhostregistry/enableregistry",
                json!({}),
            ))
            .await
    }

    pub async fn disable_self_hosted_docker_registry(&self) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/selfhostregistry/disableregistry",
                json!({}),
            ))
            .await
    }

    pub async fn add_docker_registry(&self, registry: &RegistryInfo) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/registries/insert",
                serde_json::to_value(registry)?,
            ))
            .await
    }

    pub async fn update_docker_registry(&self, registry: &RegistryInfo) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/registries/update",
                serde_json::to_value(registry)?,
            ))
            .await
    }

    pub async fn delete_docker_registry(&self, registry_id: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/registries/delete",
                json!({ "registryId": registry_id }),
            ))
            .await
    }

    pub async fn set_default_push_docker_registry(&self, registry_id: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/registries/setpush",
                json!({ "registryId": registry_id }),
            ))
            .await
    }

    // ── 클러스터 노드 ──

    pub async fn get_all_nodes(&self) -> Result<NodesResponse, CoreError> {
        self.http.fetch(ApiRequest::get("/user/system/nodes")).await
    }

    pub async fn add_docker_node(&self, request: &AddDockerNodeRequest) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/system/nodes",
                serde_json::to_value(request)?,
            ))
            .await
    }

    // ── 원클릭 앱 ──

    pub async fn get_all_one_click_apps(&self) -> Result<OneClickAppList, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/oneclick/template/list"))
            .await
    }

    pub async fn get_one_click_app_by_name(
        &self,
        app_name: &str,
        base_domain: &str,
    ) -> Result<OneClickAppTemplate, CoreError> {
        self.http
            .fetch(
                ApiRequest::get("/user/oneclick/template/app")
                    .query("appName", app_name)
                    .query("baseDomain", base_domain),
            )
            .await
    }

    pub async fn get_all_one_click_app_repos(&self) -> Result<OneClickRepositories, CoreError> {
        self.http
            .fetch(ApiRequest::get("/user/oneclick/repositories"))
            .await
    }

    pub async fn add_new_custom_one_click_repo(&self, repository_url: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/oneclick/repositories/insert",
                json!({ "repositoryUrl": repository_url }),
            ))
            .await
    }

    pub async fn delete_custom_one_click_repo(&self, repository_url: &str) -> Result<(), CoreError> {
        self.http
            .execute(ApiRequest::post(
                "/user/oneclick/repositories/delete",
                json!({ "repositoryUrl": repository_url }),
            ))
            .await
    }
}

#[async_trait]
impl SettingsApi for ApiManager {
    async fn get_nginx_config(&self) -> Result<NginxConfig, CoreError> {
        ApiManager::get_nginx_config(self).await
    }

    async fn set_nginx_config(
        &self,
        custom_base: &str,
        custom_soteria: &str,
    ) -> Result<(), CoreError> {
        ApiManager::set_nginx_config(self, custom_base, custom_soteria).await
    }
}
