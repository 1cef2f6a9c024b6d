//! nginx 설정 화면.
//!
//! 상태(설정, 로딩 여부, 재시작 타이머)를 들고 있다가 `render()`로
//! 터미널 출력 텍스트를 만든다. 모든 API 실패는 토스터로 넘긴다.

use soteria_core::models::nginx::{NginxConfig, BASE_CONFIG_PATH, SOTERIA_CONFIG_PATH};
use soteria_core::ports::settings_api::SettingsApi;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::settings::restart_notice::RestartNotice;
use crate::toaster::Toaster;

const SPINNER_TEXT: &str = "⏳ Loading...";
const ERROR_RETRY_TEXT: &str = "Something went wrong. Please retry.";
const DESCRIPTION: &str = "Soteria allows you to set custom configurations for your nginx router. \
This will allow high customization level in terms of caching, special routing, http2 and etc.";
const TEMPLATE_NOTE: &str = "Note that templates are built using EJS template pattern. \
Do not change the areas between <% and %> unless you really know what you're doing!";
const COLLAPSED_TEXT: &str = "(default template in use, run `soteria nginx defaults` to edit)";

/// 화면 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NginxConfigState {
    pub nginx_config: Option<NginxConfig>,
    pub is_loading: bool,
    pub is_refresh_timer_activated: bool,
}

/// nginx 설정 화면
pub struct NginxConfigScreen {
    api: Arc<dyn SettingsApi>,
    toaster: Toaster,
    notice: RestartNotice,
    state: NginxConfigState,
}

impl NginxConfigScreen {
    /// 새 화면 생성 (첫 로드 전이므로 로딩 상태로 시작)
    pub fn new(api: Arc<dyn SettingsApi>, toaster: Toaster, notice: RestartNotice) -> Self {
        Self {
            api,
            toaster,
            notice,
            state: NginxConfigState {
                is_loading: true,
                ..Default::default()
            },
        }
    }

    pub fn state(&self) -> &NginxConfigState {
        &self.state
    }

    pub fn notice(&self) -> &RestartNotice {
        &self.notice
    }

    /// 서버에서 현재 설정 조회
    pub async fn load(&mut self) {
        self.state.is_loading = true;
        match self.api.get_nginx_config().await {
            Ok(config) => {
                debug!("nginx 설정 로드 완료");
                self.state.nginx_config = Some(config);
            }
            Err(e) => self.toaster.toast_error(&e),
        }
        self.state.is_loading = false;
    }

    /// 기본 템플릿을 사용자 정의 값으로 복사
    pub fn load_defaults(&mut self) {
        let Some(current) = &self.state.nginx_config else {
            warn!("nginx 설정이 로드되지 않음, 기본값 복사 생략");
            return;
        };
        let mut updated = current.clone();
        updated.load_defaults();
        self.state.nginx_config = Some(updated);
    }

    pub fn set_base_custom_value(&mut self, text: &str) {
        self.edit(|config| config.base_config.custom_value = text.to_string());
    }

    pub fn set_soteria_custom_value(&mut self, text: &str) {
        self.edit(|config| config.soteria_config.custom_value = text.to_string());
    }

    fn edit<F: FnOnce(&mut NginxConfig)>(&mut self, apply: F) {
        match self.state.nginx_config.as_mut() {
            Some(config) => apply(config),
            None => warn!("nginx 설정이 로드되지 않음, 편집 무시"),
        }
    }

    /// 두 사용자 정의 값 저장
    ///
    /// 성공하면 서버가 재시작되므로 재시작 타이머를 켠다.
    pub async fn save(&mut self) {
        let Some(config) = self.state.nginx_config.clone() else {
            warn!("nginx 설정이 로드되지 않음, 저장 생략");
            return;
        };

        self.state.is_loading = true;
        match self
            .api
            .set_nginx_config(
                &config.base_config.custom_value,
                &config.soteria_config.custom_value,
            )
            .await
        {
            Ok(()) => self.state.is_refresh_timer_activated = true,
            Err(e) => self.toaster.toast_error(&e),
        }
        self.state.is_loading = false;
    }

    /// 현재 상태를 터미널 출력 텍스트로 변환
    pub fn render(&self) -> String {
        if self.state.is_loading {
            return SPINNER_TEXT.to_string();
        }

        let Some(config) = &self.state.nginx_config else {
            return ERROR_RETRY_TEXT.to_string();
        };

        let mut out = String::new();
        if self.state.is_refresh_timer_activated {
            let _ = writeln!(out, "{}\n", self.notice.message());
        }
        let _ = writeln!(out, "{DESCRIPTION}");
        let _ = writeln!(out, "{TEMPLATE_NOTE}\n");

        let expanded = config.has_custom_values();
        let sections = [
            ("Base Config", BASE_CONFIG_PATH, &config.base_config.custom_value),
            ("Soteria Config", SOTERIA_CONFIG_PATH, &config.soteria_config.custom_value),
        ];
        for (title, path, value) in sections {
            let _ = writeln!(out, "{title} Location in nginx container: {path}");
            if expanded {
                let _ = writeln!(out, "{value}\n");
            } else {
                let _ = writeln!(out, "{COLLAPSED_TEXT}\n");
            }
        }

        out
    }
}

impl std::fmt::Debug for NginxConfigScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NginxConfigScreen")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
