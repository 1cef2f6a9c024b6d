//! 통합 테스트 공용 도우미.

#![allow(dead_code)]

use parking_lot::Mutex;
use soteria_console::commands::Context;
use soteria_console::toaster::Toaster;
use soteria_core::config::AppConfig;
use soteria_core::ports::notifier::{Notifier, ToastLevel};
use soteria_core::token_store::MemoryTokenStore;
use soteria_network::api_manager::ApiManager;
use soteria_network::auth::AuthSession;
use std::sync::Arc;

/// 발송된 토스트를 기록하는 알림 어댑터
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(ToastLevel, String)>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<(ToastLevel, String)> {
        self.toasts.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts
            .lock()
            .iter()
            .filter(|(level, _)| *level == ToastLevel::Error)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        self.toasts.lock().push((level, message.to_string()));
    }
}

pub fn recording_toaster() -> (Toaster, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (Toaster::new(notifier.clone(), false), notifier)
}

pub fn config_for(server: &mockito::ServerGuard) -> AppConfig {
    let mut config = AppConfig::default_config();
    config.server.base_url = server.url();
    config.server.request_timeout_ms = 5_000;
    config
}

/// 토큰이 미리 저장된 세션으로 파사드 생성
pub fn api_for(server: &mockito::ServerGuard, token: &str) -> Arc<ApiManager> {
    let session = Arc::new(AuthSession::new(Arc::new(MemoryTokenStore::with_token(token))));
    Arc::new(ApiManager::new(&config_for(server), session).unwrap())
}

/// 토큰 없이 시작하는 파사드
pub fn logged_out_api_for(server: &mockito::ServerGuard) -> Arc<ApiManager> {
    let session = Arc::new(AuthSession::new(Arc::new(MemoryTokenStore::new())));
    Arc::new(ApiManager::new(&config_for(server), session).unwrap())
}

/// 토스트를 기록하는 명령 실행 컨텍스트
pub fn context_for(server: &mockito::ServerGuard, api: Arc<ApiManager>) -> (Context, Arc<RecordingNotifier>) {
    let (toaster, notifier) = recording_toaster();
    let ctx = Context {
        api,
        toaster,
        config: config_for(server),
    };
    (ctx, notifier)
}

pub fn ok_body(data: serde_json::Value) -> String {
    serde_json::json!({ "status": 100, "description": "OK", "data": data }).to_string()
}
