//! 인증 세션 상태.
//!
//! 모든 `ApiManager` 인스턴스가 공유하는 프로세스 단위 인증 상태.
//! 현재 토큰, 마지막으로 성공한 비밀번호, OTP 사용 여부를 보관하며
//! 토큰 변경은 [`TokenStore`]에 반영된다.

use parking_lot::{Mutex, RwLock};
use soteria_core::ports::token_store::TokenStore;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 세션 상태 (구독자에게 전파됨)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 토큰 없음
    LoggedOut,
    /// 토큰 보유
    LoggedIn,
    /// 재로그인 불가로 토큰이 강제 삭제됨
    ForcedLogout,
}

/// 재로그인에 필요한 자격증명
#[derive(Debug, Default)]
struct Credentials {
    last_known_password: String,
    had_otp: bool,
}

/// 공유 인증 세션
pub struct AuthSession {
    token: RwLock<String>,
    credentials: Mutex<Credentials>,
    store: Arc<dyn TokenStore>,
    state_tx: watch::Sender<SessionState>,
}

impl AuthSession {
    /// 저장소에 남아 있는 토큰으로 세션 생성
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load().unwrap_or_default();
        let initial = if token.is_empty() {
            SessionState::LoggedOut
        } else {
            SessionState::LoggedIn
        };
        let (state_tx, _) = watch::channel(initial);

        Self {
            token: RwLock::new(token),
            credentials: Mutex::new(Credentials::default()),
            store,
            state_tx,
        }
    }

    /// 현재 토큰 (없으면 빈 문자열)
    pub fn auth_token(&self) -> String {
        self.token.read().clone()
    }

    /// 토큰 보유 여부
    pub fn is_logged_in(&self) -> bool {
        !self.token.read().is_empty()
    }

    /// 토큰 교체. 빈 토큰은 저장소를 비운다.
    pub fn set_auth_token(&self, token: &str) {
        *self.token.write() = token.to_string();

        if token.is_empty() {
            if let Err(e) = self.store.clear() {
                warn!("토큰 저장소 삭제 실패: {e}");
            }
            self.state_tx.send_replace(SessionState::LoggedOut);
        } else {
            if let Err(e) = self.store.save(token) {
                warn!("토큰 저장 실패: {e}");
            }
            self.state_tx.send_replace(SessionState::LoggedIn);
        }
    }

    /// 로그인 시도 직전 자격증명 기록
    pub fn remember_credentials(&self, password: &str, had_otp: bool) {
        let mut creds = self.credentials.lock();
        creds.last_known_password = password.to_string();
        creds.had_otp = had_otp;
    }

    /// 자격증명 삭제 (비밀번호 오류/백오프 시)
    pub fn forget_credentials(&self) {
        *self.credentials.lock() = Credentials::default();
        debug!("저장된 자격증명 삭제");
    }

    /// 재로그인에 쓸 비밀번호
    ///
    /// 비밀번호가 없거나 마지막 로그인에 OTP를 썼다면 None.
    /// OTP는 일회용이므로 같은 자격증명으로 재시도해도 실패한다.
    pub fn relogin_password(&self) -> Option<String> {
        let creds = self.credentials.lock();
        if creds.last_known_password.is_empty() || creds.had_otp {
            None
        } else {
            Some(creds.last_known_password.clone())
        }
    }

    /// 토큰을 보유 중이면 강제 로그아웃
    ///
    /// 실제로 로그아웃했으면 true.
    pub fn force_logout(&self) -> bool {
        if !self.is_logged_in() {
            return false;
        }
        self.set_auth_token("");
        self.state_tx.send_replace(SessionState::ForcedLogout);
        info!("재로그인 불가: 강제 로그아웃");
        true
    }

    /// 세션 상태 구독
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// 현재 세션 상태
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("logged_in", &self.is_logged_in())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
