//! # soteria-network
//!
//! Soteria REST API 어댑터.
//! 서버 `/api/v2` 엔드포인트 호출, 인증 헤더 주입, 토큰 무효 시
//! 1회 재로그인을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use soteria_network::api_manager::ApiManager;
//! use soteria_network::auth::AuthSession;
//!
//! let session = Arc::new(AuthSession::new(token_store));
//! let api = ApiManager::new(&config, session)?;
//! api.get_auth_token("password", None).await?;
//! let apps = api.get_all_apps().await?;
//! ```

pub mod api_manager;
pub mod auth;
pub mod http_client;
