//! HTTP REST API 클라이언트.
//!
//! 인증 헤더 자동 주입 + 응답 봉투 해석 + 토큰 무효 시 1회 재로그인.
//! 재시도 정책은 없다. 재로그인 후 한 번만 다시 요청하고,
//! 그래도 거부되면 에러를 그대로 돌려준다.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use soteria_core::error::{status, CoreError};
use soteria_core::models::LoginResponse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::AuthSession;

/// 인증 토큰 헤더
pub const AUTH_HEADER: &str = "x-soteria-auth";

/// 네임스페이스 헤더
pub const NAMESPACE_HEADER: &str = "x-namespace";

/// 네임스페이스 값
pub const NAMESPACE: &str = "soteria";

/// 업로드 파일 파트
#[derive(Debug, Clone)]
pub struct FilePart {
    /// 폼 필드 이름
    pub field: String,
    /// 파일 이름
    pub file_name: String,
    /// 파일 내용
    pub bytes: Vec<u8>,
}

/// 요청 본문
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// 본문 없음 (GET)
    None,
    /// JSON 본문
    Json(serde_json::Value),
    /// multipart 파일 업로드
    Multipart(FilePart),
}

/// API 요청 하나
///
/// 재로그인 후 같은 요청을 다시 보내야 하므로 복제 가능한 형태로 보관한다.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    /// GET 요청
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// JSON 본문 POST 요청
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    /// multipart 업로드 POST 요청
    pub fn upload(path: impl Into<String>, file: FilePart) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Multipart(file),
        }
    }

    /// 쿼리 파라미터 추가
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// 서버 응답 봉투 `{ status, description, data }`
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl ApiEnvelope {
    fn token_invalid() -> Self {
        Self {
            status: Some(status::AUTH_TOKEN_INVALID),
            description: Some("인증 토큰 무효".to_string()),
            data: None,
        }
    }

    fn is_token_invalid(&self) -> bool {
        self.status == Some(status::AUTH_TOKEN_INVALID)
    }

    /// 성공 상태면 data 반환, 아니면 API 에러
    fn into_data(self) -> Result<serde_json::Value, CoreError> {
        let code = self.status.unwrap_or(status::UNKNOWN_ERROR);
        if !status::is_success(code) {
            return Err(CoreError::api(code, self.description.unwrap_or_default()));
        }
        Ok(self.data.unwrap_or(serde_json::Value::Null))
    }
}

/// REST API 클라이언트
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
    destroyed: AtomicBool,
}

impl HttpClient {
    /// 새 HTTP 클라이언트 생성
    ///
    /// `base_url`은 `/api/v2`까지 포함한 API 루트다.
    pub fn new(
        base_url: &str,
        session: Arc<AuthSession>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        url::Url::parse(base_url)
            .map_err(|e| CoreError::Config(format!("잘못된 서버 URL '{base_url}': {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            destroyed: AtomicBool::new(false),
        })
    }

    /// API 루트 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 공유 인증 세션
    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    /// 클라이언트 파기
    ///
    /// 이후 완료되는 모든 요청은 결과를 버리고 `Cancelled`를 반환한다.
    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        debug!("HTTP 클라이언트 파기");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// 요청 실행 후 data를 `T`로 역직렬화
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, CoreError> {
        let data = self.fetch_value(&request).await?;
        serde_json::from_value(data).map_err(CoreError::from)
    }

    /// 요청 실행, data는 버린다
    pub async fn execute(&self, request: ApiRequest) -> Result<(), CoreError> {
        self.fetch_value(&request).await.map(|_| ())
    }

    /// 비밀번호(+OTP)로 로그인하고 토큰을 세션에 저장
    ///
    /// 비밀번호 불일치나 백오프로 거부되면 토큰과 자격증명을 모두 지워
    /// 잘못된 비밀번호로 재로그인을 반복하지 않게 한다.
    pub async fn login(&self, password: &str, otp_token: Option<&str>) -> Result<(), CoreError> {
        self.session
            .remember_credentials(password, otp_token.is_some());

        let mut body = serde_json::json!({ "password": password });
        if let Some(otp) = otp_token {
            body["otpToken"] = serde_json::Value::String(otp.to_string());
        }
        let request = ApiRequest::post("/login", body);

        let result = async {
            let envelope = self.guard(self.fetch_internal(&request).await)?;
            let data = envelope.into_data()?;
            let login: LoginResponse = serde_json::from_value(data)?;
            Ok::<_, CoreError>(login)
        }
        .await;

        match result {
            Ok(login) => {
                self.session.set_auth_token(&login.token);
                debug!("로그인 성공");
                Ok(())
            }
            Err(e) => {
                if e.forces_logout() {
                    warn!("로그인 거부 ({e}), 자격증명 삭제");
                    self.session.set_auth_token("");
                    self.session.forget_credentials();
                }
                Err(e)
            }
        }
    }

    async fn fetch_value(&self, request: &ApiRequest) -> Result<serde_json::Value, CoreError> {
        self.guard(Ok(()))?;

        let mut envelope = self.guard(self.fetch_internal(request).await)?;

        if envelope.is_token_invalid() {
            debug!("토큰 무효: {} {}, 재로그인 후 1회 재요청", request.method, request.path);
            self.guard(self.reauthenticate().await)?;
            envelope = self.guard(self.fetch_internal(request).await)?;
        }

        self.guard(envelope.into_data())
    }

    /// 토큰 무효 시 재로그인 훅
    async fn reauthenticate(&self) -> Result<(), CoreError> {
        match self.session.relogin_password() {
            Some(password) => self.login(&password, None).await,
            None => {
                self.session.force_logout();
                Err(CoreError::NoSavedPassword)
            }
        }
    }

    /// 파기 후에는 어떤 결과든 `Cancelled`로 바꾼다
    fn guard<T>(&self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        if self.is_destroyed() {
            return Err(CoreError::Cancelled);
        }
        result
    }

    /// 현재 토큰으로 요청 1회 전송
    async fn fetch_internal(&self, request: &ApiRequest) -> Result<ApiEnvelope, CoreError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(AUTH_HEADER, self.session.auth_token())
            .header(NAMESPACE_HEADER, NAMESPACE);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone());
                builder.multipart(reqwest::multipart::Form::new().part(file.field.clone(), part))
            }
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("요청 실패 ({url}): {e}")))?;

        let http_status = resp.status();
        if http_status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(ApiEnvelope::token_invalid());
        }

        let text = resp.text().await.map_err(|e| {
            CoreError::Network(format!("응답 본문 읽기 실패 ({url}): {e}"))
        })?;

        match serde_json::from_str::<ApiEnvelope>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !http_status.is_success() => Err(CoreError::Network(format!(
                "HTTP 에러 ({http_status}): {text}"
            ))),
            Err(e) => Err(CoreError::Network(format!("응답 파싱 실패: {e}"))),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionState;
    use assert_matches::assert_matches;
    use mockito::Matcher;
    use soteria_core::ports::token_store::TokenStore;
    use soteria_core::token_store::MemoryTokenStore;

    fn client_for(server: &mockito::ServerGuard, token: Option<&str>) -> HttpClient {
        let store = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        let session = Arc::new(AuthSession::new(Arc::new(store)));
        let base = format!("{}/api/v2", server.url());
        HttpClient::new(&base, session, Duration::from_secs(5)).unwrap()
    }

    fn ok_body(data: serde_json::Value) -> String {
        serde_json::json!({ "status": 100, "description": "OK", "data": data }).to_string()
    }

    #[test]
    fn rejects_invalid_base_url() {
        let session = Arc::new(AuthSession::new(Arc::new(MemoryTokenStore::new())));
        let err = HttpClient::new("not a url", session, Duration::from_secs(1)).unwrap_err();
        assert_matches!(err, CoreError::Config(_));
    }

    #[test]
    fn envelope_status_mapping() {
        let ok = ApiEnvelope {
            status: Some(status::OK_PARTIALLY),
            description: None,
            data: None,
        };
        assert_eq!(ok.into_data().unwrap(), serde_json::Value::Null);

        let missing = ApiEnvelope {
            status: None,
            description: None,
            data: None,
        };
        assert_matches!(
            missing.into_data(),
            Err(CoreError::Api { status: status::UNKNOWN_ERROR, .. })
        );
    }

    #[tokio::test]
    async fn sends_auth_and_namespace_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/user/system/info")
            .match_header(AUTH_HEADER, "tok_1")
            .match_header(NAMESPACE_HEADER, NAMESPACE)
            .with_status(200)
            .with_body(ok_body(serde_json::json!({ "rootDomain": "example.com" })))
            .create_async()
            .await;

        let client = client_for(&server, Some("tok_1"));
        let data: serde_json::Value = client
            .fetch(ApiRequest::get("/user/system/info"))
            .await
            .unwrap();
        assert_eq!(data["rootDomain"], "example.com");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/user/apps/appDefinitions/unusedImages")
            .match_query(Matcher::UrlEncoded("mostRecentLimit".into(), "3".into()))
            .with_body(ok_body(serde_json::json!({ "unusedImages": [] })))
            .create_async()
            .await;

        let client = client_for(&server, Some("tok"));
        client
            .execute(ApiRequest::get("/user/apps/appDefinitions/unusedImages").query("mostRecentLimit", "3"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_ok_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v2/user/apps/appDefinitions/register")
            .with_body(r#"{"status":1103,"description":"App already exists"}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("tok"));
        let err = client
            .execute(ApiRequest::post(
                "/user/apps/appDefinitions/register",
                serde_json::json!({ "appName": "blog" }),
            ))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::Api { status: 1103, ref message } if message == "App already exists"
        );
    }

    #[tokio::test]
    async fn stale_token_triggers_exactly_one_relogin() {
        let mut server = mockito::Server::new_async().await;

        let stale = server
            .mock("GET", "/api/v2/user/apps/appDefinitions")
            .match_header(AUTH_HEADER, "stale")
            .with_body(r#"{"status":1106,"description":"Auth token corrupted"}"#)
            .expect(1)
            .create_async()
            .await;
        let login = server
            .mock("POST", "/api/v2/login")
            .match_body(Matcher::Json(serde_json::json!({ "password": "pw" })))
            .with_body(ok_body(serde_json::json!({ "token": "fresh" })))
            .expect(1)
            .create_async()
            .await;
        let replay = server
            .mock("GET", "/api/v2/user/apps/appDefinitions")
            .match_header(AUTH_HEADER, "fresh")
            .with_body(ok_body(serde_json::json!({ "appDefinitions": [] })))
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, Some("stale"));
        client.session().remember_credentials("pw", false);

        client
            .execute(ApiRequest::get("/user/apps/appDefinitions"))
            .await
            .unwrap();
        assert_eq!(client.session().auth_token(), "fresh");

        stale.assert_async().await;
        login.assert_async().await;
        replay.assert_async().await;
    }

    #[tokio::test]
    async fn second_rejection_is_returned_without_loop() {
        let mut server = mockito::Server::new_async().await;

        let rejected = server
            .mock("GET", "/api/v2/user/system/nodes")
            .with_body(r#"{"status":1106,"description":"Auth token corrupted"}"#)
            .expect(2)
            .create_async()
            .await;
        let login = server
            .mock("POST", "/api/v2/login")
            .with_body(ok_body(serde_json::json!({ "token": "fresh" })))
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, Some("stale"));
        client.session().remember_credentials("pw", false);

        let err = client
            .execute(ApiRequest::get("/user/system/nodes"))
            .await
            .unwrap_err();
        assert_eq!(err.api_status(), Some(status::AUTH_TOKEN_INVALID));

        rejected.assert_async().await;
        login.assert_async().await;
    }

    #[tokio::test]
    async fn no_saved_password_forces_logout() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/user/system/info")
            .with_status(401)
            .create_async()
            .await;
        let login = server
            .mock("POST", "/api/v2/login")
            .expect(0)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let session = Arc::new(AuthSession::new(store.clone()));
        let rx = session.subscribe();
        let base = format!("{}/api/v2", server.url());
        let client = HttpClient::new(&base, session, Duration::from_secs(5)).unwrap();

        let err = client
            .execute(ApiRequest::get("/user/system/info"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::NoSavedPassword);
        assert!(!client.session().is_logged_in());
        assert!(store.load().is_none());
        assert_eq!(*rx.borrow(), SessionState::ForcedLogout);
        login.assert_async().await;
    }

    #[tokio::test]
    async fn otp_login_is_not_replayed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/user/system/info")
            .with_body(r#"{"status":1106,"description":"expired"}"#)
            .create_async()
            .await;
        let login = server
            .mock("POST", "/api/v2/login")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, Some("stale"));
        client.session().remember_credentials("pw", true);

        let err = client
            .execute(ApiRequest::get("/user/system/info"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::NoSavedPassword);
        login.assert_async().await;
    }

    #[tokio::test]
    async fn wrong_password_clears_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v2/login")
            .with_body(r#"{"status":1105,"description":"Password is incorrect"}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("old"));
        let err = client.login("bad", None).await.unwrap_err();

        assert_eq!(err.api_status(), Some(status::WRONG_PASSWORD));
        assert!(!client.session().is_logged_in());
        assert!(client.session().relogin_password().is_none());
    }

    #[tokio::test]
    async fn other_login_errors_keep_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v2/login")
            .match_body(Matcher::PartialJson(serde_json::json!({ "otpToken": "123456" })))
            .with_body(r#"{"status":1114,"description":"OTP required"}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("old"));
        let err = client.login("pw", Some("123456")).await.unwrap_err();

        assert_eq!(err.api_status(), Some(status::OTP_REQUIRED));
        assert!(client.session().is_logged_in());
    }

    #[tokio::test]
    async fn http_error_without_envelope_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/user/system/versioninfo")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = client_for(&server, Some("tok"));
        let err = client
            .execute(ApiRequest::get("/user/system/versioninfo"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Network(ref msg) if msg.contains("502"));
    }

    #[tokio::test]
    async fn destroyed_client_discards_results() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server, Some("tok"));
        client.destroy();

        let err = client
            .execute(ApiRequest::get("/user/system/info"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Cancelled);
    }

    #[tokio::test]
    async fn network_failure() {
        let session = Arc::new(AuthSession::new(Arc::new(MemoryTokenStore::new())));
        let client =
            HttpClient::new("http://127.0.0.1:1/api/v2", session, Duration::from_secs(2)).unwrap();
        let err = client
            .execute(ApiRequest::get("/user/system/info"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Network(_));
    }
}
