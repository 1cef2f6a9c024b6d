//! Cross-crate 에러 경로 테스트.
//!
//! 파사드에서 발생한 에러가 토스터까지 한 번만 전달되는지 검증한다.

mod common;

use serde_json::json;
use soteria_core::error::{status, CoreError};
use soteria_core::ports::notifier::ToastLevel;
use soteria_network::auth::SessionState;

use common::{api_for, ok_body, recording_toaster};

#[tokio::test]
async fn relogin_then_replay_is_transparent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2/user/system/info")
        .match_header("x-soteria-auth", "stale")
        .with_body(r#"{"status":1106,"description":"Auth token corrupted"}"#)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/api/v2/login")
        .with_body(ok_body(json!({ "token": "fresh" })))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v2/user/system/info")
        .match_header("x-soteria-auth", "fresh")
        .with_body(ok_body(json!({ "rootDomain": "apps.example.com", "hasRootSsl": true })))
        .create_async()
        .await;

    let api = api_for(&server, "stale");
    api.session().remember_credentials("captain42", false);

    let info = api.get_soteria_info().await.unwrap();
    assert_eq!(info.root_domain, "apps.example.com");
    assert!(info.has_root_ssl);
    login.assert_async().await;
}

#[tokio::test]
async fn back_off_clears_session_and_toasts_once() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/login")
        .with_body(r#"{"status":1113,"description":"Too many wrong passwords"}"#)
        .create_async()
        .await;

    let api = api_for(&server, "old");
    let rx = api.session().subscribe();
    let (toaster, notifier) = recording_toaster();

    api.get_auth_token("guess", None)
        .await
        .unwrap_or_else(toaster.catcher(None::<fn()>));

    assert!(!api.is_logged_in());
    assert!(api.session().relogin_password().is_none());
    assert_eq!(*rx.borrow(), SessionState::LoggedOut);
    assert_eq!(
        notifier.toasts(),
        vec![(
            ToastLevel::Error,
            format!("{} : Too many wrong passwords", status::PASSWORD_BACK_OFF)
        )]
    );
}

#[tokio::test]
async fn destroyed_api_is_silent() {
    let server = mockito::Server::new_async().await;
    let api = api_for(&server, "tok");
    let (toaster, notifier) = recording_toaster();

    api.destroy();
    let err = api.get_all_apps().await.unwrap_err();
    assert!(matches!(err, CoreError::Cancelled));

    toaster.toast_error(&err);
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn catcher_runs_recovery_after_toast() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/user/apps/appDefinitions/delete")
        .with_body(r#"{"status":1111,"description":"App not found"}"#)
        .create_async()
        .await;

    let api = api_for(&server, "tok");
    let (toaster, notifier) = recording_toaster();
    let mut reloaded = false;

    api.delete_app("ghost", &[])
        .await
        .unwrap_or_else(toaster.catcher(Some(|| reloaded = true)));

    assert!(reloaded);
    assert_eq!(notifier.errors(), vec!["1111 : App not found".to_string()]);
}
