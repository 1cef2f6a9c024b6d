//! 에러/안내 토스트.
//!
//! 모든 화면과 명령은 실패를 여기로 넘긴다. 에러 하나당 알림은 정확히 한 번.

use soteria_core::error::CoreError;
use soteria_core::ports::notifier::{Notifier, ToastLevel};
use std::sync::Arc;
use tracing::{debug, error};

/// 서버 상태 코드가 없는 에러의 기본 메시지
pub const DEFAULT_ERROR_MESSAGE: &str = "Something bad happened.";

/// 토스트 발송기
#[derive(Clone)]
pub struct Toaster {
    notifier: Arc<dyn Notifier>,
    debug: bool,
}

impl Toaster {
    /// `debug`가 켜져 있으면 토스트와 별도로 전체 에러를 로그에 남긴다
    pub fn new(notifier: Arc<dyn Notifier>, debug: bool) -> Self {
        Self { notifier, debug }
    }

    /// 사용자에게 보여줄 에러 문구
    ///
    /// 서버 상태 코드가 있으면 `"{status} : {message}"`.
    /// 콘솔이 직접 만든 에러는 그 문구를 그대로, 나머지는 기본 문구.
    pub fn error_message(err: &CoreError) -> String {
        if let Some(status) = err.api_status() {
            let description = err
                .api_message()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_ERROR_MESSAGE);
            return format!("{status} : {description}");
        }

        match err {
            CoreError::Validation { .. }
            | CoreError::Io(_)
            | CoreError::Serialization(_)
            | CoreError::Config(_)
            | CoreError::Auth(_) => err.to_string(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn toast_error(&self, err: &CoreError) {
        // 파기된 클라이언트의 응답은 보여줄 대상이 없다
        if matches!(err, CoreError::Cancelled) {
            debug!("취소된 요청 에러 무시");
            return;
        }

        self.notifier
            .notify(ToastLevel::Error, &Self::error_message(err));
        if self.debug {
            error!("{err:?}");
        }
    }

    pub fn toast_info(&self, message: &str) {
        self.notifier.notify(ToastLevel::Info, message);
    }

    pub fn toast_success(&self, message: &str) {
        self.notifier.notify(ToastLevel::Success, message);
    }

    /// 에러를 토스트한 뒤 `on_error`를 실행하는 핸들러
    ///
    /// ```rust,ignore
    /// api.delete_app("blog", &[]).await.unwrap_or_else(toaster.catcher(Some(|| reload())));
    /// ```
    pub fn catcher<'a, F>(&'a self, on_error: Option<F>) -> impl FnOnce(CoreError) + 'a
    where
        F: FnOnce() + 'a,
    {
        move |err| {
            self.toast_error(&err);
            if let Some(f) = on_error {
                f();
            }
        }
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(ToastLevel, String)>>);

    impl Notifier for Recorder {
        fn notify(&self, level: ToastLevel, message: &str) {
            self.0.lock().push((level, message.to_string()));
        }
    }

    fn toaster() -> (Toaster, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (Toaster::new(recorder.clone(), true), recorder)
    }

    #[test]
    fn api_error_message_includes_status() {
        let err = CoreError::api(1103, "App already exists");
        assert_eq!(Toaster::error_message(&err), "1103 : App already exists");
    }

    #[test]
    fn api_error_without_description_uses_default() {
        let err = CoreError::api(1000, "");
        assert_eq!(
            Toaster::error_message(&err),
            "1000 : Something bad happened."
        );
    }

    #[test]
    fn non_api_error_uses_default() {
        assert_eq!(
            Toaster::error_message(&CoreError::Network("timeout".into())),
            DEFAULT_ERROR_MESSAGE
        );
        assert_eq!(
            Toaster::error_message(&CoreError::NoSavedPassword),
            DEFAULT_ERROR_MESSAGE
        );
    }

    #[test]
    fn local_errors_show_their_own_text() {
        let err = CoreError::Validation {
            field: "app".into(),
            message: "앱을 찾을 수 없습니다: ghost".into(),
        };
        assert_eq!(
            Toaster::error_message(&err),
            "유효성 검증 실패: app: 앱을 찾을 수 없습니다: ghost"
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "base.conf");
        assert_eq!(
            Toaster::error_message(&CoreError::Io(io)),
            "I/O 에러: base.conf"
        );
        assert_eq!(
            Toaster::error_message(&CoreError::Config("잘못된 URL".into())),
            "설정 에러: 잘못된 URL"
        );
        assert_eq!(
            Toaster::error_message(&CoreError::Auth("로그인 필요".into())),
            "인증 에러: 로그인 필요"
        );
    }

    #[test]
    fn toast_error_notifies_once() {
        let (toaster, recorder) = toaster();
        toaster.toast_error(&CoreError::api(1111, "Not found"));

        let toasts = recorder.0.lock();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0], (ToastLevel::Error, "1111 : Not found".to_string()));
    }

    #[test]
    fn cancelled_is_not_toasted() {
        let (toaster, recorder) = toaster();
        toaster.toast_error(&CoreError::Cancelled);
        assert!(recorder.0.lock().is_empty());
    }

    #[test]
    fn catcher_toasts_then_runs_callback() {
        let (toaster, recorder) = toaster();
        let ran = Cell::new(false);

        let catcher = toaster.catcher(Some(|| ran.set(true)));
        catcher(CoreError::Auth("expired".into()));

        assert!(ran.get());
        assert_eq!(recorder.0.lock().len(), 1);
    }

    #[test]
    fn catcher_without_callback() {
        let (toaster, recorder) = toaster();
        toaster.catcher(None::<fn()>)(CoreError::api(1105, "Password is incorrect"));
        assert_eq!(
            recorder.0.lock()[0].1,
            "1105 : Password is incorrect"
        );
    }

    #[test]
    fn info_and_success_levels() {
        let (toaster, recorder) = toaster();
        toaster.toast_info("Building...");
        toaster.toast_success("Deployed");

        let toasts = recorder.0.lock();
        assert_eq!(toasts[0].0, ToastLevel::Info);
        assert_eq!(toasts[1].0, ToastLevel::Success);
    }
}
