//! nginx 재구성 후 재시작 카운트다운.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// 서비스 재시작 안내 + 카운트다운
///
/// 저장이 성공하면 서버가 재시작되므로, 정해진 시간 동안 매 틱마다
/// 남은 시간을 알리고 끝나면 완료 콜백(화면 새로고침)을 부른다.
#[derive(Debug, Clone)]
pub struct RestartNotice {
    seconds: u64,
    tick: Duration,
}

impl RestartNotice {
    pub fn new(countdown: Duration) -> Self {
        Self {
            seconds: countdown.as_secs(),
            tick: Duration::from_secs(1),
        }
    }

    /// 틱 간격 변경 (테스트용으로 짧게)
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn message(&self) -> String {
        format!(
            "Nginx is successfully updated, Soteria will restart in {} seconds. \
             Please wait until the page is automatically refreshed.",
            self.seconds
        )
    }

    /// 카운트다운 실행
    ///
    /// `on_tick`은 남은 초를 `seconds`부터 1까지 받는다.
    pub async fn run<T, C>(&self, mut on_tick: T, on_complete: C)
    where
        T: FnMut(u64),
        C: FnOnce(),
    {
        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for remaining in (1..=self.seconds).rev() {
            ticker.tick().await;
            on_tick(remaining);
        }
        ticker.tick().await;

        debug!("재시작 카운트다운 종료");
        on_complete();
    }
}

impl Default for RestartNotice {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_mentions_thirty_seconds() {
        let notice = RestartNotice::default();
        assert!(notice
            .message()
            .starts_with("Nginx is successfully updated, Soteria will restart in 30 seconds."));
    }

    #[tokio::test]
    async fn countdown_ticks_then_completes() {
        let notice = RestartNotice::new(Duration::from_secs(3)).with_tick(Duration::from_millis(5));
        let mut ticks = Vec::new();
        let mut completed = false;

        notice
            .run(|remaining| ticks.push(remaining), || completed = true)
            .await;

        assert_eq!(ticks, vec![3, 2, 1]);
        assert!(completed);
    }

    #[tokio::test]
    async fn zero_countdown_completes_immediately() {
        let notice = RestartNotice::new(Duration::ZERO).with_tick(Duration::from_millis(5));
        let mut completed = false;
        notice.run(|_| panic!("틱 없음"), || completed = true).await;
        assert!(completed);
    }
}
