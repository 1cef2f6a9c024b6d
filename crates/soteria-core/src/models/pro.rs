//! Pro 기능 모델 (API 키, 알림 설정, 2단계 인증).

use serde::{Deserialize, Serialize};

/// Pro 기능 상태
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProFeatures {
    pub is_subscribed: bool,
    pub is_feature_flag_enabled: bool,
}

/// `getProFeaturesState` 응답 래퍼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProFeaturesState {
    pub pro_features_state: ProFeatures,
}

/// 알림 발송 조건
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTrigger {
    /// 알림 없음
    #[default]
    None,
    /// 로그인 시
    Login,
    /// 배포 실패 시
    Build,
}

/// Pro 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProConfig {
    pub alerts: Vec<AlertTrigger>,
}

/// `getProConfigs` 응답 래퍼
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProConfigs {
    pub pro_configs: ProConfig,
}

/// 2단계 인증 변경 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorAuthRequest {
    pub enabled: bool,
    /// 활성화 확인용 OTP 토큰
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// 2단계 인증 상태
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwoFactorAuthResponse {
    pub is_enabled: bool,
    /// 인증 앱 등록용 `otpauth://` URI
    pub otp_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_request_omits_empty_token() {
        let req = TwoFactorAuthRequest {
            enabled: false,
            token: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"enabled": false})
        );
    }

    #[test]
    fn pro_configs_parse() {
        let cfg: ProConfigs =
            serde_json::from_str(r#"{"proConfigs":{"alerts":["login","build"]}}"#).unwrap();
        assert_eq!(cfg.pro_configs.alerts, vec![AlertTrigger::Login, AlertTrigger::Build]);
    }
}
