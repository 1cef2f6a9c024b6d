//! 원클릭 앱 템플릿 모델.

use serde::{Deserialize, Serialize};

/// 원클릭 앱 요약
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneClickAppInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub logo_url: String,
    /// 템플릿을 제공한 저장소 URL
    pub base_url: String,
    pub is_official: bool,
}

/// 원클릭 앱 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneClickAppList {
    pub one_click_apps: Vec<OneClickAppInfo>,
}

/// 원클릭 앱 템플릿 응답
///
/// 템플릿 본문은 서버가 정의하는 자유 형식이라 JSON 값 그대로 둔다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneClickAppTemplate {
    pub app_template: serde_json::Value,
}

/// 커스텀 저장소 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OneClickRepositories {
    pub urls: Vec<String>,
}
