//! 시스템 모델.
//!
//! 루트 도메인/SSL 상태, 버전 정보, 로드밸런서 통계, 백업, 클러스터 노드.

use serde::{Deserialize, Serialize};

/// 시스템 기본 정보 (루트 도메인, SSL)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoteriaInfo {
    pub root_domain: String,
    pub has_root_ssl: bool,
    pub force_ssl: bool,
    pub soteria_sub_domain: String,
}

/// 버전 정보
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionInfo {
    pub current_version: String,
    pub latest_version: String,
    pub can_update: bool,
    pub change_log_message: String,
}

/// nginx 로드밸런서 연결 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerInfo {
    pub active_connections: u64,
    pub accepted: u64,
    pub handled: u64,
    pub total: u64,
    pub reading: u64,
    pub writing: u64,
    pub waiting: u64,
}

/// 백업 생성 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupToken {
    /// 백업 파일 다운로드 토큰
    pub download_token: String,
}

/// 클러스터 노드 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Manager,
    Worker,
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "worker" => Ok(Self::Worker),
            other => Err(format!("알 수 없는 노드 타입: {other}")),
        }
    }
}

/// 도커 스웜 노드
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerNode {
    pub node_id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub operating_system: String,
    #[serde(default)]
    pub nano_cpu: u64,
    #[serde(default)]
    pub memory_bytes: u64,
    #[serde(default)]
    pub docker_engine_version: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub status: String,
}

/// 노드 목록 응답
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodesResponse {
    pub nodes: Vec<DockerNode>,
}

/// 새 노드 추가 요청
///
/// 서버가 SSH로 원격 머신에 접속해 스웜에 합류시킨다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDockerNodeRequest {
    pub node_type: NodeType,
    pub private_key: String,
    pub remote_node_ip_address: String,
    pub ssh_port: String,
    pub ssh_user: String,
    pub soteria_ip_address: String,
}
