//! 명령줄 인자 정의 (clap derive).

use clap::{Args as ClapArgs, Parser, Subcommand};
use soteria_core::models::system::NodeType;
use std::path::PathBuf;

/// Soteria 관리 콘솔
///
/// Soteria PaaS 서버의 앱, 도메인, nginx, 레지스트리, 노드를 관리한다.
#[derive(Parser, Debug)]
#[command(name = "soteria")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 대시보드 URL (예: https://soteria.example.com)
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    pub log_level: String,

    /// 에러 토스트와 함께 전체 에러 출력
    #[arg(long, global = true)]
    pub debug: bool,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 인증 토큰을 디스크에 저장하지 않음
    #[arg(long, global = true)]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 비밀번호로 로그인
    Login {
        /// 비밀번호 (생략 시 SOTERIA_PASSWORD)
        #[arg(long, env = "SOTERIA_PASSWORD", hide_env_values = true)]
        password: String,
        /// 2단계 인증 OTP
        #[arg(long)]
        otp: Option<String>,
    },
    /// 저장된 토큰 삭제
    Logout,
    /// 로그인 상태와 서버 정보
    Status,
    /// 비밀번호 변경
    ChangePassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
    /// 앱 관리
    #[command(subcommand)]
    Apps(AppsCommand),
    /// 시스템 설정
    #[command(subcommand)]
    System(SystemCommand),
    /// nginx 설정
    #[command(subcommand)]
    Nginx(NginxCommand),
    /// 도커 레지스트리
    #[command(subcommand)]
    Registries(RegistryCommand),
    /// 미사용 이미지
    #[command(subcommand)]
    Images(ImagesCommand),
    /// 클러스터 노드
    #[command(subcommand)]
    Nodes(NodesCommand),
    /// 원클릭 앱
    #[command(subcommand)]
    Oneclick(OneClickCommand),
    /// Pro 기능
    #[command(subcommand)]
    Pro(ProCommand),
    /// 웹훅 경로로 빌드 강제 실행
    Webhook {
        /// 서버가 발급한 웹훅 경로 (쿼리 포함)
        path: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppsCommand {
    /// 앱 목록
    List,
    /// 앱 정의 출력
    Show { name: String },
    /// 새 앱 등록
    Register {
        name: String,
        /// 영구 데이터 보유 앱
        #[arg(long)]
        persistent: bool,
        /// 등록 완료를 기다리지 않음
        #[arg(long)]
        detached: bool,
    },
    /// 앱 이름 변경
    Rename { old: String, new: String },
    /// 앱 삭제
    Delete {
        name: String,
        /// 함께 삭제할 볼륨
        #[arg(long = "volume")]
        volumes: Vec<String>,
    },
    /// 인스턴스 수 변경
    Scale { name: String, count: u32 },
    /// 런타임 로그 (hex 디코딩)
    Logs { name: String },
    /// 빌드 로그
    BuildLogs { name: String },
    /// 이미지 또는 배포 정의로 배포
    Deploy(DeployArgs),
    /// 소스 tarball 업로드
    Upload { name: String, file: PathBuf },
    /// 기본 서브도메인 HTTPS 활성화
    EnableSsl { name: String },
    /// 커스텀 도메인 연결
    AddDomain { name: String, domain: String },
    /// 커스텀 도메인 HTTPS 활성화
    EnableDomainSsl { name: String, domain: String },
    /// 커스텀 도메인 제거
    RemoveDomain { name: String, domain: String },
}

#[derive(ClapArgs, Debug)]
pub struct DeployArgs {
    pub name: String,
    /// 배포할 이미지 (예: nginx:1.25)
    #[arg(long, conflicts_with = "definition")]
    pub image: Option<String>,
    /// 배포 정의 JSON 파일
    #[arg(long)]
    pub definition: Option<PathBuf>,
    #[arg(long, default_value = "")]
    pub git_hash: String,
    #[arg(long)]
    pub detached: bool,
}

#[derive(Subcommand, Debug)]
pub enum SystemCommand {
    /// 루트 도메인 정보
    Info,
    /// 버전 정보
    Version,
    /// 새 버전으로 업데이트
    Update { latest_version: String },
    /// 루트 도메인 변경
    RootDomain {
        domain: String,
        #[arg(long)]
        force: bool,
    },
    /// 루트 도메인 HTTPS 활성화
    EnableRootSsl { email: String },
    /// HTTP → HTTPS 강제
    ForceSsl {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// nginx 로드밸런서 통계
    LoadBalancer,
    /// NetData 모니터링 설정
    #[command(subcommand)]
    Netdata(NetdataCommand),
    /// 백업 생성
    Backup,
}

#[derive(Subcommand, Debug)]
pub enum NetdataCommand {
    /// 현재 설정 출력
    Show,
    /// JSON 파일 내용으로 설정 교체
    Set { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum NginxCommand {
    /// 현재 설정 출력
    Show,
    /// 기본 템플릿을 사용자 정의 값으로 복사 후 저장
    Defaults {
        /// 저장하지 않고 출력만
        #[arg(long)]
        dry_run: bool,
    },
    /// 파일 내용을 사용자 정의 값으로 저장
    Save {
        /// 기본 설정 (/etc/nginx/nginx.conf)
        #[arg(long)]
        base: Option<PathBuf>,
        /// Soteria 루트 설정 (/etc/nginx/conf.d/soteria-root.conf)
        #[arg(long)]
        soteria: Option<PathBuf>,
        /// 재시작 대기 없이 종료
        #[arg(long)]
        no_wait: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    List,
    Add(RegistryArgs),
    Update {
        id: String,
        #[command(flatten)]
        registry: RegistryArgs,
    },
    Delete { id: String },
    /// 기본 푸시 레지스트리 지정
    SetPush { id: String },
    /// 자체 호스팅 레지스트리 활성화
    EnableSelfHosted,
    DisableSelfHosted,
}

#[derive(ClapArgs, Debug)]
pub struct RegistryArgs {
    #[arg(long)]
    pub domain: String,
    #[arg(long)]
    pub user: String,
    #[arg(long, env = "SOTERIA_REGISTRY_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, default_value = "")]
    pub prefix: String,
}

#[derive(Subcommand, Debug)]
pub enum ImagesCommand {
    /// 미사용 이미지 목록
    Unused {
        /// 앱별로 남겨 둘 최근 이미지 수
        #[arg(long, default_value_t = 2)]
        keep: u32,
    },
    Delete { ids: Vec<String> },
}

#[derive(Subcommand, Debug)]
pub enum NodesCommand {
    List,
    /// 스웜 노드 추가
    Add(AddNodeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AddNodeArgs {
    #[arg(long = "type", value_parser = parse_node_type)]
    pub node_type: NodeType,
    /// 추가할 노드 IP
    #[arg(long)]
    pub ip: String,
    /// Soteria 리더 노드 IP
    #[arg(long)]
    pub soteria_ip: String,
    /// SSH 개인키 파일
    #[arg(long)]
    pub private_key: PathBuf,
    #[arg(long, default_value = "22")]
    pub ssh_port: String,
    #[arg(long, default_value = "root")]
    pub ssh_user: String,
}

fn parse_node_type(s: &str) -> Result<NodeType, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum OneClickCommand {
    List,
    /// 템플릿 출력
    Show {
        name: String,
        /// 템플릿 저장소 URL
        #[arg(long)]
        base_domain: String,
    },
    Repos,
    AddRepo { url: String },
    RemoveRepo { url: String },
}

#[derive(Subcommand, Debug)]
pub enum ProCommand {
    State,
    SetApiKey { key: String },
    Configs,
    /// 알림 설정을 JSON 파일 내용으로 교체
    SetConfigs { file: PathBuf },
    /// 2단계 인증 상태
    Otp,
    /// 2단계 인증 활성화 (토큰 없이 호출하면 등록 URI 발급)
    EnableOtp {
        #[arg(long)]
        token: Option<String>,
    },
    DisableOtp,
}
