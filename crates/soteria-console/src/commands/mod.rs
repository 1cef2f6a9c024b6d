//! 서브커맨드 실행.
//!
//! 각 핸들러는 `ApiManager` 호출 결과를 출력하고 에러는 그대로 돌려준다.
//! 토스트는 진입점에서 한 번만 발송된다.

mod apps;
mod cluster;
mod nginx;
mod registry;
mod system;

use serde::Serialize;
use soteria_core::config::AppConfig;
use soteria_core::error::CoreError;
use soteria_network::api_manager::ApiManager;
use soteria_network::auth::SessionState;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::Command;
use crate::toaster::Toaster;

/// 명령 실행에 필요한 의존성 묶음
#[derive(Debug, Clone)]
pub struct Context {
    pub api: Arc<ApiManager>,
    pub toaster: Toaster,
    pub config: AppConfig,
}

/// 세션이 끊겼을 때 덧붙이는 안내
pub const SESSION_EXPIRED_HINT: &str = "Session expired, run `soteria login`.";

/// 서브커맨드 하나 실행
pub async fn run(command: Command, ctx: &Context) -> Result<(), CoreError> {
    if requires_login(&command) && !ctx.api.is_logged_in() {
        return Err(CoreError::Auth(
            "로그인이 필요합니다: `soteria login`".to_string(),
        ));
    }

    match command {
        Command::Login { password, otp } => {
            ctx.api.get_auth_token(&password, otp.as_deref()).await?;
            ctx.toaster.toast_success("Logged in.");
            Ok(())
        }
        Command::Logout => {
            ctx.api.set_auth_token("");
            info!("로그아웃");
            ctx.toaster.toast_success("Logged out.");
            Ok(())
        }
        Command::Status => status(ctx).await,
        Command::ChangePassword { old, new } => {
            ctx.api.change_pass(&old, &new).await?;
            ctx.toaster.toast_success("Password changed.");
            Ok(())
        }
        Command::Apps(cmd) => apps::run_apps(cmd, ctx).await,
        Command::Images(cmd) => apps::run_images(cmd, ctx).await,
        Command::System(cmd) => system::run_system(cmd, ctx).await,
        Command::Pro(cmd) => system::run_pro(cmd, ctx).await,
        Command::Nginx(cmd) => nginx::run(cmd, ctx).await,
        Command::Registries(cmd) => registry::run(cmd, ctx).await,
        Command::Nodes(cmd) => cluster::run_nodes(cmd, ctx).await,
        Command::Oneclick(cmd) => cluster::run_one_click(cmd, ctx).await,
        Command::Webhook { path } => {
            ctx.api.force_build(&path).await?;
            ctx.toaster.toast_success("Build triggered.");
            Ok(())
        }
    }
}

fn requires_login(command: &Command) -> bool {
    !matches!(
        command,
        Command::Login { .. } | Command::Logout | Command::Status | Command::Webhook { .. }
    )
}

/// 실패한 명령의 에러를 토스트한다
///
/// 재로그인이 불가능해 세션이 끊겼으면 다시 로그인하라는 안내를 덧붙인다.
pub fn report_failure(err: &CoreError, ctx: &Context) {
    ctx.toaster.toast_error(err);

    let forced = ctx.api.session().state() == SessionState::ForcedLogout;
    if forced || matches!(err, CoreError::NoSavedPassword) {
        warn!("세션 만료로 로그아웃됨");
        ctx.toaster.toast_info(SESSION_EXPIRED_HINT);
    }
}

async fn status(ctx: &Context) -> Result<(), CoreError> {
    println!("Server:    {}", ctx.api.api_base_url());
    if !ctx.api.is_logged_in() {
        println!("Session:   logged out");
        return Ok(());
    }
    println!("Session:   logged in");

    let info = ctx.api.get_soteria_info().await?;
    let version = ctx.api.get_version_info().await?;
    println!("Root:      {}", info.root_domain);
    println!(
        "HTTPS:     {}{}",
        if info.has_root_ssl { "enabled" } else { "disabled" },
        if info.force_ssl { " (forced)" } else { "" }
    );
    println!("Version:   {}", version.current_version);
    if version.can_update {
        println!("Update:    {} available", version.latest_version);
    }
    Ok(())
}

/// 보기 좋게 들여쓴 JSON 출력
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CoreError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
