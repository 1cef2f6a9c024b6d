//! nginx 설정 명령. 화면 상태는 [`NginxConfigScreen`]이 관리한다.

use soteria_core::error::CoreError;
use soteria_core::ports::settings_api::SettingsApi;
use std::sync::Arc;

use super::Context;
use crate::cli::NginxCommand;
use crate::settings::nginx_config::NginxConfigScreen;
use crate::settings::restart_notice::RestartNotice;

pub(super) async fn run(cmd: NginxCommand, ctx: &Context) -> Result<(), CoreError> {
    let api: Arc<dyn SettingsApi> = ctx.api.clone();
    let notice = RestartNotice::new(ctx.config.restart_countdown());
    let mut screen = NginxConfigScreen::new(api, ctx.toaster.clone(), notice);

    screen.load().await;
    if screen.state().nginx_config.is_none() {
        // 로드 실패는 이미 토스트됨
        println!("{}", screen.render());
        return Err(CoreError::Cancelled);
    }

    match cmd {
        NginxCommand::Show => {
            println!("{}", screen.render());
            return Ok(());
        }
        NginxCommand::Defaults { dry_run } => {
            screen.load_defaults();
            if dry_run {
                println!("{}", screen.render());
                return Ok(());
            }
        }
        NginxCommand::Save { base, soteria, no_wait } => {
            if let Some(path) = base {
                screen.set_base_custom_value(&tokio::fs::read_to_string(path).await?);
            }
            if let Some(path) = soteria {
                screen.set_soteria_custom_value(&tokio::fs::read_to_string(path).await?);
            }
            if no_wait {
                return save(&mut screen, false).await;
            }
        }
    }

    save(&mut screen, true).await
}

async fn save(screen: &mut NginxConfigScreen, wait: bool) -> Result<(), CoreError> {
    screen.save().await;
    if !screen.state().is_refresh_timer_activated {
        // 저장 실패는 이미 토스트됨
        return Err(CoreError::Cancelled);
    }

    println!("{}", screen.notice().message());
    if !wait {
        return Ok(());
    }

    let notice = screen.notice().clone();
    let mut refresh = false;
    notice
        .run(
            |remaining| eprint!("\r⏳ {remaining:>3}s "),
            || refresh = true,
        )
        .await;
    eprintln!();

    if refresh {
        screen.load().await;
        println!("{}", screen.render());
    }
    Ok(())
}
