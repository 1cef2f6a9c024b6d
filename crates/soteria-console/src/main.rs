//! # soteria
//!
//! Soteria 관리 콘솔 바이너리 진입점.
//! 설정 로드, DI 와이어링, 서브커맨드 실행.

use anyhow::Result;
use clap::Parser;
use soteria_console::cli::Args;
use soteria_console::commands::{self, Context};
use soteria_console::console_notifier::ConsoleNotifier;
use soteria_console::toaster::Toaster;
use soteria_core::config::AppConfig;
use soteria_core::config_manager::ConfigManager;
use soteria_core::error::CoreError;
use soteria_core::ports::token_store::TokenStore;
use soteria_core::token_store::{FileTokenStore, MemoryTokenStore};
use soteria_network::api_manager::ApiManager;
use soteria_network::auth::AuthSession;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 설정 로드: 파일 → 환경 변수 → CLI 인자 순으로 덮어쓴다
fn load_config(args: &Args) -> Result<AppConfig, CoreError> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }?;
    debug!("설정 파일: {}", manager.config_path().display());

    let mut config = manager.get();
    config.apply_env_overrides();

    if let Some(ref url) = args.url {
        config.server.base_url = url.clone();
    }
    if args.debug {
        config.console.debug = true;
    }
    if args.no_persist {
        config.console.persist_token = false;
    }
    Ok(config)
}

fn token_store(config: &AppConfig) -> Result<Arc<dyn TokenStore>, CoreError> {
    if config.console.persist_token {
        let store = FileTokenStore::in_config_dir()?;
        debug!("토큰 파일: {}", store.path().display());
        Ok(Arc::new(store))
    } else {
        Ok(Arc::new(MemoryTokenStore::new()))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // tracing 초기화 (RUST_LOG가 있으면 우선)
    let log_filter = format!(
        "soteria={},soteria_console={},soteria_core={},soteria_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 설정 로드 전 실패도 토스트로 알린다
    let notifier = Arc::new(ConsoleNotifier::new());
    let setup_toaster = Toaster::new(notifier.clone(), args.debug);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            setup_toaster.toast_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("서버: {}", config.server.base_url);

    // ── 어댑터 생성 (DI 와이어링) ──
    let api = match token_store(&config)
        .and_then(|store| ApiManager::new(&config, Arc::new(AuthSession::new(store))))
    {
        Ok(api) => Arc::new(api),
        Err(e) => {
            setup_toaster.toast_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let toaster = Toaster::new(notifier, config.console.debug);

    let ctx = Context {
        api: api.clone(),
        toaster,
        config,
    };

    let result = tokio::select! {
        result = commands::run(args.command, &ctx) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("중단 요청 수신");
            api.destroy();
            return Ok(ExitCode::from(130));
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            commands::report_failure(&e, &ctx);
            Ok(ExitCode::FAILURE)
        }
    }
}
