//! 시스템 및 Pro 명령.

use soteria_core::error::CoreError;
use serde::de::DeserializeOwned;
use soteria_core::models::pro::{ProConfig, TwoFactorAuthRequest};
use std::path::Path;

use super::{print_json, Context};
use crate::cli::{NetdataCommand, ProCommand, SystemCommand};

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let content = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&content)?)
}

pub(super) async fn run_system(cmd: SystemCommand, ctx: &Context) -> Result<(), CoreError> {
    let api = &ctx.api;
    match cmd {
        SystemCommand::Info => print_json(&api.get_soteria_info().await?)?,
        SystemCommand::Version => print_json(&api.get_version_info().await?)?,
        SystemCommand::Update { latest_version } => {
            api.perform_update(&latest_version).await?;
            ctx.toaster
                .toast_info("Update process has started. Soteria will restart shortly.");
        }
        SystemCommand::RootDomain { domain, force } => {
            api.update_root_domain(&domain, force).await?;
            ctx.toaster
                .toast_success(&format!("Root domain is set to {domain}."));
        }
        SystemCommand::EnableRootSsl { email } => {
            api.enable_root_ssl(&email).await?;
            ctx.toaster.toast_success("Root domain HTTPS is enabled.");
        }
        SystemCommand::ForceSsl { enabled } => {
            api.force_ssl(enabled).await?;
            ctx.toaster.toast_success(if enabled {
                "HTTPS is now enforced."
            } else {
                "HTTPS is no longer enforced."
            });
        }
        SystemCommand::LoadBalancer => print_json(&api.get_load_balancer_info().await?)?,
        SystemCommand::Netdata(NetdataCommand::Show) => {
            print_json(&api.get_net_data_info().await?)?
        }
        SystemCommand::Netdata(NetdataCommand::Set { file }) => {
            let info: serde_json::Value = read_json(&file).await?;
            api.update_net_data_info(&info).await?;
            ctx.toaster.toast_success("NetData settings are updated.");
        }
        SystemCommand::Backup => {
            let token = api.create_backup().await?;
            println!(
                "{}/downloads/?namespace=soteria&downloadToken={}",
                api.api_base_url(),
                token.download_token
            );
        }
    }
    Ok(())
}

pub(super) async fn run_pro(cmd: ProCommand, ctx: &Context) -> Result<(), CoreError> {
    let api = &ctx.api;
    match cmd {
        ProCommand::State => print_json(&api.get_pro_features_state().await?)?,
        ProCommand::SetApiKey { key } => {
            api.set_pro_api_key(&key).await?;
            ctx.toaster.toast_success("Pro API key is saved.");
        }
        ProCommand::Configs => print_json(&api.get_pro_configs().await?)?,
        ProCommand::SetConfigs { file } => {
            let configs: ProConfig = read_json(&file).await?;
            api.set_pro_configs(&configs).await?;
            ctx.toaster.toast_success("Pro configs are saved.");
        }
        ProCommand::Otp => print_json(&api.get_otp_status().await?)?,
        ProCommand::EnableOtp { token } => {
            let response = api
                .set_otp_status(&TwoFactorAuthRequest {
                    enabled: true,
                    token,
                })
                .await?;
            match response.otp_path {
                Some(path) if !response.is_enabled => {
                    println!("{path}");
                    ctx.toaster.toast_info(
                        "Register the URI in your authenticator, then confirm with --token.",
                    );
                }
                _ => ctx.toaster.toast_success("Two-factor authentication is enabled."),
            }
        }
        ProCommand::DisableOtp => {
            api.set_otp_status(&TwoFactorAuthRequest {
                enabled: false,
                token: None,
            })
            .await?;
            ctx.toaster
                .toast_success("Two-factor authentication is disabled.");
        }
    }
    Ok(())
}
