//! 앱과 이미지 명령.

use soteria_core::error::CoreError;
use soteria_core::models::app::{AppDefinition, SoteriaDefinition};
use std::path::Path;

use super::{print_json, Context};
use crate::cli::{AppsCommand, DeployArgs, ImagesCommand};

pub(super) async fn run_apps(cmd: AppsCommand, ctx: &Context) -> Result<(), CoreError> {
    let api = &ctx.api;
    match cmd {
        AppsCommand::List => {
            let apps = api.get_all_apps().await?;
            for app in &apps.app_definitions {
                println!(
                    "{:<24} instances={} version={}{}",
                    app.app_name.as_deref().unwrap_or("-"),
                    app.instance_count,
                    app.deployed_version,
                    if app.is_app_building { " (building)" } else { "" }
                );
            }
        }
        AppsCommand::Show { name } => {
            let apps = api.get_all_apps().await?;
            print_json(find_app(apps.find(&name), &name)?)?;
        }
        AppsCommand::Register {
            name,
            persistent,
            detached,
        } => {
            api.register_new_app(&name, persistent, detached).await?;
            ctx.toaster.toast_success(&format!("{name} is registered."));
        }
        AppsCommand::Rename { old, new } => {
            api.rename_app(&old, &new).await?;
            ctx.toaster.toast_success(&format!("{old} is renamed to {new}."));
        }
        AppsCommand::Delete { name, volumes } => {
            api.delete_app(&name, &volumes).await?;
            ctx.toaster.toast_success(&format!("{name} is deleted."));
        }
        AppsCommand::Scale { name, count } => {
            let apps = api.get_all_apps().await?;
            let mut definition = find_app(apps.find(&name), &name)?.clone();
            definition.instance_count = count;
            api.update_config_and_save(&name, &definition).await?;
            ctx.toaster
                .toast_success(&format!("{name} is scaled to {count} instance(s)."));
        }
        AppsCommand::Logs { name } => {
            let logs = api.fetch_app_logs_in_hex(&name).await?;
            print!("{}", logs.decode()?);
        }
        AppsCommand::BuildLogs { name } => {
            let build = api.fetch_build_logs(&name).await?;
            for line in &build.logs.lines {
                println!("{line}");
            }
            if build.is_app_building {
                ctx.toaster.toast_info("Build in progress...");
            } else if build.is_build_failed {
                ctx.toaster.toast_info("Last build failed.");
            }
        }
        AppsCommand::Deploy(args) => deploy(args, ctx).await?,
        AppsCommand::Upload { name, file } => {
            let bytes = tokio::fs::read(&file).await?;
            api.upload_app_data(&name, &file_name(&file), bytes).await?;
            ctx.toaster
                .toast_info(&format!("Source uploaded, {name} is building."));
        }
        AppsCommand::EnableSsl { name } => {
            api.enable_ssl_for_base_domain(&name).await?;
            ctx.toaster.toast_success("HTTPS is enabled.");
        }
        AppsCommand::AddDomain { name, domain } => {
            api.attach_new_custom_domain_to_app(&name, &domain).await?;
            ctx.toaster
                .toast_success(&format!("{domain} is attached to {name}."));
        }
        AppsCommand::EnableDomainSsl { name, domain } => {
            api.enable_ssl_for_custom_domain(&name, &domain).await?;
            ctx.toaster
                .toast_success(&format!("HTTPS is enabled for {domain}."));
        }
        AppsCommand::RemoveDomain { name, domain } => {
            api.remove_custom_domain(&name, &domain).await?;
            ctx.toaster
                .toast_success(&format!("{domain} is removed from {name}."));
        }
    }
    Ok(())
}

async fn deploy(args: DeployArgs, ctx: &Context) -> Result<(), CoreError> {
    let definition = match (&args.image, &args.definition) {
        (Some(image), _) => SoteriaDefinition::from_image(image),
        (None, Some(path)) => {
            let content = tokio::fs::read(path).await?;
            serde_json::from_slice(&content)?
        }
        (None, None) => {
            return Err(CoreError::Validation {
                field: "image".to_string(),
                message: "--image 또는 --definition 중 하나가 필요합니다".to_string(),
            })
        }
    };

    ctx.api
        .upload_soteria_definition_content(&args.name, &definition, &args.git_hash, args.detached)
        .await?;
    ctx.toaster
        .toast_info(&format!("Deploy started for {}.", args.name));
    Ok(())
}

pub(super) async fn run_images(cmd: ImagesCommand, ctx: &Context) -> Result<(), CoreError> {
    match cmd {
        ImagesCommand::Unused { keep } => {
            let unused = ctx.api.get_unused_images(keep).await?;
            for image in &unused.unused_images {
                println!("{}  {}", image.id, image.tags.join(", "));
            }
        }
        ImagesCommand::Delete { ids } => {
            ctx.api.delete_images(&ids).await?;
            ctx.toaster
                .toast_success(&format!("{} image(s) deleted.", ids.len()));
        }
    }
    Ok(())
}

fn find_app<'a>(
    found: Option<&'a AppDefinition>,
    name: &str,
) -> Result<&'a AppDefinition, CoreError> {
    found.ok_or_else(|| CoreError::Validation {
        field: "name".to_string(),
        message: format!("앱을 찾을 수 없습니다: {name}"),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source.tar".to_string())
}
