//! 도커 레지스트리 명령.

use soteria_core::error::CoreError;
use soteria_core::models::registry::{RegistryInfo, RegistryType};

use super::Context;
use crate::cli::{RegistryArgs, RegistryCommand};

pub(super) async fn run(cmd: RegistryCommand, ctx: &Context) -> Result<(), CoreError> {
    let api = &ctx.api;
    match cmd {
        RegistryCommand::List => {
            let registries = api.get_docker_registries().await?;
            let default_id = registries.default_push_registry_id.as_deref();
            for registry in &registries.registries {
                let kind = match registry.registry_type {
                    RegistryType::Local => "self-hosted",
                    RegistryType::Remote => "remote",
                };
                println!(
                    "{} {:<36} {:<28} {} ({kind})",
                    if Some(registry.id.as_str()) == default_id { "*" } else { " " },
                    registry.id,
                    registry.registry_domain,
                    registry.registry_user,
                );
            }
        }
        RegistryCommand::Add(args) => {
            api.add_docker_registry(&to_registry(String::new(), args))
                .await?;
            ctx.toaster.toast_success("Registry is added.");
        }
        RegistryCommand::Update { id, registry } => {
            api.update_docker_registry(&to_registry(id, registry))
                .await?;
            ctx.toaster.toast_success("Registry is updated.");
        }
        RegistryCommand::Delete { id } => {
            api.delete_docker_registry(&id).await?;
            ctx.toaster.toast_success("Registry is deleted.");
        }
        RegistryCommand::SetPush { id } => {
            api.set_default_push_docker_registry(&id).await?;
            ctx.toaster.toast_success("Default push registry is changed.");
        }
        RegistryCommand::EnableSelfHosted => {
            api.enable_self_hosted_docker_registry().await?;
            ctx.toaster.toast_success("Self-hosted registry is enabled.");
        }
        RegistryCommand::DisableSelfHosted => {
            api.disable_self_hosted_docker_registry().await?;
            ctx.toaster.toast_success("Self-hosted registry is disabled.");
        }
    }
    Ok(())
}

/// 명령줄로 받는 레지스트리는 항상 원격 레지스트리
fn to_registry(id: String, args: RegistryArgs) -> RegistryInfo {
    RegistryInfo {
        id,
        registry_user: args.user,
        registry_password: args.password,
        registry_domain: args.domain,
        registry_image_prefix: args.prefix,
        registry_type: RegistryType::Remote,
    }
}
