//! 클러스터 노드와 원클릭 앱 명령.

use soteria_core::error::CoreError;
use soteria_core::models::system::{AddDockerNodeRequest, NodeType};

use super::{print_json, Context};
use crate::cli::{AddNodeArgs, NodesCommand, OneClickCommand};

pub(super) async fn run_nodes(cmd: NodesCommand, ctx: &Context) -> Result<(), CoreError> {
    match cmd {
        NodesCommand::List => {
            let nodes = ctx.api.get_all_nodes().await?;
            for node in &nodes.nodes {
                let role = match node.node_type {
                    NodeType::Manager if node.is_leader => "leader",
                    NodeType::Manager => "manager",
                    NodeType::Worker => "worker",
                };
                println!(
                    "{:<28} {:<8} {:<16} {} {}",
                    node.node_id, role, node.ip, node.hostname, node.state
                );
            }
        }
        NodesCommand::Add(args) => {
            let request = add_node_request(args).await?;
            ctx.api.add_docker_node(&request).await?;
            ctx.toaster.toast_success("Node is added to the cluster.");
        }
    }
    Ok(())
}

async fn add_node_request(args: AddNodeArgs) -> Result<AddDockerNodeRequest, CoreError> {
    let private_key = tokio::fs::read_to_string(&args.private_key).await?;
    Ok(AddDockerNodeRequest {
        node_type: args.node_type,
        private_key,
        remote_node_ip_address: args.ip,
        ssh_port: args.ssh_port,
        ssh_user: args.ssh_user,
        soteria_ip_address: args.soteria_ip,
    })
}

pub(super) async fn run_one_click(cmd: OneClickCommand, ctx: &Context) -> Result<(), CoreError> {
    let api = &ctx.api;
    match cmd {
        OneClickCommand::List => {
            let list = api.get_all_one_click_apps().await?;
            for app in &list.one_click_apps {
                println!("{:<28} {}", app.name, app.description);
            }
        }
        OneClickCommand::Show { name, base_domain } => {
            let template = api.get_one_click_app_by_name(&name, &base_domain).await?;
            print_json(&template.app_template)?;
        }
        OneClickCommand::Repos => {
            for url in api.get_all_one_click_app_repos().await?.urls {
                println!("{url}");
            }
        }
        OneClickCommand::AddRepo { url } => {
            api.add_new_custom_one_click_repo(&url).await?;
            ctx.toaster.toast_success("Repository is added.");
        }
        OneClickCommand::RemoveRepo { url } => {
            api.delete_custom_one_click_repo(&url).await?;
            ctx.toaster.toast_success("Repository is removed.");
        }
    }
    Ok(())
}
