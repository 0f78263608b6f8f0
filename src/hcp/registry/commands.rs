//! Private registry command handlers

use log::info;

use crate::cli::{
    GlobalArgs, ModuleCommand, ProviderCommand, ProviderPlatformCommand, ProviderVersionCommand,
    RegistryCommand,
};
use crate::error::Result;
use crate::hcp::TfeClient;
use crate::output::{RegistryView, Renderer};
use crate::ui::{confirm_delete, create_spinner, finish_spinner};

use super::modules::ModuleDeleteTarget;
use super::providers::{ProviderPlatformOptions, ProviderVersionOptions};

/// Run a `registry` subcommand
pub async fn run_registry_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &RegistryCommand,
) -> Result<()> {
    match command {
        RegistryCommand::Module { command } => run_module(client, renderer, global, command).await,
        RegistryCommand::Provider { command } => {
            run_provider(client, renderer, global, command).await
        }
    }
}

/// Human readable name of what a module delete removes
fn module_delete_label(name: &str, target: &ModuleDeleteTarget) -> String {
    match target {
        ModuleDeleteTarget::Module => format!("module {}", name),
        ModuleDeleteTarget::Provider(provider) => format!("module {}/{}", name, provider),
        ModuleDeleteTarget::Version { provider, version } => {
            format!("module {}/{} version {}", name, provider, version)
        }
    }
}

fn module_delete_target(provider: Option<&str>, version: Option<&str>) -> ModuleDeleteTarget {
    match (provider, version) {
        (Some(provider), Some(version)) => ModuleDeleteTarget::Version {
            provider: provider.to_string(),
            version: version.to_string(),
        },
        (Some(provider), None) => ModuleDeleteTarget::Provider(provider.to_string()),
        _ => ModuleDeleteTarget::Module,
    }
}

async fn run_module(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &ModuleCommand,
) -> Result<()> {
    let org = client.require_organization()?;

    match command {
        ModuleCommand::List => {
            renderer.command_header(&format!("Registry modules of organization: {}", org))?;
            let spinner = create_spinner("Fetching modules...", global.json);
            let result = client.fetch_registry_modules(org).await;
            finish_spinner(spinner);

            RegistryView::new(renderer).list_modules(&result?)
        }
        ModuleCommand::Show(args) => {
            let spinner = create_spinner("Fetching module...", global.json);
            let result = client
                .read_registry_module(org, &args.name, &args.provider)
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_module(&result?)
        }
        ModuleCommand::Create(args) => {
            renderer.command_header(&format!(
                "Publishing module {}/{} {} from {}",
                args.module.name,
                args.module.provider,
                args.version,
                args.directory.display()
            ))?;
            let spinner = create_spinner("Uploading module version...", global.json);
            let result = client
                .create_registry_module_version(
                    org,
                    &args.module.name,
                    &args.module.provider,
                    &args.version,
                    &args.directory,
                )
                .await;
            finish_spinner(spinner);

            let version = result?;
            info!(org = org; "Published module {}/{} {}", args.module.name, args.module.provider, args.version);
            RegistryView::new(renderer).module_version_created(
                &args.module.name,
                &args.module.provider,
                &version,
            )
        }
        ModuleCommand::Delete(args) => {
            let target = module_delete_target(args.provider.as_deref(), args.version.as_deref());
            let label = module_delete_label(&args.name, &target);
            if !confirm_delete(&label, global.needs_confirmation())? {
                return renderer.message("Aborted");
            }
            let spinner = create_spinner("Deleting...", global.json);
            let result = client.delete_registry_module(org, &args.name, &target).await;
            finish_spinner(spinner);

            result?;
            info!(org = org; "Deleted {}", label);
            RegistryView::new(renderer).deleted(&label)
        }
    }
}

async fn run_provider(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &ProviderCommand,
) -> Result<()> {
    let org = client.require_organization()?;

    match command {
        ProviderCommand::List => {
            renderer.command_header(&format!("Registry providers of organization: {}", org))?;
            let spinner = create_spinner("Fetching providers...", global.json);
            let result = client.fetch_registry_providers(org).await;
            finish_spinner(spinner);

            RegistryView::new(renderer).list_providers(&result?)
        }
        ProviderCommand::Create(args) => {
            let spinner = create_spinner("Creating provider...", global.json);
            let result = client.create_registry_provider(org, &args.name).await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_provider(&result?)
        }
        ProviderCommand::Show(args) => {
            let spinner = create_spinner("Fetching provider...", global.json);
            let result = client.read_registry_provider(org, &args.name).await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_provider(&result?)
        }
        ProviderCommand::Delete(args) => {
            let label = format!("provider {}", args.name);
            if !confirm_delete(&label, global.needs_confirmation())? {
                return renderer.message("Aborted");
            }
            let spinner = create_spinner("Deleting provider...", global.json);
            let result = client.delete_registry_provider(org, &args.name).await;
            finish_spinner(spinner);

            result?;
            RegistryView::new(renderer).deleted(&label)
        }
        ProviderCommand::Version { command } => {
            run_provider_version(client, renderer, global, org, command).await
        }
        ProviderCommand::Platform { command } => {
            run_provider_platform(client, renderer, global, org, command).await
        }
    }
}

async fn run_provider_version(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    org: &str,
    command: &ProviderVersionCommand,
) -> Result<()> {
    match command {
        ProviderVersionCommand::List(args) => {
            renderer.command_header(&format!("Versions of provider: {}", args.name))?;
            let spinner = create_spinner("Fetching provider versions...", global.json);
            let result = client.fetch_provider_versions(org, &args.name).await;
            finish_spinner(spinner);

            RegistryView::new(renderer).list_provider_versions(&result?)
        }
        ProviderVersionCommand::Create(args) => {
            let options = ProviderVersionOptions {
                version: &args.version.version,
                key_id: &args.key_id,
                protocols: args.protocols.clone(),
                shasums: &args.shasums,
                shasums_sig: &args.shasums_sig,
            };
            let spinner = create_spinner("Creating provider version...", global.json);
            let result = client
                .create_provider_version(org, &args.version.name, &options)
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_provider_version(&result?)
        }
        ProviderVersionCommand::Show(args) => {
            let spinner = create_spinner("Fetching provider version...", global.json);
            let result = client
                .read_provider_version(org, &args.name, &args.version)
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_provider_version(&result?)
        }
        ProviderVersionCommand::Delete(args) => {
            let label = format!("provider {} version {}", args.name, args.version);
            if !confirm_delete(&label, global.needs_confirmation())? {
                return renderer.message("Aborted");
            }
            let spinner = create_spinner("Deleting provider version...", global.json);
            let result = client
                .delete_provider_version(org, &args.name, &args.version)
                .await;
            finish_spinner(spinner);

            result?;
            RegistryView::new(renderer).deleted(&label)
        }
    }
}

async fn run_provider_platform(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    org: &str,
    command: &ProviderPlatformCommand,
) -> Result<()> {
    match command {
        ProviderPlatformCommand::List(args) => {
            renderer.command_header(&format!(
                "Platforms of provider {} {}",
                args.name, args.version
            ))?;
            let spinner = create_spinner("Fetching platforms...", global.json);
            let result = client
                .fetch_provider_platforms(org, &args.name, &args.version)
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).list_platforms(&result?)
        }
        ProviderPlatformCommand::Create(args) => {
            let platform = &args.platform;
            let options = ProviderPlatformOptions {
                os: &platform.os,
                arch: &platform.arch,
                binary: &args.filename,
                shasum: args.shasum.as_deref(),
            };
            let spinner = create_spinner("Uploading provider binary...", global.json);
            let result = client
                .create_provider_platform(
                    org,
                    &platform.version.name,
                    &platform.version.version,
                    &options,
                )
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_platform(&result?)
        }
        ProviderPlatformCommand::Show(args) => {
            let spinner = create_spinner("Fetching platform...", global.json);
            let result = client
                .read_provider_platform(
                    org,
                    &args.version.name,
                    &args.version.version,
                    &args.os,
                    &args.arch,
                )
                .await;
            finish_spinner(spinner);

            RegistryView::new(renderer).show_platform(&result?)
        }
        ProviderPlatformCommand::Delete(args) => {
            let label = format!(
                "provider {} {} platform {}_{}",
                args.version.name, args.version.version, args.os, args.arch
            );
            if !confirm_delete(&label, global.needs_confirmation())? {
                return renderer.message("Aborted");
            }
            let spinner = create_spinner("Deleting platform...", global.json);
            let result = client
                .delete_provider_platform(
                    org,
                    &args.version.name,
                    &args.version.version,
                    &args.os,
                    &args.arch,
                )
                .await;
            finish_spinner(spinner);

            result?;
            RegistryView::new(renderer).deleted(&label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_delete_target_from_flags() {
        assert_eq!(module_delete_target(None, None), ModuleDeleteTarget::Module);
        assert_eq!(
            module_delete_target(Some("aws"), None),
            ModuleDeleteTarget::Provider("aws".to_string())
        );
        let target = module_delete_target(Some("aws"), Some("1.2.0"));
        assert_eq!(
            module_delete_label("vpc", &target),
            "module vpc/aws version 1.2.0"
        );
    }
}
