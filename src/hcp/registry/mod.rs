//! Private registry module: modules and providers

mod commands;
mod models;
mod modules;
mod providers;
pub mod validate;

pub use commands::run_registry_command;
pub use models::{
    ModuleVersion, ProviderPlatform, ProviderVersion, RegistryModule, RegistryProvider,
    VersionStatus,
};
pub use modules::ModuleDeleteTarget;
pub use providers::{ProviderPlatformOptions, ProviderVersionOptions};
