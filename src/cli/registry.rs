//! Private registry command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Private modules
    #[command(visible_alias = "mod")]
    Module {
        #[command(subcommand)]
        command: ModuleCommand,
    },

    /// Private providers
    #[command(visible_alias = "prov")]
    Provider {
        #[command(subcommand)]
        command: ProviderCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommand {
    /// List modules
    #[command(visible_alias = "ls")]
    List,

    /// Publish a module version from a directory, creating the module if needed
    Create(ModuleCreateArgs),

    /// Show a module
    Show(ModuleArgs),

    /// Delete a module, one of its providers or a single version
    Delete(ModuleDeleteArgs),
}

#[derive(Parser, Debug)]
pub struct ModuleArgs {
    /// Module name
    #[arg(short, long)]
    pub name: String,

    /// Module provider (e.g. aws)
    #[arg(short, long)]
    pub provider: String,
}

#[derive(Parser, Debug)]
pub struct ModuleCreateArgs {
    #[command(flatten)]
    pub module: ModuleArgs,

    /// Semantic version of the new module version
    #[arg(short, long)]
    pub version: String,

    /// Directory with the module sources
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ModuleDeleteArgs {
    /// Module name
    #[arg(short, long)]
    pub name: String,

    /// Only delete this provider
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Only delete this version (needs --provider)
    #[arg(short, long, requires = "provider")]
    pub version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// List providers
    #[command(visible_alias = "ls")]
    List,

    /// Create a provider
    Create(ProviderArgs),

    /// Show a provider
    Show(ProviderArgs),

    /// Delete a provider with all its versions
    Delete(ProviderArgs),

    /// Provider versions
    Version {
        #[command(subcommand)]
        command: ProviderVersionCommand,
    },

    /// Provider platforms (per os/arch binaries of a version)
    Platform {
        #[command(subcommand)]
        command: ProviderPlatformCommand,
    },
}

#[derive(Parser, Debug)]
pub struct ProviderArgs {
    /// Provider name
    #[arg(short, long)]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct ProviderVersionArgs {
    /// Provider name
    #[arg(short, long)]
    pub name: String,

    /// Provider version
    #[arg(short, long)]
    pub version: String,
}

#[derive(Subcommand, Debug)]
pub enum ProviderVersionCommand {
    /// List versions of a provider
    #[command(visible_alias = "ls")]
    List(ProviderArgs),

    /// Create a version and upload its SHA256SUMS files
    Create(ProviderVersionCreateArgs),

    /// Show a version
    Show(ProviderVersionArgs),

    /// Delete a version
    Delete(ProviderVersionArgs),
}

#[derive(Parser, Debug)]
pub struct ProviderVersionCreateArgs {
    #[command(flatten)]
    pub version: ProviderVersionArgs,

    /// GPG key ID the SHA256SUMS file is signed with
    #[arg(short, long)]
    pub key_id: String,

    /// Supported plugin protocols
    #[arg(long, value_delimiter = ',', default_value = "5.0")]
    pub protocols: Vec<String>,

    /// Path to the SHA256SUMS file
    #[arg(long)]
    pub shasums: PathBuf,

    /// Path to the SHA256SUMS.sig file
    #[arg(long)]
    pub shasums_sig: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ProviderPlatformCommand {
    /// List platforms of a provider version
    #[command(visible_alias = "ls")]
    List(ProviderVersionArgs),

    /// Create a platform and upload its binary
    Create(ProviderPlatformCreateArgs),

    /// Show a platform
    Show(ProviderPlatformArgs),

    /// Delete a platform
    Delete(ProviderPlatformArgs),
}

#[derive(Parser, Debug)]
pub struct ProviderPlatformArgs {
    #[command(flatten)]
    pub version: ProviderVersionArgs,

    /// Operating system (e.g. linux)
    #[arg(long)]
    pub os: String,

    /// Architecture (e.g. amd64)
    #[arg(long)]
    pub arch: String,
}

#[derive(Parser, Debug)]
pub struct ProviderPlatformCreateArgs {
    #[command(flatten)]
    pub platform: ProviderPlatformArgs,

    /// Path to the zipped provider binary
    #[arg(short, long)]
    pub filename: PathBuf,

    /// SHA-256 of the binary (computed when omitted)
    #[arg(long)]
    pub shasum: Option<String>,
}
