//! Private registry views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::registry::{
    ModuleVersion, ProviderPlatform, ProviderVersion, RegistryModule, RegistryProvider,
};
use crate::hcp::TfeResource;
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleItem<'a> {
    id: &'a str,
    name: &'a str,
    namespace: &'a str,
    provider: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_version: Option<&'a str>,
    created_at: &'a str,
    updated_at: &'a str,
}

impl<'a> From<&'a RegistryModule> for ModuleItem<'a> {
    fn from(m: &'a RegistryModule) -> Self {
        Self {
            id: &m.id,
            name: m.name(),
            namespace: m.namespace(),
            provider: m.provider(),
            status: m.status(),
            latest_version: m.latest_version(),
            created_at: m.created_at(),
            updated_at: m.updated_at(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleDetail<'a> {
    #[serde(flatten)]
    summary: ModuleItem<'a>,
    versions: Vec<VersionItem<'a>>,
}

#[derive(Serialize)]
struct VersionItem<'a> {
    version: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderItem<'a> {
    id: &'a str,
    name: &'a str,
    namespace: &'a str,
    registry_name: &'a str,
    created_at: &'a str,
    updated_at: &'a str,
}

impl<'a> From<&'a RegistryProvider> for ProviderItem<'a> {
    fn from(p: &'a RegistryProvider) -> Self {
        Self {
            id: &p.id,
            name: p.name(),
            namespace: p.namespace(),
            registry_name: p.registry_name(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderVersionItem<'a> {
    id: &'a str,
    version: &'a str,
    key_id: &'a str,
    protocols: &'a [String],
    shasums_uploaded: bool,
    shasums_sig_uploaded: bool,
    created_at: &'a str,
}

impl<'a> From<&'a ProviderVersion> for ProviderVersionItem<'a> {
    fn from(v: &'a ProviderVersion) -> Self {
        Self {
            id: &v.id,
            version: v.version(),
            key_id: v.key_id(),
            protocols: &v.attributes.protocols,
            shasums_uploaded: v.attributes.shasums_uploaded,
            shasums_sig_uploaded: v.attributes.shasums_sig_uploaded,
            created_at: v.created_at(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlatformItem<'a> {
    id: &'a str,
    os: &'a str,
    arch: &'a str,
    filename: &'a str,
    shasum: &'a str,
    binary_uploaded: bool,
}

impl<'a> From<&'a ProviderPlatform> for PlatformItem<'a> {
    fn from(p: &'a ProviderPlatform) -> Self {
        Self {
            id: &p.id,
            os: &p.attributes.os,
            arch: &p.attributes.arch,
            filename: p.filename(),
            shasum: p.shasum(),
            binary_uploaded: p.attributes.provider_binary_uploaded,
        }
    }
}

pub struct RegistryView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> RegistryView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list_modules(&mut self, modules: &[RegistryModule]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<ModuleItem> = modules.iter().map(ModuleItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = modules
            .iter()
            .map(|m| {
                vec![
                    Cell::new(m.name()),
                    Cell::new(m.provider()),
                    Cell::new(&m.id),
                    Cell::new(m.status()),
                    Cell::new(m.latest_version().unwrap_or("")),
                    Cell::new(m.updated_at()),
                ]
            })
            .collect();
        self.renderer.render_table(
            &["Name", "Provider", "ID", "Status", "Latest Version", "Updated"],
            rows,
        )
    }

    pub fn show_module(&mut self, module: &RegistryModule) -> Result<()> {
        if self.renderer.is_json() {
            let detail = ModuleDetail {
                summary: ModuleItem::from(module),
                versions: module
                    .versions()
                    .iter()
                    .map(|v| VersionItem {
                        version: &v.version,
                        status: &v.status,
                    })
                    .collect(),
            };
            return self.renderer.render_json(&detail);
        }

        self.renderer.render_properties(&[
            ("Name", module.name().to_string()),
            ("Provider", module.provider().to_string()),
            ("Namespace", module.namespace().to_string()),
            ("ID", module.id.clone()),
            ("Status", module.status().to_string()),
            ("Created", module.created_at().to_string()),
            ("Updated", module.updated_at().to_string()),
        ])?;

        let versions: Vec<(String, String)> = module
            .versions()
            .iter()
            .map(|v| (v.version.clone(), v.status.clone()))
            .collect();
        if !versions.is_empty() {
            self.renderer.render_tags("Versions", &versions)?;
        }
        Ok(())
    }

    pub fn module_version_created(
        &mut self,
        name: &str,
        provider: &str,
        version: &ModuleVersion,
    ) -> Result<()> {
        let status = version.attributes.status.as_deref().unwrap_or("pending");
        if self.renderer.is_json() {
            return self.renderer.render_json(&serde_json::json!({
                "id": version.id,
                "name": name,
                "provider": provider,
                "version": version.attributes.version,
                "status": status
            }));
        }
        self.renderer.render_properties(&[
            ("Name", name.to_string()),
            ("Provider", provider.to_string()),
            ("Version", version.attributes.version.clone()),
            ("ID", version.id.clone()),
            ("Status", status.to_string()),
        ])
    }

    pub fn list_providers(&mut self, providers: &[RegistryProvider]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<ProviderItem> = providers.iter().map(ProviderItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = providers
            .iter()
            .map(|p| {
                vec![
                    Cell::new(p.name()),
                    Cell::new(&p.id),
                    Cell::new(p.namespace()),
                    Cell::new(p.created_at()),
                    Cell::new(p.updated_at()),
                ]
            })
            .collect();
        self.renderer
            .render_table(&["Name", "ID", "Namespace", "Created", "Updated"], rows)
    }

    /// Used by provider show and create
    pub fn show_provider(&mut self, provider: &RegistryProvider) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&ProviderItem::from(provider));
        }
        self.renderer.render_properties(&[
            ("Name", provider.name().to_string()),
            ("ID", provider.id.clone()),
            ("Namespace", provider.namespace().to_string()),
            ("Registry", provider.registry_name().to_string()),
            ("Created", provider.created_at().to_string()),
            ("Updated", provider.updated_at().to_string()),
        ])
    }

    pub fn list_provider_versions(&mut self, versions: &[ProviderVersion]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<ProviderVersionItem> =
                versions.iter().map(ProviderVersionItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = versions
            .iter()
            .map(|v| {
                vec![
                    Cell::new(v.version()),
                    Cell::new(&v.id),
                    Cell::new(v.key_id()),
                    Cell::new(v.attributes.protocols.join(", ")),
                    Cell::new(v.created_at()),
                ]
            })
            .collect();
        self.renderer.render_table(
            &["Version", "ID", "Key ID", "Protocols", "Created"],
            rows,
        )
    }

    pub fn show_provider_version(&mut self, version: &ProviderVersion) -> Result<()> {
        if self.renderer.is_json() {
            return self
                .renderer
                .render_json(&ProviderVersionItem::from(version));
        }
        self.renderer.render_properties(&[
            ("Version", version.version().to_string()),
            ("ID", version.id.clone()),
            ("Key ID", version.key_id().to_string()),
            ("Protocols", version.attributes.protocols.join(", ")),
            ("Shasums Uploaded", version.attributes.shasums_uploaded.to_string()),
            (
                "Shasums Sig Uploaded",
                version.attributes.shasums_sig_uploaded.to_string(),
            ),
            ("Created", version.created_at().to_string()),
        ])
    }

    pub fn list_platforms(&mut self, platforms: &[ProviderPlatform]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<PlatformItem> = platforms.iter().map(PlatformItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = platforms
            .iter()
            .map(|p| {
                vec![
                    Cell::new(&p.attributes.os),
                    Cell::new(&p.attributes.arch),
                    Cell::new(&p.id),
                    Cell::new(p.filename()),
                    Cell::new(p.attributes.provider_binary_uploaded.to_string()),
                ]
            })
            .collect();
        self.renderer
            .render_table(&["OS", "Arch", "ID", "Filename", "Uploaded"], rows)
    }

    pub fn show_platform(&mut self, platform: &ProviderPlatform) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&PlatformItem::from(platform));
        }
        self.renderer.render_properties(&[
            ("OS", platform.attributes.os.clone()),
            ("Arch", platform.attributes.arch.clone()),
            ("ID", platform.id.clone()),
            ("Filename", platform.filename().to_string()),
            ("Shasum", platform.shasum().to_string()),
            (
                "Binary Uploaded",
                platform.attributes.provider_binary_uploaded.to_string(),
            ),
        ])
    }

    /// Confirmation for any registry delete
    pub fn deleted(&mut self, what: &str) -> Result<()> {
        if self.renderer.is_json() {
            return self
                .renderer
                .render_json(&serde_json::json!({"deleted": what}));
        }
        self.renderer.message(&format!("Deleted {}", what))
    }
}
