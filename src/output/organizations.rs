//! Organization views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::{Organization, TfeResource};
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationListItem<'a> {
    name: &'a str,
    email: &'a str,
    external_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationDetail<'a> {
    name: &'a str,
    email: &'a str,
    external_id: &'a str,
    created_at: &'a str,
    collaborator_auth_policy: &'a str,
    cost_estimation_enabled: bool,
    two_factor_conformant: bool,
    saml_enabled: bool,
    session_timeout: u32,
    session_remember: u32,
    default_execution_mode: &'a str,
    permissions: std::collections::BTreeMap<String, bool>,
}

pub struct OrganizationView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> OrganizationView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, orgs: &[Organization]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<OrganizationListItem> = orgs
                .iter()
                .map(|o| OrganizationListItem {
                    name: o.name(),
                    email: o.email(),
                    external_id: o.external_id(),
                })
                .collect();
            return self.renderer.render_json(&items);
        }

        let rows = orgs
            .iter()
            .map(|o| vec![Cell::new(o.name()), Cell::new(o.email()), Cell::new(o.external_id())])
            .collect();
        self.renderer
            .render_table(&["Name", "Email", "External ID"], rows)
    }

    pub fn show(&mut self, org: &Organization) -> Result<()> {
        if self.renderer.is_json() {
            let detail = OrganizationDetail {
                name: org.name(),
                email: org.email(),
                external_id: org.external_id(),
                created_at: org.created_at(),
                collaborator_auth_policy: org.collaborator_auth_policy(),
                cost_estimation_enabled: org.cost_estimation_enabled(),
                two_factor_conformant: org.two_factor_conformant(),
                saml_enabled: org.saml_enabled(),
                session_timeout: org.session_timeout(),
                session_remember: org.session_remember(),
                default_execution_mode: org.default_execution_mode(),
                permissions: org.permissions().into_iter().collect(),
            };
            return self.renderer.render_json(&detail);
        }

        self.renderer.render_properties(&[
            ("Name", org.name().to_string()),
            ("Email", org.email().to_string()),
            ("External ID", org.external_id().to_string()),
            ("Created", org.created_at().to_string()),
            ("Collaborator Auth Policy", org.collaborator_auth_policy().to_string()),
            ("Cost Estimation", org.cost_estimation_enabled().to_string()),
            ("Two Factor Conformant", org.two_factor_conformant().to_string()),
            ("SAML Enabled", org.saml_enabled().to_string()),
            ("Session Timeout", org.session_timeout().to_string()),
            ("Session Remember", org.session_remember().to_string()),
            ("Default Execution Mode", org.default_execution_mode().to_string()),
        ])?;

        let permissions: Vec<(String, String)> = org
            .permissions()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        self.renderer.render_tags("Permissions", &permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::renderer::SharedBuffer;

    fn org() -> Organization {
        serde_json::from_value(serde_json::json!({
            "id": "acme",
            "type": "organizations",
            "attributes": {
                "name": "acme",
                "email": "ops@acme.test",
                "external-id": "org-123",
                "saml-enabled": true,
                "permissions": {"can-update": true, "can-destroy": false}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_list_json_uses_camel_case() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        OrganizationView::new(&mut renderer).list(&[org()]).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(
            doc,
            serde_json::json!([{"name": "acme", "email": "ops@acme.test", "externalId": "org-123"}])
        );
    }

    #[test]
    fn test_show_json_is_single_document() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        OrganizationView::new(&mut renderer).show(&org()).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(doc["samlEnabled"], true);
        assert_eq!(doc["permissions"]["can-destroy"], false);
        assert_eq!(doc["defaultExecutionMode"], "remote");
    }

    #[test]
    fn test_show_terminal_renders_permissions() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(false);
        OrganizationView::new(&mut renderer).show(&org()).unwrap();

        let out = buf.contents();
        assert!(out.contains("ops@acme.test"));
        assert!(out.contains("Permissions:"));
        assert!(out.contains("can-update:"));
    }
}
