//! Project views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::{Project, TfeResource};
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectListItem<'a> {
    name: &'a str,
    id: &'a str,
    description: &'a str,
    organization: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDetail<'a> {
    name: &'a str,
    id: &'a str,
    description: &'a str,
    organization: &'a str,
    created_at: &'a str,
    default_execution_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_destroy_activity_duration: Option<&'a str>,
    workspace_count: u32,
    tags: Vec<TagItem<'a>>,
}

#[derive(Serialize)]
struct TagItem<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> From<&'a Project> for ProjectListItem<'a> {
    fn from(p: &'a Project) -> Self {
        Self {
            name: p.name(),
            id: &p.id,
            description: p.description(),
            organization: p.organization(),
        }
    }
}

pub struct ProjectView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> ProjectView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, projects: &[Project]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<ProjectListItem> = projects.iter().map(ProjectListItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = projects
            .iter()
            .map(|p| {
                vec![
                    Cell::new(p.organization()),
                    Cell::new(p.name()),
                    Cell::new(&p.id),
                    Cell::new(p.description()),
                ]
            })
            .collect();
        self.renderer
            .render_table(&["Organization", "Name", "ID", "Description"], rows)
    }

    pub fn show(&mut self, project: &Project) -> Result<()> {
        let workspace_count = project.attributes.workspace_count.unwrap_or(0);
        if self.renderer.is_json() {
            let detail = ProjectDetail {
                name: project.name(),
                id: &project.id,
                description: project.description(),
                organization: project.organization(),
                created_at: project.created_at(),
                default_execution_mode: project.default_execution_mode(),
                auto_destroy_activity_duration: project.auto_destroy_activity_duration(),
                workspace_count,
                tags: project
                    .effective_tag_bindings
                    .iter()
                    .map(|t| TagItem {
                        key: &t.key,
                        value: &t.value,
                    })
                    .collect(),
            };
            return self.renderer.render_json(&detail);
        }

        self.renderer.render_properties(&[
            ("Name", project.name().to_string()),
            ("ID", project.id.clone()),
            ("Description", project.description().to_string()),
            ("Organization", project.organization().to_string()),
            ("Created", project.created_at().to_string()),
            ("Execution Mode", project.default_execution_mode().to_string()),
            (
                "Auto Destroy",
                project
                    .auto_destroy_activity_duration()
                    .unwrap_or("-")
                    .to_string(),
            ),
            ("Workspaces", workspace_count.to_string()),
        ])?;

        if !project.effective_tag_bindings.is_empty() {
            let tags: Vec<(String, String)> = project
                .effective_tag_bindings
                .iter()
                .map(|t| (t.key.clone(), t.value.clone()))
                .collect();
            self.renderer.render_tags("Tags", &tags)?;
        }
        Ok(())
    }
}
