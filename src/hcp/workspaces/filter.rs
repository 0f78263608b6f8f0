//! Client-side workspace filtering

use crate::hcp::runs::RunStatus;

use super::models::Workspace;

/// Keep the workspaces matching every given predicate, in their original order
///
/// * `run_status` - the current run must exist and have this status
/// * `repository` - the VCS repo must exist and have this identifier
pub fn filter_workspaces(
    workspaces: Vec<Workspace>,
    run_status: Option<RunStatus>,
    repository: Option<&str>,
) -> Vec<Workspace> {
    let repository = repository.filter(|r| !r.is_empty());

    workspaces
        .into_iter()
        .filter(|ws| match run_status {
            Some(status) => ws.current_run_status() == Some(status),
            None => true,
        })
        .filter(|ws| match repository {
            Some(repo) => ws.repository() == Some(repo),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcp::runs::Run;

    fn workspace(id: &str, status: Option<&str>, repo: Option<&str>) -> Workspace {
        let mut ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": id,
            "attributes": {
                "name": id,
                "vcs-repo": repo.map(|r| serde_json::json!({"identifier": r}))
            }
        }))
        .unwrap();
        ws.current_run = status.map(|s| {
            serde_json::from_value::<Run>(serde_json::json!({
                "id": format!("run-{}", id),
                "attributes": {"status": s}
            }))
            .unwrap()
        });
        ws
    }

    fn ids(ws: &[Workspace]) -> Vec<&str> {
        ws.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_run_status() {
        let all = vec![
            workspace("ws-1", Some("applied"), None),
            workspace("ws-2", None, None),
            workspace("ws-3", Some("errored"), None),
        ];
        let result = filter_workspaces(all, Some(RunStatus::Applied), None);
        assert_eq!(ids(&result), vec!["ws-1"]);
    }

    #[test]
    fn test_filter_by_repository() {
        let all = vec![
            workspace("ws-1", None, Some("acme/app")),
            workspace("ws-2", None, None),
            workspace("ws-3", None, Some("acme/app")),
            workspace("ws-4", None, Some("acme/other")),
        ];
        let result = filter_workspaces(all, None, Some("acme/app"));
        assert_eq!(ids(&result), vec!["ws-1", "ws-3"]);
    }

    #[test]
    fn test_filters_combine() {
        let all = vec![
            workspace("ws-1", Some("applied"), Some("acme/app")),
            workspace("ws-2", Some("errored"), Some("acme/app")),
            workspace("ws-3", Some("applied"), Some("acme/other")),
        ];
        let result = filter_workspaces(all, Some(RunStatus::Applied), Some("acme/app"));
        assert_eq!(ids(&result), vec!["ws-1"]);
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let all = vec![workspace("ws-1", None, None), workspace("ws-2", None, None)];
        let result = filter_workspaces(all, None, Some(""));
        assert_eq!(ids(&result), vec!["ws-1", "ws-2"]);
    }
}
