use crate::client::Client;
use crate::utils::{PROJECTS_PATH, PROJECT_NAMESPACE_HEADER};
use reqwest::Method;
use schema::{ProjectConfig, ResourceId};
use utility::Result;

impl<'s> Client<'s> {
    /// creates a project and returns the dashboard's representation of it
    pub async fn create_project(&self, config: &ProjectConfig) -> Result<ProjectConfig> {
        let body = serde_json::to_string(config)?;
        let req = self
            .new_request(Method::POST, PROJECTS_PATH, body)?
            .header(PROJECT_NAMESPACE_HEADER, config.metadata.namespace.as_str())
            .build()?;

        let resp = self.do_checked_request(req).await?;
        let text = resp.text().await?;
        // some dashboard versions answer 201 with no body
        if text.trim().is_empty() {
            Ok(config.clone())
        } else {
            Ok(serde_json::from_str(text.as_str())?)
        }
    }

    /// lists the projects of a namespace, or fetches one when the id carries a name
    pub async fn get_projects(&self, filter: &ResourceId) -> Result<Vec<ProjectConfig>> {
        self.get_resources(
            PROJECTS_PATH,
            filter.name.as_deref(),
            &[(PROJECT_NAMESPACE_HEADER, filter.namespace.as_str())],
        )
        .await
    }

    pub async fn delete_project(&self, id: &ResourceId) -> Result<()> {
        let name = id.required_name()?;
        let body = serde_json::to_string(&ProjectConfig::identity(name, id.namespace.as_str()))?;

        let req = self
            .new_request(Method::DELETE, PROJECTS_PATH, body)?
            .header(PROJECT_NAMESPACE_HEADER, id.namespace.as_str())
            .build()?;
        self.do_checked_request(req).await?;
        Ok(())
    }
}
