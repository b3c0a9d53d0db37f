use crate::client::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use utility::Result;

pub const PROJECTS_PATH: &str = "/api/projects";
pub const FUNCTIONS_PATH: &str = "/api/functions";
pub const FUNCTION_INVOCATIONS_PATH: &str = "/api/function_invocations";

pub const PROJECT_NAMESPACE_HEADER: &str = "x-nuclio-project-namespace";
pub const PROJECT_NAME_HEADER: &str = "x-nuclio-project-name";
pub const FUNCTION_NAMESPACE_HEADER: &str = "x-nuclio-function-namespace";
pub const FUNCTION_NAME_HEADER: &str = "x-nuclio-function-name";
pub const INVOKE_VIA_HEADER: &str = "x-nuclio-invoke-via";
pub const PATH_HEADER: &str = "x-nuclio-path";

/// path of one resource when a name is given, of the whole collection otherwise
pub fn resource_path(collection: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{}/{}", collection, name),
        None => collection.to_string(),
    }
}

/// decodes a listing answer into records of type T.
/// a selective query answers with one resource, an unfiltered one with a
/// name -> resource map, both come back as a vector; map order is not kept
pub fn decode_resources<T: DeserializeOwned>(body: &str, selective: bool) -> Result<Vec<T>> {
    if selective {
        let resource: T = serde_json::from_str(body)?;
        return Ok(vec![resource]);
    }
    if body.trim().is_empty() {
        return Ok(vec![]);
    }
    let resources: HashMap<String, T> = serde_json::from_str(body)?;
    Ok(resources.into_iter().map(|(_, resource)| resource).collect())
}

impl<'s> Client<'s> {
    /// GET a collection or one of its members with the given filter headers
    pub(crate) async fn get_resources<T: DeserializeOwned>(
        &self,
        collection: &str,
        name: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let path = resource_path(collection, name);
        let mut req = self.new_request(Method::GET, path.as_str(), "".into())?;
        for (key, value) in headers {
            req = req.header(*key, *value);
        }

        let resp = self.do_checked_request(req.build()?).await?;
        let body = resp.text().await?;
        decode_resources(body.as_str(), name.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FunctionConfig, ProjectConfig};

    #[test]
    fn test_resource_path() {
        assert_eq!(resource_path(PROJECTS_PATH, None), "/api/projects");
        assert_eq!(
            resource_path(FUNCTIONS_PATH, Some("echo")),
            "/api/functions/echo"
        );
    }

    #[test]
    fn test_decode_single_resource() {
        let body = r#"{"metadata":{"name":"echo","namespace":"nuclio"},"status":{"state":"ready"}}"#;
        let functions: Vec<FunctionConfig> = decode_resources(body, true).unwrap();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].metadata.name, "echo");
    }

    #[test]
    fn test_decode_resource_map() {
        let body = r#"{
            "a": {"metadata": {"name": "a", "namespace": "nuclio"}, "spec": {"displayName": "A"}},
            "b": {"metadata": {"name": "b", "namespace": "nuclio"}, "spec": {"description": "bee"}},
            "c": {"metadata": {"name": "c", "namespace": "nuclio"}}
        }"#;
        let mut projects: Vec<ProjectConfig> = decode_resources(body, false).unwrap();
        assert_eq!(projects.len(), 3);

        projects.sort_by(|x, y| x.metadata.name.cmp(&y.metadata.name));
        assert_eq!(projects[0].spec.display_name, "A");
        assert_eq!(projects[1].spec.description, "bee");
        assert_eq!(projects[2].metadata.namespace, "nuclio");
    }

    #[test]
    fn test_decode_empty_listing() {
        let projects: Vec<ProjectConfig> = decode_resources("{}", false).unwrap();
        assert!(projects.is_empty());
        let projects: Vec<ProjectConfig> = decode_resources("", false).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let res: Result<Vec<ProjectConfig>> = decode_resources("not json", true);
        assert!(res.is_err());
    }
}
