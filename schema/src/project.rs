use crate::metadata::ResourceMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

///ProjectConfig a nuclio project, projects have no provisioning status
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub metadata: ResourceMeta,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub spec: ProjectSpec,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ProjectSpec {
    #[serde(rename = "displayName")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub display_name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub description: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ProjectConfig {
    /// a project record carrying only name and namespace, used as a delete payload
    pub fn identity(name: &str, namespace: &str) -> ProjectConfig {
        ProjectConfig {
            metadata: ResourceMeta::new(name, namespace),
            spec: Default::default(),
        }
    }
}
