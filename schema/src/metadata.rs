use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

///ResourceMeta metadata shared by projects and functions
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ResourceMeta {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub namespace: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub annotations: HashMap<String, String>,
    // fields not modelled here, kept so they survive a round trip
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ResourceMeta {
    /// metadata carrying only the identity of a resource
    pub fn new(name: &str, namespace: &str) -> ResourceMeta {
        ResourceMeta {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }
}

///ResourceId identifies one resource, or all of them in a namespace when name is None
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResourceId {
    pub name: Option<String>,
    pub namespace: String,
}

impl ResourceId {
    pub fn named(name: &str, namespace: &str) -> ResourceId {
        ResourceId {
            name: Some(name.to_string()),
            namespace: namespace.to_string(),
        }
    }

    pub fn all(namespace: &str) -> ResourceId {
        ResourceId {
            name: None,
            namespace: namespace.to_string(),
        }
    }

    /// the name, or a validation error when the operation needs one
    pub fn required_name(&self) -> utility::Result<&str> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(utility::Error::Validation(
                "name must be specified".to_string(),
            )),
        }
    }
}

///FunctionFilter narrows a function listing, optionally to the functions of one project
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FunctionFilter {
    pub id: ResourceId,
    pub project_name: Option<String>,
}

impl From<ResourceId> for FunctionFilter {
    fn from(id: ResourceId) -> Self {
        FunctionFilter {
            id,
            project_name: None,
        }
    }
}
