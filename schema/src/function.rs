use crate::metadata::ResourceMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// label binding a function to the project that owns it
pub const PROJECT_NAME_LABEL: &str = "nuclio.io/project-name";

///FunctionConfig a nuclio function as the dashboard and function.yaml describe it
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FunctionConfig {
    #[serde(default)]
    pub metadata: ResourceMeta,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub spec: FunctionSpec,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub status: FunctionStatus,
}

impl FunctionConfig {
    /// a function record carrying only name and namespace, used as a delete payload
    pub fn identity(name: &str, namespace: &str) -> FunctionConfig {
        FunctionConfig {
            metadata: ResourceMeta::new(name, namespace),
            ..Default::default()
        }
    }

    /// binds the function to a project, overwriting any previous binding
    pub fn set_project(&mut self, project_name: &str) {
        self.metadata
            .labels
            .insert(PROJECT_NAME_LABEL.to_string(), project_name.to_string());
    }

    pub fn project_name(&self) -> Option<&str> {
        self.metadata
            .labels
            .get(PROJECT_NAME_LABEL)
            .map(|s| s.as_str())
    }
}

///FunctionSpec deployment parameters of a function
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FunctionSpec {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub description: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub disable: bool,
    // Handler is the entry point, e.g. main:handler
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub handler: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub runtime: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub image: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(rename = "minReplicas")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<u32>,
    #[serde(rename = "maxReplicas")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<u32>,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub env: Vec<EnvVar>,
    #[serde(rename = "dataBindings")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub data_bindings: HashMap<String, DataBinding>,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub triggers: HashMap<String, Trigger>,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub build: Build,
    // fields not modelled here, kept so they survive a round trip
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct EnvVar {
    #[serde(default)]
    pub name: String,
    // empty when the value comes from valueFrom
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub value: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

///Build where the function source comes from and how its image is built
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Build {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub path: String,
    // base64 of the handler source
    #[serde(rename = "functionSourceCode")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub function_source_code: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub registry: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub image: String,
    #[serde(rename = "baseImage")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub base_image: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub commands: Vec<String>,
    #[serde(rename = "noBaseImagesPull")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub no_base_images_pull: bool,
    #[serde(rename = "noCache")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub no_cache: bool,
    // local path -> path inside the function image
    #[serde(rename = "addedObjectPaths")]
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub added_object_paths: HashMap<String, String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DataBinding {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub class: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub kind: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub url: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub path: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub query: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub secret: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub attributes: HashMap<String, Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Trigger {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub class: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub kind: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub url: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub paths: Vec<String>,
    #[serde(rename = "numPartitions")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_partitions: Option<u32>,
    #[serde(rename = "maxWorkers")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<u32>,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub attributes: HashMap<String, Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

///FunctionStatus provisioning state reported by the dashboard
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct FunctionStatus {
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub state: FunctionState,
    #[serde(default)]
    #[serde(skip_serializing_if = "utility::is_default")]
    pub message: String,
    #[serde(rename = "httpPort")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

///FunctionState open set of states, unknown values are kept as they came
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum FunctionState {
    Ready,
    Error,
    Building,
    WaitingForBuild,
    WaitingForResourceConfiguration,
    ConfiguringResources,
    Other(String),
}

impl FunctionState {
    /// ready and error end the readiness polling
    pub fn is_terminal(&self) -> bool {
        matches!(self, FunctionState::Ready | FunctionState::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FunctionState::Ready => "ready",
            FunctionState::Error => "error",
            FunctionState::Building => "building",
            FunctionState::WaitingForBuild => "waitingForBuild",
            FunctionState::WaitingForResourceConfiguration => "waitingForResourceConfiguration",
            FunctionState::ConfiguringResources => "configuringResources",
            FunctionState::Other(state) => state.as_str(),
        }
    }
}

impl Default for FunctionState {
    fn default() -> Self {
        FunctionState::Other(String::new())
    }
}

impl From<String> for FunctionState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "ready" => FunctionState::Ready,
            "error" => FunctionState::Error,
            "building" => FunctionState::Building,
            "waitingForBuild" => FunctionState::WaitingForBuild,
            "waitingForResourceConfiguration" => FunctionState::WaitingForResourceConfiguration,
            "configuringResources" => FunctionState::ConfiguringResources,
            _ => FunctionState::Other(state),
        }
    }
}

impl From<FunctionState> for String {
    fn from(state: FunctionState) -> Self {
        match state {
            FunctionState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FunctionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_only_name_and_namespace() {
        let func = FunctionConfig::identity("echo", "nuclio");
        let json = serde_json::to_value(&func).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"metadata": {"name": "echo", "namespace": "nuclio"}})
        );
    }

    #[test]
    fn test_set_project_overwrites_label() {
        let mut func = FunctionConfig::identity("echo", "nuclio");
        func.metadata
            .labels
            .insert(PROJECT_NAME_LABEL.to_string(), "old".to_string());
        func.set_project("default");
        assert_eq!(func.project_name(), Some("default"));
        assert_eq!(func.metadata.labels.len(), 1);
    }

    #[test]
    fn test_state_keeps_unknown_values() {
        let status: FunctionStatus =
            serde_json::from_str(r#"{"state":"scaledToZero","message":"idle"}"#).unwrap();
        assert_eq!(status.state, FunctionState::Other("scaledToZero".into()));
        assert!(!status.state.is_terminal());
        let back = serde_json::to_value(&status).unwrap();
        assert_eq!(back["state"], "scaledToZero");

        let status: FunctionStatus = serde_json::from_str(r#"{"state":"ready"}"#).unwrap();
        assert_eq!(status.state, FunctionState::Ready);
        assert!(status.state.is_terminal());
    }
}
