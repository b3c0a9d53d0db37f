use schema::{FunctionConfig, ProjectConfig};
use serde::Serialize;
use std::str::FromStr;
use utility::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(Error::Validation(format!(
                "the --output flag must be text, json or yaml, got {}",
                other
            ))),
        }
    }
}

fn encode<T: Serialize>(resources: &[T], format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(resources)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(resources)?)),
        OutputFormat::Text => Ok(None),
    }
}

pub(crate) fn format_projects(projects: &[ProjectConfig], format: OutputFormat) -> Result<String> {
    if let Some(encoded) = encode(projects, format)? {
        return Ok(encoded);
    }
    let mut lines = vec![format_with_space("Project", "Display name", "Description")];
    for project in projects {
        lines.push(format_with_space(
            project.metadata.name.as_str(),
            project.spec.display_name.as_str(),
            project.spec.description.as_str(),
        ));
    }
    Ok(lines.join("\n"))
}

pub(crate) fn format_functions(
    functions: &[FunctionConfig],
    format: OutputFormat,
) -> Result<String> {
    if let Some(encoded) = encode(functions, format)? {
        return Ok(encoded);
    }
    let mut lines = vec![fun_format_with_space("Function", "Project", "State", "Runtime")];
    for function in functions {
        lines.push(fun_format_with_space(
            function.metadata.name.as_str(),
            function.project_name().unwrap_or_default(),
            function.status.state.as_str(),
            function.spec.runtime.as_str(),
        ));
    }
    Ok(lines.join("\n"))
}

fn fun_format_with_space(str1: &str, str2: &str, str3: &str, str4: &str) -> String {
    let format = format!("{:width$}", str1, width = 30)
        + format!("{:width$}", str2, width = 20).as_str()
        + format!("{:width$}", str3, width = 35).as_str()
        + str4;
    format.trim_end().to_string()
}

fn format_with_space(str1: &str, str2: &str, str3: &str) -> String {
    let format = format!("{:width$}", str1, width = 30)
        + format!("{:width$}", str2, width = 30).as_str()
        + str3;
    format.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FunctionState, ResourceMeta};

    #[test]
    fn test_parse_output_format() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_functions_text() {
        let mut func = FunctionConfig {
            metadata: ResourceMeta::new("echo", "nuclio"),
            ..Default::default()
        };
        func.set_project("demo");
        func.spec.runtime = "python:3.9".into();
        func.status.state = FunctionState::Ready;

        let out = format_functions(&[func], OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Function"));
        assert!(lines[1].starts_with("echo"));
        assert!(lines[1].contains("demo"));
        assert!(lines[1].contains("ready"));
        assert!(lines[1].ends_with("python:3.9"));
    }

    #[test]
    fn test_format_projects_json() {
        let project = ProjectConfig::identity("demo", "nuclio");
        let out = format_projects(&[project.clone()], OutputFormat::Json).unwrap();
        let back: Vec<ProjectConfig> = serde_json::from_str(out.as_str()).unwrap();
        assert_eq!(back, vec![project]);
    }
}
