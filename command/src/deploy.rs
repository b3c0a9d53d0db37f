use crate::nuclio::resolve_target;
use crate::{CommandAppend, State};
use clap::{App, ArgMatches, SubCommand};
use log::{error, info};
use proxy::client::Client;
use schema::FunctionConfig;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use utility::{Error, Result};

const CONFIG_EXTENSION: &str = "yaml";

///Notifier where the deploy command shows its outcome to the user
pub(crate) trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

///TerminalNotifier coloured one line notifications on the terminal
pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        colour::green_ln!("{}", message);
    }

    fn error(&self, message: &str) {
        colour::e_red_ln!("{}", message);
    }
}

pub(crate) struct Deploy;

impl CommandAppend for Deploy {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        let app = app.subcommand(
            SubCommand::with_name("deploy")
                .about(
                    r#"Deploys a nuclio function from a directory holding exactly one .yaml
function configuration and exactly one source file. The source is base64
encoded into the configuration and the command waits until the dashboard
reports the function ready.
	Example:
  nuclio deploy ./functions/echo --project demo
  nuclio deploy ./functions/echo --project demo --namespace staging
  nuclio deploy ./functions/echo -p demo --dashboard http://nuclio.local:8070"#,
                )
                .args_from_usage(
                    "<DIR>                         'Directory holding the function configuration and source'
                     -p, --project <project>       'Project the function is deployed into'",
                ),
        );
        app
    }
}

impl Deploy {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(d_args) = args.subcommand_matches("deploy") {
            let dir = d_args.value_of("DIR").ok_or_else(|| {
                State::Custom("you must set the function directory".to_string())
            })?;
            let project = d_args.value_of("project").ok_or_else(|| {
                State::Custom("you must set the project using --project NAME".to_string())
            })?;

            let target = resolve_target(&[args, d_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;

            deploy_directory(
                &client,
                project,
                Path::new(dir),
                target.namespace.as_str(),
                &TerminalNotifier,
            )
            .await
            .map_err(|e| State::Reported(e.to_string()))?;

            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}

/// deploys the function held by dir into project and reports the outcome
/// through the notifier and the log, success is only reported once the
/// function is ready
pub(crate) async fn deploy_directory(
    client: &Client<'_>,
    project_name: &str,
    dir: &Path,
    namespace: &str,
    notifier: &dyn Notifier,
) -> Result<FunctionConfig> {
    let res = match assemble_function(dir, namespace) {
        Ok(config) => {
            info!(
                "deploying function {} from {} into project {}",
                config.metadata.name,
                dir.display(),
                project_name
            );
            client.create_function(project_name, &config).await
        }
        Err(e) => Err(e),
    };

    match res {
        Ok(function) => {
            let message = format!(
                "Function {} deployed successfully to project {}",
                function.metadata.name, project_name
            );
            notifier.info(message.as_str());
            info!("{}", message);
            Ok(function)
        }
        Err(e) => {
            let message = format!("Failed to deploy function from {}: {}", dir.display(), e);
            notifier.error(message.as_str());
            error!("{}", message);
            Err(e)
        }
    }
}

/// builds the function configuration from the directory's .yaml file and
/// its source file, which lands base64 encoded in spec.build.functionSourceCode
pub(crate) fn assemble_function(dir: &Path, namespace: &str) -> Result<FunctionConfig> {
    let (config_path, source_path) = classify_entries(dir)?;

    let config_text = std::fs::read_to_string(&config_path)?;
    let mut config: FunctionConfig = serde_yaml::from_str(config_text.as_str()).map_err(|e| {
        Error::Precondition(format!("can't parse {}: {}", config_path.display(), e))
    })?;
    let source = std::fs::read_to_string(&source_path)?;
    config.spec.build.function_source_code = base64::encode(source);

    if config.metadata.name.is_empty() {
        if let Some(name) = dir.file_name().and_then(OsStr::to_str) {
            config.metadata.name = name.to_string();
        }
    }
    if config.metadata.namespace.is_empty() {
        config.metadata.namespace = namespace.to_string();
    }
    Ok(config)
}

/// splits the immediate files of dir into the configuration and the source,
/// exactly one of each must be there
fn classify_entries(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::Precondition(format!("can't read directory {}: {}", dir.display(), e))
    })?;

    let mut configs = vec![];
    let mut sources = vec![];
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension() == Some(OsStr::new(CONFIG_EXTENSION)) {
            configs.push(path);
        } else {
            sources.push(path);
        }
    }
    // read_dir order depends on the filesystem
    configs.sort();
    sources.sort();

    let config = exactly_one(dir, configs, ".yaml configuration file")?;
    let source = exactly_one(dir, sources, "source file")?;
    Ok((config, source))
}

fn exactly_one(dir: &Path, mut found: Vec<PathBuf>, what: &str) -> Result<PathBuf> {
    if found.len() == 1 {
        return Ok(found.remove(0));
    }
    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    Err(Error::Precondition(format!(
        "{} must contain exactly one {}, found {} [{}]",
        dir.display(),
        what,
        found.len(),
        names.join(", ")
    )))
}
