use crate::nuclio::resolve_target;
use crate::output::{format_projects, OutputFormat};
use crate::{CommandAppend, State};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use schema::{ProjectConfig, ProjectSpec, ResourceId, ResourceMeta};

pub(crate) struct Project;

impl CommandAppend for Project {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        let app = app.subcommand(
            SubCommand::with_name("project")
                .about("Creates, lists and deletes nuclio projects")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("create")
                        .about("Creates a project")
                        .args_from_usage(
                            "<NAME>                          'Name of the project'
                             --display-name [display-name]   'Human readable name of the project'
                             --description [description]     'Description of the project'",
                        ),
                )
                .subcommand(
                    SubCommand::with_name("get")
                        .aliases(&["list", "ls"])
                        .about("Lists the projects of a namespace, or shows one")
                        .args_from_usage(
                            "[NAME]                  'Name of the project'
                             -o, --output [output]   'Output format: text, json or yaml'",
                        ),
                )
                .subcommand(
                    SubCommand::with_name("delete")
                        .aliases(&["rm", "remove"])
                        .about("Deletes a project")
                        .args_from_usage("<NAME> 'Name of the project'"),
                ),
        );
        app
    }
}

impl Project {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        let p_args = match args.subcommand_matches("project") {
            Some(p_args) => p_args,
            None => return Ok(()),
        };

        if let Some(c_args) = p_args.subcommand_matches("create") {
            let target = resolve_target(&[args, p_args, c_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;
            let name = c_args.value_of("NAME").unwrap_or_default();

            let config = ProjectConfig {
                metadata: ResourceMeta::new(name, target.namespace.as_str()),
                spec: ProjectSpec {
                    display_name: c_args
                        .value_of("display-name")
                        .unwrap_or_default()
                        .to_string(),
                    description: c_args
                        .value_of("description")
                        .unwrap_or_default()
                        .to_string(),
                    ..Default::default()
                },
            };
            let created = client.create_project(&config).await?;
            colour::green_ln!(
                "Project {} created in namespace {}",
                created.metadata.name,
                created.metadata.namespace
            );
        } else if let Some(g_args) = p_args.subcommand_matches("get") {
            let target = resolve_target(&[args, p_args, g_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;
            let format: OutputFormat = g_args.value_of("output").unwrap_or("text").parse()?;
            let id = ResourceId {
                name: g_args.value_of("NAME").map(str::to_string),
                namespace: target.namespace.clone(),
            };

            let mut projects = client.get_projects(&id).await?;
            projects.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
            println!("{}", format_projects(&projects, format)?);
        } else if let Some(d_args) = p_args.subcommand_matches("delete") {
            let target = resolve_target(&[args, p_args, d_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;
            let id = ResourceId {
                name: d_args.value_of("NAME").map(str::to_string),
                namespace: target.namespace.clone(),
            };

            colour::green_ln!(
                "Deleting project: {}.{}",
                d_args.value_of("NAME").unwrap_or_default(),
                id.namespace
            );
            client.delete_project(&id).await?;
        } else {
            return Err(State::Custom(
                "project needs one of create, get or delete".to_string(),
            ));
        }

        Err(State::Matched)
    }
}
