use crate::nuclio::resolve_target;
use crate::output::{format_functions, OutputFormat};
use crate::{CommandAppend, State};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use schema::{FunctionFilter, ResourceId};

pub(crate) struct Function;

impl CommandAppend for Function {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        let app = app.subcommand(
            SubCommand::with_name("function")
                .alias("fn")
                .about("Lists and deletes nuclio functions, use deploy to create them")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("get")
                        .aliases(&["list", "ls"])
                        .about("Lists the functions of a namespace or project, or shows one")
                        .args_from_usage(
                            "[NAME]                    'Name of the function'
                             -p, --project [project]   'Only list the functions of this project'
                             -o, --output [output]     'Output format: text, json or yaml'",
                        ),
                )
                .subcommand(
                    SubCommand::with_name("delete")
                        .aliases(&["rm", "remove"])
                        .about("Deletes a function")
                        .args_from_usage("<NAME> 'Name of the function'"),
                ),
        );
        app
    }
}

impl Function {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        let f_args = match args.subcommand_matches("function") {
            Some(f_args) => f_args,
            None => return Ok(()),
        };

        if let Some(g_args) = f_args.subcommand_matches("get") {
            let target = resolve_target(&[args, f_args, g_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;
            let format: OutputFormat = g_args.value_of("output").unwrap_or("text").parse()?;
            let filter = FunctionFilter {
                id: ResourceId {
                    name: g_args.value_of("NAME").map(str::to_string),
                    namespace: target.namespace.clone(),
                },
                project_name: g_args.value_of("project").map(str::to_string),
            };

            let mut functions = client.get_functions(&filter).await?;
            functions.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
            println!("{}", format_functions(&functions, format)?);
        } else if let Some(d_args) = f_args.subcommand_matches("delete") {
            let target = resolve_target(&[args, f_args, d_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;
            let id = ResourceId {
                name: d_args.value_of("NAME").map(str::to_string),
                namespace: target.namespace.clone(),
            };

            colour::green_ln!(
                "Deleting function: {}.{}",
                d_args.value_of("NAME").unwrap_or_default(),
                id.namespace
            );
            client.delete_function(&id).await?;
        } else {
            return Err(State::Custom(
                "function needs one of get or delete".to_string(),
            ));
        }

        Err(State::Matched)
    }
}
