use crate::deploy::Deploy;
use crate::function::Function;
use crate::invoke::Invoke;
use crate::nuclio::Nuclio;
use crate::project::Project;
use crate::{CommandAppend, State};
use clap::{App, AppSettings, ArgMatches};

const WELCOME_MSG: &str = "Manage nuclio projects and functions through the nuclio dashboard";

pub fn build_cli() -> App<'static, 'static> {
    let app = App::new("nuclio")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about(WELCOME_MSG);

    let app = Nuclio::append_subcommand(app);
    let app = Deploy::append_subcommand(app);
    let app = Project::append_subcommand(app);
    let app = Function::append_subcommand(app);
    let app = Invoke::append_subcommand(app);
    app
}

pub async fn run(args: &ArgMatches<'_>) -> std::result::Result<(), State> {
    match dispatch_command(args).await {
        Ok(_) => Err(State::Custom(
            "command not matched please contact the development team".to_string(),
        )),
        Err(State::Matched) => Ok(()),
        Err(state) => Err(state),
    }
}

pub async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
    Deploy::dispatch_command(args).await?;
    Project::dispatch_command(args).await?;
    Function::dispatch_command(args).await?;
    Invoke::dispatch_command(args).await
}

#[cfg(test)]
mod tests {
    use super::build_cli;

    #[test]
    fn test_cli_parses_deploy() {
        let args = build_cli()
            .get_matches_from_safe(vec![
                "nuclio",
                "--dashboard",
                "http://dashboard:8070",
                "deploy",
                "./functions/echo",
                "--project",
                "demo",
            ])
            .unwrap();
        assert_eq!(args.value_of("dashboard"), Some("http://dashboard:8070"));
        let deploy = args.subcommand_matches("deploy").unwrap();
        assert_eq!(deploy.value_of("DIR"), Some("./functions/echo"));
        assert_eq!(deploy.value_of("project"), Some("demo"));
    }

    #[test]
    fn test_cli_requires_project_for_deploy() {
        let res = build_cli().get_matches_from_safe(vec!["nuclio", "deploy", "./echo"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_nested_subcommands() {
        let args = build_cli()
            .get_matches_from_safe(vec!["nuclio", "project", "delete", "demo", "-n", "staging"])
            .unwrap();
        let project = args.subcommand_matches("project").unwrap();
        let delete = project.subcommand_matches("delete").unwrap();
        assert_eq!(delete.value_of("NAME"), Some("demo"));
        assert_eq!(delete.value_of("namespace"), Some("staging"));
    }

    #[test]
    fn test_cli_invoke_repeats_headers() {
        let args = build_cli()
            .get_matches_from_safe(vec![
                "nuclio", "invoke", "-H", "a=1", "--header", "b=2", "echo", "-m", "post",
            ])
            .unwrap();
        let invoke = args.subcommand_matches("invoke").unwrap();
        let headers: Vec<&str> = invoke.values_of("header").unwrap().collect();
        assert_eq!(headers, vec!["a=1", "b=2"]);
        assert_eq!(invoke.value_of("NAME"), Some("echo"));
        assert_eq!(invoke.value_of("method"), Some("post"));
    }

    #[test]
    fn test_cli_function_get_filters() {
        let args = build_cli()
            .get_matches_from_safe(vec!["nuclio", "function", "ls", "-p", "demo", "-o", "json"])
            .unwrap();
        let function = args.subcommand_matches("function").unwrap();
        let get = function.subcommand_matches("get").unwrap();
        assert_eq!(get.value_of("NAME"), None);
        assert_eq!(get.value_of("project"), Some("demo"));
        assert_eq!(get.value_of("output"), Some("json"));
    }
}
