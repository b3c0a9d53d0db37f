use crate::priority::{
    get_dashboard_url, get_namespace, DASHBOARD_URL_ENVIRONMENT, NAMESPACE_ENVIRONMENT,
};
use crate::CommandAppend;
use clap::{App, Arg, ArgMatches};
use config::config_file::lookup_config;
use log::{debug, warn};
use proxy::auth::ClientAuthE;

pub const DEFAULT_DASHBOARD: &str = utility::DASHBOARD;

pub(crate) struct Nuclio;

impl CommandAppend for Nuclio {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        let app = app
            .arg(
                Arg::with_name("dashboard")
                    .long("dashboard")
                    .short("d")
                    .takes_value(true)
                    .global(true)
                    .help("Dashboard URL starting with http(s):// (default http://127.0.0.1:8070)"),
            )
            .arg(
                Arg::with_name("namespace")
                    .long("namespace")
                    .short("n")
                    .takes_value(true)
                    .global(true)
                    .help("Namespace of the resources (default nuclio)"),
            )
            .arg(
                Arg::with_name("username")
                    .long("username")
                    .short("u")
                    .takes_value(true)
                    .global(true)
                    .help("Dashboard username, when it sits behind basic auth"),
            )
            .arg(
                Arg::with_name("password")
                    .long("password")
                    .takes_value(true)
                    .global(true)
                    .help("Dashboard password"),
            )
            .arg(
                Arg::with_name("token")
                    .long("token")
                    .short("k")
                    .takes_value(true)
                    .global(true)
                    .help("Pass a bearer token to use instead of basic auth"),
            );
        app
    }
}

/// value of a global argument, looked up from the innermost subcommand outwards
pub(crate) fn global_value<'a>(matches: &[&'a ArgMatches<'a>], name: &str) -> Option<&'a str> {
    matches.iter().rev().find_map(|m| m.value_of(name))
}

///Target where and as whom the command talks to the dashboard
pub(crate) struct Target {
    pub dashboard: String,
    pub namespace: String,
    pub auth: ClientAuthE,
}

pub(crate) fn resolve_target(matches: &[&ArgMatches<'_>]) -> Target {
    let config = lookup_config().unwrap_or_else(|e| {
        warn!("ignoring unreadable config file: {}", e);
        Default::default()
    });
    let env_dashboard = std::env::var(DASHBOARD_URL_ENVIRONMENT).unwrap_or_default();
    let env_namespace = std::env::var(NAMESPACE_ENVIRONMENT).unwrap_or_default();

    let dashboard = get_dashboard_url(
        global_value(matches, "dashboard").unwrap_or_default(),
        env_dashboard.as_str(),
        config.dashboard.as_str(),
        DEFAULT_DASHBOARD,
    );
    let namespace = get_namespace(
        global_value(matches, "namespace").unwrap_or_default(),
        env_namespace.as_str(),
        config.namespace.as_str(),
    );
    debug!("using dashboard {} and namespace {}", dashboard, namespace);

    let auth = ClientAuthE::new(
        global_value(matches, "username").unwrap_or_default(),
        global_value(matches, "password").unwrap_or_default(),
        global_value(matches, "token").unwrap_or_default(),
    );

    Target {
        dashboard,
        namespace,
        auth,
    }
}
