use crate::cmds::{build_cli, run};
use clap::{App, ArgMatches};

use utility::Error;

pub mod cmds;
pub(crate) mod deploy;
pub(crate) mod function;
pub(crate) mod invoke;
pub(crate) mod nuclio;
pub(crate) mod output;
pub(crate) mod priority;
pub(crate) mod project;

type Result = std::result::Result<(), State>;

#[derive(thiserror::Error, Debug)]
pub enum State {
    #[error("command matched")]
    Matched,
    ///the failure was already shown to the user
    #[error("{0}")]
    Reported(String),
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Error(#[from] Error),
}

pub async fn exec() {
    let app = build_cli();
    let args: ArgMatches = app.get_matches();
    match run(&args).await {
        Ok(()) => {}
        Err(State::Reported(_)) => std::process::exit(1),
        Err(err) => {
            colour::e_red_ln!("{}", err.to_string());
            std::process::exit(1);
        }
    }
}

pub(crate) trait CommandAppend {
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static>;
}
