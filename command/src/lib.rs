use crate::cmds::{build_cli, run};
use clap::{App, ArgMatches};

use utility::Error;

pub mod cmds;
pub(crate) mod deploy_function;
pub(crate) mod info;
pub mod info_format;
pub(crate) mod kubeless;
pub(crate) mod priority;

type Result = std::result::Result<(), State>;

#[derive(thiserror::Error, Debug)]
pub enum State {
    #[error("command matched")]
    Matched,
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Error(#[from] Error),
}

/// parses the command line, runs the matched command and returns the process exit code
pub async fn exec() -> i32 {
    let app = build_cli();
    let args: ArgMatches = app.get_matches();
    match run(&args).await {
        Ok(()) => 0,
        Err(err) => {
            colour::red!("{}\n", err);
            1
        }
    }
}

pub(crate) trait CommandAppend {
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static>;
}
