use crate::deploy_function::DeployFunction;
use crate::info::Info;
use crate::kubeless::Kubeless;
use crate::{CommandAppend, State};
use clap::{App, AppSettings, ArgMatches};
use utility::{Error, Result};

const WELCOME_MSG: &str = "Deploy kubeless functions and inspect them from the command line";

pub fn build_cli() -> App<'static, 'static> {
    let app = App::new("kubeless-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about(WELCOME_MSG);

    let app = Kubeless::append_subcommand(app);
    let app = DeployFunction::append_subcommand(app);
    Info::append_subcommand(app)
}

pub async fn run(args: &ArgMatches<'_>) -> Result<()> {
    match dispatch_command(args).await {
        Ok(_) => Err(Error::Custom(
            "command not matched please contact the development team".to_string(),
        )),
        Err(s) => match s {
            State::Matched => Ok(()),
            State::Error(e) => Err(e),
            state => Err(Error::Custom(state.to_string())),
        },
    }
}

pub async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
    DeployFunction::dispatch_command(args).await?;
    Info::dispatch_command(args).await
}
