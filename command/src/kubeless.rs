use crate::priority::{get_server_url, DEFAULT_SERVER, KUBELESS_SERVER_ENVIRONMENT};
use crate::CommandAppend;
use clap::{App, Arg, ArgMatches};
use log::debug;
use stack::schema::Services;
use stack::stack::parse_yaml_file;

pub const DEFAULT_YAML: &str = "serverless.yml";

pub(crate) struct Kubeless;

impl CommandAppend for Kubeless {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.arg(
            Arg::with_name("yaml")
                .long("yaml")
                .short("y")
                .global(true)
                .takes_value(true)
                .help("Path or URL of the serverless.yml describing the function(s)"),
        )
        .arg(
            Arg::with_name("server")
                .long("server")
                .short("s")
                .takes_value(true)
                .global(true)
                .help("Control plane URL starting with http(s)://"),
        )
        .arg(
            Arg::with_name("namespace")
                .long("namespace")
                .short("n")
                .takes_value(true)
                .global(true)
                .help("Namespace of the function(s)"),
        )
        .arg(
            Arg::with_name("token")
                .long("token")
                .short("k")
                .takes_value(true)
                .global(true)
                .help("Bearer token to use instead of the stored credentials"),
        )
    }
}

/// Settings shared by every command, resolved from the flags and serverless.yml
pub(crate) struct Target {
    pub services: Services,
    pub yaml_file: String,
    pub server: String,
    pub token: String,
    pub namespace_flag: String,
}

impl Target {
    pub(crate) async fn from_args(args: &ArgMatches<'_>) -> utility::Result<Target> {
        let yaml_file = match args.value_of("yaml") {
            Some(yaml) => yaml.to_string(),
            None => check_and_set_default_yaml()?.to_string(),
        };
        let services = parse_yaml_file(yaml_file.as_str(), true).await?;
        debug!(
            "loaded {} function(s) of service {} from {}",
            services.functions.len(),
            services.service,
            yaml_file
        );

        let environment_url = std::env::var(KUBELESS_SERVER_ENVIRONMENT).unwrap_or_default();
        let server = get_server_url(
            args.value_of("server").unwrap_or_default(),
            DEFAULT_SERVER,
            services.provider.server.as_str(),
            environment_url.as_str(),
        );

        Ok(Target {
            services,
            yaml_file,
            server,
            token: args.value_of("token").unwrap_or_default().to_string(),
            namespace_flag: args.value_of("namespace").unwrap_or_default().to_string(),
        })
    }

    /// directory the function files are resolved against
    pub(crate) fn base_dir(&self) -> std::path::PathBuf {
        if let Ok(url) = url::Url::parse(self.yaml_file.as_str()) {
            if url.host().is_some() {
                return std::path::PathBuf::new();
            }
        }
        std::path::Path::new(self.yaml_file.as_str())
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}

pub(crate) fn check_and_set_default_yaml() -> utility::Result<&'static str> {
    // Check if there is a default yaml file and set it
    std::fs::metadata(DEFAULT_YAML)
        .map(|_| DEFAULT_YAML)
        .map_err(utility::Error::Io)
}
