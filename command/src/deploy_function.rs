use crate::kubeless::Target;
use crate::priority::get_namespace;
use crate::{CommandAppend, State};
use clap::{App, ArgMatches, SubCommand};
use log::debug;
use proxy::auth::ClientAuthE;
use proxy::wait::{WaitOptions, DEFAULT_MAX_FETCH_FAILURES};
use schema::function_spec::{FunctionSpec, HTTP_TRIGGER, PUBSUB_TRIGGER};
use stack::schema::Services;
use std::path::Path;
use std::time::Duration;
use utility::{Error, Result};

pub(crate) const DEFAULT_TIMEOUT: &str = "2m";
pub(crate) const DEFAULT_POLL_INTERVAL: &str = "1s";

pub(crate) struct DeployFunction;

impl CommandAppend for DeployFunction {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.subcommand(
            SubCommand::with_name("deploy-function")
                .about(r#"Redeploys a single function of the service and waits until it is ready.
	Example: `kubeless-cli deploy-function -f hello
kubeless-cli deploy-function -f hello -y ./serverless.yml --timeout 5m
kubeless-cli deploy-function -f hello -s https://10.0.0.1:6443 -k $TOKEN`"#)
                .args_from_usage(
                    "-f, --function <function>           'Name of the function in serverless.yml'
                     --timeout [timeout]                  'How long to wait for the function to become ready, e.g. 90s or 2m'
                     --poll-interval [poll-interval]      'Pause between two readiness checks, e.g. 1s'
                    ",
                ),
        )
    }
}

impl DeployFunction {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(d_args) = args.subcommand_matches("deploy-function") {
            let name = d_args.value_of("function").ok_or_else(|| {
                State::Custom(
                    "function name is required like: kubeless-cli deploy-function -f NAME"
                        .to_string(),
                )
            })?;
            let opts = WaitOptions {
                timeout: parse_duration_flag(d_args.value_of("timeout").unwrap_or(DEFAULT_TIMEOUT))?,
                poll_interval: parse_duration_flag(
                    d_args
                        .value_of("poll-interval")
                        .unwrap_or(DEFAULT_POLL_INTERVAL),
                )?,
                max_fetch_failures: DEFAULT_MAX_FETCH_FAILURES,
            };

            let target = Target::from_args(d_args).await?;
            let spec = build_function_spec(
                &target.services,
                name,
                target.namespace_flag.as_str(),
                target.base_dir().as_path(),
            )?;

            let client_auth = ClientAuthE::new(target.token.as_str(), target.server.as_str())?;
            let client = client_auth.get_client(target.server.as_str())?;

            colour::blue!("Redeploying {}...\n", spec.name);
            let deployed = tokio::select! {
                res = client.deploy_and_wait(&spec, &opts) => res?,
                _ = tokio::signal::ctrl_c() => {
                    return Err(State::Error(Error::Cancelled { name: spec.name.clone() }))
                }
            };
            debug!(
                "function {} ready after {} poll(s), observed at {}",
                deployed.ack.name, deployed.ready.polls, deployed.ready.observed_at
            );
            colour::green!(
                "Function {} successfully deployed in namespace {}\n",
                spec.name,
                spec.namespace
            );

            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}

fn parse_duration_flag(value: &str) -> Result<Duration> {
    parse_duration::parse(value)
        .map_err(|e| Error::Custom(format!("invalid duration {}: {}", value, e)))
}

/// builds the resource to submit for `name`, reading its code and dependencies
/// relative to `base_dir`. The parsed description is left untouched.
pub(crate) fn build_function_spec(
    services: &Services,
    name: &str,
    namespace_flag: &str,
    base_dir: &Path,
) -> Result<FunctionSpec> {
    let function = services.select(name)?;
    let runtime = function
        .runtime_or(services.provider.runtime.as_str())
        .to_string();
    if runtime.is_empty() {
        return Err(Error::Custom(format!(
            "no runtime set for function {} nor for the provider",
            name
        )));
    }

    let code_file = base_dir.join(function.code_file(runtime.as_str()));
    let code = std::fs::read_to_string(&code_file).map_err(|e| {
        Error::Custom(format!(
            "unable to read the code of {} from {}: {}",
            name,
            code_file.display(),
            e
        ))
    })?;

    let deps = match function.deps_file(runtime.as_str()) {
        Some(file) => {
            let path = base_dir.join(file.as_str());
            if path.exists() {
                std::fs::read_to_string(path)?
            } else if function.deps.is_empty() {
                String::new()
            } else {
                return Err(Error::Custom(format!(
                    "dependencies file {} of {} not found",
                    path.display(),
                    name
                )));
            }
        }
        None => String::new(),
    };

    let (trigger_type, topic) = if function.topic.is_empty() {
        (HTTP_TRIGGER, None)
    } else {
        (PUBSUB_TRIGGER, Some(function.topic.clone()))
    };

    Ok(FunctionSpec {
        name: name.to_string(),
        namespace: get_namespace(
            namespace_flag,
            function.namespace.as_str(),
            services.provider.namespace.as_str(),
        ),
        handler: function.handler.clone(),
        runtime,
        deps,
        trigger_type: trigger_type.to_string(),
        topic,
        function: code,
        description: Some(function.description.clone()).filter(|d| !d.is_empty()),
        labels: function
            .labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    })
}
