use crate::info_format::{format_message, FormatOptions};
use crate::kubeless::Target;
use crate::priority::get_namespace;
use crate::{CommandAppend, State};
use clap::{App, ArgMatches, SubCommand};
use log::warn;
use proxy::auth::ClientAuthE;
use proxy::info::InfoResults;
use stack::schema::Services;
use std::collections::BTreeMap;
use utility::Result;

pub(crate) struct Info;

impl CommandAppend for Info {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.subcommand(
            SubCommand::with_name("info")
                .about(r#"Display information about the functions of the service.
	Example: `kubeless-cli info
kubeless-cli info -f hello -v
kubeless-cli info --no-color -y ./serverless.yml`"#)
                .args_from_usage(
                    "-f, --function [function]   'Only show this function'
                     -v, --verbose               'Display metadata'
                     --no-color                  'Disable colored output'
                    ",
                ),
        )
    }
}

impl Info {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(i_args) = args.subcommand_matches("info") {
            let options = FormatOptions {
                color: !i_args.is_present("no-color"),
                verbose: i_args.is_present("verbose"),
            };
            let target = Target::from_args(i_args).await?;
            let requests = group_by_namespace(
                &target.services,
                i_args.value_of("function"),
                target.namespace_flag.as_str(),
            )?;

            let client_auth = ClientAuthE::new(target.token.as_str(), target.server.as_str())?;
            let client = client_auth.get_client(target.server.as_str())?;
            let results = client.aggregate_all(&requests).await;

            let (message, failed) = render(&results, options);
            println!("{}", message);
            if failed > 0 {
                return Err(State::Custom(format!(
                    "unable to get the information of {} function(s)",
                    failed
                )));
            }
            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}

/// function names to look up, grouped by the namespace they live in
pub(crate) fn group_by_namespace(
    services: &Services,
    only: Option<&str>,
    namespace_flag: &str,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut requests: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let functions = match only {
        Some(name) => vec![services.select(name)?],
        None => services.functions.values().collect(),
    };
    for function in functions {
        let namespace = get_namespace(
            namespace_flag,
            function.namespace.as_str(),
            services.provider.namespace.as_str(),
        );
        requests
            .entry(namespace)
            .or_default()
            .push(function.name.clone());
    }
    Ok(requests)
}

/// concatenates the report of every name in name order, returns it with the number of failures
pub(crate) fn render(results: &InfoResults, options: FormatOptions) -> (String, usize) {
    let mut message = String::new();
    let mut failed = 0;
    for (name, outcome) in results {
        match outcome {
            Ok(info) => {
                for ambiguity in &info.ambiguities {
                    warn!("{}", ambiguity);
                }
                message.push_str(format_message(info, options).as_str());
            }
            Err(e) => {
                failed += 1;
                message.push_str(format!("\nUnable to get the information of {}: {}", name, e).as_str());
            }
        }
    }
    (message, failed)
}
