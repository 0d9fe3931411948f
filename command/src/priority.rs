pub(crate) const KUBELESS_SERVER_ENVIRONMENT: &str = "KUBELESS_SERVER";
pub(crate) const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
pub(crate) const DEFAULT_NAMESPACE: &str = "default";

/// get_server_url picks the control plane address: flag, then serverless.yml, then environment
pub(crate) fn get_server_url(
    argument_url: &str,
    default_url: &str,
    yaml_url: &str,
    environment_url: &str,
) -> String {
    let server_url = if !argument_url.is_empty() && argument_url != default_url {
        argument_url
    } else if !yaml_url.is_empty() && yaml_url != default_url {
        yaml_url
    } else if !environment_url.is_empty() {
        environment_url
    } else {
        default_url
    };

    let server_url = server_url.trim_end_matches('/').to_ascii_lowercase();
    if server_url.starts_with("http://") || server_url.starts_with("https://") {
        server_url
    } else {
        format!("http://{}", server_url)
    }
}

/// get_namespace the namespace flag wins, then the function's own namespace, then the provider's
pub(crate) fn get_namespace(
    flag_namespace: &str,
    function_namespace: &str,
    provider_namespace: &str,
) -> String {
    [flag_namespace, function_namespace, provider_namespace]
        .iter()
        .find(|ns| !ns.is_empty())
        .unwrap_or(&DEFAULT_NAMESPACE)
        .to_string()
}
