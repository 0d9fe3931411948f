use utility::{Error, Result};

pub const SERVICES_PATH: &str = "/api/v1/namespaces/{namespace}/services";
pub const FUNCTIONS_PATH: &str = "/apis/kubeless.io/v1beta1/namespaces/{namespace}/functions";
pub const INGRESSES_PATH: &str = "/apis/extensions/v1beta1/namespaces/{namespace}/ingresses";
pub const DEFAULT_NAMESPACE: &str = "default";

fn in_namespace(template: &str, namespace: &str) -> String {
    let namespace = if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    };
    template.replace("{namespace}", namespace)
}

pub fn services_path(namespace: &str) -> String {
    in_namespace(SERVICES_PATH, namespace)
}

pub fn functions_path(namespace: &str) -> String {
    in_namespace(FUNCTIONS_PATH, namespace)
}

pub fn function_path(namespace: &str, function_name: &str) -> String {
    format!("{}/{}", functions_path(namespace), function_name)
}

pub fn ingresses_path(namespace: &str) -> String {
    in_namespace(INGRESSES_PATH, namespace)
}

/// absolute url of a function resource on `server`
pub fn create_function_endpoint(
    server: &str,
    function_name: &str,
    namespace: &str,
) -> Result<String> {
    if function_name.is_empty() {
        return Err(Error::Custom("function name is required".to_string()));
    }
    let mut url = url::Url::parse(server).map_err(|e| Error::Custom(format!("{:?}", e)))?;
    let base = url.path().trim_end_matches('/').to_string();
    url.set_path(format!("{}{}", base, function_path(namespace, function_name)).as_str());
    Ok(url.to_string())
}
