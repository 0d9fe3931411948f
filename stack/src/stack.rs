use crate::schema::{Function, Services};
use utility::{Error, Result};

const PROVIDER_NAME: &str = "kubeless";

///fetchYAML pulls in file from remote location such as GitHub raw file-view
pub(crate) async fn fetch_yaml(address: url::Url) -> Result<String> {
    Ok(reqwest::get(address.as_str()).await?.text().await?)
}

/// parse_yaml_file parses a local or remote serverless.yml into "services"
pub async fn parse_yaml_file(yaml_file: &str, envsubst: bool) -> Result<Services> {
    let data = match url::Url::parse(yaml_file) {
        Ok(url) if url.host().is_some() && (url.scheme() == "http" || url.scheme() == "https") => {
            fetch_yaml(url).await?
        }
        _ => std::fs::read_to_string(yaml_file)?,
    };
    parse_yaml_data(data.as_str(), envsubst)
}

pub fn substitute_vars(data: &str) -> Result<String> {
    let vars = std::env::vars().collect();
    utility::envsubst::substitute(data, &vars)
}

/// parse_yaml_data parses yaml data into "services"
pub fn parse_yaml_data(data: &str, envsubst: bool) -> Result<Services> {
    let data = if envsubst {
        substitute_vars(data)?
    } else {
        data.to_owned()
    };
    let mut services: Services =
        serde_yaml::from_str(data.as_str()).map_err(|e| Error::Custom(format!("{:?}", e)))?;

    if services.provider.name != PROVIDER_NAME {
        return Err(Error::Custom(format!(
            "['{}'] is the only valid 'provider.name' for the kubeless CLI, but you gave: {}",
            PROVIDER_NAME, services.provider.name
        )));
    }

    for (name, function) in services.functions.iter_mut() {
        function.name = name.clone();
        if function.handler.is_empty() {
            return Err(Error::Custom(format!(
                "function {} has no handler",
                function.name
            )));
        }
    }
    Ok(services)
}

impl Services {
    /// the description of one function, leaving the others untouched
    pub fn select(&self, name: &str) -> Result<&Function> {
        self.functions.get(name).ok_or_else(|| {
            Error::Custom(format!(
                "The function {} is not present in the current description",
                name
            ))
        })
    }
}

impl Function {
    /// runtime of the function, falling back to the provider runtime
    pub fn runtime_or<'a>(&'a self, provider_runtime: &'a str) -> &'a str {
        if self.runtime.is_empty() {
            provider_runtime
        } else {
            self.runtime.as_str()
        }
    }

    /// file holding the code: `code` when set, otherwise the handler file name
    /// followed by the extension of the runtime, e.g. `handler.hello` + `python2.7` -> `handler.py`
    pub fn code_file(&self, runtime: &str) -> String {
        if !self.code.is_empty() {
            return self.code.clone();
        }
        let file = self
            .handler
            .rsplitn(2, '.')
            .nth(1)
            .unwrap_or(self.handler.as_str());
        format!("{}{}", file, runtime_extension(runtime))
    }

    /// dependencies file name for the runtime, unless set explicitly
    pub fn deps_file(&self, runtime: &str) -> Option<String> {
        if !self.deps.is_empty() {
            return Some(self.deps.clone());
        }
        let deps = if runtime.starts_with("python") {
            "requirements.txt"
        } else if runtime.starts_with("nodejs") {
            "package.json"
        } else if runtime.starts_with("ruby") {
            "Gemfile"
        } else {
            return None;
        };
        Some(deps.to_string())
    }
}

fn runtime_extension(runtime: &str) -> &'static str {
    if runtime.starts_with("python") {
        ".py"
    } else if runtime.starts_with("nodejs") {
        ".js"
    } else if runtime.starts_with("ruby") {
        ".rb"
    } else if runtime.starts_with("php") {
        ".php"
    } else if runtime.starts_with("go") {
        ".go"
    } else {
        ""
    }
}
