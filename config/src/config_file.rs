use log::debug;
use path_clean::PathClean;
use serde::Deserialize;
use std::env::VarError;
use std::path::{Path, PathBuf};
use utility::{Error, Result};

//AuthType auth type
pub type AuthType = String;

///BasicAuthType basic authentication type
pub const BASIC_AUTH_TYPE: &str = "basic";

/// CONFIG_LOCATION_ENV is the name of the env variable used
/// to configure the location of the config folder.
/// When not set, DEFAULT_DIR location is used.
pub const CONFIG_LOCATION_ENV: &str = "KUBELESS_CONFIG";

pub const DEFAULT_DIR: &str = "~/.kubeless";
pub const DEFAULT_FILE: &str = "config.yml";

/// DEFAULT_CI_DIR the 'kubeless' directory in the current directory,
/// used when running in a CI environment.
pub const DEFAULT_CI_DIR: &str = "./kubeless";

/// ConfigFile credentials per control plane server
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ConfigFile {
    #[serde(default)]
    #[serde(rename = "auths")]
    auth_configs: Vec<AuthConfig>, //`yaml:"auths"`
    #[serde(skip)]
    file_path: PathBuf,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct AuthConfig {
    #[serde(default)]
    pub server: String, //`yaml:"server,omitempty"`
    #[serde(default)]
    pub auth: AuthType, //`yaml:"auth,omitempty"`
    #[serde(default)]
    pub token: String, //`yaml:"token,omitempty"`
}

impl ConfigFile {
    /// new initializes a config file for the given file path
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<ConfigFile> {
        let file_path = file_path.as_ref();
        if file_path.as_os_str().is_empty() {
            return Err(Error::Custom(
                "can't create config with empty filePath".to_string(),
            ));
        }
        Ok(ConfigFile {
            auth_configs: vec![],
            file_path: file_path.to_path_buf(),
        })
    }

    /// load reads the yaml file from disk
    pub fn load(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            return Err(Error::Custom(
                "can't load config from non existent filePath".to_string(),
            ));
        }
        let data = std::fs::read_to_string(&self.file_path)?;
        debug!("loaded config from {}", self.file_path.display());
        let conf: ConfigFile = if data.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(data.as_str()).map_err(|e| Error::Custom(format!("{:?}", e)))?
        };
        self.auth_configs = conf.auth_configs;
        Ok(())
    }

    pub fn lookup(&self, server: &str) -> Option<&AuthConfig> {
        let server = server.trim_end_matches('/');
        self.auth_configs
            .iter()
            .find(|c| c.server.trim_end_matches('/') == server)
    }
}

/// config_dir returns the path to the config directory.
/// When
/// 1. CI = "true" and KUBELESS_CONFIG="", then it will return `./kubeless`, which is located in the current working directory.
/// 2. KUBELESS_CONFIG="<path>", then it will return the path value in KUBELESS_CONFIG
/// 3. CI = "" and KUBELESS_CONFIG="", then it will return the default location ~/.kubeless
pub fn config_dir() -> Result<String> {
    match std::env::var(CONFIG_LOCATION_ENV) {
        Ok(overrid) if !overrid.is_empty() => Ok(overrid),
        Ok(_) | Err(VarError::NotPresent) => {
            if is_running_in_ci() {
                Ok(DEFAULT_CI_DIR.into())
            } else {
                Ok(DEFAULT_DIR.into())
            }
        }
        Err(e) => Err(Error::Custom(format!("{:?}", e))),
    }
}

/// is_running_in_ci checks the ENV var CI and returns true if it's set to true or 1
fn is_running_in_ci() -> bool {
    match std::env::var("CI") {
        Ok(val) => val == "1" || val == "true",
        Err(_) => false,
    }
}

/// full path of the config file, `~` expanded
pub fn config_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    let dir = shellexpand::tilde(&dir);
    Ok(PathBuf::from(dir.into_owned()).join(DEFAULT_FILE).clean())
}

/// decodes base64 to the username and password
pub fn decode_auth(encoded: &str) -> Result<(String, String)> {
    let decoded = base64::decode(encoded).map_err(|e| Error::Custom(format!("{:?}", e)))?;
    let decoded = std::str::from_utf8(&decoded).map_err(|e| Error::Custom(format!("{:?}", e)))?;
    let mut data = decoded.splitn(2, ':');

    let username = data.next().unwrap_or_default().to_owned();
    let password = data
        .next()
        .ok_or_else(|| {
            Error::Custom("the data decoded to format not like username:password".to_string())
        })?
        .to_string();
    Ok((username, password))
}

/// returns the credentials stored for `server` in the file at `path`,
/// `None` when the file or the entry does not exist
pub fn lookup_auth_config_in<P: AsRef<Path>>(path: P, server: &str) -> Result<Option<AuthConfig>> {
    let mut cfg = ConfigFile::new(path)?;
    if !cfg.file_path.exists() {
        return Ok(None);
    }
    cfg.load()?;
    Ok(cfg.lookup(server).cloned())
}

/// returns the credentials stored for `server` in the default config file
pub fn lookup_auth_config(server: &str) -> Result<Option<AuthConfig>> {
    lookup_auth_config_in(config_path()?, server)
}
