use crate::client::{Client, ClientAuth};
use config::config_file::{decode_auth, lookup_auth_config, BASIC_AUTH_TYPE};
use reqwest::RequestBuilder;
use utility::{Error, Result};

///basic authentication type
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

///bearer token
pub struct BearerToken {
    token: String,
}

///no credentials, e.g. behind `kubectl proxy`
pub struct Anonymous;

impl ClientAuth for BasicAuth {
    fn set(&self, req: &mut RequestBuilder) -> Result<()> {
        let req2 = req
            .try_clone()
            .ok_or_else(|| Error::Custom(format!("can't clone request :{:?}", req)))?;
        *req = req2.basic_auth(self.username.as_str(), Some(self.password.as_str()));
        Ok(())
    }
}

impl ClientAuth for BearerToken {
    fn set(&self, req: &mut RequestBuilder) -> Result<()> {
        let req2 = req
            .try_clone()
            .ok_or_else(|| Error::Custom(format!("can't clone request :{:?}", req)))?;
        *req = req2.header("Authorization", "Bearer ".to_string() + self.token.as_str());
        Ok(())
    }
}

impl ClientAuth for Anonymous {
    fn set(&self, _req: &mut RequestBuilder) -> Result<()> {
        Ok(())
    }
}

pub enum ClientAuthE {
    BasicAuth(BasicAuth),
    BearerToken(BearerToken),
    Anonymous(Anonymous),
}

impl ClientAuthE {
    ///picks the credentials for `server`: an explicit token wins over the config file
    pub fn new(token: &str, server: &str) -> Result<ClientAuthE> {
        if !token.is_empty() {
            return Ok(ClientAuthE::BearerToken(BearerToken {
                token: token.to_string(),
            }));
        }
        let config = match lookup_auth_config(server)? {
            Some(config) => config,
            None => return Ok(ClientAuthE::Anonymous(Anonymous)),
        };
        if config.auth == BASIC_AUTH_TYPE {
            let (username, password) = decode_auth(config.token.as_str())?;
            Ok(ClientAuthE::BasicAuth(BasicAuth { username, password }))
        } else if !config.token.is_empty() {
            Ok(ClientAuthE::BearerToken(BearerToken {
                token: config.token,
            }))
        } else {
            Ok(ClientAuthE::Anonymous(Anonymous))
        }
    }

    pub fn get_client(&self, server: &str) -> Result<Client> {
        match self {
            ClientAuthE::BasicAuth(basic) => Client::new(Box::new(basic), server),
            ClientAuthE::BearerToken(bearer) => Client::new(Box::new(bearer), server),
            ClientAuthE::Anonymous(anonymous) => Client::new(Box::new(anonymous), server),
        }
    }
}
