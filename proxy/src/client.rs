use log::debug;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::ParseError;
use utility::types::meta::ApiStatus;
use utility::{Error, Result};

/// upper bound for a single round trip to the control plane
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

///an API client to perform all operations against the control plane
pub struct Client<'s> {
    pub(crate) http_client: reqwest::Client,
    ///ClientAuth a type implementing ClientAuth interface for client authentication
    pub client_auth: Box<&'s dyn ClientAuth>,
    ///server base url of the kubernetes API server
    pub server: Url,
}

///ClientAuth an interface for client authentication.
// to add authentication to the client implement this interface
pub trait ClientAuth: Sync {
    fn set(&self, req: &mut reqwest::RequestBuilder) -> Result<()>;
}

impl<'s> Client<'s> {
    /// initializes a new API client
    pub fn new(auth: Box<&'s dyn ClientAuth>, server: &str) -> Result<Client<'s>> {
        let url = server.trim_end_matches('/');
        let url = Url::parse(url).map_err(|e| Error::Custom(format!("{:?}", e)))?;
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;

        Ok(Client {
            http_client,
            client_auth: auth,
            server: url,
        })
    }

    ///create a new HTTP request with authentication
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: String,
    ) -> Result<reqwest::RequestBuilder> {
        let u = match url::Url::parse(path) {
            Ok(u) => u,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let url = format!("http://example.com/{}", path.trim_start_matches('/'));
                url::Url::parse(url.as_str())?
            }
            Err(e) => return Err(Error::Custom(format!("{:?}", e))),
        };

        // copy the server url and append the path to the copy so that
        // a server behind a path prefix keeps its prefix
        let mut endpoint = self.server.clone();
        let path = std::path::Path::new(endpoint.path()).join(u.path().trim_start_matches('/'));
        endpoint.set_path(path.to_string_lossy().to_string().as_str());
        endpoint.set_query(u.query());

        let mut req = self
            .http_client
            .request(method, endpoint)
            .header("Accept", "application/json");

        if !body.is_empty() {
            req = req.header("Content-Type", "application/json").body(body);
        } else {
            req = req.body("");
        }
        self.client_auth.set(&mut req)?;

        Ok(req)
    }

    ///perform an HTTP request
    pub(crate) async fn do_request(&self, req: reqwest::Request) -> Result<reqwest::Response> {
        debug!("{} {}", req.method(), req.url());
        let resp = self.http_client.execute(req).await?;
        Ok(resp)
    }

    /// GET `path` and decode the JSON answer. A 404 yields `Ok(None)`
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let req = self.new_request(Method::GET, path, "".into())?.build()?;
        let res = self.do_request(req).await?;

        match res.status() {
            StatusCode::OK => {
                let body = res.text().await?;
                Ok(Some(serde_json::from_str(body.as_str())?))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(Error::Status {
                code: StatusCode::UNAUTHORIZED.as_u16(),
                message: "unauthorized access, check the credentials configured for this server"
                    .to_string(),
            }),
            status => {
                let body = res.text().await?;
                Err(Error::Status {
                    code: status.as_u16(),
                    message: status_message(body),
                })
            }
        }
    }
}

/// the `message` of a kubernetes Status body, or the body itself when it is not one
pub(crate) fn status_message(body: String) -> String {
    match serde_json::from_str::<ApiStatus>(body.as_str()) {
        Ok(status) if !status.message.is_empty() => status.message,
        _ => body,
    }
}

#[test]
fn test_status_message() {
    struct TestCase {
        _name: &'static str,
        body: &'static str,
        expected: &'static str,
    }

    let cases = vec![
        TestCase {
            _name: "kubernetes status",
            body: r#"{"kind":"Status","status":"Failure","message":"functions.kubeless.io \"f\" is forbidden","reason":"Forbidden","code":403}"#,
            expected: "functions.kubeless.io \"f\" is forbidden",
        },
        TestCase {
            _name: "plain text",
            body: "upstream connect error",
            expected: "upstream connect error",
        },
        TestCase {
            _name: "status without message",
            body: r#"{"kind":"Status","code":500}"#,
            expected: r#"{"kind":"Status","code":500}"#,
        },
    ];

    for test in cases {
        assert_eq!(status_message(test.body.to_string()), test.expected);
    }
}
