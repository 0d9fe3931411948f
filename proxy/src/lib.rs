use crate::client::ClientAuth;

pub mod auth;
pub mod client;
pub mod deploy;
pub mod functions;
pub mod info;
pub mod ingress;
pub mod services;
pub mod utils;
pub mod wait;

#[derive(Clone)]
pub struct TestAuth;

impl ClientAuth for TestAuth {
    fn set(&self, _req: &mut reqwest::RequestBuilder) -> utility::Result<()> {
        Ok(())
    }
}
