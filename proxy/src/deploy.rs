use crate::client::{status_message, Client};
use crate::utils::{create_function_endpoint, function_path};
use crate::wait::{DeploymentWaiter, Ready, WaitOptions};
use chrono::Utc;
use log::info;
use reqwest::{Method, StatusCode};
use schema::function_spec::FunctionSpec;
use utility::{Error, Result};

/// Ack the control plane accepted the write
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub name: String,
    pub status: u16,
    /// resource version of the stored object, when the answer carried one
    pub resource_version: Option<String>,
}

/// Deployed outcome of a full deploy-and-wait round
#[derive(Debug, Clone, PartialEq)]
pub struct Deployed {
    pub ack: Ack,
    pub ready: Ready,
}

impl<'s> Client<'s> {
    /// submit replaces the function resource named `spec.name` with the body built from `spec`.
    /// The write is a full replace, so calling it again with the same spec is harmless.
    pub async fn submit(&self, spec: &FunctionSpec) -> Result<Ack> {
        let resource = spec.to_resource();
        let body = serde_json::to_string(&resource)?;

        let request = self
            .new_request(
                Method::PUT,
                function_path(spec.namespace.as_str(), spec.name.as_str()).as_str(),
                body,
            )?
            .build()?;
        let response = self.do_request(request).await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => {
                let status = response.status().as_u16();
                let stored: Option<utility::types::function::Function> =
                    serde_json::from_str(response.text().await?.as_str()).ok();
                Ok(Ack {
                    name: spec.name.clone(),
                    status,
                    resource_version: stored
                        .map(|f| f.metadata.resource_version)
                        .filter(|v| !v.is_empty()),
                })
            }
            status => {
                let body = response.text().await?;
                Err(Error::Submission {
                    name: spec.name.clone(),
                    code: status.as_u16(),
                    message: status_message(body),
                })
            }
        }
    }

    /// submits `spec` and blocks until the control plane reports the new generation as ready
    pub async fn deploy_and_wait(&self, spec: &FunctionSpec, opts: &WaitOptions) -> Result<Deployed> {
        // deadline origin; eligibility is compared at whole seconds by the waiter
        let submitted_at = Utc::now();
        let ack = self.submit(spec).await?;
        info!(
            "function {} submitted to {} ({})",
            ack.name,
            create_function_endpoint(
                self.server.as_str(),
                spec.name.as_str(),
                spec.namespace.as_str()
            )?,
            ack.status
        );

        let ready = DeploymentWaiter::new(self)
            .options(opts.clone())
            .wait(
                spec.namespace.as_str(),
                spec.name.as_str(),
                submitted_at,
                opts.timeout,
            )
            .await?;
        info!("function {} is ready", ready.name);
        Ok(Deployed { ack, ready })
    }
}
