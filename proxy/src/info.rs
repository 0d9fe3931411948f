use crate::client::Client;
use crate::wait::DEFAULT_MAX_FETCH_FAILURES;
use futures::future::join_all;
use log::{debug, warn};
use schema::info::{Ambiguity, ConsolidatedInfo};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use utility::types::function::Function;
use utility::types::ingress::Ingress;
use utility::types::meta::ObjectMeta;
use utility::types::service::Service;
use utility::{Error, ResourceKind, Result, FUNCTION_LABEL};

pub const COLLECTION_RETRY_PAUSE: Duration = Duration::from_millis(200);

/// one outcome per requested function name
pub type InfoResults = BTreeMap<String, Result<ConsolidatedInfo>>;

impl<'s> Client<'s> {
    /// fetches services, functions and ingresses of `namespace` once per call and
    /// joins them for every requested name. A failure for one name never hides the others
    pub async fn aggregate(&self, namespace: &str, names: &[String]) -> InfoResults {
        debug!("aggregating {} function(s) in {}", names.len(), namespace);
        let (services, functions, ingresses) = tokio::join!(
            read_with_retries(ResourceKind::Service, move || self.list_services(namespace)),
            read_with_retries(ResourceKind::Function, move || self.list_functions(namespace)),
            read_with_retries(ResourceKind::Ingress, move || self.list_ingresses(namespace)),
        );
        consolidate(names, services, functions, ingresses)
    }

    /// runs one aggregation per namespace and waits for all of them
    pub async fn aggregate_all(&self, requests: &BTreeMap<String, Vec<String>>) -> InfoResults {
        let pending = requests
            .iter()
            .map(|(namespace, names)| self.aggregate(namespace.as_str(), names.as_slice()));
        join_all(pending).await.into_iter().flatten().collect()
    }
}

/// retries a collection read on transient failures, giving up with
/// `Error::Fetch` once `DEFAULT_MAX_FETCH_FAILURES` consecutive reads failed
async fn read_with_retries<T, F, Fut>(kind: ResourceKind, read: F) -> Result<Vec<T>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut failures = 0;
    loop {
        match read().await {
            Ok(items) => return Ok(items),
            Err(e) if e.is_transient() => {
                failures += 1;
                if failures >= DEFAULT_MAX_FETCH_FAILURES {
                    return Err(Error::Fetch {
                        kind,
                        attempts: failures,
                        reason: e.to_string(),
                    });
                }
                warn!(
                    "reading {}s failed ({}/{}): {}",
                    kind, failures, DEFAULT_MAX_FETCH_FAILURES, e
                );
                tokio::time::sleep(COLLECTION_RETRY_PAUSE).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// joins already fetched collections; a collection that failed to load fails
/// every name with the same error
pub fn consolidate(
    names: &[String],
    services: Result<Vec<Service>>,
    functions: Result<Vec<Function>>,
    ingresses: Result<Vec<Ingress>>,
) -> InfoResults {
    names
        .iter()
        .map(|name| {
            let res = match (&functions, &services, &ingresses) {
                (Err(e), _, _) => Err(collection_error(ResourceKind::Function, e)),
                (_, Err(e), _) => Err(collection_error(ResourceKind::Service, e)),
                (_, _, Err(e)) => Err(collection_error(ResourceKind::Ingress, e)),
                (Ok(functions), Ok(services), Ok(ingresses)) => {
                    consolidate_one(name, services, functions, ingresses)
                }
            };
            (name.clone(), res)
        })
        .collect()
}

// `Error` is not `Clone`; variants carrying plain data are rebuilt as they are
fn collection_error(kind: ResourceKind, e: &Error) -> Error {
    match e {
        Error::Fetch {
            kind,
            attempts,
            reason,
        } => Error::Fetch {
            kind: *kind,
            attempts: *attempts,
            reason: reason.clone(),
        },
        Error::Status { code, message } => Error::Status {
            code: *code,
            message: message.clone(),
        },
        other => Error::Custom(format!("unable to read the {}s: {}", kind, other)),
    }
}

/// the record(s) labelled `function=<name>`; when several match the first one wins
fn labelled<'a, T, F>(
    items: &'a [T],
    name: &str,
    kind: ResourceKind,
    meta: F,
    ambiguities: &mut Vec<Ambiguity>,
) -> Option<&'a T>
where
    F: Fn(&T) -> &ObjectMeta,
{
    let matches: Vec<&T> = items
        .iter()
        .filter(|item| meta(*item).has_label(FUNCTION_LABEL, name))
        .collect();
    let first = *matches.first()?;
    if matches.len() > 1 {
        ambiguities.push(Ambiguity {
            kind,
            function: name.to_string(),
            matches: matches.len(),
            chosen: meta(first).name.clone(),
        });
    }
    Some(first)
}

pub fn consolidate_one(
    name: &str,
    services: &[Service],
    functions: &[Function],
    ingresses: &[Ingress],
) -> Result<ConsolidatedInfo> {
    let function = functions
        .iter()
        .find(|f| f.metadata.name == name)
        .ok_or_else(|| Error::NotFound {
            kind: ResourceKind::Function,
            name: name.to_string(),
        })?;

    let mut ambiguities = Vec::new();
    let service = labelled(
        services,
        name,
        ResourceKind::Service,
        |s| &s.metadata,
        &mut ambiguities,
    )
    .ok_or_else(|| Error::NotFound {
        kind: ResourceKind::Service,
        name: name.to_string(),
    })?;

    let ingress = labelled(
        ingresses,
        name,
        ResourceKind::Ingress,
        |i| &i.metadata,
        &mut ambiguities,
    );
    let url = match ingress {
        Some(ingress) => Some(ingress_url(name, ingress)?),
        None => None,
    };

    Ok(ConsolidatedInfo {
        name: name.to_string(),
        function: function.clone(),
        service: service.clone(),
        ingress: ingress.cloned(),
        url,
        ambiguities,
    })
}

/// load balancer address followed by the first path of the first rule
pub fn ingress_url(name: &str, ingress: &Ingress) -> Result<String> {
    let malformed = |field: &'static str| Error::MalformedRoutingRecord {
        name: name.to_string(),
        ingress: ingress.metadata.name.clone(),
        field,
    };
    let address = ingress
        .load_balancer_address()
        .ok_or_else(|| malformed("status.loadBalancer.ingress[0].ip"))?;
    let path = ingress
        .first_path()
        .ok_or_else(|| malformed("spec.rules[0].http.paths[0].path"))?;
    Ok(format!("{}{}", address, path))
}
