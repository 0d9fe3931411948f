use lazy_static::lazy_static;
use proxy::client::Client;
use proxy::utils::{functions_path, ingresses_path, services_path};
use proxy::TestAuth;
use std::collections::BTreeMap;
use utility::{Error, ResourceKind};

lazy_static! {
    static ref SERVICES: serde_json::Value = serde_json::json!({
        "kind": "ServiceList",
        "items": [{
            "metadata": {
                "name": "f",
                "labels": {"function": "f"},
                "selfLink": "/api/v1/namespaces/default/services/f",
                "uid": "010",
                "creationTimestamp": "2017-08-29T10:00:00Z"
            },
            "spec": {
                "clusterIP": "10.0.0.1",
                "type": "ClusterIP",
                "ports": [{"name": "http", "protocol": "TCP", "port": 8080, "targetPort": 8080}]
            }
        }]
    });
    static ref FUNCTIONS: serde_json::Value = serde_json::json!({
        "kind": "FunctionList",
        "items": [{
            "metadata": {"name": "f", "uid": "020"},
            "spec": {"handler": "handler.f", "runtime": "python2.7", "deps": "", "type": "HTTP"}
        }]
    });
    static ref INGRESSES: serde_json::Value = serde_json::json!({
        "kind": "IngressList",
        "items": [{
            "metadata": {"name": "f", "labels": {"function": "f"}},
            "spec": {"rules": [{"http": {"paths": [{"path": "/f"}]}}]},
            "status": {"loadBalancer": {"ingress": [{"ip": "1.2.3.4"}]}}
        }]
    });
}

fn mock_collections(namespace: &str, ingresses: &serde_json::Value) -> Vec<mockito::Mock> {
    vec![
        mockito::mock("GET", services_path(namespace).as_str())
            .with_status(200)
            .with_body(SERVICES.to_string())
            .create(),
        mockito::mock("GET", functions_path(namespace).as_str())
            .with_status(200)
            .with_body(FUNCTIONS.to_string())
            .create(),
        mockito::mock("GET", ingresses_path(namespace).as_str())
            .with_status(200)
            .with_body(ingresses.to_string())
            .create(),
    ]
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_aggregate_with_ingress() {
    let ns = "info-with-ingress";
    let _moks = mock_collections(ns, &INGRESSES);
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let res = client.aggregate(ns, &names(&["f"])).await;
    let info = res["f"].as_ref().unwrap();
    assert_eq!(info.url.as_deref(), Some("1.2.3.4/f"));
    assert_eq!(info.service.spec.cluster_ip, "10.0.0.1");
    assert_eq!(info.function.spec.handler, "handler.f");
}

#[tokio::test]
async fn test_aggregate_without_ingress() {
    let ns = "info-without-ingress";
    let _moks = mock_collections(ns, &serde_json::json!({"items": []}));
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let res = client.aggregate(ns, &names(&["f"])).await;
    let info = res["f"].as_ref().unwrap();
    assert_eq!(info.url, None);
}

#[tokio::test]
async fn test_aggregate_one_missing_name() {
    let ns = "info-missing-name";
    let moks = mock_collections(ns, &INGRESSES);
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let res = client.aggregate(ns, &names(&["f", "g"])).await;
    assert_eq!(res.len(), 2);
    assert!(res["f"].is_ok());
    assert!(matches!(
        res["g"],
        Err(Error::NotFound {
            kind: ResourceKind::Function,
            ..
        })
    ));
    // every collection is read once for the whole request
    for mok in moks {
        mok.assert();
    }
}

#[tokio::test]
async fn test_aggregate_collection_failure() {
    let ns = "info-collection-failure";
    let _services = mockito::mock("GET", services_path(ns).as_str())
        .with_status(200)
        .with_body(SERVICES.to_string())
        .create();
    let functions = mockito::mock("GET", functions_path(ns).as_str())
        .with_status(500)
        .with_body("etcdserver: request timed out")
        .expect(3)
        .create();
    let _ingresses = mockito::mock("GET", ingresses_path(ns).as_str())
        .with_status(200)
        .with_body(INGRESSES.to_string())
        .create();
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let res = client.aggregate(ns, &names(&["f"])).await;
    match &res["f"] {
        Err(Error::Fetch {
            kind,
            attempts,
            reason,
        }) => {
            assert_eq!(*kind, ResourceKind::Function);
            assert_eq!(*attempts, 3);
            assert!(reason.contains("etcdserver: request timed out"));
        }
        other => panic!("unexpected result {:?}", other),
    }
    functions.assert();
}

#[tokio::test]
async fn test_aggregate_forbidden_collection() {
    let ns = "info-collection-forbidden";
    let services = mockito::mock("GET", services_path(ns).as_str())
        .with_status(403)
        .with_body(
            serde_json::json!({
                "kind": "Status",
                "status": "Failure",
                "message": "services is forbidden",
                "code": 403
            })
            .to_string(),
        )
        .expect(1)
        .create();
    let _functions = mockito::mock("GET", functions_path(ns).as_str())
        .with_status(200)
        .with_body(FUNCTIONS.to_string())
        .create();
    let _ingresses = mockito::mock("GET", ingresses_path(ns).as_str())
        .with_status(200)
        .with_body(INGRESSES.to_string())
        .create();
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let res = client.aggregate(ns, &names(&["f", "g"])).await;
    assert_eq!(res.len(), 2);
    for (_, outcome) in &res {
        assert!(
            matches!(outcome, Err(Error::Status { code: 403, .. })),
            "unexpected result {:?}",
            outcome
        );
    }
    services.assert();
}

#[tokio::test]
async fn test_aggregate_all_namespaces() {
    let first = "info-all-first";
    let second = "info-all-second";
    let _first = mock_collections(first, &INGRESSES);
    let _second = mock_collections(second, &serde_json::json!({"items": []}));
    let cli_auth = TestAuth {};
    let add = format!("http://{}", mockito::server_address().to_string());
    let client = Client::new(Box::new(&cli_auth), add.as_str()).unwrap();

    let mut requests = BTreeMap::new();
    requests.insert(first.to_string(), names(&["f"]));
    requests.insert(second.to_string(), names(&["g"]));
    let res = client.aggregate_all(&requests).await;

    assert_eq!(res.len(), 2);
    assert_eq!(res["f"].as_ref().unwrap().url.as_deref(), Some("1.2.3.4/f"));
    assert!(res["g"].is_err());
}
