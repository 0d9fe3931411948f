use proxy::utils::{create_function_endpoint, function_path, ingresses_path, services_path};

#[test]
fn test_collection_paths() {
    struct TestCase {
        _title: &'static str,
        namespace: &'static str,
        expected_services: &'static str,
        expected_ingresses: &'static str,
    }
    let cases = vec![
        TestCase {
            _title: "Namespace is set",
            namespace: "production",
            expected_services: "/api/v1/namespaces/production/services",
            expected_ingresses: "/apis/extensions/v1beta1/namespaces/production/ingresses",
        },
        TestCase {
            _title: "Namespace is not set",
            namespace: "",
            expected_services: "/api/v1/namespaces/default/services",
            expected_ingresses: "/apis/extensions/v1beta1/namespaces/default/ingresses",
        },
    ];

    for case in cases {
        assert_eq!(services_path(case.namespace), case.expected_services);
        assert_eq!(ingresses_path(case.namespace), case.expected_ingresses);
    }
}

#[test]
fn test_function_path() {
    assert_eq!(
        function_path("production", "cows"),
        "/apis/kubeless.io/v1beta1/namespaces/production/functions/cows"
    );
}

#[test]
fn test_create_function_endpoint() {
    struct Case {
        _title: &'static str,
        server: &'static str,
        namespace: &'static str,
        function_name: &'static str,
        expected_err: bool,
        expected_endpoint: &'static str,
    }
    let cases = vec![
        Case {
            _title: "Namespace is set",
            server: "http://127.0.0.1:8080",
            namespace: "production",
            function_name: "cows",
            expected_err: false,
            expected_endpoint:
                "http://127.0.0.1:8080/apis/kubeless.io/v1beta1/namespaces/production/functions/cows",
        },
        Case {
            _title: "Server behind a path prefix",
            server: "http://127.0.0.1:8001/k8s/",
            function_name: "cows",
            namespace: "",
            expected_err: false,
            expected_endpoint:
                "http://127.0.0.1:8001/k8s/apis/kubeless.io/v1beta1/namespaces/default/functions/cows",
        },
        Case {
            _title: "Bad server formatting",
            server: "127.0.0.1:8080",
            namespace: "production",
            function_name: "cows",
            expected_err: true,
            expected_endpoint: "",
        },
        Case {
            _title: "No function name",
            server: "http://127.0.0.1:8080",
            namespace: "production",
            function_name: "",
            expected_err: true,
            expected_endpoint: "",
        },
    ];

    for case in cases {
        match create_function_endpoint(case.server, case.function_name, case.namespace) {
            Ok(endpoint) => {
                assert!(!case.expected_err);
                assert_eq!(endpoint, case.expected_endpoint);
            }
            Err(_) => {
                assert!(case.expected_err);
            }
        }
    }
}
