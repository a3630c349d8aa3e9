//! Verify endpoints against JSON test vectors stored in `test-vectors/`.
//!
//! Each case declares an endpoint the way a caller would write it in a config
//! file, plus the structured URL, wire URL and request it must produce,
//! or the error it must fail with.

use endpoint_core::{Endpoint, EndpointError, HttpMethod, QueryItem, UrlComponents};
use serde_json::Value;

fn opt_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn expected_components(value: &Value) -> UrlComponents {
    UrlComponents {
        scheme: value["scheme"].as_str().unwrap().to_string(),
        host: value["host"].as_str().unwrap().to_string(),
        port: value["port"].as_u64().map(|p| p as u16),
        user: opt_str(&value["user"]),
        password: opt_str(&value["password"]),
        path: value["path"].as_str().unwrap().to_string(),
        query_items: if value["query_items"].is_null() {
            None
        } else {
            Some(
                pairs(&value["query_items"])
                    .into_iter()
                    .map(|(name, value)| QueryItem::new(name, value))
                    .collect(),
            )
        },
    }
}

#[test]
fn endpoint_test_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint: Endpoint = serde_json::from_value(case["endpoint"].clone()).unwrap();

        if let Some(expected_error) = case.get("expected_error") {
            match expected_error.as_str().unwrap() {
                "UrlFormation" => {
                    assert_eq!(endpoint.url(), Err(EndpointError::UrlFormation), "{name}: url");
                    assert_eq!(
                        endpoint.url_request(),
                        Err(EndpointError::UrlFormation),
                        "{name}: request"
                    );
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        // Structured URL
        assert_eq!(
            endpoint.url_components(),
            expected_components(&case["expected_components"]),
            "{name}: components"
        );

        // Request
        let expected_req = &case["expected_request"];
        let req = endpoint.url_request().unwrap();
        assert_eq!(req.uri(), case["expected_url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.url, endpoint.url().unwrap(), "{name}: request url");
        assert_eq!(req.port, endpoint.url_components().port, "{name}: port");
        let method: HttpMethod = expected_req["method"].as_str().unwrap().parse().unwrap();
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.headers, pairs(&expected_req["headers"]), "{name}: headers");
        assert_eq!(
            req.body.as_deref().map(|b| std::str::from_utf8(b).unwrap()),
            expected_req["body"].as_str(),
            "{name}: body"
        );
        assert!(req.allows_cellular_access, "{name}: cellular access");
    }
}
