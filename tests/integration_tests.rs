//! Integration tests using a mock GraphQL server
//!
//! Exercise the full end-to-end flow: real HTTP client → scripted paginated
//! endpoint → fully merged, cursor-free result tree.

use gql_harvest::cursor::normalize;
use gql_harvest::{depaginate, Error, GraphQlClient, GraphQlClientConfig, Variables};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY: &str = "
query($cursor:String) {
  items(first:100, after:$cursor) {
    pageInfo { endCursor hasNextPage }
    nodes { id }
  }
}
";

fn client_for(server: &MockServer) -> GraphQlClient {
    let config = GraphQlClientConfig::builder()
        .endpoint(format!("{}/graphql", server.uri()))
        .token("test-token")
        .build();
    GraphQlClient::new(config).unwrap()
}

// ============================================================================
// Two-page merge through the real client
// ============================================================================

#[tokio::test]
async fn test_depaginate_two_pages_end_to_end() {
    let server = MockServer::start().await;

    // Second page, matched on the cursor variable.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({"variables": {"cursor": "c1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": {
                    "pageInfo": {"endCursor": null, "hasNextPage": false},
                    "nodes": [{"id": 3}]
                }
            }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // First page: any other request.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": {
                    "pageInfo": {"endCursor": "c1", "hasNextPage": true},
                    "nodes": [{"id": 1}, {"id": 2}]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = normalize(&json!({"cursor": {"path": ["items"]}})).unwrap();

    let tree = depaginate(&client, QUERY, &table, Variables::new())
        .await
        .unwrap();

    assert_eq!(
        tree,
        json!({"items": {"nodes": [{"id": 1}, {"id": 2}, {"id": 3}]}})
    );
}

// ============================================================================
// Three-level nesting through the real client
// ============================================================================

#[tokio::test]
async fn test_depaginate_nested_levels_end_to_end() {
    let server = MockServer::start().await;

    let first_page = json!({
        "data": {
            "repository": {
                "issues": {
                    "pageInfo": {"endCursor": "i1", "hasNextPage": true},
                    "nodes": [{"number": 1}, {"number": 2}]
                },
                "pullRequests": {
                    "pageInfo": {"endCursor": "p1", "hasNextPage": false},
                    "nodes": [
                        {
                            "number": 10,
                            "timelineItems": {
                                "pageInfo": {"endCursor": "t1", "hasNextPage": true},
                                "nodes": [{"kind": "A"}]
                            }
                        },
                        {
                            "number": 11,
                            "timelineItems": {
                                "pageInfo": {"endCursor": null, "hasNextPage": false},
                                "nodes": [{"kind": "B"}]
                            }
                        }
                    ]
                }
            }
        }
    });

    let issues_drained = json!({
        "data": {
            "repository": {
                "issues": {
                    "pageInfo": {"endCursor": "i2", "hasNextPage": false},
                    "nodes": [{"number": 3}]
                },
                "pullRequests": first_page["data"]["repository"]["pullRequests"].clone()
            }
        }
    });

    let timeline_page_two = json!({
        "data": {
            "repository": {
                "issues": issues_drained["data"]["repository"]["issues"].clone(),
                "pullRequests": {
                    "pageInfo": {"endCursor": "p1", "hasNextPage": false},
                    "nodes": [
                        {
                            "number": 10,
                            "timelineItems": {
                                "pageInfo": {"endCursor": "t2", "hasNextPage": false},
                                "nodes": [{"kind": "C"}]
                            }
                        },
                        {
                            "number": 11,
                            "timelineItems": {
                                "pageInfo": {"endCursor": null, "hasNextPage": false},
                                "nodes": [{"kind": "B"}]
                            }
                        }
                    ]
                }
            }
        }
    });

    // Timeline page two: the only request carrying cursor3.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"cursor3": "t1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_page_two))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // Issues page two, and the nested sub-run's fresh first call: both
    // carry cursor1 without cursor3.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"cursor1": "i1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues_drained))
        .with_priority(2)
        .expect(2)
        .mount(&server)
        .await;

    // The initial call.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = normalize(&json!({
        "cursor1": ["repository", "issues"],
        "cursor2": {
            "path": ["repository", "pullRequests"],
            "next": {"cursor3": ["timelineItems"]}
        }
    }))
    .unwrap();

    let tree = depaginate(&client, QUERY, &table, Variables::new())
        .await
        .unwrap();

    assert_eq!(
        tree,
        json!({
            "repository": {
                "issues": {
                    "nodes": [{"number": 1}, {"number": 2}, {"number": 3}]
                },
                "pullRequests": {
                    "nodes": [
                        {
                            "number": 10,
                            "timelineItems": {"nodes": [{"kind": "A"}, {"kind": "C"}]}
                        },
                        {
                            "number": 11,
                            "timelineItems": {"nodes": [{"kind": "B"}]}
                        }
                    ]
                }
            }
        })
    );
}

// ============================================================================
// Error propagation
// ============================================================================

#[tokio::test]
async fn test_protocol_error_on_second_page_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"cursor": "c1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "something went wrong"}]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": {
                    "pageInfo": {"endCursor": "c1", "hasNextPage": true},
                    "nodes": [{"id": 1}]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = normalize(&json!({"cursor": ["items"]})).unwrap();

    let err = depaginate(&client, QUERY, &table, Variables::new())
        .await
        .unwrap_err();

    match err {
        Error::Query { errors } => {
            assert_eq!(errors[0]["message"], "something went wrong");
        }
        other => panic!("expected Query error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_error_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = normalize(&json!({"cursor": ["items"]})).unwrap();

    let err = depaginate(&client, QUERY, &table, Variables::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport { status: 500, .. }));
}

#[tokio::test]
async fn test_missing_credential_never_reaches_the_wire() {
    let server = MockServer::start().await;

    let config = GraphQlClientConfig::builder()
        .endpoint(format!("{}/graphql", server.uri()))
        .build();
    let client = GraphQlClient::new(config).unwrap();
    let table = normalize(&json!({"cursor": ["items"]})).unwrap();

    let err = depaginate(&client, QUERY, &table, Variables::new())
        .await
        .unwrap_err();
    assert!(err.is_credential());

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
