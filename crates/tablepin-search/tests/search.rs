//! Integration tests for `SearchAggregator` using wiremock HTTP mocks.

use tablepin_client::PinStoreClient;
use tablepin_core::Coordinates;
use tablepin_search::{SearchAggregator, SearchError, SearchResultEntry};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PinStoreClient {
    PinStoreClient::with_timeout(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn blank_query_issues_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);

    let groups = aggregator.search("   ", None).await.expect("should succeed");
    assert!(groups.is_empty());
    // MockServer verifies expect(0) on drop.
}

#[tokio::test]
async fn pizza_scenario_end_to_end() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": "a",
            "name": "Trattoria Nebbia",
            "location": [-73.9857, 40.7484],
            "foodMenu": [
                { "type": "header", "id": "h1", "title": "Mains" },
                { "type": "item", "id": "i1", "name": "Pizza Margherita", "price": "12.50" }
            ]
        },
        {
            "id": "b",
            "name": "Cafe Brume",
            "description": "Authentic pizza place",
            "drinksMenu": [
                { "type": "item", "id": "d1", "name": "Chinotto", "price": "3.00" }
            ]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .and(query_param("q", "pizza"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);
    let origin = Coordinates {
        latitude: 40.7484,
        longitude: -73.9857,
    };

    let groups = aggregator
        .search("pizza", Some(origin))
        .await
        .expect("should succeed");

    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].business_id, "a");
    assert!(groups[0].distance_km.unwrap().abs() < 1e-9);
    match &groups[0].entries[..] {
        [SearchResultEntry::MenuMatch { item_name, .. }] => {
            assert_eq!(item_name, "Pizza Margherita");
        }
        other => panic!("expected one menu match, got: {other:?}"),
    }

    assert_eq!(groups[1].business_id, "b");
    assert!(groups[1].distance_km.is_none());
    match &groups[1].entries[..] {
        [SearchResultEntry::BusinessDetails { description, .. }] => {
            assert_eq!(description.as_deref(), Some("Authentic pizza place"));
        }
        other => panic!("expected one details entry, got: {other:?}"),
    }
}

#[tokio::test]
async fn query_is_trimmed_before_the_store_sees_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .and(query_param("q", "ramen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);

    let groups = aggregator
        .search("  ramen  ", None)
        .await
        .expect("should succeed");
    assert!(groups.is_empty());
}

#[tokio::test]
async fn store_failure_surfaces_as_search_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);

    let err = aggregator.search("pizza", None).await.unwrap_err();
    assert!(matches!(err, SearchError::Store(_)), "got: {err}");
}

#[tokio::test]
async fn a_superseded_response_is_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .and(query_param("q", "pizza"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([
                    { "id": "stale", "name": "Pizza Stale" }
                ]))
                .set_delay(std::time::Duration::from_millis(250)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .and(query_param("q", "pasta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "fresh", "name": "Pasta Fresca" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);

    // The slow search starts first; the fast one supersedes it while its
    // response is still in flight.
    let (slow, fast) = tokio::join!(
        aggregator.search("pizza", None),
        aggregator.search("pasta", None)
    );

    assert!(
        matches!(slow, Err(SearchError::Superseded)),
        "stale response should be discarded, got: {slow:?}"
    );
    let fresh = fast.expect("newest search should succeed");
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].business_id, "fresh");
}

#[tokio::test]
async fn candidates_failing_the_client_side_rule_are_dropped() {
    let server = MockServer::start().await;

    // The store's own matching is broader than the canonical rule; a
    // candidate that matches no local field produces no group.
    let body = serde_json::json!([
        { "id": "x", "name": "Totally Unrelated", "description": "nothing here" }
    ]);

    Mock::given(method("GET"))
        .and(path("/pins/search/name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let aggregator = SearchAggregator::new(&client);

    let groups = aggregator.search("pizza", None).await.expect("should succeed");
    assert!(groups.is_empty());
}
