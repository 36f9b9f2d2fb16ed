//! Integration tests for `MenuEditor` using wiremock HTTP mocks.

use tablepin_client::PinStoreClient;
use tablepin_core::{MenuEntry, MenuKind};
use tablepin_menu::{InsertPosition, ItemDraft, MenuEditor, MenuError, RecoveryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pin_document() -> serde_json::Value {
    serde_json::json!({
        "id": "b1",
        "name": "Trattoria Nebbia",
        "creator": "user-9",
        "foodMenu": [
            { "type": "header", "id": "h1", "title": "Mains" },
            { "type": "item", "id": "i1", "name": "Pizza Margherita", "price": "12.50" },
            { "type": "item", "id": "i2", "name": "Lasagna", "price": "11.00",
              "description": "baked fresh" }
        ],
        "drinksMenu": [
            { "type": "item", "id": "d1", "name": "Chinotto", "price": "3.00" }
        ]
    })
}

async fn mount_get_pin(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pins/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pin_document()))
        .mount(server)
        .await;
}

async fn mount_put_menu(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("PUT"))
        .and(path("/pins/b1/menu"))
        .respond_with(ResponseTemplate::new(status).set_body_json(pin_document()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn test_client(base_url: &str) -> PinStoreClient {
    PinStoreClient::with_timeout(base_url, 30).expect("client construction should not fail")
}

fn draft(name: &str, price: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        price: price.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn load_reads_the_named_menu() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;

    let client = test_client(&server.uri());
    let editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    assert_eq!(editor.entries().len(), 3);
    assert_eq!(editor.entries()[0].id(), "h1");
    assert!(editor.entries()[1].is_item());

    let drinks = MenuEditor::load(&client, "b1", MenuKind::Drinks)
        .await
        .expect("load should succeed");
    assert_eq!(drinks.entries().len(), 1);
    assert_eq!(drinks.entries()[0].id(), "d1");
}

#[tokio::test]
async fn load_failure_surfaces_the_store_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pins/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = MenuEditor::load(&client, "missing", MenuKind::Food)
        .await
        .err()
        .expect("load should fail");
    assert!(matches!(err, MenuError::Store(_)), "got: {err}");
}

#[tokio::test]
async fn insert_item_at_index_splices_and_persists_the_whole_list() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    editor
        .insert_item(draft("Risotto", "14.00"), InsertPosition::At(1))
        .await
        .expect("insert should succeed");

    let entries = editor.entries();
    assert_eq!(entries.len(), 4);
    assert!(
        matches!(&entries[1], MenuEntry::Item { name, .. } if name == "Risotto"),
        "new item should sit at index 1"
    );
    // Relative order of the pre-existing entries is untouched.
    assert_eq!(entries[0].id(), "h1");
    assert_eq!(entries[2].id(), "i1");
    assert_eq!(entries[3].id(), "i2");
    // The new entry got a fresh id unique within the list.
    let new_id = entries[1].id();
    assert!(!new_id.is_empty());
    assert_eq!(entries.iter().filter(|e| e.id() == new_id).count(), 1);

    // The persist carried the ENTIRE updated sequence in one PUT.
    let requests = server.received_requests().await.expect("recording enabled");
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("one PUT should have been issued");
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["menuType"], "food");
    assert_eq!(body["menuData"].as_array().unwrap().len(), 4);
    assert_eq!(body["menuData"][1]["name"], "Risotto");
}

#[tokio::test]
async fn relative_positions_resolve_above_and_below() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 2).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    editor
        .insert_header("Specials", InsertPosition::Above(1))
        .await
        .expect("insert above should succeed");
    assert!(
        matches!(&editor.entries()[1], MenuEntry::Header { title, .. } if title == "Specials")
    );

    editor
        .insert_item(draft("Tiramisu", "6.00"), InsertPosition::Below(3))
        .await
        .expect("insert below should succeed");
    assert!(
        matches!(&editor.entries()[4], MenuEntry::Item { name, .. } if name == "Tiramisu")
    );
    assert_eq!(editor.entries().len(), 5);
}

#[tokio::test]
async fn out_of_bounds_insert_appends() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    editor
        .insert_item(draft("Affogato", "5.00"), InsertPosition::At(99))
        .await
        .expect("insert should succeed");

    let entries = editor.entries();
    assert_eq!(entries.len(), 4);
    assert!(matches!(&entries[3], MenuEntry::Item { name, .. } if name == "Affogato"));
}

#[tokio::test]
async fn rollback_restores_the_sequence_on_persist_failure() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 500, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");
    let before = editor.entries().to_vec();

    let err = editor
        .insert_item(draft("Risotto", "14.00"), InsertPosition::Append)
        .await
        .unwrap_err();

    assert!(matches!(err, MenuError::Store(_)), "got: {err}");
    assert_eq!(editor.entries(), &before[..], "rollback should restore");
}

#[tokio::test]
async fn keep_local_policy_retains_the_optimistic_state() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 500, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed")
        .with_recovery(RecoveryPolicy::KeepLocal);

    let err = editor
        .insert_item(draft("Risotto", "14.00"), InsertPosition::Append)
        .await
        .unwrap_err();

    assert!(matches!(err, MenuError::Store(_)), "got: {err}");
    assert_eq!(editor.entries().len(), 4, "local change should be kept");
}

#[tokio::test]
async fn edit_item_preserves_id_and_variant() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    editor
        .edit_item(
            2,
            ItemDraft {
                name: "Lasagna al forno".to_string(),
                price: "12.00".to_string(),
                description: None,
            },
        )
        .await
        .expect("edit should succeed");

    match &editor.entries()[2] {
        MenuEntry::Item {
            id,
            name,
            price,
            description,
        } => {
            assert_eq!(id, "i2", "id must survive the edit");
            assert_eq!(name, "Lasagna al forno");
            assert_eq!(price.to_string(), "12.00");
            assert!(description.is_none(), "targeted fields only");
        }
        MenuEntry::Header { .. } => panic!("variant tag must survive the edit"),
    }
}

#[tokio::test]
async fn edit_header_rejects_an_item_index_without_network() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 0).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    let err = editor.edit_header(1, "Starters").await.unwrap_err();
    assert!(matches!(err, MenuError::WrongEntryKind { .. }), "got: {err}");
}

#[tokio::test]
async fn delete_persists_the_sequence_minus_that_entry() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 1).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");
    let before = editor.entries().to_vec();

    editor.delete_entry(1).await.expect("delete should succeed");

    let mut expected = before;
    expected.remove(1);
    assert_eq!(editor.entries(), &expected[..]);

    // What went over the wire is exactly the pre-delete sequence minus
    // the removed entry, so a re-load against a store that accepted the
    // PUT returns this same sequence.
    let requests = server.received_requests().await.expect("recording enabled");
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("one PUT should have been issued");
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    let persisted: Vec<MenuEntry> =
        serde_json::from_value(body["menuData"].clone()).expect("persisted entries parse");
    assert_eq!(persisted, expected);
}

#[tokio::test]
async fn delete_out_of_bounds_is_rejected_without_network() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 0).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");

    let err = editor.delete_entry(42).await.unwrap_err();
    assert!(
        matches!(err, MenuError::IndexOutOfBounds { index: 42, len: 3 }),
        "got: {err}"
    );
}

#[tokio::test]
async fn validation_failure_issues_no_network_call() {
    let server = MockServer::start().await;
    mount_get_pin(&server).await;
    mount_put_menu(&server, 200, 0).await;

    let client = test_client(&server.uri());
    let mut editor = MenuEditor::load(&client, "b1", MenuKind::Food)
        .await
        .expect("load should succeed");
    let before = editor.entries().to_vec();

    let err = editor
        .insert_item(draft("Risotto", "fourteen"), InsertPosition::Append)
        .await
        .unwrap_err();

    assert!(matches!(err, MenuError::Validation(_)), "got: {err}");
    assert_eq!(editor.entries(), &before[..], "no local mutation either");
}
