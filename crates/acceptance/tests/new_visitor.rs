//! End-to-end visitor stories against a live server.
//!
//! Each test starts its own server on an ephemeral port over an in-memory
//! store and drives it with one or more independent browsers.

use std::time::Duration;

use assert_matches::assert_matches;
use superlists_acceptance::{
    wait_for_row_in_list_table, wait_for_row_in_table, Browser, DriverError, LiveServer,
};
use superlists_core::polling::PollConfig;
use superlists_db::store::TodoStore;

const NEW_ITEM: &str = "id_new_item";

// ---------------------------------------------------------------------------
// Single visitor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn can_start_a_list_for_one_user() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();

    // The visitor opens the home page.
    browser.get(&server.url()).await.unwrap();

    // Title and header mention to-do lists.
    let page = browser.page().await.unwrap();
    assert!(page.title().unwrap().contains("To-Do"));
    assert!(page.heading().unwrap().contains("To-Do"));

    // They are invited to enter a to-do item straight away.
    let input = page.find_by_id(NEW_ITEM).unwrap();
    assert_eq!(input.attribute("placeholder"), Some("Enter a to-do item"));

    // They type "Buy peacock feathers" and hit enter; the page lists it.
    browser
        .type_and_submit(NEW_ITEM, "Buy peacock feathers")
        .await
        .unwrap();
    wait_for_row_in_list_table(&browser, "1: Buy peacock feathers")
        .await
        .unwrap();

    // The text box is still there, so they add a second item.
    browser
        .type_and_submit(NEW_ITEM, "Use peacock feathers to make a fly")
        .await
        .unwrap();

    // The page now shows both items.
    wait_for_row_in_list_table(&browser, "2: Use peacock feathers to make a fly")
        .await
        .unwrap();
    wait_for_row_in_list_table(&browser, "1: Buy peacock feathers")
        .await
        .unwrap();

    server.shutdown().await;
}

#[tokio::test]
async fn visiting_home_page_creates_nothing() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();

    browser.get(&server.url()).await.unwrap();
    browser.refresh().await.unwrap();

    assert_eq!(server.store().count_items().await.unwrap(), 0);
    assert_eq!(server.store().count_lists().await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Multiple visitors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn multiple_users_can_start_lists_at_different_urls() {
    let server = LiveServer::start_in_memory().await.unwrap();

    // Edith starts a new to-do list.
    let edith = Browser::new().unwrap();
    edith.get(&server.url()).await.unwrap();
    edith
        .type_and_submit(NEW_ITEM, "Buy peacock feathers")
        .await
        .unwrap();
    wait_for_row_in_list_table(&edith, "1: Buy peacock feathers")
        .await
        .unwrap();

    // Edith's list has a unique URL.
    let edith_list_url = edith.current_url().await.unwrap();
    assert!(edith_list_url.contains("/lists/"), "got {edith_list_url}");
    drop(edith);

    // Francis arrives in a fresh browser and sees no trace of Edith's list.
    let francis = Browser::new().unwrap();
    francis.get(&server.url()).await.unwrap();
    let page_text = francis.page().await.unwrap().body_text().unwrap();
    assert!(!page_text.contains("Buy peacock feathers"));
    assert!(!page_text.contains("make a fly"));

    // Francis starts a list of their own.
    francis.type_and_submit(NEW_ITEM, "Buy milk").await.unwrap();
    wait_for_row_in_list_table(&francis, "1: Buy milk")
        .await
        .unwrap();

    // Francis gets a unique URL too.
    let francis_list_url = francis.current_url().await.unwrap();
    assert!(francis_list_url.contains("/lists/"), "got {francis_list_url}");
    assert_ne!(francis_list_url, edith_list_url);

    // Still no trace of Edith's list.
    let page_text = francis.page().await.unwrap().body_text().unwrap();
    assert!(!page_text.contains("Buy peacock feathers"));
    assert!(page_text.contains("Buy milk"));

    // And Edith's list does not show Francis's item.
    let edith_again = Browser::new().unwrap();
    edith_again.get(&edith_list_url).await.unwrap();
    let page_text = edith_again.page().await.unwrap().body_text().unwrap();
    assert!(page_text.contains("Buy peacock feathers"));
    assert!(!page_text.contains("Buy milk"));

    server.shutdown().await;
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_list_url_is_not_found() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();

    browser
        .get(&format!("{}/lists/does-not-exist/", server.url()))
        .await
        .unwrap();

    let page = browser.page().await.unwrap();
    assert_eq!(page.status, 404);
    assert!(page.find_by_id("id_list_table").is_err());
}

#[tokio::test]
async fn blank_item_is_refused_on_the_home_page() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();

    browser.get(&server.url()).await.unwrap();
    browser.type_and_submit(NEW_ITEM, "   ").await.unwrap();

    let page = browser.page().await.unwrap();
    assert_eq!(page.status, 400);
    assert!(page
        .body_text()
        .unwrap()
        .contains("You can't have an empty list item"));
    assert_eq!(server.store().count_lists().await.unwrap(), 0);
}

#[tokio::test]
async fn waiting_for_a_missing_row_gives_up_with_last_failure() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();

    browser.get(&server.url()).await.unwrap();
    browser.type_and_submit(NEW_ITEM, "Buy milk").await.unwrap();

    let config = PollConfig::new(Duration::from_millis(20), Duration::from_millis(100));
    let err = wait_for_row_in_table(&browser, "id_list_table", "1: Buy bread", &config)
        .await
        .unwrap_err();

    assert_matches!(
        err,
        DriverError::RowMissing { expected, rows }
            if expected == "1: Buy bread" && rows == ["1: Buy milk"]
    );
}

#[tokio::test]
async fn waiting_on_a_page_without_the_table_reports_missing_element() {
    let server = LiveServer::start_in_memory().await.unwrap();
    let browser = Browser::new().unwrap();
    browser.get(&server.url()).await.unwrap();

    let config = PollConfig::new(Duration::from_millis(10), Duration::from_millis(50));
    let err = wait_for_row_in_table(&browser, "id_list_table", "1: anything", &config)
        .await
        .unwrap_err();

    assert_matches!(err, DriverError::ElementNotFound(sel) if sel == "#id_list_table");
}

#[tokio::test]
async fn submitting_before_loading_a_page_fails() {
    let browser = Browser::new().unwrap();
    let err = browser.type_and_submit(NEW_ITEM, "x").await.unwrap_err();
    assert_matches!(err, DriverError::NoPage);
}
