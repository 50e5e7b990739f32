//! Waiting for rendered rows.

use superlists_api::render::LIST_TABLE_ID;
use superlists_core::polling::{retry_until, PollConfig};

use crate::browser::Browser;
use crate::error::DriverError;

/// Wait until the list table shows a row with exactly `row_text`, using the
/// default 500 ms / 10 s polling budget.
pub async fn wait_for_row_in_list_table(
    browser: &Browser,
    row_text: &str,
) -> Result<(), DriverError> {
    wait_for_row_in_table(browser, LIST_TABLE_ID, row_text, &PollConfig::default()).await
}

/// Wait until table `table_id` shows a row with exactly `row_text`.
///
/// Each failed check reloads the page before the next attempt. Returns the
/// last failure once `config.max_wait` is spent.
pub async fn wait_for_row_in_table(
    browser: &Browser,
    table_id: &str,
    row_text: &str,
    config: &PollConfig,
) -> Result<(), DriverError> {
    retry_until(config, || async move {
        let outcome = check_row(browser, table_id, row_text).await;
        if outcome.is_err() {
            // A failed reload surfaces on the next check as NoPage or a stale page.
            let _ = browser.refresh().await;
        }
        outcome
    })
    .await
}

async fn check_row(browser: &Browser, table_id: &str, row_text: &str) -> Result<(), DriverError> {
    let page = browser.page().await?;
    let rows = page.table_rows(table_id)?;
    if rows.iter().any(|row| row == row_text) {
        Ok(())
    } else {
        Err(DriverError::RowMissing {
            expected: row_text.to_string(),
            rows,
        })
    }
}
