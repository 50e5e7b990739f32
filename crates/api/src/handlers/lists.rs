//! Handlers for the home page and the `/lists` pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use superlists_core::error::CoreError;
use superlists_core::types::parse_db_id;
use superlists_db::models::list::List;

use crate::error::AppResult;
use crate::render::{HomePage, ItemRow, ListPage};
use crate::response::found;
use crate::state::AppState;

/// Body of the new-list and add-item forms.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    /// A missing field is treated as empty text.
    #[serde(default)]
    pub item_text: String,
}

/// GET /
///
/// Render the landing page. Never writes anything.
pub async fn home_page(State(state): State<AppState>) -> Html<String> {
    Html(state.renderer.home(&HomePage::default()))
}

/// POST /lists/new
///
/// Create a list with its first item and redirect to the list's page.
/// Rejected text re-renders the home page with a 400 and creates nothing.
pub async fn new_list(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> AppResult<Response> {
    if let Some(message) = rejection(&state, &form.item_text)? {
        let page = HomePage {
            error: Some(message),
        };
        return Ok((StatusCode::BAD_REQUEST, Html(state.renderer.home(&page))).into_response());
    }

    let (list, item) = state.store.create_list_with_item(&form.item_text).await?;
    tracing::info!(list_id = list.id, item_id = item.id, "Created list");

    Ok(found(&list.url()))
}

/// GET /lists/{list_id}/
///
/// Render every item of the list, numbered in creation order.
pub async fn view_list(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let list = load_list(&state, &raw_id).await?;
    let page = list_page(&state, &list, None).await?;
    Ok(Html(state.renderer.list(&page)))
}

/// POST /lists/{list_id}/add_item
///
/// Append an item to an existing list and redirect back to it. Unknown
/// lists are a 404; nothing is created implicitly.
pub async fn add_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ItemForm>,
) -> AppResult<Response> {
    let list = load_list(&state, &raw_id).await?;

    if let Some(message) = rejection(&state, &form.item_text)? {
        let page = list_page(&state, &list, Some(message)).await?;
        return Ok((StatusCode::BAD_REQUEST, Html(state.renderer.list(&page))).into_response());
    }

    let item = state.store.create_item(list.id, &form.item_text).await?;
    tracing::info!(list_id = list.id, item_id = item.id, "Added item");

    Ok(found(&list.url()))
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Resolve a raw path segment to an existing list.
async fn load_list(state: &AppState, raw_id: &str) -> AppResult<List> {
    let Some(id) = parse_db_id(raw_id) else {
        return Err(CoreError::NotFoundByKey {
            entity: "List",
            key: raw_id.to_string(),
        }
        .into());
    };

    state
        .store
        .get_list(id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "List", id }.into())
}

async fn list_page(state: &AppState, list: &List, error: Option<String>) -> AppResult<ListPage> {
    let items = state.store.list_items_for(list.id).await?;
    Ok(ListPage {
        list_id: list.id,
        rows: ItemRow::numbered(items.into_iter().map(|item| item.text)),
        error,
    })
}

/// Run the configured item-text policy.
///
/// Returns the user-facing message when the text is rejected.
fn rejection(state: &AppState, text: &str) -> AppResult<Option<String>> {
    match state.config.item_text_policy.validate(text) {
        Ok(()) => Ok(None),
        Err(CoreError::Validation(message)) => Ok(Some(message)),
        Err(other) => Err(other.into()),
    }
}
