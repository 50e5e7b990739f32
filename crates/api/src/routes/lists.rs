//! Route definitions for the page-serving handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// Page routes, mounted at the root.
///
/// ```text
/// GET  /                          -> home_page
/// POST /lists/new                 -> new_list
/// GET  /lists/{list_id}/          -> view_list
/// POST /lists/{list_id}/add_item  -> add_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::home_page))
        .route("/lists/new", post(lists::new_list))
        .route("/lists/{list_id}/", get(lists::view_list))
        .route("/lists/{list_id}/add_item", post(lists::add_item))
}
