//! Server-side page rendering.
//!
//! Handlers build a view model and hand it to a [`PageRenderer`]; they never
//! assemble markup themselves. [`HtmlRenderer`] is the production renderer.
//!
//! The element ids `id_new_item` and `id_list_table` are relied on by the
//! acceptance harness and must stay stable.

use std::fmt::Write;

use superlists_core::types::DbId;

/// Page title shared by every page.
pub const PAGE_TITLE: &str = "To-Do lists";

/// Placeholder shown in the new-item input.
pub const NEW_ITEM_PLACEHOLDER: &str = "Enter a to-do item";

/// Id of the new-item text input.
pub const NEW_ITEM_INPUT_ID: &str = "id_new_item";

/// Id of the table holding list rows.
pub const LIST_TABLE_ID: &str = "id_list_table";

/// Form field carrying the submitted item text.
pub const ITEM_TEXT_FIELD: &str = "item_text";

/// Landing page: an empty form that starts a new list.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    /// Validation message from a rejected submission.
    pub error: Option<String>,
}

/// One rendered row of a list: `{position}: {text}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    /// 1-based position in creation order.
    pub position: usize,
    pub text: String,
}

impl ItemRow {
    /// Number a sequence of item texts from 1 in the given order.
    pub fn numbered<I, S>(texts: I) -> Vec<ItemRow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| ItemRow {
                position: i + 1,
                text: text.into(),
            })
            .collect()
    }
}

/// Detail page of a single list.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub list_id: DbId,
    pub rows: Vec<ItemRow>,
    pub error: Option<String>,
}

/// Error page for non-2xx responses.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: u16,
    pub heading: &'static str,
    pub message: String,
}

/// Turns view models into markup.
pub trait PageRenderer: Send + Sync {
    fn home(&self, page: &HomePage) -> String;
    fn list(&self, page: &ListPage) -> String;
    fn error(&self, page: &ErrorPage) -> String;
}

/// Renders plain HTML5 pages. All user-supplied text is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl PageRenderer for HtmlRenderer {
    fn home(&self, page: &HomePage) -> String {
        let mut body = String::new();
        body.push_str("<h1>Start a new To-Do list</h1>\n");
        body.push_str(&new_item_form("/lists/new", page.error.as_deref()));
        layout(&body)
    }

    fn list(&self, page: &ListPage) -> String {
        let mut body = String::new();
        body.push_str("<h1>Your To-Do list</h1>\n");
        let action = format!("/lists/{}/add_item", page.list_id);
        body.push_str(&new_item_form(&action, page.error.as_deref()));

        let _ = writeln!(body, "<table id=\"{LIST_TABLE_ID}\">");
        for row in &page.rows {
            let _ = writeln!(
                body,
                "  <tr><td>{}: {}</td></tr>",
                row.position,
                escape_html(&row.text)
            );
        }
        body.push_str("</table>\n");
        layout(&body)
    }

    fn error(&self, page: &ErrorPage) -> String {
        let body = format!(
            "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Start a new To-Do list</a></p>\n",
            page.status,
            escape_html(page.heading),
            escape_html(&page.message)
        );
        layout(&body)
    }
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{PAGE_TITLE}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn new_item_form(action: &str, error: Option<&str>) -> String {
    let mut form = String::new();
    let _ = writeln!(form, "<form method=\"POST\" action=\"{}\">", escape_html(action));
    let _ = writeln!(
        form,
        "  <input id=\"{NEW_ITEM_INPUT_ID}\" name=\"{ITEM_TEXT_FIELD}\" placeholder=\"{NEW_ITEM_PLACEHOLDER}\" autofocus>"
    );
    if let Some(msg) = error {
        let _ = writeln!(form, "  <div class=\"error\">{}</div>", escape_html(msg));
    }
    form.push_str("</form>\n");
    form
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_has_title_heading_and_input() {
        let html = HtmlRenderer.home(&HomePage::default());
        assert!(html.contains("<title>To-Do lists</title>"));
        assert!(html.contains("<h1>Start a new To-Do list</h1>"));
        assert!(html.contains("id=\"id_new_item\""));
        assert!(html.contains("placeholder=\"Enter a to-do item\""));
        assert!(html.contains("action=\"/lists/new\""));
        assert!(!html.contains("id_list_table"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn list_numbers_rows_from_one() {
        let page = ListPage {
            list_id: 7,
            rows: ItemRow::numbered(["Buy peacock feathers", "Use peacock feathers to make a fly"]),
            error: None,
        };
        let html = HtmlRenderer.list(&page);
        assert!(html.contains("<table id=\"id_list_table\">"));
        assert!(html.contains("<tr><td>1: Buy peacock feathers</td></tr>"));
        assert!(html.contains("<tr><td>2: Use peacock feathers to make a fly</td></tr>"));
        assert!(html.contains("action=\"/lists/7/add_item\""));
    }

    #[test]
    fn list_escapes_item_text() {
        let page = ListPage {
            list_id: 1,
            rows: ItemRow::numbered(["<script>alert('x')</script> & more"]),
            error: None,
        };
        let html = HtmlRenderer.list(&page);
        assert!(!html.contains("<script>"));
        assert!(html.contains("1: &lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn error_message_is_rendered_in_form() {
        let page = HomePage {
            error: Some("You can't have an empty list item".into()),
        };
        let html = HtmlRenderer.home(&page);
        assert!(html.contains("<div class=\"error\">You can&#x27;t have an empty list item</div>"));
    }

    #[test]
    fn error_page_shows_status_and_message() {
        let html = HtmlRenderer.error(&ErrorPage {
            status: 404,
            heading: "Not Found",
            message: "List does-not-exist not found".into(),
        });
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("List does-not-exist not found"));
    }

    #[test]
    fn numbered_rows_follow_input_order() {
        let rows = ItemRow::numbered(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            rows,
            vec![
                ItemRow { position: 1, text: "a".into() },
                ItemRow { position: 2, text: "b".into() },
            ]
        );
    }
}
