//! Loaded page snapshot and element lookup.
//!
//! Only as much HTML as the server's own pages use is understood: lowercase
//! tags, double-quoted attributes, and no nesting of an element inside
//! another element with the same tag name.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DriverError;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)((?:\s[^>]*)?)>").expect("valid regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*"([^"]*)")?"#).expect("valid regex")
});

static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A start tag found in the page source.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    /// Byte offset of the `<` opening the start tag.
    start: usize,
    /// Byte offset just past the start tag's `>`.
    content_start: usize,
    /// Byte offset of the matching close tag, if there is one.
    content_end: Option<usize>,
}

impl Element {
    /// Value of attribute `name`; boolean attributes yield `""`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn contains(&self, other: &Element) -> bool {
        match self.content_end {
            Some(end) => other.start >= self.content_start && other.start < end,
            None => false,
        }
    }
}

/// Where a form sends its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTarget {
    pub action: String,
    pub method: String,
    /// `name` of the input that was located.
    pub field: String,
}

/// A fetched page: final URL, status and source.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub status: u16,
    html: String,
    elements: Vec<Element>,
}

impl Page {
    pub fn new(url: String, status: u16, html: String) -> Self {
        let elements = parse_elements(&html);
        Self {
            url,
            status,
            html,
            elements,
        }
    }

    /// Contents of `<title>`.
    pub fn title(&self) -> Result<String, DriverError> {
        let title = self.find_by_tag("title")?;
        Ok(self.text_of(title))
    }

    /// Text of the first `<h1>`.
    pub fn heading(&self) -> Result<String, DriverError> {
        let h1 = self.find_by_tag("h1")?;
        Ok(self.text_of(h1))
    }

    /// Visible text of `<body>`, whitespace collapsed.
    pub fn body_text(&self) -> Result<String, DriverError> {
        let body = self.find_by_tag("body")?;
        Ok(self.text_of(body))
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Element, DriverError> {
        self.elements
            .iter()
            .find(|e| e.attribute("id") == Some(id))
            .ok_or_else(|| DriverError::ElementNotFound(format!("#{id}")))
    }

    pub fn find_by_tag(&self, tag: &str) -> Result<&Element, DriverError> {
        self.elements
            .iter()
            .find(|e| e.tag == tag)
            .ok_or_else(|| DriverError::ElementNotFound(tag.to_string()))
    }

    /// All `tag` elements nested inside `parent`, in document order.
    pub fn find_all_within<'a>(
        &'a self,
        parent: &'a Element,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |e| e.tag == tag && parent.contains(e))
    }

    /// Visible text of `element`, whitespace collapsed.
    pub fn text_of(&self, element: &Element) -> String {
        let inner = match element.content_end {
            Some(end) => &self.html[element.content_start..end],
            None => "",
        };
        visible_text(inner)
    }

    /// Text of every `<tr>` in the table with id `table_id`.
    pub fn table_rows(&self, table_id: &str) -> Result<Vec<String>, DriverError> {
        let table = self.find_by_id(table_id)?;
        Ok(self
            .find_all_within(table, "tr")
            .map(|row| self.text_of(row))
            .collect())
    }

    /// Locate the form that owns the input with id `input_id`.
    pub fn form_for_input(&self, input_id: &str) -> Result<FormTarget, DriverError> {
        let input = self.find_by_id(input_id)?;
        let form = self
            .elements
            .iter()
            .rev()
            .find(|e| e.tag == "form" && e.contains(input))
            .ok_or_else(|| DriverError::ElementNotFound(format!("form containing #{input_id}")))?;

        let field = input
            .attribute("name")
            .ok_or_else(|| DriverError::ElementNotFound(format!("name attribute of #{input_id}")))?;

        Ok(FormTarget {
            action: form.attribute("action").unwrap_or("").to_string(),
            method: form.attribute("method").unwrap_or("GET").to_uppercase(),
            field: field.to_string(),
        })
    }
}

fn parse_elements(html: &str) -> Vec<Element> {
    TAG_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = caps.get(1)?.as_str().to_ascii_lowercase();
            let attrs = caps
                .get(2)
                .map(|m| parse_attrs(m.as_str()))
                .unwrap_or_default();
            let close = format!("</{tag}>");
            let content_end = html[whole.end()..].find(&close).map(|i| whole.end() + i);
            Some(Element {
                tag,
                attrs,
                start: whole.start(),
                content_start: whole.end(),
                content_end,
            })
        })
        .collect()
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).map(|m| unescape_html(m.as_str())).unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn visible_text(fragment: &str) -> String {
    let stripped = ANY_TAG_RE.replace_all(fragment, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    unescape_html(collapsed.trim())
}

/// Decode the entities the server's renderer emits.
fn unescape_html(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const LIST_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>To-Do lists</title>
</head>
<body>
<h1>Your To-Do list</h1>
<form method="POST" action="/lists/4/add_item">
  <input id="id_new_item" name="item_text" placeholder="Enter a to-do item" autofocus>
</form>
<table id="id_list_table">
  <tr><td>1: Buy peacock feathers</td></tr>
  <tr><td>2: Fish &amp; chips &lt;3</td></tr>
</table>
</body>
</html>
"#;

    fn page() -> Page {
        Page::new("http://127.0.0.1/lists/4/".into(), 200, LIST_HTML.into())
    }

    #[test]
    fn reads_title_and_heading() {
        let page = page();
        assert_eq!(page.title().unwrap(), "To-Do lists");
        assert_eq!(page.heading().unwrap(), "Your To-Do list");
    }

    #[test]
    fn reads_input_attributes() {
        let page = page();
        let input = page.find_by_id("id_new_item").unwrap();
        assert_eq!(input.tag, "input");
        assert_eq!(input.attribute("placeholder"), Some("Enter a to-do item"));
        assert_eq!(input.attribute("autofocus"), Some(""));
        assert_eq!(input.attribute("missing"), None);
    }

    #[test]
    fn reads_table_rows_with_entities_decoded() {
        let rows = page().table_rows("id_list_table").unwrap();
        assert_eq!(rows, ["1: Buy peacock feathers", "2: Fish & chips <3"]);
    }

    #[test]
    fn finds_owning_form() {
        let target = page().form_for_input("id_new_item").unwrap();
        assert_eq!(
            target,
            FormTarget {
                action: "/lists/4/add_item".into(),
                method: "POST".into(),
                field: "item_text".into(),
            }
        );
    }

    #[test]
    fn body_text_excludes_markup() {
        let text = page().body_text().unwrap();
        assert!(text.contains("1: Buy peacock feathers"));
        assert!(!text.contains("<td>"));
        assert!(!text.contains("To-Do lists"), "title is not part of body");
    }

    #[test]
    fn missing_element_is_reported() {
        let page = Page::new("http://x/".into(), 200, "<html><body></body></html>".into());
        assert_matches!(
            page.table_rows("id_list_table"),
            Err(DriverError::ElementNotFound(sel)) if sel == "#id_list_table"
        );
        assert_matches!(page.heading(), Err(DriverError::ElementNotFound(_)));
    }
}
