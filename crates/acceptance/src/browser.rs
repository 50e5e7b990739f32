//! HTTP page driver.
//!
//! A [`Browser`] is one visitor: it owns its own HTTP client, so nothing
//! (cookies included) leaks between two visitors of the same server.

use reqwest::redirect::Policy;
use reqwest::{Method, Url};
use tokio::sync::RwLock;

use crate::error::DriverError;
use crate::page::Page;

/// Maximum redirects followed per navigation.
const MAX_REDIRECTS: usize = 10;

pub struct Browser {
    client: reqwest::Client,
    current: RwLock<Option<Page>>,
}

impl Browser {
    pub fn new() -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self {
            client,
            current: RwLock::new(None),
        })
    }

    /// Navigate to `url` and load the resulting page.
    pub async fn get(&self, url: &str) -> Result<(), DriverError> {
        let response = self.client.get(url).send().await?;
        self.load(response).await
    }

    /// Re-fetch the current page.
    pub async fn refresh(&self) -> Result<(), DriverError> {
        let url = self.current_url().await?;
        self.get(&url).await
    }

    /// Snapshot of the currently loaded page.
    pub async fn page(&self) -> Result<Page, DriverError> {
        self.current.read().await.clone().ok_or(DriverError::NoPage)
    }

    /// URL of the loaded page after redirects.
    pub async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.page().await?.url)
    }

    /// Type `text` into the input with id `input_id` and press Enter,
    /// submitting the form that owns the input.
    pub async fn type_and_submit(&self, input_id: &str, text: &str) -> Result<(), DriverError> {
        let page = self.page().await?;
        let target = page.form_for_input(input_id)?;

        let base = Url::parse(&page.url).map_err(|e| DriverError::InvalidUrl(e.to_string()))?;
        let action = base
            .join(&target.action)
            .map_err(|e| DriverError::InvalidUrl(e.to_string()))?;

        let fields = [(target.field.as_str(), text)];
        let request = if target.method == Method::POST.as_str() {
            self.client.post(action).form(&fields)
        } else {
            self.client.get(action).query(&fields)
        };

        tracing::debug!(input_id, method = %target.method, "Submitting form");
        let response = request.send().await?;
        self.load(response).await
    }

    async fn load(&self, response: reqwest::Response) -> Result<(), DriverError> {
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let html = response.text().await?;
        tracing::debug!(%url, status, "Loaded page");

        *self.current.write().await = Some(Page::new(url, status, html));
        Ok(())
    }
}
