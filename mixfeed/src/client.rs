//! HTTP client for community "top" listings

use crate::error::{Error, Result};
use crate::models::{Listing, RawPost, TimeWindow};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default listing base URL
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Default timeout for listing requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
///
/// The public listing endpoints reject requests without a descriptive agent.
pub const DEFAULT_USER_AGENT: &str = "Monthly Playlist Creator v1.0";

/// Default number of posts requested
pub const DEFAULT_LIMIT: u32 = 20;

/// Settings of the `feed` configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_community")]
    pub community: String,
    #[serde(default)]
    pub time_window: TimeWindow,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_community() -> String {
    "listentothis".to_string()
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            community: default_community(),
            time_window: TimeWindow::default(),
            limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Community feed client
///
/// # Example
///
/// ```no_run
/// use mixfeed::{FeedClient, TimeWindow};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FeedClient::new()?;
///     for post in client.top_posts("listentothis", TimeWindow::Month, 20).await? {
///         println!("{}", post.title);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from the `feed` configuration section
    pub fn from_settings(settings: &FeedSettings) -> Result<Self> {
        Self::builder()
            .base_url(&settings.base_url)
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
    }

    /// Base URL of the listing endpoints
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self, community: &str, window: TimeWindow, limit: u32) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/r/{}/top.json",
            self.base_url.trim_end_matches('/'),
            community
        ))?;
        url.query_pairs_mut()
            .append_pair("t", window.as_str())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Get the top posts of a community for a time window
    ///
    /// Posts are returned in the platform's ranking order.
    ///
    /// # Errors
    ///
    /// [`Error::Status`] when the endpoint answers with a non-success status.
    pub async fn top_posts(
        &self,
        community: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RawPost>> {
        let url = self.listing_url(community, window, limit)?;
        info!("Fetching data from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Error fetching feed data: {}", status.as_u16());
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        let listing: Listing = serde_json::from_str(&text)?;
        let posts = listing.into_posts();
        debug!("Received {} posts from r/{}", posts.len(), community);
        Ok(posts)
    }
}

/// Builder for configuring a FeedClient
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FeedClient> {
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.request_timeout)
            .build()?;

        Ok(FeedClient {
            client,
            base_url: self.base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_listing_url() {
        let client = FeedClient::builder()
            .base_url("https://www.reddit.com/")
            .build()
            .unwrap();
        let url = client
            .listing_url("listentothis", TimeWindow::Month, 20)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.reddit.com/r/listentothis/top.json?t=month&limit=20"
        );
    }
}
