//! Data models for community listing responses

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A post as returned by a community listing
///
/// Only the fields needed downstream are kept: the free-text title and the
/// linked URL (absent for text posts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawPost {
    /// Build a post from a title and an optional URL
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }
}

/// Time window of a "top" listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl TimeWindow {
    /// Value of the `t` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(Error::InvalidTimeWindow(other.to_string())),
        }
    }
}

/// `{"kind": "Listing", "data": {"children": [...]}}`
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingChild {
    pub data: RawPost,
}

impl Listing {
    /// Posts in listing order
    pub fn into_posts(self) -> Vec<RawPost> {
        self.data.children.into_iter().map(|c| c.data).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_roundtrip_names() {
        for window in [
            TimeWindow::Hour,
            TimeWindow::Day,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Year,
            TimeWindow::All,
        ] {
            assert_eq!(window.as_str().parse::<TimeWindow>().unwrap(), window);
        }
        assert_eq!(" MONTH ".parse::<TimeWindow>().unwrap(), TimeWindow::Month);
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_listing_ignores_extra_fields() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_x",
                "children": [
                    {"kind": "t3", "data": {"title": "Foo - Bar [Rock] (2021)", "url": "https://youtu.be/x", "score": 1200}},
                    {"kind": "t3", "data": {"title": "Self post", "url": null}},
                    {"kind": "t3", "data": {"title": "No url at all"}}
                ]
            }
        }"#;

        let posts = serde_json::from_str::<Listing>(json).unwrap().into_posts();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Foo - Bar [Rock] (2021)");
        assert_eq!(posts[0].url.as_deref(), Some("https://youtu.be/x"));
        assert!(posts[1].url.is_none());
        assert!(posts[2].url.is_none());
    }
}
