//! # mixfeed - community feed client for MonthlyMix
//!
//! Reads the public "top" listings of a community (`/r/{community}/top.json`)
//! and turns them into [`RawPost`] values: the post title plus the linked URL.
//!
//! ```no_run
//! use mixfeed::{FeedClient, TimeWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::builder()
//!         .user_agent("Monthly Playlist Creator v1.0")
//!         .build()?;
//!
//!     let top = client.top_posts("earthporn", TimeWindow::Month, 1).await?;
//!     if let Some(post) = top.first() {
//!         println!("{} -> {:?}", post.title, post.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Requests are unauthenticated; only the User-Agent header identifies the
//! caller.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ClientBuilder, FeedClient, FeedSettings};
pub use error::{Error, Result};
pub use models::{RawPost, TimeWindow};
