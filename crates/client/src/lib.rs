//! HTTP-JSON retrieval with memoization, plus a GitHub org client built
//! on top of it.
//!
//! The network sits behind the [`JsonFetcher`] trait so callers (and
//! unit tests) can swap the transport without touching the consumers.

pub mod cached;
pub mod github;
pub mod http;

pub use cached::{Cached, CachedJsonClient};
pub use github::{has_license, ClientError, OrgClient};
pub use http::{get_json, HttpError, HttpJsonFetcher, JsonFetcher};
