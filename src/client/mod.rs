//! Client side: typed calls, the query cache, and optimistic mutations.
//!
//! ```ignore
//! use showcase::client::{LocalTransport, SetupClient, SetupFeed};
//!
//! let feed = SetupFeed::new(SetupClient::new(LocalTransport::new(service)));
//! feed.load().await?;
//! feed.sign_in("user-42");
//! let settlement = feed.like("1").await;
//! ```

mod api;
mod cache;
mod error;
mod feed;
mod notice;
mod optimistic;
mod transport;

pub use api::{SetupClient, DEFAULT_TIMEOUT};
pub use cache::{CacheEvent, QueryCache, QueryKey, Snapshot, SubscriptionId};
pub use error::ClientError;
pub use feed::SetupFeed;
pub use notice::{Notice, NoticeLevel};
pub use optimistic::{reconcile, IntentState, MutationIntent, MutationKind, Settlement};
pub use transport::{LocalTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
