//! Third-party integrations: connection state and the channel booking feed.

pub mod feed;
pub mod integration;

pub use feed::{ChannelFeed, FeedError, Listing, SimulatedChannelFeed};
pub use integration::{Integration, IntegrationCategory, IntegrationStatus};
