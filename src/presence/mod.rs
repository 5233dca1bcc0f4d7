//! Presence publishing: formatting, throttling and the service connection.
//!
//! The publisher keeps a best-effort connection to the presence host. A
//! failed handshake or send only resets the connection; the next loop tick
//! tries again.

pub mod client;
pub mod format;
pub mod publisher;
pub mod throttle;

// Re-export commonly used items
pub use client::{DiscordClient, PresenceClient, PresenceUpdate};
pub use format::{format_bytes, presence_variants, DisplayOptions, Variant, VariantKind};
pub use publisher::{ConnectionState, PresencePublisher, TickOutcome};
pub use throttle::PublishThrottle;
