//! Long-running tasks of the bot process.
//!
//! The update poller drives the report conversation; the liveness responder
//! and keep-alive pinger are independent infrastructure tasks that share
//! nothing with it beyond the cancellation token.

pub mod keep_alive;
pub mod liveness;
pub mod polling;
pub mod telemetry;

pub use keep_alive::KeepAlive;
pub use liveness::LivenessServer;
pub use polling::UpdatePoller;
