//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The in-progress report session (`ReportSession`)
//! - `machine`: The generic transition function (`advance`, `Transition`)
//! - `store`: Store trait for in-progress sessions (`SessionStore`)

mod machine;
mod model;
mod store;

pub use machine::{Transition, advance};
pub use model::ReportSession;
pub use store::SessionStore;
