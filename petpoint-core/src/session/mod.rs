//! In-memory conversation sessions with idle expiry
//!
//! [`SessionStore`] owns every session behind a single lock and
//! [`SessionSweeper`] periodically evicts the ones that went idle.

pub mod clock;
pub mod store;
pub mod sweeper;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::SessionStore;
pub use sweeper::SessionSweeper;
pub use types::{Exchange, Session};
