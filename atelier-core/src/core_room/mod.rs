//! Room broadcaster for live change notifications
//!
//! Tracks which viewer sessions are currently watching each project and fans
//! change notifications out to every *other* session in the room. Rooms carry
//! signals, never authoritative data; all room state is ephemeral and dies
//! with the process.

pub mod broadcaster;
pub mod session;

pub use broadcaster::RoomBroadcaster;
pub use session::{SessionHandle, SessionOutbox};
