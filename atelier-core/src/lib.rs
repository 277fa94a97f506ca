pub mod config;
pub mod core_auth;
pub mod core_model;
pub mod core_policy;
pub mod core_proto;
pub mod core_room;
pub mod core_store;
pub mod logging;
pub mod shutdown;

pub use logging::{init_logging, LogLevel};
