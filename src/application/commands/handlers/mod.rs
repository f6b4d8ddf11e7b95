//! Command Handlers 实现

mod moderation_handlers;

pub use moderation_handlers::*;
