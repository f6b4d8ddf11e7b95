//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：分析并写入缓存、删除缓存

mod moderation_commands;

pub mod handlers;

pub use moderation_commands::*;
