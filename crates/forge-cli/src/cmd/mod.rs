pub mod config;
pub mod phase;
pub mod sidebar;
pub mod slug;
