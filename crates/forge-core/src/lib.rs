pub mod config;
pub mod dates;
pub mod error;
pub mod io;
pub mod lifecycle;
pub mod paths;
pub mod sidebar;
pub mod slug;

pub use error::{ForgeError, Result};
pub use lifecycle::{classify, ForgeWindow, LifecyclePhase};
pub use sidebar::{use_sidebar, SidebarHandle, SidebarProvider, SidebarState};
