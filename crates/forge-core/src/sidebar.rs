//! Sidebar collapse state, owned by a provider and shared through handles.
//!
//! A [`SidebarProvider`] is mounted once per UI session at the shell level.
//! Components receive a [`SidebarHandle`] and never copy the flag out; every
//! handle observes the same state. Dropping the provider ends the session,
//! after which handles report [`ForgeError::NotInitialized`].
//!
//! State lives behind `Rc<RefCell<_>>`, so handles are `!Send`: mutation is
//! confined to the thread that mounted the provider.

use crate::error::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Viewports narrower than this start collapsed.
pub const DEFAULT_COLLAPSE_BREAKPOINT: u32 = 1024;

// ---------------------------------------------------------------------------
// SidebarState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    collapsed: bool,
}

impl SidebarState {
    /// Seed from a one-time viewport reading. No reading means expanded.
    pub fn new(viewport_width: Option<u32>) -> Self {
        Self::with_breakpoint(viewport_width, DEFAULT_COLLAPSE_BREAKPOINT)
    }

    pub fn with_breakpoint(viewport_width: Option<u32>, breakpoint: u32) -> Self {
        Self {
            collapsed: viewport_width.is_some_and(|w| w < breakpoint),
        }
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, value: bool) {
        self.collapsed = value;
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

// ---------------------------------------------------------------------------
// SidebarProvider
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SidebarProvider {
    state: Rc<RefCell<SidebarState>>,
}

impl SidebarProvider {
    pub fn mount(viewport_width: Option<u32>) -> Self {
        Self::mount_with_breakpoint(viewport_width, DEFAULT_COLLAPSE_BREAKPOINT)
    }

    pub fn mount_with_breakpoint(viewport_width: Option<u32>, breakpoint: u32) -> Self {
        let state = SidebarState::with_breakpoint(viewport_width, breakpoint);
        tracing::debug!(
            ?viewport_width,
            breakpoint,
            collapsed = state.collapsed(),
            "sidebar provider mounted"
        );
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn handle(&self) -> SidebarHandle {
        SidebarHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    /// End the session explicitly. Equivalent to dropping the provider.
    pub fn unmount(self) {}
}

impl Drop for SidebarProvider {
    fn drop(&mut self) {
        tracing::debug!("sidebar provider unmounted");
    }
}

// ---------------------------------------------------------------------------
// SidebarHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SidebarHandle {
    state: Weak<RefCell<SidebarState>>,
}

impl SidebarHandle {
    fn state(&self) -> Result<Rc<RefCell<SidebarState>>> {
        self.state.upgrade().ok_or(ForgeError::NotInitialized)
    }

    pub fn is_mounted(&self) -> bool {
        self.state.strong_count() > 0
    }

    pub fn collapsed(&self) -> Result<bool> {
        Ok(self.state()?.borrow().collapsed())
    }

    pub fn set_collapsed(&self, value: bool) -> Result<()> {
        self.state()?.borrow_mut().set_collapsed(value);
        Ok(())
    }

    pub fn toggle(&self) -> Result<()> {
        self.state()?.borrow_mut().toggle();
        Ok(())
    }

    /// Copy of the current state, for rendering or serialization.
    pub fn snapshot(&self) -> Result<SidebarState> {
        Ok(*self.state()?.borrow())
    }
}

/// Resolve the sidebar for a component.
///
/// Components rendered outside a provider receive `None`; that is a usage
/// error, not a reason to fall back to a default state.
pub fn use_sidebar(handle: Option<&SidebarHandle>) -> Result<SidebarHandle> {
    match handle {
        Some(h) if h.is_mounted() => Ok(h.clone()),
        _ => Err(ForgeError::NotInitialized),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_starts_collapsed() {
        let provider = SidebarProvider::mount(Some(800));
        let sidebar = provider.handle();
        assert!(sidebar.collapsed().unwrap());

        sidebar.toggle().unwrap();
        assert!(!sidebar.collapsed().unwrap());

        sidebar.set_collapsed(true).unwrap();
        assert!(sidebar.collapsed().unwrap());
    }

    #[test]
    fn missing_viewport_starts_expanded() {
        let provider = SidebarProvider::mount(None);
        assert!(!provider.handle().collapsed().unwrap());
    }

    #[test]
    fn breakpoint_is_exclusive() {
        assert!(SidebarState::new(Some(1023)).collapsed());
        assert!(!SidebarState::new(Some(1024)).collapsed());
        assert!(!SidebarState::new(Some(1920)).collapsed());
    }

    #[test]
    fn custom_breakpoint() {
        assert!(SidebarState::with_breakpoint(Some(1100), 1280).collapsed());
        assert!(!SidebarState::with_breakpoint(Some(0), 0).collapsed());
    }

    #[test]
    fn handles_share_one_state() {
        let provider = SidebarProvider::mount(Some(1440));
        let nav = provider.handle();
        let header = provider.handle();

        header.toggle().unwrap();
        assert!(nav.collapsed().unwrap());

        nav.set_collapsed(false).unwrap();
        assert!(!header.collapsed().unwrap());
    }

    #[test]
    fn toggle_twice_restores() {
        let mut state = SidebarState::new(Some(600));
        state.toggle();
        state.toggle();
        assert!(state.collapsed());
    }

    #[test]
    fn handles_fail_after_unmount() {
        let provider = SidebarProvider::mount(Some(800));
        let sidebar = provider.handle();
        provider.unmount();

        assert!(!sidebar.is_mounted());
        assert!(matches!(sidebar.collapsed(), Err(ForgeError::NotInitialized)));
        assert!(matches!(sidebar.toggle(), Err(ForgeError::NotInitialized)));
        assert!(matches!(
            sidebar.set_collapsed(false),
            Err(ForgeError::NotInitialized)
        ));
        assert!(matches!(sidebar.snapshot(), Err(ForgeError::NotInitialized)));
    }

    #[test]
    fn use_sidebar_outside_provider() {
        assert!(matches!(use_sidebar(None), Err(ForgeError::NotInitialized)));

        let provider = SidebarProvider::mount(None);
        let handle = provider.handle();
        let resolved = use_sidebar(Some(&handle)).unwrap();
        resolved.toggle().unwrap();
        assert!(handle.collapsed().unwrap());

        drop(provider);
        assert!(matches!(
            use_sidebar(Some(&handle)),
            Err(ForgeError::NotInitialized)
        ));
    }

    #[test]
    fn remount_starts_fresh() {
        let first = SidebarProvider::mount(Some(800));
        first.handle().toggle().unwrap();
        drop(first);

        let second = SidebarProvider::mount(Some(800));
        assert!(second.handle().collapsed().unwrap());
    }

    #[test]
    fn snapshot_serializes() {
        let provider = SidebarProvider::mount(Some(800));
        let snap = provider.handle().snapshot().unwrap();
        assert_eq!(
            serde_json::to_string(&snap).unwrap(),
            r#"{"collapsed":true}"#
        );
    }
}
