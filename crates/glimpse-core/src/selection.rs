//! Selection events and panel-target resolution.

use serde::{Deserialize, Serialize};

/// Identifier of the tab a selection originated from. Hosts report `-1`
/// for contexts without a real tab (devtools, prerendering), which is
/// unusable as a panel target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub i64);

impl TabId {
    /// The host's "no tab" sentinel.
    pub const NONE: TabId = TabId(-1);

    pub fn is_usable(&self) -> bool {
        self.0 > 0
    }
}

/// Identifier of the window a selection originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub i64);

impl WindowId {
    pub fn is_usable(&self) -> bool {
        self.0 > 0
    }
}

/// A "summarize this text" intent captured from a user selection.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    /// Text captured at the moment of the triggering action.
    pub text: String,
    /// The originating tab, when the host reported one.
    pub tab: Option<TabId>,
    /// The originating window, when the host reported one.
    pub window: Option<WindowId>,
}

impl SelectionEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tab: None,
            window: None,
        }
    }

    pub fn with_tab(mut self, tab: TabId) -> Self {
        self.tab = Some(tab);
        self
    }

    pub fn with_window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }

    /// Resolve where a panel could be opened: the tab when usable, else
    /// the window, else nowhere.
    pub fn panel_target(&self) -> Option<PanelTarget> {
        if let Some(tab) = self.tab {
            if tab.is_usable() {
                return Some(PanelTarget::Tab(tab));
            }
        }
        if let Some(window) = self.window {
            if window.is_usable() {
                return Some(PanelTarget::Window(window));
            }
        }
        None
    }
}

/// Where a panel surface should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    Tab(TabId),
    Window(WindowId),
}

impl std::fmt::Display for PanelTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tab(tab) => write!(f, "tab {}", tab.0),
            Self::Window(window) => write!(f, "window {}", window.0),
        }
    }
}
