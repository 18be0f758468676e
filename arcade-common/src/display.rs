//! Arcade panel visibility.
//!
//! Visibility is a pure function of the auto-show preference, an optional
//! manual override and the number of running agents. The controller keeps
//! the last resolved value so callers only react to real changes.

use crate::status::StatusArtifact;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// A manual override wins; otherwise the panel shows while agents run
    /// and auto-show is enabled.
    pub fn resolve(auto_show: bool, manual: Option<bool>, active_count: u64) -> Self {
        let visible = manual.unwrap_or(auto_show && active_count > 0);
        Self::from_bool(visible)
    }

    fn from_bool(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Visible => write!(f, "visible"),
            Visibility::Hidden => write!(f, "hidden"),
        }
    }
}

/// A change in visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Shown,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct DisplayController {
    auto_show: bool,
    manual: Option<bool>,
    active_count: u64,
    current: Visibility,
}

impl DisplayController {
    pub fn new(auto_show: bool, manual: Option<bool>) -> Self {
        Self {
            auto_show,
            manual,
            active_count: 0,
            current: Visibility::resolve(auto_show, manual, 0),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.current
    }

    pub fn manual_override(&self) -> Option<bool> {
        self.manual
    }

    pub fn auto_show(&self) -> bool {
        self.auto_show
    }

    pub fn active_count(&self) -> u64 {
        self.active_count
    }

    /// Feeds a new status snapshot.
    pub fn observe(&mut self, status: &StatusArtifact) -> Option<Transition> {
        self.active_count = status.active_count;
        self.refresh()
    }

    pub fn set_auto_show(&mut self, enabled: bool) -> Option<Transition> {
        self.auto_show = enabled;
        self.refresh()
    }

    /// Pins visibility to the opposite of what is shown now.
    pub fn toggle(&mut self) -> Option<Transition> {
        self.manual = Some(!self.current.is_visible());
        self.refresh()
    }

    pub fn force_show(&mut self) -> Option<Transition> {
        self.manual = Some(true);
        self.refresh()
    }

    /// Returns to automatic visibility.
    pub fn clear_override(&mut self) -> Option<Transition> {
        self.manual = None;
        self.refresh()
    }

    fn refresh(&mut self) -> Option<Transition> {
        let next = Visibility::resolve(self.auto_show, self.manual, self.active_count);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(match next {
            Visibility::Visible => Transition::Shown,
            Visibility::Hidden => Transition::Hidden,
        })
    }
}
