//! Checkbox groups with exclusive-choice semantics.
//!
//! The widget's visible check marks are not the source of truth: hiding the
//! widget clears the marks, so a separate `active` column keeps the logical
//! state and is replayed into the widget whenever it comes back. Entries can
//! belong to a numbered xor group; activating one deactivates its siblings
//! in a single pass.

use crate::redraw::Redraw;
use serde::{Deserialize, Serialize};

/// One row of the checkbox table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxEntry {
    /// Whether the entry is offered in this session at all. Absent entries
    /// keep their row (stable layout for callers) but never render and never
    /// participate in xor resolution.
    pub present: bool,
    /// Logical on/off state, independent of widget visibility.
    pub active: bool,
    /// Exclusion group id; 0 = not exclusive.
    pub xor_group: u32,
    /// Stable identifier used by callers.
    pub name: String,
    /// Text shown next to the check mark.
    pub label: String,
}

impl CheckboxEntry {
    pub fn new(
        present: bool,
        active: bool,
        xor_group: u32,
        name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            present,
            active,
            xor_group,
            name: name.into(),
            label: label.into(),
        }
    }
}

/// A group of checkboxes backed by an authoritative state table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxGroup {
    entries: Vec<CheckboxEntry>,
    enabled: bool,
    visible: bool,
    /// Widget check marks, in sync with `active` only while visible.
    widget: Vec<bool>,
}

impl CheckboxGroup {
    /// Create a group; the widget marks replay the active states of the
    /// present entries.
    pub fn new(entries: Vec<CheckboxEntry>) -> Self {
        let widget = entries.iter().map(|e| e.present && e.active).collect();
        Self {
            entries,
            enabled: true,
            visible: true,
            widget,
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Whether an entry exists and is offered.
    pub fn is_present(&self, name: &str) -> bool {
        self.index_of(name)
            .is_some_and(|i| self.entries[i].present)
    }

    /// Logical state of an entry; absent and unknown entries read as off.
    pub fn get(&self, name: &str) -> bool {
        self.index_of(name)
            .is_some_and(|i| self.entries[i].present && self.entries[i].active)
    }

    /// Display label of an entry.
    pub fn get_label(&self, name: &str) -> Option<&str> {
        self.index_of(name).map(|i| self.entries[i].label.as_str())
    }

    /// Logical states of all entries, in table order.
    ///
    /// Reads the authoritative column, never the widget marks, so the answer
    /// is the same whether or not the widget is on screen.
    pub fn get_status(&self) -> Vec<bool> {
        self.entries
            .iter()
            .map(|e| e.present && e.active)
            .collect()
    }

    /// Widget check marks as currently drawn.
    pub fn widget_status(&self) -> &[bool] {
        &self.widget
    }

    /// Toggle an entry, resolving xor exclusion.
    ///
    /// Returns the new logical state, or `None` when the group is disabled
    /// or the entry is unknown/absent. Activation deactivates every other
    /// present entry of the same xor group; deactivation touches nobody.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !self.enabled {
            return None;
        }
        let idx = self.index_of(name)?;
        if !self.entries[idx].present {
            return None;
        }
        let now_active = !self.entries[idx].active;
        self.entries[idx].active = now_active;

        let group = self.entries[idx].xor_group;
        if now_active && group != 0 {
            for (i, entry) in self.entries.iter_mut().enumerate() {
                if i != idx && entry.present && entry.xor_group == group {
                    entry.active = false;
                }
            }
        }
        if self.visible {
            self.sync_widget();
        }
        Some(now_active)
    }

    /// Force an entry's logical state without xor resolution.
    pub fn set(&mut self, name: &str, active: bool) {
        if let Some(idx) = self.index_of(name) {
            self.entries[idx].active = active;
            if self.visible {
                self.sync_widget();
            }
        }
    }

    /// Turn every entry off, logically and in the widget.
    pub fn set_all_off(&mut self) -> Redraw {
        let mut changed = false;
        for entry in &mut self.entries {
            changed |= entry.active;
            entry.active = false;
        }
        self.sync_widget();
        if changed { Redraw::Soon } else { Redraw::None }
    }

    fn sync_widget(&mut self) {
        for (mark, entry) in self.widget.iter_mut().zip(&self.entries) {
            *mark = self.visible && entry.present && entry.active;
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the widget.
    ///
    /// Hiding clears the check marks but leaves the active column alone;
    /// showing replays it, so state round-trips through a hide/show cycle.
    pub fn set_visible(&mut self, visible: bool) -> Redraw {
        if !self.enabled || self.visible == visible {
            return Redraw::None;
        }
        self.visible = visible;
        self.sync_widget();
        Redraw::Now
    }

    pub fn toggle_visible(&mut self) -> Redraw {
        self.set_visible(!self.visible)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled group ignores toggles and visibility changes.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
