//! Interactive legend focus.
//!
//! Clicking a legend label pulls its series into the foreground and mutes
//! the rest; holding shift makes further clicks additive instead of
//! exclusive. The legend never draws anything itself: it assigns a
//! [`FocusState`] per entry and hands out the emphasis values the renderer
//! should apply.

use crate::error::{Error, Result};
use crate::input::{KeyEvent, MouseButton};
use crate::redraw::Redraw;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line width added to the legend frame while additive mode is armed.
pub const ADDITIVE_EDGE_BOOST: f64 = 0.5;

/// Per-entry focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusState {
    /// Resting emphasis, no focus session running.
    #[default]
    Normal,
    /// In the foreground of a focus session.
    Active,
    /// Muted by somebody else's focus.
    Passive,
}

/// Render emphasis for one focus state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    /// Alpha of the plotted series line.
    pub line_alpha: f64,
    /// Alpha of the legend glyph.
    pub glyph_alpha: f64,
    /// Alpha of the legend label text.
    pub label_alpha: f64,
    /// Width of the plotted series line.
    pub line_width: f64,
    /// Z order of the plotted series line.
    pub z_order: f64,
}

/// Emphasis values per focus state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisTable {
    pub normal: Emphasis,
    pub active: Emphasis,
    pub passive: Emphasis,
}

impl Default for EmphasisTable {
    fn default() -> Self {
        Self {
            normal: Emphasis {
                line_alpha: 0.8,
                glyph_alpha: 1.0,
                label_alpha: 1.0,
                line_width: 1.5,
                z_order: 2.0,
            },
            active: Emphasis {
                line_alpha: 1.0,
                glyph_alpha: 1.0,
                label_alpha: 1.0,
                line_width: 1.7,
                z_order: 2.5,
            },
            passive: Emphasis {
                line_alpha: 0.2,
                glyph_alpha: 0.5,
                label_alpha: 0.6,
                line_width: 1.7,
                z_order: 2.0,
            },
        }
    }
}

impl EmphasisTable {
    pub fn for_state(&self, state: FocusState) -> &Emphasis {
        match state {
            FocusState::Normal => &self.normal,
            FocusState::Active => &self.active,
            FocusState::Passive => &self.passive,
        }
    }
}

/// One legend row, tied to a plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Label text, also usable as a selector.
    pub label: String,
    /// Id of the plotted series this row controls.
    pub series: Uuid,
    focus: FocusState,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, series: Uuid) -> Self {
        Self {
            label: label.into(),
            series,
            focus: FocusState::Normal,
        }
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }
}

/// Selects a legend entry by position or by label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Index(usize),
    Label(&'a str),
}

/// Focus controller for an interactive legend.
///
/// Screen regions of other interactive widgets are registered as exclusion
/// rectangles so a background click landing on them does not end the focus
/// session.
pub struct LegendFocus {
    entries: Vec<LegendEntry>,
    /// Emphasis values handed to the renderer.
    pub styles: EmphasisTable,
    in_focus_mode: bool,
    additive: bool,
    frame_width: f64,
    all_off: bool,
    exclusions: Vec<Rect>,
    on_focus: Option<Box<dyn FnMut(&[usize])>>,
}

impl std::fmt::Debug for LegendFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegendFocus")
            .field("entries", &self.entries)
            .field("in_focus_mode", &self.in_focus_mode)
            .field("additive", &self.additive)
            .field("all_off", &self.all_off)
            .finish()
    }
}

impl LegendFocus {
    /// Create a legend over the given entries.
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        let styles = EmphasisTable::default();
        let frame_width = 1.0;
        Self {
            entries,
            styles,
            in_focus_mode: false,
            additive: false,
            frame_width,
            all_off: false,
            exclusions: Vec::new(),
            on_focus: None,
        }
    }

    /// Register a screen region a background click must not end focus in.
    pub fn add_exclusion(&mut self, region: Rect) {
        self.exclusions.push(region);
    }

    /// Hook invoked with the focused entry indices on every focus change.
    pub fn on_focus(&mut self, hook: impl FnMut(&[usize]) + 'static) {
        self.on_focus = Some(Box::new(hook));
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn in_focus_mode(&self) -> bool {
        self.in_focus_mode
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }

    /// Current legend frame line width, including the additive boost.
    pub fn frame_width(&self) -> f64 {
        self.frame_width
    }

    /// Emphasis the renderer should apply to an entry's series.
    pub fn emphasis(&self, index: usize) -> &Emphasis {
        self.styles.for_state(self.entries[index].focus)
    }

    /// Series line alpha, honoring the all-off override.
    pub fn series_alpha(&self, index: usize) -> f64 {
        if self.all_off {
            0.0
        } else {
            self.emphasis(index).line_alpha
        }
    }

    /// Handle a click on a legend label.
    ///
    /// Clicking an already-active label mutes everything; otherwise the
    /// entry becomes active and, unless additive mode is armed, every other
    /// entry goes passive.
    pub fn click_label(&mut self, index: usize) -> Redraw {
        if index >= self.entries.len() {
            log::warn!("legend click on unknown entry index {index}");
            return Redraw::None;
        }
        self.in_focus_mode = true;
        self.all_off = false;
        if self.entries[index].focus == FocusState::Active {
            self.mute_all();
            // Nothing is focused now; tell trackers with an empty set.
            if let Some(hook) = &mut self.on_focus {
                hook(&[]);
            }
            return Redraw::Now;
        }
        self.entries[index].focus = FocusState::Active;
        if !self.additive {
            for (i, entry) in self.entries.iter_mut().enumerate() {
                if i != index {
                    entry.focus = FocusState::Passive;
                }
            }
        }
        if let Some(hook) = &mut self.on_focus {
            hook(&[index]);
        }
        Redraw::Now
    }

    /// Arm additive mode on shift while a focus session is running.
    ///
    /// The frame boost is applied once per session, no matter how long the
    /// key autorepeats.
    pub fn key_press(&mut self, event: &KeyEvent) -> Redraw {
        let KeyEvent::Pressed(key) = event else {
            return Redraw::None;
        };
        if key != "shift" || !self.in_focus_mode || self.additive {
            return Redraw::None;
        }
        self.frame_width += ADDITIVE_EDGE_BOOST;
        self.additive = true;
        Redraw::Soon
    }

    /// End the focus session and restore resting emphasis everywhere.
    pub fn back_view(&mut self) -> Redraw {
        if self.additive {
            self.frame_width -= ADDITIVE_EDGE_BOOST;
        }
        self.in_focus_mode = false;
        self.additive = false;
        self.all_off = false;
        for entry in &mut self.entries {
            entry.focus = FocusState::Normal;
        }
        Redraw::Soon
    }

    /// Programmatically focus a set of entries.
    ///
    /// Selectors are resolved before anything mutates, so a bad one leaves
    /// the legend untouched. The hook fires once with all resolved indices.
    pub fn set_focus(&mut self, selectors: &[Selector<'_>]) -> Result<Redraw> {
        let mut indices = Vec::with_capacity(selectors.len());
        for selector in selectors {
            let index = match selector {
                Selector::Index(i) => {
                    if *i >= self.entries.len() {
                        return Err(Error::UnknownLegendEntry(i.to_string()));
                    }
                    *i
                }
                Selector::Label(label) => self
                    .entries
                    .iter()
                    .position(|e| e.label == *label)
                    .ok_or_else(|| Error::UnknownLegendEntry((*label).to_string()))?,
            };
            indices.push(index);
        }
        self.mute_all();
        self.in_focus_mode = true;
        self.all_off = false;
        for &index in &indices {
            self.entries[index].focus = FocusState::Active;
        }
        if let Some(hook) = &mut self.on_focus {
            hook(&indices);
        }
        Ok(Redraw::Soon)
    }

    /// Handle a click that did not land on the legend.
    ///
    /// A right-button click on free background ends the focus session;
    /// clicks inside a registered exclusion region belong to some other
    /// widget and are ignored.
    pub fn background_click(&mut self, button: MouseButton, position: Point) -> Redraw {
        if button != MouseButton::Right || !self.in_focus_mode {
            return Redraw::None;
        }
        if self.exclusions.iter().any(|r| r.contains(position)) {
            return Redraw::None;
        }
        self.back_view()
    }

    /// Mute every entry and blank the series lines entirely.
    pub fn set_all_off(&mut self) -> Redraw {
        self.mute_all();
        self.in_focus_mode = true;
        self.all_off = true;
        Redraw::Soon
    }

    fn mute_all(&mut self) {
        for entry in &mut self.entries {
            entry.focus = FocusState::Passive;
        }
    }
}
