// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Point;

/// Screen distance a pressed pointer must travel before the gesture counts as a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// Tells a drag (pan) apart from a click on the canvas.
///
/// Hosts deliver `press`, any number of `move_to`, `release`, and then a click for the same
/// gesture. A release that ended a drag arms a one-shot guard so that trailing click is swallowed
/// instead of clearing the selection.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    threshold: f64,
    press: Option<Point>,
    last: Point,
    dragging: bool,
    suppress_click: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl PointerTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            press: None,
            last: Point::default(),
            dragging: false,
            suppress_click: false,
        }
    }

    pub fn press(&mut self, at: Point) {
        self.press = Some(at);
        self.last = at;
        self.dragging = false;
        self.suppress_click = false;
    }

    /// Returns the pan delta since the previous move once the gesture has become a drag.
    pub fn move_to(&mut self, at: Point) -> Option<(f64, f64)> {
        let origin = self.press?;
        if !self.dragging {
            let (dx, dy) = (at.x - origin.x, at.y - origin.y);
            if dx.hypot(dy) < self.threshold {
                return None;
            }
            self.dragging = true;
        }
        let delta = (at.x - self.last.x, at.y - self.last.y);
        self.last = at;
        Some(delta)
    }

    /// Ends the gesture. Returns `true` if it was a drag.
    pub fn release(&mut self) -> bool {
        let was_drag = self.dragging;
        self.press = None;
        self.dragging = false;
        if was_drag {
            self.suppress_click = true;
        }
        was_drag
    }

    /// Consumes the guard: `false` means this click is the tail of a drag and must be ignored.
    pub fn take_click(&mut self) -> bool {
        !std::mem::take(&mut self.suppress_click)
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
