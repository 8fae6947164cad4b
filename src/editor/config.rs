// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use crate::interaction::DEFAULT_DRAG_THRESHOLD;
use crate::layout::LayoutConfig;
use crate::render::PaintOptions;
use crate::viewport::ViewportConfig;

/// All tunables of a [`super::MindMapEditor`].
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    /// Duration of enter/update/exit node animations.
    pub reconcile_duration: Duration,
    pub paint: PaintOptions,
    pub drag_threshold: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            reconcile_duration: Duration::from_millis(450),
            paint: PaintOptions::default(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl EditorConfig {
    /// Every animation finishes instantly. Handy for `--print` and tests.
    pub fn without_animation(mut self) -> Self {
        self.viewport.transition_duration = Duration::ZERO;
        self.reconcile_duration = Duration::ZERO;
        self
    }
}
