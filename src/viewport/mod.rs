// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Viewport state: the single pan/zoom transform shared by direct manipulation and fits.
//!
//! The transform is owned here and only changes through explicit calls. Edits to the tree
//! never touch it; callers that want the view to follow an edit call [`Viewport::fit`].

pub mod transform;
pub mod transition;

use std::time::Duration;

use tracing::debug;

pub use transform::{fit_to_bounds, FitParams, Transform};
pub use transition::{ease_in_out, ease_out_cubic, linear, EasingFn, Progress, Transition};

use crate::model::Point;

#[derive(Debug, Clone, Copy)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Ceiling applied by fits only; manual zoom may go up to `max_scale`.
    pub fit_max_scale: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub fit_padding: f64,
    pub transition_duration: Duration,
    pub easing: EasingFn,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.0,
            fit_max_scale: 1.2,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            fit_padding: 40.0,
            transition_duration: Duration::from_millis(450),
            easing: ease_out_cubic,
        }
    }
}

/// Whether a fit jumps straight to its target or eases there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Immediate,
    Animated,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    width: f64,
    height: f64,
    current: Transform,
    transition: Option<Transition<Transform>>,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            width: 0.0,
            height: 0.0,
            current: Transform::IDENTITY,
            transition: None,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Container size in device-independent pixels, as reported by the host.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The transform as of the last tick, mid-transition included.
    pub fn transform(&self) -> Transform {
        self.current
    }

    /// Where the view is heading: the in-flight target, or the current transform.
    pub fn target(&self) -> Transform {
        self.transition.map_or(self.current, |t| t.target())
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn layout_to_screen(&self, p: Point) -> Point {
        self.current.apply(p)
    }

    pub fn screen_to_layout(&self, p: Point) -> Point {
        self.current.invert(p)
    }

    /// Jumps to `transform`, dropping any transition.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transition = None;
        self.current = self.clamped(transform);
    }

    /// Direct manipulation: interrupts an in-flight transition and moves from where the view
    /// currently is.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if self.transition.take().is_some() {
            debug!("pan interrupted viewport transition");
        }
        self.current = self.current.translated(dx, dy);
    }

    /// Immediate zoom keeping the layout point under `anchor` fixed (wheel/pinch).
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        self.transition = None;
        let scale = self.clamp_scale(self.current.scale * factor);
        self.current = self.current.rescaled_around(scale, anchor);
    }

    /// Animated zoom around the viewport center. Repeated presses compound on the pending target.
    pub fn zoom_in(&mut self) {
        self.animated_zoom(self.config.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.animated_zoom(self.config.zoom_out_factor);
    }

    fn animated_zoom(&mut self, factor: f64) {
        let target = self.target();
        let scale = self.clamp_scale(target.scale * factor);
        let center = self.center();
        self.animate_to(target.rescaled_around(scale, center));
    }

    /// Starts a transition from the current interpolated transform, replacing any transition
    /// already in flight.
    pub fn animate_to(&mut self, target: Transform) {
        let target = self.clamped(target);
        if self.config.transition_duration.is_zero() {
            self.set_transform(target);
            return;
        }
        if self.transition.is_some() {
            debug!("viewport transition superseded");
        }
        self.transition = Some(Transition::new(
            self.current,
            target,
            self.config.transition_duration,
            self.config.easing,
        ));
    }

    pub fn fit_params(&self) -> FitParams {
        FitParams {
            viewport_width: self.width,
            viewport_height: self.height,
            padding: self.config.fit_padding,
            max_scale: self.config.fit_max_scale,
            min_scale: self.config.min_scale,
        }
    }

    /// Fits the given layout points. Returns `false` (and leaves the view alone) when there is
    /// nothing to fit.
    pub fn fit(&mut self, points: impl IntoIterator<Item = Point>, mode: FitMode) -> bool {
        let Some(target) = fit_to_bounds(points, &self.fit_params()) else {
            debug!("fit skipped: no points");
            return false;
        };
        match mode {
            FitMode::Immediate => self.set_transform(target),
            FitMode::Animated => self.animate_to(target),
        }
        true
    }

    /// Advances the in-flight transition. Returns `true` if the transform changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.tick(dt);
        self.current = transition.current(Transform::lerp);
        if transition.is_complete() {
            self.transition = None;
        }
        true
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.config.min_scale, self.config.max_scale)
    }

    fn clamped(&self, transform: Transform) -> Transform {
        Transform { scale: self.clamp_scale(transform.scale), ..transform }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}
