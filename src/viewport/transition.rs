// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

/// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
pub type EasingFn = fn(f64) -> f64;

pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Time-based progress from 0 to 1 over a fixed duration.
///
/// Elapsed time is accumulated as a [`Duration`] so repeated small ticks do not drift.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Progress {
    pub fn new(duration: Duration, easing: EasingFn) -> Self {
        Self { elapsed: Duration::ZERO, duration, easing }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn value(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)(raw)
    }
}

/// An in-flight interpolation between two values of `T`.
#[derive(Debug, Clone, Copy)]
pub struct Transition<T> {
    from: T,
    to: T,
    progress: Progress,
}

impl<T: Copy> Transition<T> {
    pub fn new(from: T, to: T, duration: Duration, easing: EasingFn) -> Self {
        Self { from, to, progress: Progress::new(duration, easing) }
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn tick(&mut self, dt: Duration) {
        self.progress.tick(dt);
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    /// Current value, given how to interpolate `T`.
    pub fn current(&self, lerp: impl Fn(T, T, f64) -> T) -> T {
        if self.is_complete() {
            return self.to;
        }
        lerp(self.from, self.to, self.progress.value())
    }
}
