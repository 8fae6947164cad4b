// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::layout::Bounds;
use crate::model::Point;

/// Uniform layout-to-screen transform: `screen = layout * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 };

    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self { translate_x, translate_y, scale }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.translate_x, p.y * self.scale + self.translate_y)
    }

    /// Maps a screen point back into layout space.
    pub fn invert(&self, p: Point) -> Point {
        if self.scale == 0.0 {
            return Point::new(p.x - self.translate_x, p.y - self.translate_y);
        }
        Point::new((p.x - self.translate_x) / self.scale, (p.y - self.translate_y) / self.scale)
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { translate_x: self.translate_x + dx, translate_y: self.translate_y + dy, ..self }
    }

    /// Rescales to `scale` while keeping the layout point under `anchor` (screen space) fixed.
    pub fn rescaled_around(self, scale: f64, anchor: Point) -> Self {
        let fixed = self.invert(anchor);
        Self {
            translate_x: anchor.x - fixed.x * scale,
            translate_y: anchor.y - fixed.y * scale,
            scale,
        }
    }

    pub fn lerp(self, other: Transform, t: f64) -> Self {
        Self {
            translate_x: self.translate_x + (other.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (other.translate_y - self.translate_y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

/// Parameters for [`fit_to_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub padding: f64,
    /// Never zoom in further than this, so fitting a tiny subtree does not over-zoom.
    pub max_scale: f64,
    /// Floor for very large trees.
    pub min_scale: f64,
}

/// Computes the transform that centers `points` in the viewport and scales their bounding box
/// to fit inside the padded viewport.
///
/// Returns `None` for an empty point set. A zero-area box (a single node) gets `max_scale`.
pub fn fit_to_bounds(points: impl IntoIterator<Item = Point>, params: &FitParams) -> Option<Transform> {
    let bounds = Bounds::from_points(points);
    if bounds.is_empty() {
        return None;
    }

    let available_w = (params.viewport_width - 2.0 * params.padding).max(1.0);
    let available_h = (params.viewport_height - 2.0 * params.padding).max(1.0);

    let scale_w = if bounds.width() > 0.0 { available_w / bounds.width() } else { f64::INFINITY };
    let scale_h = if bounds.height() > 0.0 { available_h / bounds.height() } else { f64::INFINITY };
    let scale = scale_w.min(scale_h).min(params.max_scale).max(params.min_scale);

    let center = bounds.center();
    Some(Transform {
        translate_x: params.viewport_width / 2.0 - center.x * scale,
        translate_y: params.viewport_height / 2.0 - center.y * scale,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::{fit_to_bounds, FitParams, Transform};
    use crate::model::Point;

    fn params() -> FitParams {
        FitParams {
            viewport_width: 800.0,
            viewport_height: 600.0,
            padding: 50.0,
            max_scale: 1.2,
            min_scale: 0.1,
        }
    }

    #[test]
    fn apply_and_invert_are_inverse() {
        let t = Transform::new(10.0, -20.0, 0.5);
        let p = Point::new(42.0, 7.0);
        let back = t.invert(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn rescaled_around_keeps_anchor_fixed() {
        let t = Transform::new(100.0, 50.0, 1.0);
        let anchor = Point::new(300.0, 200.0);
        let before = t.invert(anchor);
        let zoomed = t.rescaled_around(2.0, anchor);
        let after = zoomed.invert(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(zoomed.scale, 2.0);
    }

    #[test]
    fn fit_centers_and_scales_large_boxes_down() {
        let points = [Point::new(0.0, -500.0), Point::new(1400.0, 500.0)];
        let t = fit_to_bounds(points, &params()).expect("fit");

        // Limiting axis: width 700 / 1400 = 0.5, height 500 / 1000 = 0.5.
        assert!((t.scale - 0.5).abs() < 1e-9);
        let center = t.apply(Point::new(700.0, 0.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn fit_never_exceeds_the_ceiling() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let t = fit_to_bounds(points, &params()).expect("fit");
        assert_eq!(t.scale, 1.2);
    }

    #[test]
    fn fit_of_a_single_point_uses_the_ceiling_and_centers_it() {
        let t = fit_to_bounds([Point::new(200.0, 40.0)], &params()).expect("fit");
        assert_eq!(t.scale, 1.2);
        let screen = t.apply(Point::new(200.0, 40.0));
        assert!((screen.x - 400.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn fit_of_nothing_is_none() {
        assert_eq!(fit_to_bounds(std::iter::empty(), &params()), None);
    }
}
