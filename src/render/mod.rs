// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render adapter for mind maps.
//!
//! A laid-out tree becomes a [`Scene`] of per-node view models. Consecutive scenes are
//! reconciled into enter/update/exit transitions that a [`SceneAnimator`] plays back as
//! [`Frame`]s, and [`paint`] rasterizes a frame into a Unicode [`Canvas`] plus a hit index for
//! pointer lookup and coloring.

pub mod canvas;
pub mod color;
pub mod paint;
pub mod reconcile;
pub mod scene;

pub use canvas::{Canvas, CanvasError};
pub use color::Rgb;
pub use paint::{node_label, paint, CellRect, HitIndex, NodeBox, PaintOptions, Painted};
pub use reconcile::{reconcile, Frame, FrameEdge, FrameNode, NodeTransition, Phase, SceneAnimator, SceneDiff};
pub use scene::{EdgeView, NodeView, Scene};
