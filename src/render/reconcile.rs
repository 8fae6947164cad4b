// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Enter/update/exit reconciliation between two scenes, and the animator that plays it.
//!
//! - Entering nodes start at their nearest previously visible ancestor's old position.
//! - Updating nodes move from their old to their new position and blend color.
//! - Exiting nodes travel toward their nearest surviving ancestor's new position and are
//!   dropped once the animation ends. Their view models live in the diff, so they stay
//!   drawable after the tree that held them has been replaced.
//!
//! A scene installed mid-animation starts from what is on screen: fades keep their current
//! opacity and nodes already on their way out keep exiting.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use super::color::blend;
use super::scene::{NodeView, Scene};
use crate::model::{NodeId, Point};
use crate::viewport::{ease_out_cubic, EasingFn, Progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Updating,
    Exiting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeTransition {
    pub phase: Phase,
    /// The node as it looks at the end (or, when exiting, as it last looked).
    pub view: NodeView,
    pub from: Point,
    pub to: Point,
    pub from_color: Option<String>,
    /// Opacity at the start of the transition. Entering nodes fade from it to 1, exiting ones to 0.
    pub from_opacity: f64,
    /// Parent within the scene the node belongs to.
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDiff {
    nodes: Vec<NodeTransition>,
}

impl SceneDiff {
    pub fn nodes(&self) -> &[NodeTransition] {
        &self.nodes
    }

    pub fn ids_in(&self, phase: Phase) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.phase == phase).map(|n| n.view.id).collect()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeTransition> {
        self.nodes.iter().find(|n| n.view.id == id)
    }

    /// True when nothing moves, appears or disappears.
    pub fn is_static(&self) -> bool {
        self.nodes.iter().all(|n| n.phase == Phase::Updating && n.from == n.to && n.from_color == n.view.color)
    }
}

/// Classifies every node of `prev` and `next`. Exiting nodes come last, in `prev` pre-order.
pub fn reconcile(prev: &Scene, next: &Scene) -> SceneDiff {
    let mut nodes = Vec::with_capacity(next.len());

    for view in next.nodes() {
        let parent = next.parent_of(view.id);
        let transition = match prev.node(view.id) {
            Some(old) => NodeTransition {
                phase: Phase::Updating,
                view: view.clone(),
                from: old.position,
                to: view.position,
                from_color: old.color.clone(),
                from_opacity: 1.0,
                parent,
            },
            None => {
                let origin = nearest_ancestor(next, view.id, |id| prev.node(id).map(|n| n.position));
                NodeTransition {
                    phase: Phase::Entering,
                    view: view.clone(),
                    from: origin.unwrap_or(view.position),
                    to: view.position,
                    from_color: view.color.clone(),
                    from_opacity: 0.0,
                    parent,
                }
            }
        };
        nodes.push(transition);
    }

    for view in prev.nodes().filter(|view| !next.contains(view.id)) {
        let target = nearest_ancestor(prev, view.id, |id| next.node(id).map(|n| n.position));
        nodes.push(NodeTransition {
            phase: Phase::Exiting,
            view: view.clone(),
            from: view.position,
            to: target.unwrap_or(view.position),
            from_color: view.color.clone(),
            from_opacity: 1.0,
            parent: prev.parent_of(view.id),
        });
    }

    SceneDiff { nodes }
}

/// Walks `scene`'s ancestors of `id` and returns the first position `probe` knows about.
fn nearest_ancestor(scene: &Scene, id: NodeId, probe: impl Fn(NodeId) -> Option<Point>) -> Option<Point> {
    let mut current = scene.parent_of(id);
    while let Some(ancestor) = current {
        if let Some(point) = probe(ancestor) {
            return Some(point);
        }
        current = scene.parent_of(ancestor);
    }
    None
}

/// One node as it should be drawn right now.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameNode {
    pub view: NodeView,
    pub phase: Phase,
    pub position: Point,
    pub color: Option<String>,
    /// 0 is invisible, 1 fully shown. Entering nodes fade in, exiting ones fade out.
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEdge {
    pub parent: NodeId,
    pub child: NodeId,
    pub from: Point,
    pub to: Point,
    pub phase: Phase,
}

/// A drawable snapshot: nodes in paint order (parents first, exiting nodes last) and edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub nodes: Vec<FrameNode>,
    pub edges: Vec<FrameEdge>,
}

impl Frame {
    pub fn node(&self, id: NodeId) -> Option<&FrameNode> {
        self.nodes.iter().find(|node| node.view.id == id)
    }
}

/// Plays scene diffs over time. Installing a scene mid-animation starts the next diff from the
/// positions currently on screen, so the old animation is superseded rather than queued.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    scene: Scene,
    diff: SceneDiff,
    progress: Progress,
    duration: Duration,
    easing: EasingFn,
}

impl SceneAnimator {
    pub fn new(duration: Duration) -> Self {
        Self::with_easing(duration, ease_out_cubic)
    }

    pub fn with_easing(duration: Duration, easing: EasingFn) -> Self {
        Self {
            scene: Scene::default(),
            diff: SceneDiff::default(),
            progress: Progress::new(Duration::ZERO, easing),
            duration,
            easing,
        }
    }

    /// The latest installed scene (the animation target).
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn diff(&self) -> &SceneDiff {
        &self.diff
    }

    pub fn is_animating(&self) -> bool {
        !self.progress.is_complete()
    }

    /// Replaces the whole picture without animating (fresh diagram load).
    pub fn reset(&mut self, scene: Scene) {
        self.diff = reconcile(&scene, &scene);
        self.scene = scene;
        self.progress = Progress::new(Duration::ZERO, self.easing);
    }

    pub fn install(&mut self, next: Scene) {
        let was_animating = self.is_animating();
        let current = self.frame();
        let mut diff = reconcile(&self.on_screen(&current), &next);
        if was_animating {
            carry_in_flight(&mut diff, &current, &self.diff, &next);
        }
        self.diff = diff;
        self.scene = next;
        self.progress = Progress::new(self.duration, self.easing);
        debug!(
            superseded = was_animating,
            entering = self.diff.ids_in(Phase::Entering).len(),
            exiting = self.diff.ids_in(Phase::Exiting).len(),
            "scene installed"
        );
    }

    /// Returns `true` while the frame is still changing.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let was_animating = self.is_animating();
        self.progress.tick(dt);
        was_animating
    }

    pub fn frame(&self) -> Frame {
        let t = self.progress.value();
        let complete = self.progress.is_complete();

        let mut nodes = Vec::with_capacity(self.diff.nodes.len());
        for transition in &self.diff.nodes {
            if complete && transition.phase == Phase::Exiting {
                continue;
            }
            let start = transition.from_opacity;
            let opacity = match transition.phase {
                Phase::Entering | Phase::Updating => start + (1.0 - start) * t,
                Phase::Exiting => start * (1.0 - t),
            };
            nodes.push(FrameNode {
                view: transition.view.clone(),
                phase: transition.phase,
                position: transition.from.lerp(transition.to, t),
                color: blend(transition.from_color.as_deref(), transition.view.color.as_deref(), t),
                opacity,
            });
        }

        let positions = nodes.iter().map(|node| (node.view.id, node.position)).collect::<BTreeMap<_, _>>();
        let edges = self
            .diff
            .nodes
            .iter()
            .filter_map(|transition| {
                let child = transition.view.id;
                let parent = transition.parent?;
                Some(FrameEdge {
                    parent,
                    child,
                    from: *positions.get(&parent)?,
                    to: *positions.get(&child)?,
                    phase: transition.phase,
                })
            })
            .collect();

        Frame { nodes, edges }
    }

    /// The installed scene with positions and colors replaced by what `frame` draws.
    /// Nodes still exiting are not part of it; `carry_in_flight` picks them up.
    fn on_screen(&self, frame: &Frame) -> Scene {
        let mut scene = self.scene.clone();
        for node in &frame.nodes {
            if let Some(view) = scene.node_mut(node.view.id) {
                view.position = node.position;
                view.color = node.color.clone();
            }
        }
        scene
    }
}

/// Continues the fades `current` was in the middle of. Every node starts from its drawn
/// opacity, half-entered nodes keep entering, and nodes already exiting keep exiting toward
/// their nearest ancestor that survives into `next`.
fn carry_in_flight(diff: &mut SceneDiff, current: &Frame, running: &SceneDiff, next: &Scene) {
    let drawn = current.nodes.iter().map(|node| (node.view.id, node)).collect::<BTreeMap<_, _>>();

    for transition in &mut diff.nodes {
        let Some(node) = drawn.get(&transition.view.id) else {
            continue;
        };
        transition.from_opacity = node.opacity;
        match (node.phase, transition.phase) {
            (Phase::Entering, Phase::Updating) => transition.phase = Phase::Entering,
            (Phase::Exiting, Phase::Entering) => {
                // Back before it finished leaving.
                transition.from = node.position;
                transition.from_color = node.color.clone();
            }
            _ => {}
        }
    }

    for node in current.nodes.iter().filter(|node| node.phase == Phase::Exiting && !next.contains(node.view.id)) {
        let parent = running.get(node.view.id).and_then(|transition| transition.parent);
        let mut target = None;
        let mut ancestor = parent;
        while let Some(id) = ancestor {
            if let Some(view) = next.node(id) {
                target = Some(view.position);
                break;
            }
            ancestor = running.get(id).and_then(|transition| transition.parent);
        }
        diff.nodes.push(NodeTransition {
            phase: Phase::Exiting,
            view: node.view.clone(),
            from: node.position,
            to: target.unwrap_or(node.position),
            from_color: node.color.clone(),
            from_opacity: node.opacity,
            parent,
        });
    }
}
