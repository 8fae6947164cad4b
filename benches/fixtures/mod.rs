// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::time::Duration;

use criterion::Criterion;

use nereid_mindmap::model::{MindMap, MindMapNode, NodeId};
use nereid_mindmap::ops::{apply_ops, Op};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    /// Stable case id used after the `/` in benchmark names.
    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    fn shape(self) -> (usize, usize) {
        match self {
            Case::Small => (3, 3),
            Case::Medium => (4, 5),
            Case::Large => (6, 5),
        }
    }
}

/// A complete tree with `fanout` children per branch, `depth` levels below the root.
pub fn tree(case: Case) -> MindMapNode {
    fn build(label: String, fanout: usize, depth: usize) -> MindMapNode {
        let children = if depth == 0 {
            Vec::new()
        } else {
            (0..fanout).map(|idx| build(format!("{label}.{idx}"), fanout, depth - 1)).collect()
        };
        MindMapNode::new(label).with_children(children)
    }

    let (fanout, depth) = case.shape();
    build("topic".to_owned(), fanout, depth)
}

/// The loaded tree with every branch expanded, so the whole tree is laid out.
pub fn expanded(case: Case) -> MindMap {
    let mut map = MindMap::load(&tree(case));
    let ops = collapsed_ids(&map)
        .into_iter()
        .map(|node_id| Op::ToggleCollapse { node_id })
        .collect::<Vec<_>>();
    apply_ops(&mut map, &ops);
    map
}

pub fn collapsed_ids(map: &MindMap) -> Vec<NodeId> {
    map.tree()
        .nodes()
        .filter(|node| node.branch().is_collapsed())
        .map(|node| node.id())
        .collect()
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

/// Criterion settings, tunable through `BENCH_*` environment variables.
pub fn criterion() -> Criterion {
    let sample_size = env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}
