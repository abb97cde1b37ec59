//! Cluster resolution - landing search and flood-fill explosions
//!
//! All functions borrow the grid for the duration of the call only.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::coords::SlotKey;
use super::grid::{BubbleGrid, Color, Occupant};
use crate::error::GameError;

/// Neighbors of `key` that are real slots in `grid`, in `SlotKey::adjacent` order
pub fn neighbors_of(key: SlotKey, grid: &BubbleGrid) -> Vec<SlotKey> {
    key.adjacent()
        .into_iter()
        .filter(|neighbor| grid.contains(*neighbor))
        .collect()
}

/// Connected slots of `color` reachable from `origin` (BFS).
///
/// The search starts at the origin's neighbors, so the origin itself is only
/// part of the result when it has the target color and is reached back
/// through a neighbor. Each slot appears at most once.
pub fn same_color_cluster(origin: SlotKey, color: Color, grid: &BubbleGrid) -> Vec<SlotKey> {
    let mut cluster = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    for neighbor in neighbors_of(origin, grid) {
        if visited.insert(neighbor) {
            queue.push_back(neighbor);
        }
    }

    while let Some(key) = queue.pop_front() {
        if grid.get(key) != Some(Occupant::Bubble(color)) {
            continue;
        }
        cluster.push(key);

        for neighbor in neighbors_of(key, grid) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    cluster
}

/// Empty the cluster of `color` around `origin`, returning the slots removed
pub fn explode(
    origin: SlotKey,
    color: Color,
    grid: &mut BubbleGrid,
) -> Result<Vec<SlotKey>, GameError> {
    let cluster = same_color_cluster(origin, color, grid);
    for &key in &cluster {
        grid.set(key, Occupant::Empty)?;
    }
    Ok(cluster)
}

/// Pick the empty neighbor of the `hit` slot closest to `target`.
///
/// Ties keep the first candidate in neighbor order, so the result is
/// deterministic for symmetric layouts.
pub fn nearest_empty_slot(
    target: Vec2,
    hit: SlotKey,
    grid: &BubbleGrid,
) -> Result<SlotKey, GameError> {
    let mut best: Option<(SlotKey, f32)> = None;

    for candidate in neighbors_of(hit, grid) {
        if grid.get(candidate) != Some(Occupant::Empty) {
            continue;
        }
        let distance = candidate.position().distance(target);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(key, _)| key)
        .ok_or(GameError::NoLandingSlot { key: hit })
}
