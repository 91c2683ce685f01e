//! # Pathway Networks
//!
//! Builds the pathway points that connect cluster seeds.
//!
//! The main network is a minimum spanning tree over the seeds, each tree edge
//! carved as an L-shaped run. Organic connectors join extra nearby seed pairs
//! with a wandering walk that drifts toward its target.

use crate::utils::spanning_edges;
use crate::{PathwayKind, PathwayPoint, PathwaySet, Position, TypeParameters};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Main network linking every seed, plus the spanning-tree edges used.
///
/// Every seed lies on the network and every point is on the grid when the
/// seeds are.
pub fn main_network(seeds: &[Position], rng: &mut StdRng) -> (PathwaySet, Vec<(usize, usize)>) {
    let edges = spanning_edges(seeds);
    let mut pathways = PathwaySet::new();

    // A lone seed still gets its own point
    if let Some(&only) = seeds.first() {
        pathways.extend(PathwayPoint::at(only, PathwayKind::Main));
    }

    for &(a, b) in &edges {
        let horizontal_first = rng.gen_bool(0.5);
        pathways.extend(
            seeds[a]
                .l_path_to(seeds[b], horizontal_first)
                .into_iter()
                .filter_map(|pos| PathwayPoint::at(pos, PathwayKind::Main)),
        );
    }

    log::debug!(
        "Main network: {} tree edges, {} points",
        edges.len(),
        pathways.len()
    );

    (pathways, edges)
}

/// Seed pairs eligible for organic connectors, nearest first.
///
/// Pairs already joined by the spanning tree or farther apart than
/// `organic_reach` are skipped.
pub fn organic_candidates(
    seeds: &[Position],
    tree_edges: &[(usize, usize)],
    organic_reach: u32,
) -> Vec<(usize, usize)> {
    let tree: HashSet<(usize, usize)> = tree_edges.iter().copied().collect();
    let mut candidates = Vec::new();

    for i in 0..seeds.len() {
        for j in (i + 1)..seeds.len() {
            let distance = seeds[i].manhattan_distance(seeds[j]);
            if !tree.contains(&(i, j)) && distance <= organic_reach {
                candidates.push((distance, i, j));
            }
        }
    }

    candidates.sort_unstable();
    candidates.into_iter().map(|(_, i, j)| (i, j)).collect()
}

/// Organic connectors between nearby seeds not already joined by the tree.
///
/// Produces at most `ceil(seeds * organic_density)` connectors. `wander` is the
/// chance that a walk step ignores its target and moves in a random direction.
pub fn organic_connectors(
    seeds: &[Position],
    tree_edges: &[(usize, usize)],
    params: &TypeParameters,
    side: u32,
    wander: f64,
    rng: &mut StdRng,
) -> PathwaySet {
    let wanted = (seeds.len() as f64 * params.organic_density).ceil() as usize;
    let mut pathways = PathwaySet::new();

    if wanted == 0 {
        return pathways;
    }

    let candidates = organic_candidates(seeds, tree_edges, params.organic_reach);
    let chosen = candidates.len().min(wanted);

    for &(a, b) in candidates.iter().take(chosen) {
        pathways.extend(
            wandering_walk(seeds[a], seeds[b], side, wander, rng)
                .into_iter()
                .filter_map(|pos| PathwayPoint::at(pos, PathwayKind::Organic)),
        );
    }

    log::debug!(
        "Organic connectors: {} of {} candidates, {} points",
        chosen,
        candidates.len(),
        pathways.len()
    );

    pathways
}

/// A bounded walk from `start` to `end` that drifts toward its target.
///
/// Each step heads for the target unless a `wander` roll sends it in a random
/// cardinal direction. A non-finite `wander` counts as 0. After `3 * distance + 4` steps the walk finishes with a
/// straight L-shaped run, so it always ends on `end` and stays on the grid.
pub fn wandering_walk(
    start: Position,
    end: Position,
    side: u32,
    wander: f64,
    rng: &mut StdRng,
) -> Vec<Position> {
    let wander = if wander.is_finite() {
        wander.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let max_steps = start.manhattan_distance(end) * 3 + 4;
    let mut cells = vec![start];
    let mut current = start;

    for _ in 0..max_steps {
        if current == end {
            break;
        }

        let next = if rng.gen_bool(wander) {
            let options = current.cardinal_adjacent_positions();
            options[rng.gen_range(0..options.len())]
        } else {
            let dx = (end.x - current.x).signum();
            let dy = (end.y - current.y).signum();
            if dy == 0 || (dx != 0 && rng.gen_bool(0.5)) {
                Position::new(current.x + dx, current.y)
            } else {
                Position::new(current.x, current.y + dy)
            }
        };

        current = next.clamped(side);
        cells.push(current);
    }

    if current != end {
        let finish = current.l_path_to(end, rng.gen_bool(0.5));
        cells.extend(finish.into_iter().skip(1));
    }

    cells
}
