//! # Pathway Graphs
//!
//! Spanning-tree and reachability helpers for pathway networks.

use crate::Position;
use pathfinding::prelude::{bfs_reach, kruskal_indices};
use std::collections::HashSet;

/// Edges of a minimum spanning tree over `points`, weighted by Manhattan distance.
///
/// Edges are returned as index pairs into `points`. Fewer than two points
/// yield no edges.
pub fn spanning_edges(points: &[Position]) -> Vec<(usize, usize)> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut edges = Vec::with_capacity(points.len() * (points.len() - 1) / 2);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            edges.push((i, j, points[i].manhattan_distance(points[j])));
        }
    }

    kruskal_indices(points.len(), &edges)
        .map(|(a, b, _)| (a.min(b), a.max(b)))
        .collect()
}

/// Returns true if every cell is reachable from every other by cardinal steps.
pub fn is_connected(cells: &HashSet<Position>) -> bool {
    let Some(&start) = cells.iter().next() else {
        return true;
    };

    let reached = bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| cells.contains(next))
            .collect::<Vec<_>>()
    })
    .count();

    reached == cells.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanning_edges_count() {
        let points = vec![
            Position::new(0, 0),
            Position::new(5, 0),
            Position::new(0, 5),
            Position::new(9, 9),
        ];
        let edges = spanning_edges(&points);
        assert_eq!(edges.len(), points.len() - 1);
        for (a, b) in edges {
            assert!(a < b);
            assert!(b < points.len());
        }
    }

    #[test]
    fn test_spanning_edges_prefers_short_links() {
        let points = vec![Position::new(0, 0), Position::new(1, 0), Position::new(20, 0)];
        let edges: HashSet<_> = spanning_edges(&points).into_iter().collect();
        assert!(edges.contains(&(0, 1)));
        assert!(edges.contains(&(1, 2)));
        assert!(!edges.contains(&(0, 2)));
    }

    #[test]
    fn test_spanning_edges_trivial() {
        assert!(spanning_edges(&[]).is_empty());
        assert!(spanning_edges(&[Position::new(3, 3)]).is_empty());
    }

    #[test]
    fn test_is_connected() {
        let line: HashSet<_> = (0..5).map(|x| Position::new(x, 2)).collect();
        assert!(is_connected(&line));

        let mut split = line.clone();
        split.remove(&Position::new(2, 2));
        assert!(!is_connected(&split));

        // Diagonal neighbours do not count
        let diagonal: HashSet<_> = [Position::new(0, 0), Position::new(1, 1)].into_iter().collect();
        assert!(!is_connected(&diagonal));

        assert!(is_connected(&HashSet::new()));
    }
}
