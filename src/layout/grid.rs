//! # Grid Layout Generation
//!
//! Planned settlements: rectangular blocks on a regular lattice joined by
//! straight main streets.

use crate::layout::network;
use crate::{
    LayoutError, LayoutGenerator, LayoutPatternResult, LayoutResult, Position, Settlement,
};
use rand::{rngs::StdRng, Rng};

/// Layout generator that lays out square blocks on a lattice.
///
/// Blocks fill lattice cells row by row. Each block is centred in its lattice
/// cell. Neighbouring blocks keep a free row or column between them whenever
/// the lattice pitch is at least 2 cells.
#[derive(Debug, Clone)]
pub struct GridLayoutGenerator {
    /// Whether block sizes vary between the type's radius bounds
    pub vary_block_size: bool,
    /// Whether to validate every layout before returning it
    pub validate_output: bool,
}

impl GridLayoutGenerator {
    /// Creates a grid generator with default settings.
    pub fn new() -> Self {
        Self {
            vary_block_size: true,
            validate_output: true,
        }
    }

    /// Lattice dimensions `(columns, rows)` for a block count.
    fn lattice_shape(count: u32) -> (u32, u32) {
        let columns = (f64::from(count).sqrt().ceil() as u32).max(1);
        let rows = count.div_ceil(columns);
        (columns, rows)
    }
}

impl LayoutGenerator for GridLayoutGenerator {
    fn generate(&self, settlement: &Settlement, rng: &mut StdRng) -> LayoutResult<LayoutPatternResult> {
        let params = settlement.params();
        let side = settlement.grid_size();
        let count = settlement.cluster_count();

        let (columns, rows) = Self::lattice_shape(count);
        let pitch = side / columns.max(rows);
        if pitch == 0 {
            return Err(LayoutError::GenerationFailed(format!(
                "Cannot fit a {}x{} block lattice on a {}x{} grid",
                columns, rows, side, side
            )));
        }

        // Leave at least one free cell between neighbouring blocks
        let max_half = (pitch.saturating_sub(2) / 2).min(params.max_cluster_radius);
        let min_half = params.min_cluster_radius.min(max_half);

        let mut grid = vec![vec![0u32; side as usize]; side as usize];
        let mut anchors = Vec::with_capacity(count as usize);

        for index in 0..count {
            let column = index % columns;
            let row = index / columns;
            let anchor = Position::new(
                (column * pitch + pitch / 2) as i32,
                (row * pitch + pitch / 2) as i32,
            );
            let half = if self.vary_block_size {
                rng.gen_range(min_half..=max_half) as i32
            } else {
                max_half as i32
            };

            for y in (anchor.y - half)..=(anchor.y + half) {
                for x in (anchor.x - half)..=(anchor.x + half) {
                    let pos = Position::new(x, y);
                    if pos.within(side) {
                        grid[y as usize][x as usize] = index + 1;
                    }
                }
            }

            anchors.push(anchor);
        }

        let (pathways, _) = network::main_network(&anchors, rng);

        let description = format!(
            "Grid layout for {} (size {}, {} blocks)",
            settlement.settlement_type(),
            settlement.size(),
            count
        );
        let layout = LayoutPatternResult::new(grid, pathways, description);

        if self.validate_output {
            self.validate(&layout, settlement)?;
        }

        log::info!(
            "Generated grid {} layout: {}x{} grid, {}x{} lattice, {} street points",
            settlement.settlement_type(),
            side,
            side,
            columns,
            rows,
            layout.pathways.len()
        );

        Ok(layout)
    }

    fn generator_type(&self) -> &'static str {
        "GridLayoutGenerator"
    }
}

impl Default for GridLayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}
