//! # Clustered Layout Generation
//!
//! Organic settlement layouts built from spaced building clusters.
//!
//! The generator works in four passes:
//! 1. Place one seed per cluster, keeping seeds apart by the type's spacing
//! 2. Grow each cluster outward from its seed with a noisy radius limit
//! 3. Link every seed with a spanning network of main pathways
//! 4. Add organic connectors between nearby clusters

use crate::layout::network;
use crate::{
    LayoutError, LayoutGenerator, LayoutPatternResult, LayoutResult, PathwaySet, Position,
    Settlement, TypeParameters,
};
use noise::{NoiseFn, Perlin};
use rand::{rngs::StdRng, Rng};
use std::collections::VecDeque;

/// Layout generator that grows separated clusters from random seeds.
#[derive(Debug, Clone)]
pub struct ClusteredLayoutGenerator {
    /// Frequency of the noise that roughens cluster outlines
    pub noise_frequency: f64,
    /// How far noise can stretch or shrink a cluster's radius (fraction)
    pub noise_amplitude: f64,
    /// Chance that an organic connector step wanders off course
    pub organic_wander: f64,
    /// Whether to validate every layout before returning it
    pub validate_output: bool,
}

impl ClusteredLayoutGenerator {
    /// Creates a clustered generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use hamlet::{
    ///     ClusteredLayoutGenerator, LayoutGenerator, Settlement, SettlementType,
    ///     SettlementTypeRegistry,
    /// };
    ///
    /// let registry = SettlementTypeRegistry::with_defaults();
    /// let village = Settlement::with_size(SettlementType::Village, 3, &registry).unwrap();
    /// let mut rng = hamlet::utils::create_rng(7);
    ///
    /// let layout = ClusteredLayoutGenerator::new().generate(&village, &mut rng).unwrap();
    /// assert!(layout.cluster_ids().len() >= 4);
    /// ```
    pub fn new() -> Self {
        Self {
            noise_frequency: 0.21,
            noise_amplitude: 0.35,
            organic_wander: 0.3,
            validate_output: true,
        }
    }

    /// Creates a generator with smooth, round clusters and straight connectors.
    pub fn for_testing() -> Self {
        Self {
            noise_frequency: 0.0,
            noise_amplitude: 0.0,
            organic_wander: 0.0,
            validate_output: true,
        }
    }

    /// Places one seed per cluster.
    ///
    /// Each seed gets `max_placement_attempts` random tries at the current
    /// spacing. When those run out the spacing drops by one and placement
    /// continues; at spacing 1 the first free cell in row-major order is taken.
    /// Only a grid with fewer cells than clusters can fail.
    fn place_seeds(
        &self,
        side: u32,
        count: usize,
        params: &TypeParameters,
        rng: &mut StdRng,
    ) -> LayoutResult<Vec<Position>> {
        let capacity = side as usize * side as usize;
        if count > capacity {
            return Err(LayoutError::GenerationFailed(format!(
                "Cannot place {} clusters on a {}x{} grid",
                count, side, side
            )));
        }

        let mut seeds = Vec::with_capacity(count);
        let mut spacing = params.min_spacing.max(1);

        while seeds.len() < count {
            if let Some(seed) =
                self.try_place_seed(side, spacing, &seeds, params.max_placement_attempts, rng)
            {
                seeds.push(seed);
                continue;
            }

            if spacing > 1 {
                spacing -= 1;
                log::warn!(
                    "Relaxed cluster spacing to {} after placing {} of {} seeds",
                    spacing,
                    seeds.len(),
                    count
                );
                continue;
            }

            match Self::first_free_cell(side, &seeds) {
                Some(seed) => seeds.push(seed),
                None => {
                    return Err(LayoutError::GenerationFailed(format!(
                        "Placed only {} of {} clusters",
                        seeds.len(),
                        count
                    )));
                }
            }
        }

        log::debug!("Placed {} seeds with final spacing {}", seeds.len(), spacing);
        Ok(seeds)
    }

    /// Attempts to place a single seed at least `spacing` away from the others.
    fn try_place_seed(
        &self,
        side: u32,
        spacing: u32,
        existing: &[Position],
        attempts: u32,
        rng: &mut StdRng,
    ) -> Option<Position> {
        for _ in 0..attempts {
            let candidate = Position::new(
                rng.gen_range(0..side) as i32,
                rng.gen_range(0..side) as i32,
            );

            if existing
                .iter()
                .all(|seed| seed.manhattan_distance(candidate) >= spacing)
            {
                return Some(candidate);
            }
        }

        None // Failed to place seed after all attempts
    }

    /// First cell in row-major order not already holding a seed.
    fn first_free_cell(side: u32, existing: &[Position]) -> Option<Position> {
        (0..side as i32)
            .flat_map(|y| (0..side as i32).map(move |x| Position::new(x, y)))
            .find(|pos| !existing.contains(pos))
    }

    /// Grows every cluster outward from its seed.
    ///
    /// Growth is a breadth-first flood from all seeds at once. A cell joins a
    /// cluster when it is within the cluster's noisy radius and does not touch
    /// a cell of another cluster, so distinct clusters never share an edge
    /// unless their seeds do.
    fn grow_clusters(
        &self,
        side: u32,
        seeds: &[Position],
        params: &TypeParameters,
        rng: &mut StdRng,
    ) -> Vec<Vec<u32>> {
        let mut grid = vec![vec![0u32; side as usize]; side as usize];
        let radii: Vec<u32> = seeds
            .iter()
            .map(|_| rng.gen_range(params.min_cluster_radius..=params.max_cluster_radius))
            .collect();
        let perlin = Perlin::new(rng.gen());

        let mut queue = VecDeque::new();
        for (index, seed) in seeds.iter().enumerate() {
            grid[seed.y as usize][seed.x as usize] = index as u32 + 1;
            queue.push_back((*seed, index));
        }

        while let Some((pos, index)) = queue.pop_front() {
            let id = index as u32 + 1;

            for next in pos.cardinal_adjacent_positions() {
                if !next.within(side) || grid[next.y as usize][next.x as usize] != 0 {
                    continue;
                }

                if Self::touches_other_cluster(&grid, side, next, id) {
                    continue;
                }

                let roughness = perlin.get([
                    f64::from(next.x) * self.noise_frequency,
                    f64::from(next.y) * self.noise_frequency,
                ]);
                let reach = f64::from(radii[index]) * (1.0 + self.noise_amplitude * roughness);
                if next.euclidean_distance(seeds[index]) > reach {
                    continue;
                }

                grid[next.y as usize][next.x as usize] = id;
                queue.push_back((next, index));
            }
        }

        grid
    }

    /// Checks whether a cell borders a cell owned by a different cluster.
    fn touches_other_cluster(grid: &[Vec<u32>], side: u32, pos: Position, id: u32) -> bool {
        pos.cardinal_adjacent_positions().iter().any(|adjacent| {
            adjacent.within(side) && {
                let owner = grid[adjacent.y as usize][adjacent.x as usize];
                owner != 0 && owner != id
            }
        })
    }
}

impl LayoutGenerator for ClusteredLayoutGenerator {
    fn generate(&self, settlement: &Settlement, rng: &mut StdRng) -> LayoutResult<LayoutPatternResult> {
        let params = settlement.params();
        let side = settlement.grid_size();
        let count = settlement.cluster_count() as usize;

        // Place cluster seeds
        let seeds = self.place_seeds(side, count, params, rng)?;

        // Grow clusters around them
        let grid = self.grow_clusters(side, &seeds, params, rng);

        // Link every cluster, then add organic variety
        let (main, tree_edges) = network::main_network(&seeds, rng);
        let organic = network::organic_connectors(
            &seeds,
            &tree_edges,
            params,
            side,
            self.organic_wander,
            rng,
        );

        let mut pathways = PathwaySet::new();
        pathways.extend(main.iter().copied());
        pathways.extend(organic.iter().copied());

        let description = format!(
            "Clustered layout for {} (size {}, {} clusters)",
            settlement.settlement_type(),
            settlement.size(),
            count
        );
        let layout = LayoutPatternResult::new(grid, pathways, description);

        if self.validate_output {
            self.validate(&layout, settlement)?;
        }

        log::info!(
            "Generated clustered {} layout: {}x{} grid, {} clusters, {} main / {} organic pathway points",
            settlement.settlement_type(),
            side,
            side,
            count,
            main.len(),
            organic.len()
        );

        Ok(layout)
    }

    fn generator_type(&self) -> &'static str {
        "ClusteredLayoutGenerator"
    }
}

impl Default for ClusteredLayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}
