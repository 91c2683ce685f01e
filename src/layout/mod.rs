//! # Layout Module
//!
//! Layout results and the strategies that generate them.
//!
//! A layout is a square grid of cluster identifiers plus a set of pathway
//! points. Generators implement [`LayoutGenerator`]; the clustered strategy
//! grows organic building clusters, the grid strategy lays out regular blocks.

pub mod clustered;
pub mod grid;
pub mod network;
pub mod position;

pub use clustered::*;
pub use grid::*;
pub use position::*;

use crate::{config, LayoutError, LayoutResult, LayoutStyle, Settlement};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Category of a pathway point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathwayKind {
    /// Part of the network that links every cluster
    Main,
    /// Optional connector added for naturalistic variety
    Organic,
}

impl fmt::Display for PathwayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathwayKind::Main => f.write_str(config::MAIN_PATHWAY),
            PathwayKind::Organic => f.write_str(config::ORGANIC_PATHWAY),
        }
    }
}

/// A single pathway point. Its identity is the whole `(x, y, type)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathwayPoint {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "type")]
    pub kind: PathwayKind,
}

impl PathwayPoint {
    /// Creates a pathway point.
    pub fn new(x: u32, y: u32, kind: PathwayKind) -> Self {
        Self { x, y, kind }
    }

    /// Creates a pathway point at a grid position, if the position is non-negative.
    pub fn at(pos: Position, kind: PathwayKind) -> Option<Self> {
        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        Some(Self::new(x, y, kind))
    }

    /// The point's grid position.
    pub fn position(&self) -> Position {
        Position::new(self.x as i32, self.y as i32)
    }
}

/// Insertion-ordered set of pathway points.
///
/// The first insertion of a point wins; later duplicates are dropped.
///
/// # Examples
///
/// ```
/// use hamlet::{PathwayKind, PathwayPoint, PathwaySet};
///
/// let mut set = PathwaySet::new();
/// assert!(set.insert(PathwayPoint::new(1, 2, PathwayKind::Main)));
/// assert!(!set.insert(PathwayPoint::new(1, 2, PathwayKind::Main)));
/// assert!(set.insert(PathwayPoint::new(1, 2, PathwayKind::Organic)));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PathwayPoint>", into = "Vec<PathwayPoint>")]
pub struct PathwaySet {
    points: Vec<PathwayPoint>,
    seen: HashSet<PathwayPoint>,
}

impl PathwaySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point, returning false if it was already present.
    pub fn insert(&mut self, point: PathwayPoint) -> bool {
        if self.seen.insert(point) {
            self.points.push(point);
            true
        } else {
            false
        }
    }

    /// Returns true if the point is present.
    pub fn contains(&self, point: &PathwayPoint) -> bool {
        self.seen.contains(point)
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates points in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathwayPoint> {
        self.points.iter()
    }

    /// Points in first-insertion order.
    pub fn as_slice(&self) -> &[PathwayPoint] {
        &self.points
    }

    /// Number of points of a given category.
    pub fn count_of(&self, kind: PathwayKind) -> usize {
        self.points.iter().filter(|p| p.kind == kind).count()
    }
}

impl PartialEq for PathwaySet {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for PathwaySet {}

impl Extend<PathwayPoint> for PathwaySet {
    fn extend<I: IntoIterator<Item = PathwayPoint>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl FromIterator<PathwayPoint> for PathwaySet {
    fn from_iter<I: IntoIterator<Item = PathwayPoint>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<PathwayPoint>> for PathwaySet {
    fn from(points: Vec<PathwayPoint>) -> Self {
        points.into_iter().collect()
    }
}

impl From<PathwaySet> for Vec<PathwayPoint> {
    fn from(set: PathwaySet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a PathwaySet {
    type Item = &'a PathwayPoint;
    type IntoIter = std::slice::Iter<'a, PathwayPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A generated (or blended) settlement layout.
///
/// `grid` is row-major: `grid[y][x]`. Zero marks an unoccupied cell. Straight
/// out of a generator, positive values are dense cluster identifiers starting
/// at 1; after blending they are intensities and carry no cluster meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPatternResult {
    pub grid: Vec<Vec<u32>>,
    pub pathways: PathwaySet,
    pub description: String,
}

impl LayoutPatternResult {
    /// Creates a layout from its parts.
    pub fn new(grid: Vec<Vec<u32>>, pathways: PathwaySet, description: impl Into<String>) -> Self {
        Self {
            grid,
            pathways,
            description: description.into(),
        }
    }

    /// Side length of the grid.
    pub fn side(&self) -> u32 {
        self.grid.len() as u32
    }

    /// Value of the cell at a position, if it is on the grid.
    pub fn cell(&self, pos: Position) -> Option<u32> {
        if !pos.within(self.side()) {
            return None;
        }
        self.grid
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    /// Distinct non-zero cell values.
    pub fn cluster_ids(&self) -> BTreeSet<u32> {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .filter(|&value| value != 0)
            .collect()
    }

    /// Pathway points of one category, in insertion order.
    pub fn pathways_of(&self, kind: PathwayKind) -> impl Iterator<Item = &PathwayPoint> {
        self.pathways.iter().filter(move |p| p.kind == kind)
    }

    /// Describes the first broken structural invariant, if any.
    ///
    /// The grid must be square and every pathway point must lie on it.
    pub fn invariant_violation(&self) -> Option<String> {
        let side = self.grid.len();
        if let Some((y, row)) = self.grid.iter().enumerate().find(|(_, row)| row.len() != side) {
            return Some(format!(
                "Grid is not square: row {} has {} cells, expected {}",
                y,
                row.len(),
                side
            ));
        }

        self.pathways
            .iter()
            .find(|p| !p.position().within(side as u32))
            .map(|p| {
                format!(
                    "Pathway point ({}, {}) lies outside a {}x{} grid",
                    p.x, p.y, side, side
                )
            })
    }

    /// Serializes the layout to JSON.
    pub fn to_json(&self, pretty: bool) -> LayoutResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Loads a layout from JSON, rejecting structurally invalid layouts.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let layout: Self = serde_json::from_str(json)?;
        match layout.invariant_violation() {
            Some(reason) => Err(LayoutError::InvalidArgument(reason)),
            None => Ok(layout),
        }
    }
}

/// Strategy that turns a settlement into a layout.
///
/// Implementations hold no mutable state, so one generator can serve any
/// number of concurrent callers. All randomness comes from the RNG passed in.
pub trait LayoutGenerator: Send + Sync {
    /// Generates a layout for the settlement.
    fn generate(&self, settlement: &Settlement, rng: &mut StdRng) -> LayoutResult<LayoutPatternResult>;

    /// Validates that a layout meets the guarantees every generator makes.
    fn validate(&self, layout: &LayoutPatternResult, settlement: &Settlement) -> LayoutResult<()> {
        validate_layout(layout, settlement)
    }

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Returns the generator for a layout style.
pub fn generator_for_style(style: LayoutStyle) -> Box<dyn LayoutGenerator> {
    match style {
        LayoutStyle::Clustered => Box::new(ClusteredLayoutGenerator::new()),
        LayoutStyle::Grid => Box::new(GridLayoutGenerator::new()),
    }
}

/// Returns the generator preferred by the settlement's type.
pub fn generator_for(settlement: &Settlement) -> Box<dyn LayoutGenerator> {
    generator_for_style(settlement.params().layout_style)
}

/// Checks the guarantees every generated layout makes for its settlement.
///
/// - the grid is square with the settlement's side and pathways stay on it
/// - at least `size + 1` distinct cluster identifiers
/// - at least `size` main pathway points
/// - main pathway points form one connected network touching every cluster
pub fn validate_layout(layout: &LayoutPatternResult, settlement: &Settlement) -> LayoutResult<()> {
    if let Some(reason) = layout.invariant_violation() {
        return Err(LayoutError::GenerationFailed(reason));
    }

    if layout.side() != settlement.grid_size() {
        return Err(LayoutError::GenerationFailed(format!(
            "Grid side {} does not match settlement grid size {}",
            layout.side(),
            settlement.grid_size()
        )));
    }

    let ids = layout.cluster_ids();
    if (ids.len() as u64) < u64::from(settlement.size()) + 1 {
        return Err(LayoutError::GenerationFailed(format!(
            "Layout has {} clusters, settlement of size {} needs at least {}",
            ids.len(),
            settlement.size(),
            settlement.size() + 1
        )));
    }

    let main_cells: HashSet<Position> = layout
        .pathways_of(PathwayKind::Main)
        .map(PathwayPoint::position)
        .collect();

    if (main_cells.len() as u64) < u64::from(settlement.size()) {
        return Err(LayoutError::GenerationFailed(format!(
            "Layout has {} main pathway points, settlement of size {} needs at least {}",
            main_cells.len(),
            settlement.size(),
            settlement.size()
        )));
    }

    if !crate::utils::is_connected(&main_cells) {
        return Err(LayoutError::GenerationFailed(
            "Main pathway network is not connected".to_string(),
        ));
    }

    let served: BTreeSet<u32> = main_cells
        .iter()
        .filter_map(|&pos| layout.cell(pos))
        .filter(|&value| value != 0)
        .collect();
    if let Some(unreached) = ids.iter().find(|&&id| !served.contains(&id)) {
        return Err(LayoutError::GenerationFailed(format!(
            "Cluster {} is not reached by the main pathway network",
            unreached
        )));
    }

    Ok(())
}
