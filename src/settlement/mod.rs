//! # Settlement Module
//!
//! Settlement descriptors consumed by the layout generators.
//!
//! A [`Settlement`] is built once per generation request. Its type parameters
//! are resolved from a [`SettlementTypeRegistry`] at construction and never
//! change afterwards.

pub mod params;

pub use params::*;

use crate::{LayoutError, LayoutResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories of settlement, from the smallest outpost to a metropolis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementType {
    /// A handful of homes
    Hamlet,
    /// Small farming or fishing community
    Village,
    /// Market town with several districts
    Town,
    /// Large walled city
    City,
    /// Sprawling capital
    Metropolis,
    /// Frontier camp or watch post
    Outpost,
}

impl SettlementType {
    /// Every settlement type, in registry order.
    pub const ALL: [SettlementType; 6] = [
        SettlementType::Hamlet,
        SettlementType::Village,
        SettlementType::Town,
        SettlementType::City,
        SettlementType::Metropolis,
        SettlementType::Outpost,
    ];

    /// Lower-case name used in configuration files and descriptions.
    pub fn as_str(self) -> &'static str {
        match self {
            SettlementType::Hamlet => "hamlet",
            SettlementType::Village => "village",
            SettlementType::Town => "town",
            SettlementType::City => "city",
            SettlementType::Metropolis => "metropolis",
            SettlementType::Outpost => "outpost",
        }
    }
}

impl fmt::Display for SettlementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SettlementType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                LayoutError::Configuration(format!("Unknown settlement type '{}'", s))
            })
    }
}

/// A settlement ready for layout generation.
///
/// # Examples
///
/// ```
/// use hamlet::{Settlement, SettlementType, SettlementTypeRegistry};
///
/// let registry = SettlementTypeRegistry::with_defaults();
/// let village = Settlement::with_size(SettlementType::Village, 3, &registry).unwrap();
/// assert_eq!(village.size(), 3);
/// assert_eq!(village.cluster_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    settlement_type: SettlementType,
    size: u32,
    params: TypeParameters,
}

impl Settlement {
    /// Creates a settlement whose size is drawn from the type's configured range.
    pub fn new(
        settlement_type: SettlementType,
        registry: &SettlementTypeRegistry,
        rng: &mut StdRng,
    ) -> LayoutResult<Self> {
        let params = registry.get(settlement_type)?.clone();
        let size = rng.gen_range(params.min_size..=params.max_size);

        log::debug!("Created {} settlement with random size {}", settlement_type, size);

        Ok(Self {
            settlement_type,
            size,
            params,
        })
    }

    /// Creates a settlement with an explicit size, clamped into the type's range.
    pub fn with_size(
        settlement_type: SettlementType,
        size: u32,
        registry: &SettlementTypeRegistry,
    ) -> LayoutResult<Self> {
        let params = registry.get(settlement_type)?.clone();
        let clamped = params.clamp_size(size);

        if clamped != size {
            log::debug!(
                "Clamped {} size {} into [{}, {}]",
                settlement_type,
                size,
                params.min_size,
                params.max_size
            );
        }

        Ok(Self {
            settlement_type,
            size: clamped,
            params,
        })
    }

    /// The settlement's category.
    pub fn settlement_type(&self) -> SettlementType {
        self.settlement_type
    }

    /// The size driving cluster count.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Generation parameters resolved for this settlement's type.
    pub fn params(&self) -> &TypeParameters {
        &self.params
    }

    /// Number of clusters a layout of this settlement contains.
    pub fn cluster_count(&self) -> u32 {
        self.size + 1
    }

    /// Side length of this settlement's layout grid.
    pub fn grid_size(&self) -> u32 {
        self.params.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_settlement_type_parsing() {
        assert_eq!("town".parse::<SettlementType>().unwrap(), SettlementType::Town);
        assert_eq!(
            " Metropolis ".parse::<SettlementType>().unwrap(),
            SettlementType::Metropolis
        );
        assert!(matches!(
            "castle".parse::<SettlementType>(),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_settlement_type_display_matches_serde() {
        for kind in SettlementType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_random_size_within_range() {
        let registry = SettlementTypeRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(7);

        for kind in SettlementType::ALL {
            let params = registry.get(kind).unwrap().clone();
            for _ in 0..20 {
                let settlement = Settlement::new(kind, &registry, &mut rng).unwrap();
                assert!(settlement.size() >= params.min_size);
                assert!(settlement.size() <= params.max_size);
                assert_eq!(settlement.params(), &params);
            }
        }
    }

    #[test]
    fn test_explicit_size_is_clamped() {
        let registry = SettlementTypeRegistry::with_defaults();
        let params = registry.get(SettlementType::Village).unwrap().clone();

        let too_big = Settlement::with_size(SettlementType::Village, 99, &registry).unwrap();
        assert_eq!(too_big.size(), params.max_size);

        let too_small = Settlement::with_size(SettlementType::Village, 0, &registry).unwrap();
        assert_eq!(too_small.size(), params.min_size);
    }

    #[test]
    fn test_missing_type_fails() {
        let registry = SettlementTypeRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            Settlement::new(SettlementType::Hamlet, &registry, &mut rng),
            Err(LayoutError::Configuration(_))
        ));
        assert!(matches!(
            Settlement::with_size(SettlementType::Hamlet, 1, &registry),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_cluster_count_is_monotonic() {
        let registry = SettlementTypeRegistry::with_defaults();
        let small = Settlement::with_size(SettlementType::Town, 4, &registry).unwrap();
        let large = Settlement::with_size(SettlementType::Town, 8, &registry).unwrap();
        assert!(large.cluster_count() >= small.cluster_count());
        assert_eq!(small.cluster_count(), small.size() + 1);
    }
}
