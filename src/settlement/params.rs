//! # Settlement Type Parameters
//!
//! Per-type generation knobs and the read-only registry that resolves them.
//!
//! The registry is an explicit configuration object handed to [`Settlement`]
//! construction. It can be built from the built-in table or loaded from JSON
//! produced by whatever configuration store the surrounding application uses.
//!
//! [`Settlement`]: crate::Settlement

use crate::{config, LayoutError, LayoutResult, SettlementType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which layout strategy a settlement type prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    /// Organic clusters grown from spaced seeds
    Clustered,
    /// Rectangular blocks on a regular lattice
    Grid,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::Clustered
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutStyle::Clustered => write!(f, "clustered"),
            LayoutStyle::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for LayoutStyle {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clustered" => Ok(LayoutStyle::Clustered),
            "grid" => Ok(LayoutStyle::Grid),
            other => Err(LayoutError::InvalidArgument(format!(
                "Unknown layout style '{}'",
                other
            ))),
        }
    }
}

fn default_placement_attempts() -> u32 {
    config::DEFAULT_PLACEMENT_ATTEMPTS
}

/// Numeric and behavioural knobs for generating one settlement type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameters {
    /// Smallest size a settlement of this type may have
    pub min_size: u32,
    /// Largest size a settlement of this type may have
    pub max_size: u32,
    /// Side length of the square layout grid
    pub grid_size: u32,
    /// Minimum Manhattan distance between two cluster seeds
    pub min_spacing: u32,
    /// Smallest growth radius of a cluster
    pub min_cluster_radius: u32,
    /// Largest growth radius of a cluster
    pub max_cluster_radius: u32,
    /// Organic connectors per cluster (0.0 to 1.0)
    #[serde(default)]
    pub organic_density: f64,
    /// Farthest seed distance an organic connector will bridge
    #[serde(default)]
    pub organic_reach: u32,
    /// Random placement attempts per seed before spacing is relaxed
    #[serde(default = "default_placement_attempts")]
    pub max_placement_attempts: u32,
    /// Preferred layout strategy
    #[serde(default)]
    pub layout_style: LayoutStyle,
}

impl TypeParameters {
    /// Built-in parameters for a settlement type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hamlet::{SettlementType, TypeParameters};
    ///
    /// let params = TypeParameters::default_for(SettlementType::Village);
    /// assert!(params.min_size <= params.max_size);
    /// assert!(params.validate(SettlementType::Village).is_ok());
    /// ```
    pub fn default_for(settlement_type: SettlementType) -> Self {
        let base = Self {
            min_size: 1,
            max_size: 1,
            grid_size: 16,
            min_spacing: 4,
            min_cluster_radius: 1,
            max_cluster_radius: 2,
            organic_density: 0.0,
            organic_reach: 8,
            max_placement_attempts: config::DEFAULT_PLACEMENT_ATTEMPTS,
            layout_style: LayoutStyle::Clustered,
        };

        match settlement_type {
            SettlementType::Outpost => Self {
                max_size: 2,
                ..base
            },
            SettlementType::Hamlet => Self {
                max_size: 3,
                grid_size: 20,
                organic_density: 0.2,
                organic_reach: 10,
                ..base
            },
            SettlementType::Village => Self {
                min_size: 2,
                max_size: 5,
                grid_size: 28,
                min_spacing: 5,
                min_cluster_radius: 2,
                max_cluster_radius: 3,
                organic_density: 0.3,
                organic_reach: 14,
                ..base
            },
            SettlementType::Town => Self {
                min_size: 4,
                max_size: 8,
                grid_size: 40,
                min_spacing: 6,
                min_cluster_radius: 2,
                max_cluster_radius: 4,
                organic_density: 0.35,
                organic_reach: 18,
                ..base
            },
            SettlementType::City => Self {
                min_size: 7,
                max_size: 12,
                grid_size: 56,
                min_spacing: 7,
                min_cluster_radius: 3,
                max_cluster_radius: 5,
                organic_density: 0.4,
                organic_reach: 22,
                layout_style: LayoutStyle::Grid,
                ..base
            },
            SettlementType::Metropolis => Self {
                min_size: 10,
                max_size: 16,
                grid_size: 72,
                min_spacing: 8,
                min_cluster_radius: 3,
                max_cluster_radius: 6,
                organic_density: 0.45,
                organic_reach: 26,
                max_placement_attempts: 200,
                layout_style: LayoutStyle::Grid,
                ..base
            },
        }
    }

    /// Clamps a requested size into this type's valid range.
    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_size, self.max_size)
    }

    /// Checks that the parameters can always produce a valid layout.
    pub fn validate(&self, settlement_type: SettlementType) -> LayoutResult<()> {
        let invalid = |reason: &str| {
            Err(LayoutError::Configuration(format!(
                "Invalid parameters for settlement type '{}': {}",
                settlement_type, reason
            )))
        };

        if self.min_size == 0 {
            return invalid("min_size must be at least 1");
        }
        if self.min_size > self.max_size {
            return invalid("min_size exceeds max_size");
        }
        if self.min_cluster_radius > self.max_cluster_radius {
            return invalid("min_cluster_radius exceeds max_cluster_radius");
        }
        if !(0.0..=1.0).contains(&self.organic_density) {
            return invalid("organic_density must lie in [0, 1]");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1");
        }

        // Every size in range needs size + 1 distinct seed cells.
        let capacity = u64::from(self.grid_size) * u64::from(self.grid_size);
        if capacity < u64::from(self.max_size) + 1 {
            return invalid("grid is too small for max_size + 1 clusters");
        }

        Ok(())
    }
}

/// Read-only lookup of generation parameters keyed by settlement type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementTypeRegistry {
    types: BTreeMap<SettlementType, TypeParameters>,
}

impl SettlementTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the built-in table for every settlement type.
    pub fn with_defaults() -> Self {
        let types = SettlementType::ALL
            .iter()
            .map(|&kind| (kind, TypeParameters::default_for(kind)))
            .collect();
        Self { types }
    }

    /// Loads a registry from JSON, validating every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hamlet::{SettlementType, SettlementTypeRegistry};
    ///
    /// let json = r#"{
    ///     "village": {
    ///         "min_size": 2, "max_size": 4, "grid_size": 24,
    ///         "min_spacing": 5, "min_cluster_radius": 1, "max_cluster_radius": 2
    ///     }
    /// }"#;
    /// let registry = SettlementTypeRegistry::from_json(json).unwrap();
    /// assert!(registry.get(SettlementType::Village).is_ok());
    /// assert!(registry.get(SettlementType::City).is_err());
    /// ```
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let registry: Self = serde_json::from_str(json)?;
        for (kind, params) in &registry.types {
            params.validate(*kind)?;
        }
        log::debug!(
            "Loaded settlement parameters for {} types",
            registry.types.len()
        );
        Ok(registry)
    }

    /// Loads a registry from a JSON file on disk.
    pub fn from_file(path: &Path) -> LayoutResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the registry to pretty JSON.
    pub fn to_json(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(LayoutError::from)
    }

    /// Registers or replaces the parameters for a type.
    pub fn insert(
        &mut self,
        settlement_type: SettlementType,
        params: TypeParameters,
    ) -> LayoutResult<()> {
        params.validate(settlement_type)?;
        self.types.insert(settlement_type, params);
        Ok(())
    }

    /// Resolves the parameters for a type.
    pub fn get(&self, settlement_type: SettlementType) -> LayoutResult<&TypeParameters> {
        self.types.get(&settlement_type).ok_or_else(|| {
            LayoutError::Configuration(format!(
                "No generation parameters registered for settlement type '{}'",
                settlement_type
            ))
        })
    }

    /// Returns true if the type has a parameter entry.
    pub fn contains(&self, settlement_type: SettlementType) -> bool {
        self.types.contains_key(&settlement_type)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for SettlementTypeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
