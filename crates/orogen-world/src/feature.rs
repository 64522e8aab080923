//! Decoration features: a distributor, a locator, and weighted structures.

use orogen_emit::Block;
use orogen_graph::{Distributor, Locator, NoiseNode, PlacementError};
use thiserror::Error;

/// The category a feature is registered under in its biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureCategory {
    /// Large terrain-shaping decorations.
    Landform,
    /// Ore veins.
    Ore,
    /// Loose surface deposits.
    Deposit,
    /// Trees, plants, fungi.
    Flora,
    /// Placed structures.
    Structure,
}

impl FeatureCategory {
    /// The key this category uses in biome documents.
    pub fn key(self) -> &'static str {
        match self {
            FeatureCategory::Landform => "landform",
            FeatureCategory::Ore => "ore",
            FeatureCategory::Deposit => "deposit",
            FeatureCategory::Flora => "flora",
            FeatureCategory::Structure => "structure",
        }
    }

    /// All categories, in document order.
    pub fn all() -> [FeatureCategory; 5] {
        [
            FeatureCategory::Landform,
            FeatureCategory::Ore,
            FeatureCategory::Deposit,
            FeatureCategory::Flora,
            FeatureCategory::Structure,
        ]
    }
}

/// Configuration errors raised when an incomplete feature is rendered.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// No distributor was set before rendering.
    #[error("feature `{id}` has no distributor")]
    MissingDistributor {
        /// The feature identifier.
        id: String,
    },

    /// No locator was set before rendering.
    #[error("feature `{id}` has no locator")]
    MissingLocator {
        /// The feature identifier.
        id: String,
    },

    /// A placement strategy failed its own validation.
    #[error("feature `{id}`: {source}")]
    Placement {
        /// The feature identifier.
        id: String,
        /// The underlying strategy error.
        #[source]
        source: PlacementError,
    },
}

/// A decoration unit: where it may appear, how densely, and what it places.
#[derive(Clone, Debug)]
pub struct Feature {
    id: String,
    category: FeatureCategory,
    distributor: Option<Distributor>,
    locator: Option<Locator>,
    structures: Vec<(String, u32)>,
    structure_sampler: Option<NoiseNode>,
}

impl Feature {
    /// Creates an empty feature in the given category.
    pub fn new(id: &str, category: FeatureCategory) -> Self {
        Self {
            id: id.to_string(),
            category,
            distributor: None,
            locator: None,
            structures: Vec::new(),
            structure_sampler: None,
        }
    }

    /// The feature identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The category this feature registers under.
    pub fn category(&self) -> FeatureCategory {
        self.category
    }

    /// Adds a weighted structure reference.
    pub fn add_structure(&mut self, reference: &str, weight: u32) {
        self.structures.push((reference.to_string(), weight));
    }

    /// Sets the density strategy.
    pub fn set_distributor(&mut self, distributor: Distributor) {
        self.distributor = Some(distributor);
    }

    /// Sets the legality strategy.
    pub fn set_locator(&mut self, locator: Locator) {
        self.locator = Some(locator);
    }

    /// Sets the sampler that picks among the weighted structures.
    pub fn set_structure_sampler(&mut self, sampler: NoiseNode) {
        self.structure_sampler = Some(sampler);
    }

    /// Checks that both strategies are present and valid.
    pub fn validate(&self) -> Result<(), FeatureError> {
        let distributor = self
            .distributor
            .as_ref()
            .ok_or_else(|| FeatureError::MissingDistributor {
                id: self.id.clone(),
            })?;
        let locator = self
            .locator
            .as_ref()
            .ok_or_else(|| FeatureError::MissingLocator {
                id: self.id.clone(),
            })?;
        distributor
            .validate()
            .and_then(|()| locator.validate())
            .map_err(|source| FeatureError::Placement {
                id: self.id.clone(),
                source,
            })
    }

    /// Validates, then lowers the feature to its document block.
    pub fn to_block(&self) -> Result<Block, FeatureError> {
        self.validate()?;
        let mut block = Block::new();
        block.scalar("id", self.id.as_str());
        block.scalar("type", "FEATURE");
        if let (Some(distributor), Some(locator)) = (&self.distributor, &self.locator) {
            block.block("distributor", distributor.to_block());
            block.block("locator", locator.to_block());
        }
        if !self.structures.is_empty() {
            let mut structures = Block::new();
            for (reference, weight) in &self.structures {
                structures.scalar(reference, *weight);
            }
            block.block("structures", structures);
        }
        if let Some(sampler) = &self.structure_sampler {
            block.block("structure-sampler", sampler.to_block());
        }
        Ok(block)
    }

    /// Renders the feature document.
    pub fn render(&self) -> Result<String, FeatureError> {
        Ok(self.to_block()?.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_graph::Placement;

    fn complete_feature() -> Feature {
        let mut feature = Feature::new("OAK_TREES", FeatureCategory::Flora);
        feature.set_distributor(Placement::sampler(
            orogen_graph::NoiseNode::perlin(0.02),
            0.1,
        ));
        feature.set_locator(Placement::random(60, 100));
        feature.add_structure("oak_small", 10);
        feature.add_structure("oak_large", 1);
        feature
    }

    #[test]
    fn test_render_requires_distributor() {
        let mut feature = Feature::new("BARE", FeatureCategory::Flora);
        feature.set_locator(Placement::random(0, 10));
        assert!(matches!(
            feature.render(),
            Err(FeatureError::MissingDistributor { .. })
        ));
    }

    #[test]
    fn test_render_requires_locator() {
        let mut feature = Feature::new("BARE", FeatureCategory::Flora);
        feature.set_distributor(Placement::gaussian(0.5, 0.1));
        assert!(matches!(
            feature.render(),
            Err(FeatureError::MissingLocator { .. })
        ));
    }

    #[test]
    fn test_complete_feature_document() {
        let rendered = complete_feature().render().unwrap();
        assert!(rendered.starts_with("id: OAK_TREES\ntype: FEATURE\n"));
        assert!(rendered.contains("distributor:\n  type: SAMPLER\n"));
        assert!(rendered.contains("locator:\n  type: RANDOM\n  min: 60\n  max: 100\n"));
        assert!(rendered.contains("structures:\n  oak_small: 10\n  oak_large: 1\n"));
    }

    #[test]
    fn test_structure_sampler_is_optional() {
        let mut feature = complete_feature();
        assert!(!feature.render().unwrap().contains("structure-sampler"));
        feature.set_structure_sampler(orogen_graph::NoiseNode::constant(0));
        assert!(feature.render().unwrap().contains("structure-sampler:\n"));
    }

    #[test]
    fn test_invalid_nested_strategy_surfaces() {
        let mut feature = complete_feature();
        feature.set_locator(Placement::all(vec![]));
        assert!(matches!(
            feature.render(),
            Err(FeatureError::Placement { .. })
        ));
    }
}
