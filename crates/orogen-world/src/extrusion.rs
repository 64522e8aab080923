//! Global region-replacement rules.

use orogen_emit::{Block, Item};
use orogen_graph::{NoiseNode, Span};
use thiserror::Error;

use crate::Biome;

/// Configuration errors raised when an incomplete extrusion is rendered.
#[derive(Debug, Error)]
pub enum ExtrusionError {
    /// No source tag was set.
    #[error("extrusion `{id}` has no source tag")]
    MissingFrom {
        /// The extrusion identifier.
        id: String,
    },

    /// No vertical range was set.
    #[error("extrusion `{id}` has no vertical range")]
    MissingSpan {
        /// The extrusion identifier.
        id: String,
    },

    /// No sampler was set.
    #[error("extrusion `{id}` has no sampler")]
    MissingSampler {
        /// The extrusion identifier.
        id: String,
    },
}

/// Replaces tagged regions within a height range with substitute biomes.
///
/// The substitution list always begins with a synthetic `SELF` entry
/// inserted at construction, so the source biome keeps a weighted chance of
/// surviving the replacement; `add_biome` entries follow in call order.
#[derive(Clone, Debug)]
pub struct Extrusion {
    id: String,
    from: Option<String>,
    span: Option<Span>,
    sampler: Option<NoiseNode>,
    substitutions: Vec<(String, u32)>,
}

impl Extrusion {
    /// Creates an extrusion whose `SELF` entry carries the given weight.
    pub fn new(id: &str, self_weight: u32) -> Self {
        Self {
            id: id.to_string(),
            from: None,
            span: None,
            sampler: None,
            substitutions: vec![("SELF".to_string(), self_weight)],
        }
    }

    /// The extrusion identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the tag whose regions are replaced.
    pub fn set_from(&mut self, tag: &str) {
        self.from = Some(tag.to_string());
    }

    /// Sets the vertical range the replacement applies to.
    pub fn set_span(&mut self, span: Span) {
        self.span = Some(span);
    }

    /// Sets the sampler that picks among the substitution candidates.
    pub fn set_sampler(&mut self, sampler: NoiseNode) {
        self.sampler = Some(sampler);
    }

    /// Adds a substitute biome with the given weight.
    pub fn add_biome(&mut self, biome: &Biome, weight: u32) {
        self.substitutions.push((biome.id().to_string(), weight));
    }

    /// Checks that the required fields are present.
    pub fn validate(&self) -> Result<(), ExtrusionError> {
        if self.from.is_none() {
            return Err(ExtrusionError::MissingFrom {
                id: self.id.clone(),
            });
        }
        if self.span.is_none() {
            return Err(ExtrusionError::MissingSpan {
                id: self.id.clone(),
            });
        }
        if self.sampler.is_none() {
            return Err(ExtrusionError::MissingSampler {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Validates, then lowers the extrusion to its document block.
    pub fn to_block(&self) -> Result<Block, ExtrusionError> {
        self.validate()?;
        let mut rule = Block::new();
        rule.scalar("type", "REPLACE");
        if let Some(from) = &self.from {
            rule.scalar("from", from.as_str());
        }
        if let Some(sampler) = &self.sampler {
            rule.block("sampler", sampler.to_block());
        }
        let to: Vec<Item> = self
            .substitutions
            .iter()
            .map(|(id, weight)| Item::pair(id, *weight))
            .collect();
        rule.seq("to", to);
        if let Some(span) = self.span {
            rule.block("range", span.to_block());
        }
        let mut block = Block::new();
        block.seq("extrusions", vec![Item::Entries(rule)]);
        Ok(block)
    }

    /// Renders the extrusion document.
    pub fn render(&self) -> Result<String, ExtrusionError> {
        Ok(self.to_block()?.render())
    }
}
