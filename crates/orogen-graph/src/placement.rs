//! Spatial placement strategies.
//!
//! The same closed variant set serves two contexts: a *locator* decides where
//! a feature may legally appear, a *distributor* decides how densely it
//! appears. The context is a type-level marker, so combinators can only nest
//! strategies of their own context; mixing them does not compile.

use std::marker::PhantomData;

use orogen_emit::Block;
use thiserror::Error;

use crate::{NoiseNode, Pattern, PatternError, SaltSource, Span};

/// Marker trait for the two placement contexts.
pub trait PlacementContext {
    /// The key a combinator repeats for each child strategy.
    const KEY: &'static str;
}

/// Context marker: decides where a feature may appear.
#[derive(Clone, Copy, Debug)]
pub enum Locate {}

/// Context marker: decides how densely a feature appears.
#[derive(Clone, Copy, Debug)]
pub enum Distribute {}

impl PlacementContext for Locate {
    const KEY: &'static str = "locator";
}

impl PlacementContext for Distribute {
    const KEY: &'static str = "distributor";
}

/// A placement strategy in locator context.
pub type Locator = Placement<Locate>;

/// A placement strategy in distributor context.
pub type Distributor = Placement<Distribute>;

/// Structural errors raised when a malformed strategy is rendered.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// A combinator has no children.
    #[error("{kind} placement requires at least one child strategy")]
    MissingChildren {
        /// The offending strategy type tag.
        kind: &'static str,
    },

    /// An anchored strategy wraps an invalid pattern.
    #[error("anchored placement pattern is invalid: {0}")]
    Pattern(#[from] PatternError),
}

#[derive(Clone, Debug)]
enum Kind<C: PlacementContext> {
    Random { min: i32, max: i32 },
    Gaussian { mean: f64, deviation: f64 },
    Anchored { pattern: Pattern, span: Span },
    Grid { width: u32, padding: u32 },
    Sampler { sampler: NoiseNode, threshold: f64 },
    All { children: Vec<Placement<C>> },
    Any { children: Vec<Placement<C>> },
}

impl<C: PlacementContext> Kind<C> {
    fn tag(&self) -> &'static str {
        match self {
            Kind::Random { .. } => "RANDOM",
            Kind::Gaussian { .. } => "GAUSSIAN",
            Kind::Anchored { .. } => "PATTERN",
            Kind::Grid { .. } => "GRID",
            Kind::Sampler { .. } => "SAMPLER",
            Kind::All { .. } => "AND",
            Kind::Any { .. } => "OR",
        }
    }
}

/// A spatial placement strategy, tagged with its usage context.
#[derive(Clone, Debug)]
pub struct Placement<C: PlacementContext> {
    salt: Option<u64>,
    kind: Kind<C>,
    _marker: PhantomData<C>,
}

impl<C: PlacementContext> Placement<C> {
    fn from_kind(kind: Kind<C>) -> Self {
        Self {
            salt: None,
            kind,
            _marker: PhantomData,
        }
    }

    /// Uniformly random heights in `[min, max]`.
    pub fn random(min: i32, max: i32) -> Self {
        Self::from_kind(Kind::Random { min, max })
    }

    /// Gaussian-distributed heights around `mean`.
    pub fn gaussian(mean: f64, deviation: f64) -> Self {
        Self::from_kind(Kind::Gaussian { mean, deviation })
    }

    /// Anchored to positions where `pattern` matches inside `span`.
    pub fn anchored(pattern: Pattern, span: Span) -> Self {
        Self::from_kind(Kind::Anchored { pattern, span })
    }

    /// A regular grid of cells `width` across with `padding` between cells.
    pub fn grid(width: u32, padding: u32) -> Self {
        Self::from_kind(Kind::Grid { width, padding })
    }

    /// Driven by a sampler: positions where it exceeds `threshold`.
    pub fn sampler(sampler: NoiseNode, threshold: f64) -> Self {
        Self::from_kind(Kind::Sampler { sampler, threshold })
    }

    /// All child strategies must allow the position.
    pub fn all(children: Vec<Placement<C>>) -> Self {
        Self::from_kind(Kind::All { children })
    }

    /// Any child strategy may allow the position.
    pub fn any(children: Vec<Placement<C>>) -> Self {
        Self::from_kind(Kind::Any { children })
    }

    /// Sets an explicit decorrelation salt.
    pub fn with_salt(mut self, salt: u64) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Draws a salt from the given source.
    pub fn salted(self, salts: &mut SaltSource) -> Self {
        let salt = salts.next_salt();
        self.with_salt(salt)
    }

    /// Checks structural invariants without emitting anything.
    pub fn validate(&self) -> Result<(), PlacementError> {
        match &self.kind {
            Kind::All { children } | Kind::Any { children } => {
                if children.is_empty() {
                    return Err(PlacementError::MissingChildren {
                        kind: self.kind.tag(),
                    });
                }
                for child in children {
                    child.validate()?;
                }
                Ok(())
            }
            Kind::Anchored { pattern, .. } => Ok(pattern.validate()?),
            _ => Ok(()),
        }
    }

    /// Lowers the strategy to its block form without validating.
    pub fn to_block(&self) -> Block {
        let mut block = Block::new();
        if let Some(salt) = self.salt {
            block.scalar("salt", salt);
        }
        block.scalar("type", self.kind.tag());
        match &self.kind {
            Kind::Random { min, max } => {
                block.scalar("min", *min);
                block.scalar("max", *max);
            }
            Kind::Gaussian { mean, deviation } => {
                block.scalar("mean", *mean);
                block.scalar("deviation", *deviation);
            }
            Kind::Anchored { pattern, span } => {
                block.block("pattern", pattern.to_block());
                block.block("range", span.to_block());
            }
            Kind::Grid { width, padding } => {
                block.scalar("width", *width);
                block.scalar("padding", *padding);
            }
            Kind::Sampler { sampler, threshold } => {
                block.block("sampler", sampler.to_block());
                block.scalar("threshold", *threshold);
            }
            Kind::All { children } | Kind::Any { children } => {
                let blocks: Vec<Block> = children.iter().map(Placement::to_block).collect();
                block.repeated(C::KEY, blocks);
            }
        }
        block
    }

    /// Validates, then renders the strategy document.
    pub fn render(&self) -> Result<String, PlacementError> {
        self.validate()?;
        Ok(self.to_block().render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternKind;

    #[test]
    fn test_random_shape() {
        let locator = Locator::random(0, 64);
        assert_eq!(locator.render().unwrap(), "type: RANDOM\nmin: 0\nmax: 64\n");
    }

    #[test]
    fn test_salt_precedes_type_tag() {
        let distributor = Distributor::gaussian(32.0, 4.0).with_salt(99);
        assert_eq!(
            distributor.render().unwrap(),
            "salt: 99\ntype: GAUSSIAN\nmean: 32\ndeviation: 4\n"
        );
    }

    #[test]
    fn test_combinator_repeats_context_key() {
        let locator = Locator::all(vec![Locator::random(0, 16), Locator::grid(8, 2)]);
        assert_eq!(
            locator.render().unwrap(),
            "type: AND\nlocator:\n  type: RANDOM\n  min: 0\n  max: 16\nlocator:\n  type: GRID\n  width: 8\n  padding: 2\n"
        );

        let distributor = Distributor::any(vec![Distributor::gaussian(8.0, 1.0)]);
        assert_eq!(
            distributor.render().unwrap(),
            "type: OR\ndistributor:\n  type: GAUSSIAN\n  mean: 8\n  deviation: 1\n"
        );
    }

    #[test]
    fn test_empty_combinator_fails() {
        let locator = Locator::all(vec![]);
        assert!(matches!(
            locator.render(),
            Err(PlacementError::MissingChildren { kind: "AND" })
        ));
    }

    #[test]
    fn test_anchored_validates_inner_pattern() {
        let incomplete = Pattern::new(PatternKind::MatchSet);
        let locator = Locator::anchored(incomplete, Span::new(0, 64));
        assert!(matches!(
            locator.render(),
            Err(PlacementError::Pattern(PatternError::MissingOffset))
        ));
    }

    #[test]
    fn test_anchored_shape() {
        let mut pattern = Pattern::new(PatternKind::MatchSolid);
        pattern.set_offset(-1);
        pattern.set_span(Span::new(0, 128));
        let locator = Locator::anchored(pattern, Span::new(48, 90));
        assert_eq!(
            locator.render().unwrap(),
            "type: PATTERN\npattern:\n  type: MATCH_SOLID\n  offset: -1\n  range:\n    min: 0\n    max: 128\nrange:\n  min: 48\n  max: 90\n"
        );
    }

    #[test]
    fn test_sampler_driven_shape() {
        let distributor = Distributor::sampler(NoiseNode::perlin(0.125), 0.3);
        assert_eq!(
            distributor.render().unwrap(),
            "type: SAMPLER\nsampler:\n  type: PERLIN\n  frequency: 0.125\nthreshold: 0.3\n"
        );
    }

    #[test]
    fn test_salted_combinator_children() {
        let mut salts = SaltSource::new(5);
        let locator = Locator::all(vec![
            Locator::random(0, 32).salted(&mut salts),
            Locator::grid(4, 1).salted(&mut salts),
        ]);
        let rendered = locator.render().unwrap();
        assert_eq!(rendered.matches("salt: ").count(), 2);
    }
}
