//! Block-pattern predicates.
//!
//! A [`Pattern`] is a boolean predicate over nearby block identities and
//! vertical offsets. Combinators compose child patterns; leaf kinds match
//! explicit block ids, any solid block, or air. Validation runs as a pure
//! pass at render time and fails eagerly on malformed nodes, naming the
//! offending pattern type.

use orogen_emit::{Block, Item};
use thiserror::Error;

use crate::Span;

/// The pattern node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// All children must match.
    And,
    /// At least one child must match.
    Or,
    /// Exactly one child must match.
    Xor,
    /// The single child must not match.
    Not,
    /// Each listed block id must sit at its offset.
    Match,
    /// Any of the listed block ids at one shared offset.
    MatchSet,
    /// A solid block at the offset.
    MatchSolid,
    /// Air at the offset.
    MatchAir,
}

impl PatternKind {
    /// The `type:` tag emitted for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            PatternKind::And => "AND",
            PatternKind::Or => "OR",
            PatternKind::Xor => "XOR",
            PatternKind::Not => "NOT",
            PatternKind::Match => "MATCH",
            PatternKind::MatchSet => "MATCH_SET",
            PatternKind::MatchSolid => "MATCH_SOLID",
            PatternKind::MatchAir => "MATCH_AIR",
        }
    }

    fn is_combinator(self) -> bool {
        matches!(self, PatternKind::And | PatternKind::Or | PatternKind::Xor)
    }

    fn requires_span(self) -> bool {
        matches!(
            self,
            PatternKind::Match | PatternKind::MatchSolid | PatternKind::MatchAir
        )
    }
}

/// Structural errors raised when a malformed pattern is rendered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// A combinator has no children.
    #[error("{kind} pattern requires at least one sub-pattern")]
    MissingChildren {
        /// The offending pattern type tag.
        kind: &'static str,
    },

    /// NOT must wrap exactly one child.
    #[error("NOT pattern requires exactly one sub-pattern, found {found}")]
    NotArity {
        /// Number of children actually attached.
        found: usize,
    },

    /// MATCH_SET was rendered without an offset.
    #[error("MATCH_SET pattern requires an offset")]
    MissingOffset,

    /// A leaf kind was rendered without its vertical range.
    #[error("{kind} pattern requires a vertical range")]
    MissingSpan {
        /// The offending pattern type tag.
        kind: &'static str,
    },
}

/// A boolean predicate tree over block identities.
#[derive(Clone, Debug)]
pub struct Pattern {
    kind: PatternKind,
    blocks: Vec<(String, i32)>,
    span: Option<Span>,
    offset: Option<i32>,
    children: Vec<Pattern>,
}

impl Pattern {
    /// Creates an empty pattern of the given kind.
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
            span: None,
            offset: None,
            children: Vec::new(),
        }
    }

    /// The pattern's kind.
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Adds a block id at a vertical offset (MATCH and MATCH_SET kinds).
    pub fn add_block(&mut self, id: &str, offset: i32) {
        self.blocks.push((id.to_string(), offset));
    }

    /// Attaches a child pattern (combinator kinds).
    pub fn add_pattern(&mut self, child: Pattern) {
        self.children.push(child);
    }

    /// Sets the vertical range.
    pub fn set_span(&mut self, span: Span) {
        self.span = Some(span);
    }

    /// Sets the shared offset (MATCH_SET, MATCH_SOLID, MATCH_AIR kinds).
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = Some(offset);
    }

    /// Checks the structural invariants without emitting anything.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.kind.is_combinator() && self.children.is_empty() {
            return Err(PatternError::MissingChildren {
                kind: self.kind.tag(),
            });
        }
        if self.kind == PatternKind::Not && self.children.len() != 1 {
            return Err(PatternError::NotArity {
                found: self.children.len(),
            });
        }
        if self.kind == PatternKind::MatchSet && self.offset.is_none() {
            return Err(PatternError::MissingOffset);
        }
        if self.kind.requires_span() && self.span.is_none() {
            return Err(PatternError::MissingSpan {
                kind: self.kind.tag(),
            });
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    /// A MATCH whose every entry names air degrades to MATCH_AIR.
    fn effective_kind(&self) -> PatternKind {
        if self.kind == PatternKind::Match
            && !self.blocks.is_empty()
            && self.blocks.iter().all(|(id, _)| id == "air")
        {
            PatternKind::MatchAir
        } else {
            self.kind
        }
    }

    /// Lowers the pattern to its block form without validating. Callers that
    /// did not run [`validate`](Self::validate) may emit a malformed document.
    pub fn to_block(&self) -> Block {
        let kind = self.effective_kind();
        let mut block = Block::new();
        block.scalar("type", kind.tag());
        match kind {
            PatternKind::And | PatternKind::Or | PatternKind::Xor | PatternKind::Not => {
                let children: Vec<Block> = self.children.iter().map(Pattern::to_block).collect();
                block.repeated("pattern", children);
            }
            PatternKind::Match => {
                for (id, offset) in &self.blocks {
                    block.scalar("block", id.as_str());
                    block.scalar("offset", *offset);
                }
            }
            PatternKind::MatchSet => {
                let items: Vec<Item> =
                    self.blocks.iter().map(|(id, _)| Item::Scalar(id.as_str().into())).collect();
                block.seq("blocks", items);
                if let Some(offset) = self.offset {
                    block.scalar("offset", offset);
                }
            }
            PatternKind::MatchSolid | PatternKind::MatchAir => {
                let offset = self
                    .offset
                    .or_else(|| self.blocks.first().map(|(_, offset)| *offset))
                    .unwrap_or(0);
                block.scalar("offset", offset);
            }
        }
        if let Some(span) = self.span {
            block.block("range", span.to_block());
        }
        block
    }

    /// Validates, then renders the pattern document.
    pub fn render(&self) -> Result<String, PatternError> {
        self.validate()?;
        Ok(self.to_block().render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone_match() -> Pattern {
        let mut pattern = Pattern::new(PatternKind::Match);
        pattern.add_block("minecraft:stone", -1);
        pattern.set_span(Span::new(0, 255));
        pattern
    }

    #[test]
    fn test_combinator_without_children_fails() {
        for kind in [PatternKind::And, PatternKind::Or, PatternKind::Xor] {
            let pattern = Pattern::new(kind);
            assert_eq!(
                pattern.render(),
                Err(PatternError::MissingChildren { kind: kind.tag() })
            );
        }
    }

    #[test]
    fn test_combinator_with_child_succeeds() {
        for kind in [PatternKind::And, PatternKind::Or, PatternKind::Xor] {
            let mut pattern = Pattern::new(kind);
            pattern.add_pattern(stone_match());
            assert!(pattern.render().is_ok());
        }
    }

    #[test]
    fn test_not_requires_exactly_one_child() {
        let mut pattern = Pattern::new(PatternKind::Not);
        assert_eq!(pattern.render(), Err(PatternError::NotArity { found: 0 }));
        pattern.add_pattern(stone_match());
        assert!(pattern.render().is_ok());
        pattern.add_pattern(stone_match());
        assert_eq!(pattern.render(), Err(PatternError::NotArity { found: 2 }));
    }

    #[test]
    fn test_match_set_requires_offset() {
        let mut pattern = Pattern::new(PatternKind::MatchSet);
        pattern.add_block("minecraft:stone", 0);
        assert_eq!(pattern.render(), Err(PatternError::MissingOffset));
        pattern.set_offset(-1);
        assert!(pattern.render().is_ok());
    }

    #[test]
    fn test_match_requires_span() {
        let mut pattern = Pattern::new(PatternKind::Match);
        pattern.add_block("minecraft:stone", 0);
        assert_eq!(
            pattern.render(),
            Err(PatternError::MissingSpan { kind: "MATCH" })
        );
    }

    #[test]
    fn test_match_document_shape() {
        let mut pattern = Pattern::new(PatternKind::Match);
        pattern.add_block("minecraft:stone", -1);
        pattern.add_block("minecraft:dirt", 1);
        pattern.set_span(Span::new(0, 128));
        assert_eq!(
            pattern.render().unwrap(),
            "type: MATCH\nblock: minecraft:stone\noffset: -1\nblock: minecraft:dirt\noffset: 1\nrange:\n  min: 0\n  max: 128\n"
        );
    }

    #[test]
    fn test_match_set_document_shape() {
        let mut pattern = Pattern::new(PatternKind::MatchSet);
        pattern.add_block("minecraft:stone", 0);
        pattern.add_block("minecraft:andesite", 0);
        pattern.set_offset(-1);
        assert_eq!(
            pattern.render().unwrap(),
            "type: MATCH_SET\nblocks:\n  - minecraft:stone\n  - minecraft:andesite\noffset: -1\n"
        );
    }

    #[test]
    fn test_all_air_match_degrades_to_match_air() {
        let mut pattern = Pattern::new(PatternKind::Match);
        pattern.add_block("air", 1);
        pattern.set_span(Span::new(60, 70));
        assert_eq!(
            pattern.render().unwrap(),
            "type: MATCH_AIR\noffset: 1\nrange:\n  min: 60\n  max: 70\n"
        );
    }

    #[test]
    fn test_mixed_air_entries_stay_match() {
        let mut pattern = Pattern::new(PatternKind::Match);
        pattern.add_block("air", 1);
        pattern.add_block("minecraft:stone", -1);
        pattern.set_span(Span::new(0, 255));
        let rendered = pattern.render().unwrap();
        assert!(rendered.starts_with("type: MATCH\n"));
        assert!(rendered.contains("block: air\n"));
    }

    #[test]
    fn test_children_reindent_under_repeated_key() {
        let mut pattern = Pattern::new(PatternKind::And);
        pattern.add_pattern(stone_match());
        let mut solid = Pattern::new(PatternKind::MatchSolid);
        solid.set_offset(1);
        solid.set_span(Span::new(0, 64));
        pattern.add_pattern(solid);
        assert_eq!(
            pattern.render().unwrap(),
            "type: AND\n\
             pattern:\n\
             \x20 type: MATCH\n\
             \x20 block: minecraft:stone\n\
             \x20 offset: -1\n\
             \x20 range:\n\
             \x20   min: 0\n\
             \x20   max: 255\n\
             pattern:\n\
             \x20 type: MATCH_SOLID\n\
             \x20 offset: 1\n\
             \x20 range:\n\
             \x20   min: 0\n\
             \x20   max: 64\n"
        );
    }

    #[test]
    fn test_validation_recurses_into_children() {
        let mut inner = Pattern::new(PatternKind::Match);
        inner.add_block("minecraft:stone", 0);
        // inner is missing its span
        let mut outer = Pattern::new(PatternKind::Or);
        outer.add_pattern(inner);
        assert_eq!(
            outer.render(),
            Err(PatternError::MissingSpan { kind: "MATCH" })
        );
    }
}
