//! Inclusive vertical ranges.

use orogen_emit::Block;

/// An inclusive vertical range, in world height units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Lowest height included.
    pub min: i32,
    /// Highest height included.
    pub max: i32,
}

impl Span {
    /// Creates a span. `min` and `max` are normalized so `min <= max`.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lowers the span to its `min`/`max` block form.
    pub fn to_block(self) -> Block {
        let mut block = Block::new();
        block.scalar("min", self.min);
        block.scalar("max", self.max);
        block
    }
}
