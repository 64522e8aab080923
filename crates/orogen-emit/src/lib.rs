//! Document model and writer for the engine's declarative text format.
//!
//! Every artifact the compiler produces (samplers, patterns, palettes, biomes,
//! extrusions, the pack document) lowers to the same small value algebra and is
//! written by a single indentation-exact serializer, so the whitespace contract
//! of the downstream engine lives in exactly one place.

mod block;
mod scalar;

pub use block::{Block, Item, Value};
pub use scalar::Scalar;
