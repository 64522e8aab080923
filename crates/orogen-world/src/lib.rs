//! World-level artifacts of the pack compiler: materials, layered palettes,
//! decoration features, biomes, region-replacement extrusions, and the
//! generator that assembles and exports a whole pack.

mod biome;
mod export;
mod extrusion;
mod feature;
mod generator;
mod material;
mod palette;

pub use biome::{Biome, BiomeClass, BiomeTag, Humidity, PaletteHeight, Precipitation};
pub use export::{ExportError, ExportSummary, export_pack};
pub use extrusion::{Extrusion, ExtrusionError};
pub use feature::{Feature, FeatureCategory, FeatureError};
pub use generator::{Generator, GeneratorError};
pub use material::Material;
pub use palette::Palette;
