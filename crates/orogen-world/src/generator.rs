//! The top-level pack aggregate.
//!
//! A generator owns its biomes and extrusions exclusively; nothing is shared
//! between generators. It assembles biome documents by pulling fields off
//! each [`Biome`] and emits the combined pack document from the manifest's
//! world settings.

use orogen_config::{PackManifest, WorldSettings};
use orogen_emit::{Block, Item, Scalar};
use thiserror::Error;

use crate::{Biome, Extrusion, ExtrusionError, FeatureError};

/// Errors raised while rendering a generator's artifacts.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A feature document failed to render.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// An extrusion document failed to render.
    #[error(transparent)]
    Extrusion(#[from] ExtrusionError),
}

/// The unit of registration with the external engine.
#[derive(Debug)]
pub struct Generator {
    id: String,
    version: String,
    author: String,
    settings: WorldSettings,
    biomes: Vec<Biome>,
    extrusions: Vec<Extrusion>,
}

impl Generator {
    /// Creates an empty generator with default world settings.
    pub fn new(id: &str, version: &str, author: &str) -> Self {
        Self {
            id: id.to_string(),
            version: version.to_string(),
            author: author.to_string(),
            settings: WorldSettings::default(),
            biomes: Vec::new(),
            extrusions: Vec::new(),
        }
    }

    /// Creates a generator from a pack manifest.
    pub fn from_manifest(manifest: &PackManifest) -> Self {
        let mut generator = Self::new(
            &manifest.pack.id,
            &manifest.pack.version,
            &manifest.pack.author,
        );
        generator.settings = manifest.world.clone();
        generator
    }

    /// The generator identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replaces the world settings.
    pub fn set_settings(&mut self, settings: WorldSettings) {
        self.settings = settings;
    }

    /// Takes ownership of a biome.
    pub fn add_biome(&mut self, biome: Biome) {
        self.biomes.push(biome);
    }

    /// Takes ownership of an extrusion.
    pub fn add_extrusion(&mut self, extrusion: Extrusion) {
        self.extrusions.push(extrusion);
    }

    /// The owned biomes, in registration order.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// The owned extrusions, in registration order.
    pub fn extrusions(&self) -> &[Extrusion] {
        &self.extrusions
    }

    /// The combined pack metadata and world-settings document.
    pub fn pack_block(&self) -> Block {
        let mut block = Block::new();
        block.scalar("id", self.id.as_str());
        block.scalar("version", self.version.as_str());
        block.scalar("author", self.author.as_str());

        let mut world = Block::new();
        world.scalar("ocean-level", self.settings.ocean_level);
        world.scalar("global-scale", self.settings.global_scale);
        world.scalar("height-scale", self.settings.height_scale);
        let mut strata = Block::new();
        strata.scalar("min", self.settings.strata_min);
        strata.scalar("max", self.settings.strata_max);
        world.block("strata", strata);
        if !self.settings.preprocessors.is_empty() {
            let passes: Vec<Item> = self
                .settings
                .preprocessors
                .iter()
                .map(|name| Item::Scalar(name.as_str().into()))
                .collect();
            world.seq("preprocessors", passes);
        }
        block.block("world", world);
        block
    }

    /// Assembles one biome's document from its parts.
    ///
    /// Palettes and features appear by id; their own documents are exported
    /// separately.
    pub fn biome_block(&self, biome: &Biome) -> Block {
        let mut block = Block::new();
        block.scalar("id", biome.id());
        block.scalar("type", "BIOME");
        block.scalar("category", biome.kind());
        block.scalar("classification", biome.class().tag());
        block.scalar("rarity", biome.rarity());
        block.scalar("precipitation", biome.precipitation_kind().tag());
        if let Some(humidity) = biome.humidity() {
            block.scalar("humidity", humidity.tag());
        }
        if !biome.colors().is_empty() {
            let mut colors = Block::new();
            for (key, rgb) in biome.colors() {
                colors.scalar(key, Scalar::Color(*rgb));
            }
            block.block("colors", colors);
        }
        if !biome.tags().is_empty() {
            let tags: Vec<Item> = biome
                .tags()
                .iter()
                .map(|tag| Item::Scalar(tag.as_text().into()))
                .collect();
            block.seq("tags", tags);
        }
        if !biome.extensions().is_empty() {
            let extensions: Vec<Item> = biome
                .extensions()
                .iter()
                .map(|marker| Item::Scalar(marker.as_text().into()))
                .collect();
            block.seq("extensions", extensions);
        }
        if let Some(terrain) = biome.terrain() {
            block.block("terrain", terrain.to_block());
        }
        if !biome.palettes().is_empty() {
            let palettes: Vec<Item> = biome
                .palettes()
                .iter()
                .map(|(palette, height)| {
                    let mut entry = Block::new();
                    entry.scalar(palette.id(), height.to_scalar());
                    Item::Entries(entry)
                })
                .collect();
            block.seq("palettes", palettes);
        }
        let grouped = biome.features_by_category();
        if !grouped.is_empty() {
            let mut features = Block::new();
            for (category, list) in grouped {
                let ids: Vec<Item> = list
                    .iter()
                    .map(|feature| Item::Scalar(feature.id().into()))
                    .collect();
                features.seq(category.key(), ids);
            }
            block.block("features", features);
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BiomeClass, BiomeTag, Feature, FeatureCategory, Material, Palette, Precipitation,
    };
    use orogen_graph::NoiseNode;

    fn sample_biome() -> Biome {
        let mut biome = Biome::new(
            "Misty Pines",
            "TAIGA",
            BiomeClass::Highland,
            0.65,
            Precipitation::Rain,
        );
        biome.add_color("map", 0x2F5D3A);
        biome.set_rarity(3);
        biome.add_tag(BiomeTag::Mountainous);
        biome.add_tag(BiomeTag::Custom("PINEY".to_string()));
        biome.add_extension(BiomeTag::Custom("BASE_LAND".to_string()));

        let mut surface = Palette::new("PINE_FLOOR");
        surface.add_layer(&[(Material::solid("minecraft:podzol"), 1)], 1);
        biome.add_palette(surface, 255);

        let mut trees = Feature::new("PINES", FeatureCategory::Flora);
        trees.set_distributor(orogen_graph::Placement::gaussian(0.4, 0.1));
        trees.set_locator(orogen_graph::Placement::random(70, 120));
        biome.add_feature(trees);

        biome.set_terrain(NoiseNode::fbm(NoiseNode::perlin(0.01), 5, 0.5, 2.0));
        biome
    }

    #[test]
    fn test_pack_document_shape() {
        let mut generator = Generator::new("HIGHLANDS", "1.2.0", "orogen");
        let mut settings = WorldSettings::default();
        settings.preprocessors = vec!["EROSION".to_string()];
        generator.set_settings(settings);
        assert_eq!(
            generator.pack_block().render(),
            "id: HIGHLANDS\n\
             version: 1.2.0\n\
             author: orogen\n\
             world:\n\
             \x20 ocean-level: 62\n\
             \x20 global-scale: 1\n\
             \x20 height-scale: 1\n\
             \x20 strata:\n\
             \x20   min: -64\n\
             \x20   max: 320\n\
             \x20 preprocessors:\n\
             \x20   - EROSION\n"
        );
    }

    #[test]
    fn test_biome_document_field_order() {
        let generator = Generator::new("PACK", "0.1.0", "orogen");
        let rendered = generator.biome_block(&sample_biome()).render();
        assert!(rendered.starts_with(
            "id: MISTY_PINES\ntype: BIOME\ncategory: TAIGA\nclassification: HIGHLAND\nrarity: 3\nprecipitation: RAIN\nhumidity: SEMI_HUMID\n"
        ));
        let colors = rendered.find("colors:").unwrap();
        let tags = rendered.find("tags:").unwrap();
        let terrain = rendered.find("terrain:").unwrap();
        let palettes = rendered.find("palettes:").unwrap();
        let features = rendered.find("features:").unwrap();
        assert!(colors < tags && tags < terrain && terrain < palettes && palettes < features);
        assert!(rendered.contains("colors:\n  map: 0x2f5d3a\n"));
        assert!(rendered.contains("palettes:\n  - PINE_FLOOR: 255\n"));
        assert!(rendered.contains("features:\n  flora:\n    - PINES\n"));
    }

    #[test]
    fn test_snow_biome_has_no_humidity_line() {
        let generator = Generator::new("PACK", "0.1.0", "orogen");
        let biome = Biome::new(
            "Frozen Coast",
            "ICY",
            BiomeClass::Coast,
            0.8,
            Precipitation::Snow,
        );
        let rendered = generator.biome_block(&biome).render();
        assert!(!rendered.contains("humidity"));
        assert!(rendered.contains("precipitation: SNOW\n"));
    }

    #[test]
    fn test_from_manifest_carries_settings() {
        let mut manifest = PackManifest::default();
        manifest.pack.id = "ISLES".to_string();
        manifest.world.ocean_level = 48;
        let generator = Generator::from_manifest(&manifest);
        assert_eq!(generator.id(), "ISLES");
        assert!(generator.pack_block().render().contains("ocean-level: 48\n"));
    }
}
