//! Demo pack: a small complete world definition exercising every artifact
//! kind the compiler knows about.

use orogen_config::PackManifest;
use orogen_graph::{
    BinaryOp, Distributor, ExprOp, Locator, MetaExpression, NoiseNode, Pattern, PatternKind,
    SaltSource, Span,
};
use orogen_world::{
    Biome, BiomeClass, BiomeTag, Extrusion, Feature, FeatureCategory, Generator, Material,
    Palette, Precipitation,
};

/// Builds the demo generator from a manifest and a seed.
pub fn build_demo_pack(manifest: &PackManifest, seed: u64) -> Generator {
    let mut salts = SaltSource::new(seed);
    let mut generator = Generator::from_manifest(manifest);

    generator.add_biome(meadow(&mut salts));
    generator.add_biome(pine_slopes(&mut salts));
    generator.add_biome(frozen_coast(&mut salts));
    generator.add_extrusion(cave_bands(&mut salts));

    generator
}

fn surface_palette(id: &str, top: &str) -> Palette {
    let mut palette = Palette::new(id);
    palette.add_layer(&[(Material::solid(top), 1)], 1);
    palette.add_layer(
        &[
            (Material::solid("minecraft:dirt"), 4),
            (Material::solid("minecraft:coarse_dirt"), 1),
            // Filtered out at insertion; kept here to mirror real material
            // tables that mix in fluids.
            (Material::fluid("minecraft:water"), 1),
        ],
        3,
    );
    palette.add_layer(&[(Material::solid("minecraft:stone"), 1)], 60);
    palette
}

fn rolling_terrain(salts: &mut SaltSource) -> NoiseNode {
    NoiseNode::fbm(NoiseNode::perlin(0.008).salted(salts), 4, 0.5, 2.0)
}

fn tree_feature(id: &str, structure: &str, salts: &mut SaltSource) -> Feature {
    let mut feature = Feature::new(id, FeatureCategory::Flora);
    feature.set_distributor(
        Distributor::sampler(NoiseNode::perlin(0.02).salted(salts), 0.15).salted(salts),
    );

    let mut on_grass = Pattern::new(PatternKind::Match);
    on_grass.add_block("minecraft:grass_block", -1);
    on_grass.set_span(Span::new(60, 180));
    feature.set_locator(Locator::anchored(on_grass, Span::new(60, 180)).salted(salts));

    feature.add_structure(structure, 10);
    feature.add_structure(&format!("{structure}_large"), 1);
    feature
}

fn meadow(salts: &mut SaltSource) -> Biome {
    let mut biome = Biome::new("Meadow", "PLAINS", BiomeClass::Lowland, 0.55, Precipitation::Rain);
    biome.add_color("map", 0x7BB661);
    biome.set_rarity(10);
    biome.add_tag(BiomeTag::Custom("GRASSY".to_string()));
    biome.add_extension(BiomeTag::Custom("BASE_LAND".to_string()));
    biome.set_terrain(rolling_terrain(salts));

    biome.add_palette(surface_palette("MEADOW_SURFACE", "minecraft:grass_block"), 255);

    // Beach band pinned just above the engine-resolved ocean level.
    let mut beach_top = MetaExpression::new("ocean-level");
    beach_top.apply(2, ExprOp::Add);
    let mut beach = Palette::new("MEADOW_BEACH");
    beach.add_layer(&[(Material::solid("minecraft:sand"), 1)], 4);
    biome.add_palette(beach, beach_top);

    biome.add_feature(tree_feature("LONE_OAKS", "oak", salts));

    let mut boulders = Feature::new("MOSSY_BOULDERS", FeatureCategory::Deposit);
    boulders.set_distributor(Distributor::gaussian(0.2, 0.05).salted(salts));
    boulders.set_locator(Locator::grid(24, 6).salted(salts));
    boulders.add_structure("boulder_mossy", 1);
    biome.add_feature(boulders);

    biome
}

fn pine_slopes(salts: &mut SaltSource) -> Biome {
    let mut biome = Biome::new(
        "Pine Slopes",
        "TAIGA",
        BiomeClass::Mountain,
        0.7,
        Precipitation::Rain,
    );
    biome.add_color("map", 0x2F5D3A);
    biome.set_rarity(4);
    biome.add_tag(BiomeTag::Mountainous);
    biome.add_extension(BiomeTag::Custom("BASE_LAND".to_string()));

    // Ridged peaks blended over the rolling base.
    let base = rolling_terrain(salts);
    let ridges = NoiseNode::ridged(NoiseNode::perlin(0.015).salted(salts), 5, 0.6, 2.2);
    biome.set_terrain(NoiseNode::binary(BinaryOp::Max, base, ridges));

    biome.add_palette(surface_palette("PINE_FLOOR", "minecraft:podzol"), 255);

    biome.add_feature(tree_feature("DENSE_PINES", "spruce", salts));

    let mut ore = Feature::new("HIGH_COPPER", FeatureCategory::Ore);
    ore.set_distributor(Distributor::random(0, 32).salted(salts));
    let mut in_stone = Pattern::new(PatternKind::MatchSet);
    in_stone.add_block("minecraft:stone", 0);
    in_stone.add_block("minecraft:andesite", 0);
    in_stone.set_offset(0);
    ore.set_locator(Locator::anchored(in_stone, Span::new(40, 120)).salted(salts));
    ore.add_structure("copper_blob", 1);
    biome.add_feature(ore);

    biome
}

fn frozen_coast(salts: &mut SaltSource) -> Biome {
    let mut biome = Biome::new(
        "Frozen Coast",
        "ICY",
        BiomeClass::Coast,
        0.8,
        Precipitation::Snow,
    );
    biome.add_color("map", 0xD8E8F0);
    biome.set_rarity(2);
    biome.add_tag(BiomeTag::Coastal);
    biome.add_tag(BiomeTag::Custom("FROZEN".to_string()));
    biome.set_terrain(rolling_terrain(salts));

    let mut shore = Palette::new("FROZEN_SHORE");
    shore.add_layer(&[(Material::solid("minecraft:snow_block"), 1)], 2);
    shore.add_layer_sampled(
        &[
            (Material::solid("minecraft:packed_ice"), 3),
            (Material::solid("minecraft:gravel"), 1),
        ],
        4,
        NoiseNode::cellular(0.3).salted(salts),
    );
    biome.add_palette(shore, 255);

    let mut spikes = Feature::new("ICE_SPIKES", FeatureCategory::Landform);
    spikes.set_distributor(Distributor::any(vec![
        Distributor::gaussian(0.1, 0.02).salted(salts),
        Distributor::sampler(NoiseNode::perlin(0.05).salted(salts), 0.4),
    ]));
    let mut over_air = Pattern::new(PatternKind::Match);
    over_air.add_block("air", 1);
    over_air.set_span(Span::new(62, 100));
    spikes.set_locator(Locator::anchored(over_air, Span::new(62, 100)).salted(salts));
    spikes.add_structure("ice_spike", 1);
    biome.add_feature(spikes);

    biome
}

fn cave_bands(salts: &mut SaltSource) -> Extrusion {
    let mut extrusion = Extrusion::new("CAVE_BANDS", 6);
    extrusion.set_from("BASE_LAND");
    extrusion.set_span(Span::new(-64, 8));
    extrusion.set_sampler(NoiseNode::cellular(0.02).salted(salts));

    let lush = Biome::new("Lush Caves", "CAVE", BiomeClass::Lowland, 0.9, Precipitation::Rain);
    let drip = Biome::new("Dripstone Caves", "CAVE", BiomeClass::Lowland, 0.3, Precipitation::Rain);
    extrusion.add_biome(&lush, 2);
    extrusion.add_biome(&drip, 1);

    extrusion
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_world::export_pack;

    #[test]
    fn test_demo_pack_exports_cleanly() {
        let manifest = PackManifest::default();
        let generator = build_demo_pack(&manifest, 1234);
        let dir = tempfile::tempdir().unwrap();
        let summary = export_pack(&generator, dir.path()).unwrap();
        assert_eq!(summary.biomes, 3);
        assert_eq!(summary.extrusions, 1);
        assert!(summary.palettes >= 4);
        assert!(summary.features >= 4);
    }

    #[test]
    fn test_demo_pack_is_seed_deterministic() {
        let manifest = PackManifest::default();
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        export_pack(&build_demo_pack(&manifest, 7), dir_a.path()).unwrap();
        export_pack(&build_demo_pack(&manifest, 7), dir_b.path()).unwrap();
        for name in ["pack.yml", "biomes/MEADOW.yml", "features/ICE_SPIKES.yml"] {
            let a = std::fs::read_to_string(dir_a.path().join(name)).unwrap();
            let b = std::fs::read_to_string(dir_b.path().join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs of the same seed");
        }
    }

    #[test]
    fn test_demo_pack_seed_changes_output() {
        let manifest = PackManifest::default();
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        export_pack(&build_demo_pack(&manifest, 1), dir_a.path()).unwrap();
        export_pack(&build_demo_pack(&manifest, 2), dir_b.path()).unwrap();
        let a = std::fs::read_to_string(dir_a.path().join("features/LONE_OAKS.yml")).unwrap();
        let b = std::fs::read_to_string(dir_b.path().join("features/LONE_OAKS.yml")).unwrap();
        assert_ne!(a, b);
    }
}
