//! Filesystem export of a generator's artifacts.
//!
//! One document per biome and per extrusion, one per distinct palette and
//! feature referenced by any biome, plus the combined pack document. Writes
//! are synchronous and unretried; the first failure aborts the export.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use thiserror::Error;

use crate::{Generator, GeneratorError};

/// Errors raised during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A document failed to reach disk.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The target path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A document failed to render.
    #[error(transparent)]
    Render(#[from] GeneratorError),
}

/// Counts of what an export produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Biome documents written.
    pub biomes: usize,
    /// Palette documents written.
    pub palettes: usize,
    /// Feature documents written.
    pub features: usize,
    /// Extrusion documents written.
    pub extrusions: usize,
}

impl ExportSummary {
    /// Total documents written, including the pack document.
    pub fn documents(&self) -> usize {
        self.biomes + self.palettes + self.features + self.extrusions + 1
    }
}

fn write_document(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Walks the generator's artifacts and writes every document under `out_dir`.
///
/// Palettes and features referenced from several biomes are written once;
/// the first definition wins. The engine's own directory layout conventions
/// are the caller's concern; this pass only guarantees stable names.
pub fn export_pack(generator: &Generator, out_dir: &Path) -> Result<ExportSummary, ExportError> {
    let mut summary = ExportSummary::default();
    let mut seen_palettes: HashSet<String> = HashSet::new();
    let mut seen_features: HashSet<String> = HashSet::new();

    write_document(&out_dir.join("pack.yml"), &generator.pack_block().render())?;

    for biome in generator.biomes() {
        let document = generator.biome_block(biome).render();
        write_document(&out_dir.join("biomes").join(format!("{}.yml", biome.id())), &document)?;
        summary.biomes += 1;

        for (palette, _) in biome.palettes() {
            if !seen_palettes.insert(palette.id().to_string()) {
                continue;
            }
            write_document(
                &out_dir.join("palettes").join(format!("{}.yml", palette.id())),
                &palette.render(),
            )?;
            summary.palettes += 1;
        }

        for feature in biome.features() {
            if !seen_features.insert(feature.id().to_string()) {
                continue;
            }
            let document = feature.render().map_err(GeneratorError::from)?;
            write_document(
                &out_dir.join("features").join(format!("{}.yml", feature.id())),
                &document,
            )?;
            summary.features += 1;
        }
    }

    for extrusion in generator.extrusions() {
        let document = extrusion.render().map_err(GeneratorError::from)?;
        write_document(
            &out_dir.join("extrusions").join(format!("{}.yml", extrusion.id())),
            &document,
        )?;
        summary.extrusions += 1;
    }

    log::info!(
        "exported pack `{}`: {} documents to {}",
        generator.id(),
        summary.documents(),
        out_dir.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Biome, BiomeClass, Extrusion, Feature, FeatureCategory, Material, Palette, Precipitation,
    };
    use orogen_graph::{NoiseNode, Placement, Span};

    fn tree_feature(id: &str) -> Feature {
        let mut feature = Feature::new(id, FeatureCategory::Flora);
        feature.set_distributor(Placement::gaussian(0.3, 0.05));
        feature.set_locator(Placement::random(60, 90));
        feature.add_structure("trunk_small", 1);
        feature
    }

    fn grass_palette() -> Palette {
        let mut palette = Palette::new("GRASSY");
        palette.add_layer(&[(Material::solid("minecraft:grass_block"), 1)], 1);
        palette
    }

    fn sample_generator() -> Generator {
        let mut generator = Generator::new("DEMO", "0.1.0", "orogen");

        let mut meadow = Biome::new("Meadow", "PLAINS", BiomeClass::Lowland, 0.55, Precipitation::Rain);
        meadow.add_palette(grass_palette(), 255);
        meadow.add_feature(tree_feature("LONE_OAKS"));

        let mut hills = Biome::new("Green Hills", "PLAINS", BiomeClass::Highland, 0.6, Precipitation::Rain);
        hills.add_palette(grass_palette(), 255);
        hills.add_feature(tree_feature("LONE_OAKS"));

        generator.add_biome(meadow);
        generator.add_biome(hills);

        let mut extrusion = Extrusion::new("CAVE_BANDS", 6);
        extrusion.set_from("CAVERNOUS");
        extrusion.set_span(Span::new(-64, 8));
        extrusion.set_sampler(NoiseNode::cellular(0.05));
        generator.add_extrusion(extrusion);

        generator
    }

    #[test]
    fn test_export_writes_every_artifact_once() {
        let dir = tempfile::tempdir().unwrap();
        let summary = export_pack(&sample_generator(), dir.path()).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                biomes: 2,
                palettes: 1,
                features: 1,
                extrusions: 1,
            }
        );
        assert!(dir.path().join("pack.yml").exists());
        assert!(dir.path().join("biomes/MEADOW.yml").exists());
        assert!(dir.path().join("biomes/GREEN_HILLS.yml").exists());
        assert!(dir.path().join("palettes/GRASSY.yml").exists());
        assert!(dir.path().join("features/LONE_OAKS.yml").exists());
        assert!(dir.path().join("extrusions/CAVE_BANDS.yml").exists());
    }

    #[test]
    fn test_exported_biome_content() {
        let dir = tempfile::tempdir().unwrap();
        export_pack(&sample_generator(), dir.path()).unwrap();
        let contents = std::fs::read_to_string(dir.path().join("biomes/MEADOW.yml")).unwrap();
        assert!(contents.starts_with("id: MEADOW\ntype: BIOME\n"));
        assert!(contents.contains("palettes:\n  - GRASSY: 255\n"));
    }

    #[test]
    fn test_invalid_feature_aborts_export() {
        let mut generator = Generator::new("BROKEN", "0.1.0", "orogen");
        let mut biome = Biome::new("Bad", "X", BiomeClass::Lowland, 0.1, Precipitation::Rain);
        biome.add_feature(Feature::new("INCOMPLETE", FeatureCategory::Ore));
        generator.add_biome(biome);

        let dir = tempfile::tempdir().unwrap();
        let result = export_pack(&generator, dir.path());
        assert!(matches!(result, Err(ExportError::Render(_))));
    }

    #[test]
    fn test_export_is_deterministic() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        export_pack(&sample_generator(), dir_a.path()).unwrap();
        export_pack(&sample_generator(), dir_b.path()).unwrap();
        let a = std::fs::read_to_string(dir_a.path().join("biomes/MEADOW.yml")).unwrap();
        let b = std::fs::read_to_string(dir_b.path().join("biomes/MEADOW.yml")).unwrap();
        assert_eq!(a, b);
    }
}
