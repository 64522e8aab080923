//! Pack manifest structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::validate::InputError;

/// Global preprocessor passes the engine understands.
pub const KNOWN_PREPROCESSORS: &[&str] = &[
    "EROSION",
    "DEPOSITION",
    "CAVE_CARVING",
    "FLORA_POLISH",
    "SNOW_COVER",
    "BEDROCK_FLOOR",
];

/// Top-level pack manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackManifest {
    /// Pack identity.
    pub pack: PackInfo,
    /// World-wide generation settings.
    pub world: WorldSettings,
}

/// Pack identity metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackInfo {
    /// Pack identifier, as referenced by the engine.
    pub id: String,
    /// Pack version string.
    pub version: String,
    /// Pack author.
    pub author: String,
}

/// World-wide generation settings emitted into the pack document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    /// Sea surface height.
    pub ocean_level: i32,
    /// Horizontal scale multiplier applied to every sampler.
    pub global_scale: f64,
    /// Vertical exaggeration applied to terrain samplers.
    pub height_scale: f64,
    /// Lowest generated height.
    pub strata_min: i32,
    /// Highest generated height.
    pub strata_max: i32,
    /// Enabled global preprocessor passes, in run order.
    pub preprocessors: Vec<String>,
}

impl Default for PackInfo {
    fn default() -> Self {
        Self {
            id: "OROGEN".to_string(),
            version: "0.1.0".to_string(),
            author: "unknown".to_string(),
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            ocean_level: 62,
            global_scale: 1.0,
            height_scale: 1.0,
            strata_min: -64,
            strata_max: 320,
            preprocessors: Vec::new(),
        }
    }
}

impl PackManifest {
    /// Load the manifest from the given directory, or create a default file.
    pub fn load_or_create(pack_dir: &Path) -> Result<Self, ManifestError> {
        let manifest_path = pack_dir.join("pack.ron");

        if manifest_path.exists() {
            let contents =
                std::fs::read_to_string(&manifest_path).map_err(ManifestError::ReadError)?;
            let manifest: PackManifest =
                ron::from_str(&contents).map_err(ManifestError::ParseError)?;
            log::info!("Loaded pack manifest from {}", manifest_path.display());
            Ok(manifest)
        } else {
            let manifest = PackManifest::default();
            manifest.save(pack_dir)?;
            log::info!("Created default pack manifest at {}", manifest_path.display());
            Ok(manifest)
        }
    }

    /// Save the manifest to the given directory as `pack.ron`.
    pub fn save(&self, pack_dir: &Path) -> Result<(), ManifestError> {
        std::fs::create_dir_all(pack_dir).map_err(ManifestError::WriteError)?;

        let manifest_path = pack_dir.join("pack.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ManifestError::SerializeError)?;

        std::fs::write(&manifest_path, serialized).map_err(ManifestError::WriteError)?;
        Ok(())
    }

    /// Checks operator-supplied fields against the allowed sets.
    pub fn validate(&self) -> Result<(), InputError> {
        for (index, name) in self.world.preprocessors.iter().enumerate() {
            if !KNOWN_PREPROCESSORS.contains(&name.as_str()) {
                let location = format!("pack.ron: world.preprocessors[{index}]");
                return Err(InputError::new(name, &location, KNOWN_PREPROCESSORS.iter().copied()));
            }
        }
        Ok(())
    }
}
