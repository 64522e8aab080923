//! Biome definitions.
//!
//! A biome aggregates colors, palettes keyed by height (or symbolic height
//! expression), category-grouped features, tags and extension markers, a
//! precipitation-derived humidity class, and an optional terrain sampler.
//! Construction computes the derived fields once; everything afterward is
//! additive, performed before the owning generator is registered.

use std::str::FromStr;

use orogen_config::InputError;
use orogen_emit::Scalar;
use orogen_graph::{MetaExpression, NoiseNode};

use crate::{Feature, FeatureCategory, Palette};

/// Precipitation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precipitation {
    /// Liquid precipitation; drives the humidity classification.
    Rain,
    /// Frozen precipitation; the humidity classification is skipped.
    Snow,
}

impl Precipitation {
    /// The tag emitted in biome documents.
    pub fn tag(self) -> &'static str {
        match self {
            Precipitation::Rain => "RAIN",
            Precipitation::Snow => "SNOW",
        }
    }
}

/// Humidity class derived from the precipitation amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Humidity {
    /// Amount above 0.75.
    Humid,
    /// Amount above 0.5, up to 0.75.
    SemiHumid,
    /// Amount above 0.25, up to 0.5.
    SemiArid,
    /// Amount at or below 0.25.
    Arid,
}

impl Humidity {
    /// Classifies a precipitation amount.
    pub fn classify(amount: f64) -> Self {
        if amount > 0.75 {
            Humidity::Humid
        } else if amount > 0.5 {
            Humidity::SemiHumid
        } else if amount > 0.25 {
            Humidity::SemiArid
        } else {
            Humidity::Arid
        }
    }

    /// The tag emitted in biome documents.
    pub fn tag(self) -> &'static str {
        match self {
            Humidity::Humid => "HUMID",
            Humidity::SemiHumid => "SEMI_HUMID",
            Humidity::SemiArid => "SEMI_ARID",
            Humidity::Arid => "ARID",
        }
    }
}

/// Domain sub-classification of a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiomeClass {
    /// Shoreline biomes.
    Coast,
    /// Mountainous biomes.
    Mountain,
    /// Open water.
    Ocean,
    /// Flowing water.
    River,
    /// Low flat terrain.
    Lowland,
    /// Elevated terrain short of mountains.
    Highland,
}

impl BiomeClass {
    /// The tag emitted in biome documents.
    pub fn tag(self) -> &'static str {
        match self {
            BiomeClass::Coast => "COAST",
            BiomeClass::Mountain => "MOUNTAIN",
            BiomeClass::Ocean => "OCEAN",
            BiomeClass::River => "RIVER",
            BiomeClass::Lowland => "LOWLAND",
            BiomeClass::Highland => "HIGHLAND",
        }
    }

    /// All classification spellings, for validation messages.
    pub fn options() -> [&'static str; 6] {
        ["COAST", "MOUNTAIN", "OCEAN", "RIVER", "LOWLAND", "HIGHLAND"]
    }
}

impl FromStr for BiomeClass {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COAST" => Ok(BiomeClass::Coast),
            "MOUNTAIN" => Ok(BiomeClass::Mountain),
            "OCEAN" => Ok(BiomeClass::Ocean),
            "RIVER" => Ok(BiomeClass::River),
            "LOWLAND" => Ok(BiomeClass::Lowland),
            "HIGHLAND" => Ok(BiomeClass::Highland),
            other => Err(InputError::new(
                other,
                "biome classification",
                BiomeClass::options(),
            )),
        }
    }
}

/// A biome tag or extension marker: enumerated or custom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BiomeTag {
    /// Adjacent to water.
    Coastal,
    /// Open-water biome.
    Oceanic,
    /// Mountainous biome.
    Mountainous,
    /// Carries rivers.
    Riverine,
    /// Underground cavities reach the surface.
    Cavernous,
    /// Standing shallow water.
    Wetland,
    /// A pack-defined marker.
    Custom(String),
}

impl BiomeTag {
    /// The text emitted for this tag.
    pub fn as_text(&self) -> &str {
        match self {
            BiomeTag::Coastal => "COASTAL",
            BiomeTag::Oceanic => "OCEANIC",
            BiomeTag::Mountainous => "MOUNTAINOUS",
            BiomeTag::Riverine => "RIVERINE",
            BiomeTag::Cavernous => "CAVERNOUS",
            BiomeTag::Wetland => "WETLAND",
            BiomeTag::Custom(text) => text,
        }
    }
}

/// Height at which a palette starts: fixed, or resolved by the engine.
#[derive(Clone, Debug)]
pub enum PaletteHeight {
    /// A fixed height.
    Fixed(i32),
    /// A symbolic expression over meta variables.
    Expression(MetaExpression),
}

impl PaletteHeight {
    /// The scalar emitted for this height.
    pub fn to_scalar(&self) -> Scalar {
        match self {
            PaletteHeight::Fixed(height) => Scalar::Int(*height as i64),
            PaletteHeight::Expression(expr) => Scalar::Text(expr.render()),
        }
    }
}

impl From<i32> for PaletteHeight {
    fn from(height: i32) -> Self {
        PaletteHeight::Fixed(height)
    }
}

impl From<MetaExpression> for PaletteHeight {
    fn from(expr: MetaExpression) -> Self {
        PaletteHeight::Expression(expr)
    }
}

/// Normalizes a display name to a document identifier.
fn clean_id(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// A biome definition, assembled additively and read out by the generator.
#[derive(Clone, Debug)]
pub struct Biome {
    name: String,
    id: String,
    kind: String,
    class: BiomeClass,
    precipitation: f64,
    precipitation_kind: Precipitation,
    humidity: Option<Humidity>,
    rarity: u32,
    colors: Vec<(String, u32)>,
    palettes: Vec<(Palette, PaletteHeight)>,
    features: Vec<Feature>,
    tags: Vec<BiomeTag>,
    extensions: Vec<BiomeTag>,
    terrain: Option<NoiseNode>,
}

impl Biome {
    /// Creates a biome.
    ///
    /// `kind` is the platform's categorical biome kind, stored opaquely.
    /// The humidity class is derived here, once, from the precipitation
    /// amount; snow biomes carry no humidity class at all.
    pub fn new(
        name: &str,
        kind: &str,
        class: BiomeClass,
        precipitation: f64,
        precipitation_kind: Precipitation,
    ) -> Self {
        let humidity = match precipitation_kind {
            Precipitation::Snow => None,
            Precipitation::Rain => Some(Humidity::classify(precipitation)),
        };
        Self {
            name: name.to_string(),
            id: clean_id(name),
            kind: kind.to_string(),
            class,
            precipitation,
            precipitation_kind,
            humidity,
            rarity: 1,
            colors: Vec::new(),
            palettes: Vec::new(),
            features: Vec::new(),
            tags: Vec::new(),
            extensions: Vec::new(),
            terrain: None,
        }
    }

    /// The display name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cleaned document identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The platform's categorical kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The domain sub-classification.
    pub fn class(&self) -> BiomeClass {
        self.class
    }

    /// The precipitation amount.
    pub fn precipitation(&self) -> f64 {
        self.precipitation
    }

    /// The precipitation kind.
    pub fn precipitation_kind(&self) -> Precipitation {
        self.precipitation_kind
    }

    /// The derived humidity class, absent for snow biomes.
    pub fn humidity(&self) -> Option<Humidity> {
        self.humidity
    }

    /// The rarity weight.
    pub fn rarity(&self) -> u32 {
        self.rarity
    }

    /// Sets the rarity weight.
    pub fn set_rarity(&mut self, rarity: u32) {
        self.rarity = rarity;
    }

    /// Adds a keyed display color.
    pub fn add_color(&mut self, key: &str, rgb: u32) {
        self.colors.push((key.to_string(), rgb));
    }

    /// The keyed display colors, in insertion order.
    pub fn colors(&self) -> &[(String, u32)] {
        &self.colors
    }

    /// Adds a palette starting at the given height.
    pub fn add_palette(&mut self, palette: Palette, height: impl Into<PaletteHeight>) {
        self.palettes.push((palette, height.into()));
    }

    /// The palettes with their heights, in call order.
    pub fn palettes(&self) -> &[(Palette, PaletteHeight)] {
        &self.palettes
    }

    /// Adds a feature. Features keep insertion order within their category.
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// All features, in insertion order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Features grouped by category, categories in document order.
    pub fn features_by_category(&self) -> Vec<(FeatureCategory, Vec<&Feature>)> {
        FeatureCategory::all()
            .into_iter()
            .filter_map(|category| {
                let grouped: Vec<&Feature> = self
                    .features
                    .iter()
                    .filter(|feature| feature.category() == category)
                    .collect();
                if grouped.is_empty() {
                    None
                } else {
                    Some((category, grouped))
                }
            })
            .collect()
    }

    /// Adds a tag.
    pub fn add_tag(&mut self, tag: BiomeTag) {
        self.tags.push(tag);
    }

    /// The tags, in insertion order.
    pub fn tags(&self) -> &[BiomeTag] {
        &self.tags
    }

    /// Adds an extension marker.
    pub fn add_extension(&mut self, marker: BiomeTag) {
        self.extensions.push(marker);
    }

    /// The extension markers, in insertion order.
    pub fn extensions(&self) -> &[BiomeTag] {
        &self.extensions
    }

    /// Sets the terrain-height sampler.
    pub fn set_terrain(&mut self, sampler: NoiseNode) {
        self.terrain = Some(sampler);
    }

    /// The terrain-height sampler, when present.
    pub fn terrain(&self) -> Option<&NoiseNode> {
        self.terrain.as_ref()
    }
}
