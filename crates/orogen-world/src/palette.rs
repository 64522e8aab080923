//! Height-ordered, weighted material stacks.

use orogen_emit::{Block, Item};
use orogen_graph::NoiseNode;

use crate::Material;

/// One weighted material band with a thickness in blocks.
#[derive(Clone, Debug)]
struct Layer {
    materials: Vec<(String, u32)>,
    thickness: u32,
    sampler: Option<NoiseNode>,
}

/// A stack of material layers applied from the surface downward.
///
/// Non-solid materials are dropped when a layer is built, not at render
/// time; layers emit in insertion order, followed by the optional
/// palette-wide sampler.
#[derive(Clone, Debug)]
pub struct Palette {
    id: String,
    layers: Vec<Layer>,
    sampler: Option<NoiseNode>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            layers: Vec::new(),
            sampler: None,
        }
    }

    /// The palette identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a layer from a material/weight mapping. Non-solid materials are
    /// filtered out here and never stored.
    pub fn add_layer(&mut self, materials: &[(Material, u32)], thickness: u32) {
        self.push_layer(materials, thickness, None);
    }

    /// Adds a layer whose material choice is driven by its own sampler.
    pub fn add_layer_sampled(
        &mut self,
        materials: &[(Material, u32)],
        thickness: u32,
        sampler: NoiseNode,
    ) {
        self.push_layer(materials, thickness, Some(sampler));
    }

    /// Sets the palette-wide sampler.
    pub fn set_sampler(&mut self, sampler: NoiseNode) {
        self.sampler = Some(sampler);
    }

    fn push_layer(
        &mut self,
        materials: &[(Material, u32)],
        thickness: u32,
        sampler: Option<NoiseNode>,
    ) {
        let materials = materials
            .iter()
            .filter(|(material, _)| material.is_solid())
            .map(|(material, weight)| (material.id().to_string(), *weight))
            .collect();
        self.layers.push(Layer {
            materials,
            thickness,
            sampler,
        });
    }

    /// Lowers the palette to its document block.
    pub fn to_block(&self) -> Block {
        let mut block = Block::new();
        block.scalar("id", self.id.as_str());
        block.scalar("type", "PALETTE");
        let items: Vec<Item> = self
            .layers
            .iter()
            .map(|layer| {
                let mut materials = Block::new();
                for (id, weight) in &layer.materials {
                    materials.scalar(id, *weight);
                }
                let mut entry = Block::new();
                entry.block("materials", materials);
                entry.scalar("layers", layer.thickness);
                if let Some(sampler) = &layer.sampler {
                    entry.block("sampler", sampler.to_block());
                }
                Item::Entries(entry)
            })
            .collect();
        block.seq("layers", items);
        if let Some(sampler) = &self.sampler {
            block.block("sampler", sampler.to_block());
        }
        block
    }

    /// Renders the palette document.
    pub fn render(&self) -> String {
        self.to_block().render()
    }
}
