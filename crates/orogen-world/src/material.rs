//! Platform material identifiers.

/// An opaque platform material reference.
///
/// The compiler never interprets the id beyond re-emitting it; the only
/// property it reads is solidity, which palette layers use to filter their
/// contents. Materials are value keys: a solidity change on the platform
/// side after construction has no effect on already-built layers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Material {
    id: String,
    solid: bool,
}

impl Material {
    /// Creates a material with an explicit solidity flag.
    pub fn new(id: &str, solid: bool) -> Self {
        Self {
            id: id.to_string(),
            solid,
        }
    }

    /// A solid material.
    pub fn solid(id: &str) -> Self {
        Self::new(id, true)
    }

    /// A non-solid material (fluids, air, foliage).
    pub fn fluid(id: &str) -> Self {
        Self::new(id, false)
    }

    /// The platform identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the platform flags this material as solid.
    pub fn is_solid(&self) -> bool {
        self.solid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_solidity() {
        assert!(Material::solid("minecraft:stone").is_solid());
        assert!(!Material::fluid("minecraft:water").is_solid());
    }
}
