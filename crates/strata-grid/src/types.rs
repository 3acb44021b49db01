//! Scalar tile values and the world seed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seed identifying a noise field. Equal seeds produce sample-identical generators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(pub u32);

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.0)
    }
}

/// Height of a single tile.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Height(pub u16);

impl Height {
    /// Lowest representable height.
    pub const MIN: Self = Self(0);
    /// Highest representable height.
    pub const MAX: Self = Self(u16::MAX);

    /// Height as a fraction of [`Height::MAX`], in `[0, 1]`.
    pub fn relative(self) -> f64 {
        f64::from(self.0) / f64::from(u16::MAX)
    }
}

impl From<u16> for Height {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Height> for u16 {
    fn from(value: Height) -> Self {
        value.0
    }
}

/// Material of a single tile, encoded as one byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// No material.
    #[default]
    Void = 0,
    /// Material assigned by the terrain generator.
    Default = 1,
    Stone = 2,
    Grass = 3,
}

/// Error returned when a byte does not name a [`Material`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid material byte: {0}")]
pub struct InvalidMaterial(pub u8);

impl From<Material> for u8 {
    fn from(material: Material) -> Self {
        material as u8
    }
}

impl TryFrom<u8> for Material {
    type Error = InvalidMaterial;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Void),
            1 => Ok(Self::Default),
            2 => Ok(Self::Stone),
            3 => Ok(Self::Grass),
            other => Err(InvalidMaterial(other)),
        }
    }
}
