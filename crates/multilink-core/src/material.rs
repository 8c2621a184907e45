//! Randomly colored material palettes

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Named material with an RGBA color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// 1-based palette index
    pub id: usize,
    pub color: [f64; 4],
}

impl Material {
    /// Name used for the URDF `<material>` element
    pub fn name(&self) -> String {
        material_name(self.id)
    }
}

/// URDF name of the material with the given palette index
pub fn material_name(id: usize) -> String {
    format!("mat_{id}")
}

/// Fixed-size set of materials shared by the links of one robot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPalette {
    pub materials: Vec<Material>,
}

impl MaterialPalette {
    /// Generate `count` materials `mat_1..mat_count` with random opaque colors
    pub fn random(count: usize, rng: &mut impl Rng) -> Self {
        let materials = (1..=count)
            .map(|id| Material {
                id,
                color: [rng.r#gen(), rng.r#gen(), rng.r#gen(), 1.0],
            })
            .collect();
        Self { materials }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Pick a palette index uniformly from `1..=len`
    pub fn sample_id(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.materials.is_empty() {
            return None;
        }
        Some(rng.gen_range(1..=self.materials.len()))
    }
}
