//! Colour codes, materials and the registry they resolve against.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    const fn from_rgb24(value: u32) -> Self {
        Rgba::new((value >> 16) as u8, (value >> 8) as u8, value as u8, 255)
    }

    /// CSS colour string, suitable for a canvas stroke style.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CustomizedMaterial {
    Glitter {
        value: Rgba,
        luminance: u8,
        fraction: f32,
        vfraction: f32,
        size: u32,
        minsize: f32,
        maxsize: f32,
    },
    Speckle {
        value: Rgba,
        luminance: u8,
        fraction: f32,
        size: u32,
        minsize: f32,
        maxsize: f32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Finish {
    #[default]
    Plastic,
    Chrome,
    Pearlescent,
    Metal,
    Rubber,
    MatteMetallic,
    Custom(CustomizedMaterial),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub code: u32,
    pub name: String,
    pub color: Rgba,
    pub edge: Rgba,
    pub luminance: u8,
    pub finish: Finish,
}

impl Material {
    pub fn is_translucent(&self) -> bool {
        self.color.a < 255
    }
}

impl Default for Material {
    fn default() -> Self {
        // LDraw main colour (code 16) defaults to a neutral grey.
        Material {
            code: 16,
            name: "Main_Colour".to_string(),
            color: Rgba::new(0x7f, 0x7f, 0x7f, 255),
            edge: Rgba::new(0x33, 0x33, 0x33, 255),
            luminance: 0,
            finish: Finish::Plastic,
        }
    }
}

/// How a colour code on a drawing command resolves.
///
/// Code 16 inherits the current colour and 24 its complement; both are
/// resolved when the display list is built, against the material stack.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorReference {
    Current,
    Complement,
    Material(Material),
    Unknown(u32),
}

impl ColorReference {
    pub fn resolve(code: u32, materials: &MaterialRegistry) -> Self {
        match code {
            16 => ColorReference::Current,
            24 => ColorReference::Complement,
            _ => {
                if let Some(material) = materials.get(code) {
                    return ColorReference::Material(material.clone());
                }
                // 0x2RRGGBB encodes a direct colour value.
                if code & 0xff00_0000 == 0x0200_0000 {
                    return ColorReference::Material(Material {
                        code,
                        name: format!("Direct_{:07x}", code & 0x00ff_ffff),
                        color: Rgba::from_rgb24(code & 0x00ff_ffff),
                        ..Material::default()
                    });
                }
                ColorReference::Unknown(code)
            }
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ColorReference::Current => 16,
            ColorReference::Complement => 24,
            ColorReference::Material(material) => material.code,
            ColorReference::Unknown(code) => *code,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialRegistry {
    materials: HashMap<u32, Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        MaterialRegistry::default()
    }

    /// Registry preloaded with the core LDraw palette, so pasted models
    /// resolve without an external LDConfig.
    pub fn core() -> Self {
        CORE_PALETTE.clone()
    }

    pub fn get(&self, code: u32) -> Option<&Material> {
        self.materials.get(&code)
    }

    pub fn insert(&mut self, code: u32, material: Material) {
        self.materials.insert(code, material);
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

// Subset of LDConfig.ldr: solid colours 0-15 plus the common greys.
const CORE_COLORS: &[(u32, &str, u32, u32)] = &[
    (0, "Black", 0x05131d, 0x595959),
    (1, "Blue", 0x0055bf, 0x333333),
    (2, "Green", 0x257a3e, 0x333333),
    (3, "Dark_Turquoise", 0x00838f, 0x333333),
    (4, "Red", 0xc91a09, 0x333333),
    (5, "Dark_Pink", 0xc870a0, 0x333333),
    (6, "Brown", 0x583927, 0x1e1e1e),
    (7, "Light_Grey", 0x9ba19d, 0x333333),
    (8, "Dark_Grey", 0x6d6e5c, 0x271f0f),
    (9, "Light_Blue", 0xb4d2e3, 0x333333),
    (10, "Bright_Green", 0x4b9f4a, 0x333333),
    (11, "Light_Turquoise", 0x55a5af, 0x333333),
    (12, "Salmon", 0xf2705e, 0x333333),
    (13, "Pink", 0xfc97ac, 0x333333),
    (14, "Yellow", 0xf2cd37, 0x333333),
    (15, "White", 0xffffff, 0x333333),
    (71, "Light_Bluish_Grey", 0xa0a5a9, 0x333333),
    (72, "Dark_Bluish_Grey", 0x6c6e68, 0x333333),
];

static CORE_PALETTE: Lazy<MaterialRegistry> = Lazy::new(|| {
    let mut registry = MaterialRegistry::new();
    for &(code, name, color, edge) in CORE_COLORS {
        registry.insert(
            code,
            Material {
                code,
                name: name.to_string(),
                color: Rgba::from_rgb24(color),
                edge: Rgba::from_rgb24(edge),
                luminance: 0,
                finish: Finish::Plastic,
            },
        );
    }
    registry
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_current_and_complement() {
        let registry = MaterialRegistry::core();
        assert_eq!(
            ColorReference::resolve(16, &registry),
            ColorReference::Current
        );
        assert_eq!(
            ColorReference::resolve(24, &registry),
            ColorReference::Complement
        );
    }

    #[test]
    fn resolves_palette_entry() {
        let registry = MaterialRegistry::core();
        match ColorReference::resolve(4, &registry) {
            ColorReference::Material(material) => {
                assert_eq!(material.name, "Red");
                assert_eq!(material.color, Rgba::new(0xc9, 0x1a, 0x09, 255));
            }
            other => panic!("expected material, got {:?}", other),
        }
    }

    #[test]
    fn resolves_direct_color() {
        let registry = MaterialRegistry::new();
        match ColorReference::resolve(0x02ff8800, &registry) {
            ColorReference::Material(material) => {
                assert_eq!(material.color, Rgba::new(0xff, 0x88, 0x00, 255));
            }
            other => panic!("expected direct material, got {:?}", other),
        }
    }

    #[test]
    fn unknown_code_is_kept() {
        let registry = MaterialRegistry::new();
        assert_eq!(
            ColorReference::resolve(9999, &registry),
            ColorReference::Unknown(9999)
        );
        assert_eq!(ColorReference::Unknown(9999).code(), 9999);
    }

    #[test]
    fn css_strings() {
        assert_eq!(Rgba::new(0xc9, 0x1a, 0x09, 255).to_css(), "#c91a09");
        assert_eq!(
            Rgba::new(255, 0, 0, 127).to_css(),
            "rgba(255, 0, 0, 0.498)"
        );
    }
}
