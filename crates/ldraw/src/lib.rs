//! LDraw format support: document model, parser, colour registry and the
//! wireframe display list consumed by the canvas viewer.
//!
//! The crate has no DOM dependencies so everything in here is testable on the
//! host target.

pub mod camera;
pub mod color;
pub mod display_list;
pub mod document;
pub mod elements;
pub mod error;
pub mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

pub type Vector2 = cgmath::Vector2<f32>;
pub type Vector3 = cgmath::Vector3<f32>;
pub type Vector4 = cgmath::Vector4<f32>;
pub type Matrix4 = cgmath::Matrix4<f32>;

/// Winding order used by BFC statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Cw,
    Ccw,
}

impl Winding {
    pub fn invert(self) -> Self {
        match self {
            Winding::Cw => Winding::Ccw,
            Winding::Ccw => Winding::Cw,
        }
    }
}

/// Normalized name of a part file.
///
/// LDraw references are case-insensitive and may use backslashes as path
/// separators, so aliases are lowercased and use forward slashes throughout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartAlias(String);

impl PartAlias {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartAlias {
    fn from(value: &str) -> Self {
        PartAlias(value.trim().to_lowercase().replace('\\', "/"))
    }
}

impl From<String> for PartAlias {
    fn from(value: String) -> Self {
        PartAlias::from(value.as_str())
    }
}

impl fmt::Display for PartAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_alias_is_normalized() {
        assert_eq!(PartAlias::from("S\\3005S01.DAT").as_str(), "s/3005s01.dat");
        assert_eq!(PartAlias::from(" 3001.dat "), PartAlias::from("3001.DAT"));
    }

    #[test]
    fn winding_inverts() {
        assert_eq!(Winding::Cw.invert(), Winding::Ccw);
        assert_eq!(Winding::Ccw.invert(), Winding::Cw);
    }
}
