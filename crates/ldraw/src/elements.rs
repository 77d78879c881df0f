//! Drawing commands and line-type-0 elements of an LDraw document.

use crate::color::ColorReference;
use crate::{Matrix4, PartAlias, Vector4, Winding};

/// `0 !KEY value` header line.
#[derive(Clone, Debug, PartialEq)]
pub struct Header(pub String, pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BfcCertification {
    NotApplicable,
    NoCertify,
    Certify(Winding),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BfcStatement {
    Winding(Winding),
    Clip(Option<Winding>),
    NoClip,
    InvertNext,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Meta {
    Comment(String),
    Step,
    Write(String),
    Print(String),
    Clear,
    Pause,
    Save,
    Bfc(BfcStatement),
}

/// Line type 1: a sub-file reference with colour and placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PartReference {
    pub color: ColorReference,
    pub matrix: Matrix4,
    pub name: PartAlias,
}

/// Line type 2.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub color: ColorReference,
    pub a: Vector4,
    pub b: Vector4,
}

/// Line type 3.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub color: ColorReference,
    pub a: Vector4,
    pub b: Vector4,
    pub c: Vector4,
}

/// Line type 4.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    pub color: ColorReference,
    pub a: Vector4,
    pub b: Vector4,
    pub c: Vector4,
    pub d: Vector4,
}

/// Line type 5: an edge drawn only when its control points straddle the
/// silhouette. The viewer's wireframe pass skips these.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionalLine {
    pub color: ColorReference,
    pub a: Vector4,
    pub b: Vector4,
    pub c: Vector4,
    pub d: Vector4,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Meta(Meta),
    PartReference(PartReference),
    Line(Line),
    Triangle(Triangle),
    Quad(Quad),
    OptionalLine(OptionalLine),
}
