//! Flattening a document into drawable wireframe edges.
//!
//! Sub-file references are walked depth-first with composed transforms.
//! Colour 16 resolves against an inherited material stack and colour 24
//! against its complement, so nested subparts pick up the colour of the
//! reference that placed them.

use std::collections::BTreeSet;

use crate::color::{ColorReference, Material, Rgba};
use crate::document::{Document, MultipartDocument};
use crate::elements::Command;
use crate::{Matrix4, PartAlias, Vector3, Vector4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Vector3,
    pub to: Vector3,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox3 {
    pub min: Vector3,
    pub max: Vector3,
}

impl BoundingBox3 {
    fn from_point(point: Vector3) -> Self {
        BoundingBox3 {
            min: point,
            max: point,
        }
    }

    pub fn update_point(&mut self, point: Vector3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }
}

/// Wireframe built from a document, plus the references it could not
/// resolve (parts not present in the pasted text).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wireframe {
    pub edges: Vec<Edge>,
    pub missing: BTreeSet<PartAlias>,
}

impl Wireframe {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox3> {
        let mut edges = self.edges.iter();
        let first = edges.next()?;
        let mut bb = BoundingBox3::from_point(first.from);
        bb.update_point(first.to);
        for edge in edges {
            bb.update_point(edge.from);
            bb.update_point(edge.to);
        }
        Some(bb)
    }

    /// Flatten the first `step` build steps of a multipart document.
    pub fn from_document(document: &MultipartDocument, step: usize) -> Self {
        let mut wireframe = Wireframe::default();
        let mut material_stack = vec![Material::default()];
        build(
            &mut wireframe,
            document,
            &document.body,
            Matrix4::from_scale(1.0),
            &mut material_stack,
            Some(step),
        );
        wireframe
    }
}

// Drawn when a colour code cannot be resolved at all.
const FALLBACK: Rgba = Rgba::new(0x7f, 0x7f, 0x7f, 255);

fn resolve_face(color: &ColorReference, stack: &[Material]) -> Rgba {
    match color {
        ColorReference::Material(material) => material.color,
        ColorReference::Complement => stack.last().map(|m| m.edge).unwrap_or(FALLBACK),
        _ => stack.last().map(|m| m.color).unwrap_or(FALLBACK),
    }
}

fn resolve_edge(color: &ColorReference, stack: &[Material]) -> Rgba {
    match color {
        ColorReference::Material(material) => material.color,
        ColorReference::Current => stack.last().map(|m| m.color).unwrap_or(FALLBACK),
        // Edges usually carry colour 24; unknown codes fall back to it too.
        _ => stack.last().map(|m| m.edge).unwrap_or(FALLBACK),
    }
}

fn transform(matrix: &Matrix4, point: Vector4) -> Vector3 {
    let v = matrix * point;
    Vector3::new(v.x, v.y, v.z)
}

fn push_loop(wireframe: &mut Wireframe, matrix: &Matrix4, points: &[Vector4], color: Rgba) {
    for (i, point) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        wireframe.edges.push(Edge {
            from: transform(matrix, *point),
            to: transform(matrix, next),
            color,
        });
    }
}

fn build(
    wireframe: &mut Wireframe,
    parent: &MultipartDocument,
    document: &Document,
    matrix: Matrix4,
    stack: &mut Vec<Material>,
    step: Option<usize>,
) {
    let commands: Vec<&Command> = match step {
        Some(step) => document.commands_through_step(step).collect(),
        None => document.commands.iter().collect(),
    };

    for command in commands {
        match command {
            Command::PartReference(reference) => {
                if let Some(subpart) = parent.subpart(&reference.name) {
                    let material = match &reference.color {
                        ColorReference::Material(material) => material.clone(),
                        _ => stack.last().cloned().unwrap_or_default(),
                    };
                    stack.push(material);
                    // Steps only partition the top-level body.
                    build(
                        wireframe,
                        parent,
                        subpart,
                        matrix * reference.matrix,
                        stack,
                        None,
                    );
                    stack.pop();
                } else {
                    wireframe.missing.insert(reference.name.clone());
                }
            }
            Command::Line(line) => {
                let color = resolve_edge(&line.color, stack);
                wireframe.edges.push(Edge {
                    from: transform(&matrix, line.a),
                    to: transform(&matrix, line.b),
                    color,
                });
            }
            Command::Triangle(triangle) => {
                let color = resolve_face(&triangle.color, stack);
                push_loop(
                    wireframe,
                    &matrix,
                    &[triangle.a, triangle.b, triangle.c],
                    color,
                );
            }
            Command::Quad(quad) => {
                let color = resolve_face(&quad.color, stack);
                push_loop(
                    wireframe,
                    &matrix,
                    &[quad.a, quad.b, quad.c, quad.d],
                    color,
                );
            }
            // Conditional edges need silhouette tests the wireframe pass
            // does not do.
            Command::OptionalLine(_) => {}
            Command::Meta(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::MaterialRegistry;
    use crate::parser::parse_multipart_document;

    fn parse(text: &str) -> MultipartDocument {
        parse_multipart_document(&MaterialRegistry::core(), text).unwrap()
    }

    #[test]
    fn flattens_lines_and_outlines() {
        let document = parse(
            "0 Shape\n\
             2 24 0 0 0 4 0 0\n\
             3 4 0 0 0 4 0 0 0 4 0\n",
        );
        let wireframe = Wireframe::from_document(&document, 1);
        // One line plus three triangle outline edges.
        assert_eq!(wireframe.edges.len(), 4);
        assert!(wireframe.missing.is_empty());
    }

    #[test]
    fn subpart_references_compose_transforms() {
        let document = parse(
            "0 FILE main.ldr\n\
             0 Main\n\
             1 4 10 0 0 1 0 0 0 1 0 0 0 1 seg.ldr\n\
             0 FILE seg.ldr\n\
             0 Segment\n\
             2 24 0 0 0 1 0 0\n",
        );
        let wireframe = Wireframe::from_document(&document, 1);
        assert_eq!(wireframe.edges.len(), 1);
        let edge = wireframe.edges[0];
        assert_eq!(edge.from, Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(edge.to, Vector3::new(11.0, 0.0, 0.0));
        // Colour 24 inside a subpart placed with colour 4 takes red's edge.
        assert_eq!(edge.color, Rgba::new(0x33, 0x33, 0x33, 255));
    }

    #[test]
    fn current_color_inherits_from_reference() {
        let document = parse(
            "0 FILE main.ldr\n\
             0 Main\n\
             1 4 0 0 0 1 0 0 0 1 0 0 0 1 face.ldr\n\
             0 FILE face.ldr\n\
             0 Face\n\
             3 16 0 0 0 1 0 0 0 1 0\n",
        );
        let wireframe = Wireframe::from_document(&document, 1);
        assert_eq!(wireframe.edges.len(), 3);
        // Red (code 4) flows down to the colour-16 triangle.
        assert_eq!(wireframe.edges[0].color, Rgba::new(0xc9, 0x1a, 0x09, 255));
    }

    #[test]
    fn missing_parts_are_reported() {
        let document = parse(
            "0 Main\n\
             1 16 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n",
        );
        let wireframe = Wireframe::from_document(&document, 1);
        assert!(wireframe.is_empty());
        assert!(wireframe.missing.contains(&PartAlias::from("3001.dat")));
    }

    #[test]
    fn step_slicing_limits_geometry() {
        let document = parse(
            "0 Steps\n\
             2 24 0 0 0 1 0 0\n\
             0 STEP\n\
             2 24 0 0 0 0 1 0\n\
             2 24 0 0 0 0 0 1\n",
        );
        assert_eq!(document.body.step_count(), 2);
        assert_eq!(Wireframe::from_document(&document, 1).edges.len(), 1);
        assert_eq!(Wireframe::from_document(&document, 2).edges.len(), 3);
    }

    #[test]
    fn bounding_box_covers_all_edges() {
        let document = parse(
            "0 Box\n\
             2 24 -2 0 0 2 0 0\n\
             2 24 0 -1 0 0 3 0\n",
        );
        let wireframe = Wireframe::from_document(&document, 1);
        let bb = wireframe.bounding_box().unwrap();
        assert_eq!(bb.min, Vector3::new(-2.0, -1.0, 0.0));
        assert_eq!(bb.max, Vector3::new(2.0, 3.0, 0.0));
        assert_eq!(bb.center(), Vector3::new(0.0, 1.0, 0.0));
        assert!(Wireframe::default().bounding_box().is_none());
    }
}
