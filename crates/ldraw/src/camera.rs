//! Orthographic isometric projection of a wireframe onto a 2D viewport.

use cgmath::{Deg, Rad};

use crate::display_list::Wireframe;
use crate::color::Rgba;
use crate::{Matrix4, Vector2, Vector4};

/// The classic isometric view: 45 degrees about Y, then arctan(1/sqrt 2)
/// about X. LDraw's -Y-up handedness maps straight onto canvas coordinates
/// (both grow downwards), so no flip is needed.
pub fn isometric_view() -> Matrix4 {
    let tilt = Rad((1.0f32 / 2.0f32.sqrt()).atan());
    Matrix4::from_angle_x(tilt) * Matrix4::from_angle_y(Deg(45.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport {
            width,
            height,
            margin: 24.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedEdge {
    pub from: Vector2,
    pub to: Vector2,
    pub color: Rgba,
}

/// Project every edge with `view` and fit the result into the viewport:
/// uniform scale, centred, with the viewport margin kept free.
pub fn project_wireframe(
    wireframe: &Wireframe,
    view: &Matrix4,
    viewport: &Viewport,
) -> Vec<ProjectedEdge> {
    let rotated: Vec<(Vector2, Vector2, Rgba)> = wireframe
        .edges
        .iter()
        .map(|edge| {
            let a = view * Vector4::new(edge.from.x, edge.from.y, edge.from.z, 1.0);
            let b = view * Vector4::new(edge.to.x, edge.to.y, edge.to.z, 1.0);
            (
                Vector2::new(a.x, a.y),
                Vector2::new(b.x, b.y),
                edge.color,
            )
        })
        .collect();

    let Some(first) = rotated.first() else {
        return vec![];
    };

    let (mut min, mut max) = (first.0, first.0);
    for (a, b, _) in &rotated {
        for point in [a, b] {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
    }

    let extent_x = max.x - min.x;
    let extent_y = max.y - min.y;
    let avail_x = (viewport.width - 2.0 * viewport.margin).max(1.0);
    let avail_y = (viewport.height - 2.0 * viewport.margin).max(1.0);
    let scale = if extent_x <= f32::EPSILON && extent_y <= f32::EPSILON {
        1.0
    } else {
        (avail_x / extent_x.max(f32::EPSILON)).min(avail_y / extent_y.max(f32::EPSILON))
    };

    let center = Vector2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
    let offset = Vector2::new(viewport.width / 2.0, viewport.height / 2.0);

    rotated
        .into_iter()
        .map(|(a, b, color)| ProjectedEdge {
            from: (a - center) * scale + offset,
            to: (b - center) * scale + offset,
            color,
        })
        .collect()
}
