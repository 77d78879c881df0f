//! Canvas viewer: redraws the wireframe whenever the model or the current
//! step changes.

use leptos::html::Canvas;
use leptos::prelude::*;
use ldraw::camera::{isometric_view, project_wireframe, Viewport};
use ldraw::display_list::Wireframe;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::layout::global_context::{LoadedModel, ViewerContext};

const CANVAS_WIDTH: u32 = 1280;
const CANVAS_HEIGHT: u32 = 800;
const BACKGROUND: &str = "#1b1e23";

#[component]
pub fn ViewerCanvas() -> impl IntoView {
    let ctx = use_context::<ViewerContext>().expect("ViewerContext not found");
    let canvas_ref: NodeRef<Canvas> = NodeRef::new();

    Effect::new(move |_| {
        let model = ctx.model.get();
        let step = ctx.current_step.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        draw(&canvas, model.as_deref(), step);
    });

    view! {
        <canvas
            node_ref=canvas_ref
            class="viewer-canvas"
            width=CANVAS_WIDTH
            height=CANVAS_HEIGHT
        ></canvas>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn draw(canvas: &HtmlCanvasElement, model: Option<&LoadedModel>, step: usize) {
    let Some(ctx2d) = context_2d(canvas) else {
        log::warn!("2d canvas context unavailable");
        return;
    };
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());

    ctx2d.set_fill_style_str(BACKGROUND);
    ctx2d.fill_rect(0.0, 0.0, width, height);

    let Some(model) = model else {
        ctx2d.set_fill_style_str("#5c6470");
        ctx2d.set_font("16px sans-serif");
        ctx2d.set_text_align("center");
        let _ = ctx2d.fill_text("No model loaded", width / 2.0, height / 2.0);
        return;
    };

    let wireframe = Wireframe::from_document(&model.document, step);
    let viewport = Viewport::new(width as f32, height as f32);
    let projected = project_wireframe(&wireframe, &isometric_view(), &viewport);

    ctx2d.set_line_width(1.0);
    for edge in projected {
        ctx2d.set_stroke_style_str(&edge.color.to_css());
        ctx2d.begin_path();
        ctx2d.move_to(f64::from(edge.from.x), f64::from(edge.from.y));
        ctx2d.line_to(f64::from(edge.to.x), f64::from(edge.to.y));
        ctx2d.stroke();
    }
}
