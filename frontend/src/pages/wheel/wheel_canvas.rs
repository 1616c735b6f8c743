use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wheel_shared::wheel_renderer::SegmentDraw;
use yew::prelude::*;

const CANVAS_SIZE: u32 = 450;
const LABEL_RADIUS_FACTOR: f64 = 0.62;
const MIN_FONT_PX: f64 = 11.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Vec<SegmentDraw>,
    pub is_spinning: bool,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.segments.clone(), props.is_spinning),
            move |(segments, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Some(context) = context_2d(&canvas) {
                        paint(&canvas, &context, segments, *is_spinning);
                    }
                }
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={CANVAS_SIZE.to_string()}
            height={CANVAS_SIZE.to_string()}
            class="w-full h-auto"
        />
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn paint(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    segments: &[SegmentDraw],
    is_spinning: bool,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;

    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow
    context.begin_path();
    context.set_fill_style_str(if is_spinning {
        "rgba(212, 160, 48, 0.3)"
    } else {
        "rgba(212, 160, 48, 0.15)"
    });
    let _ = context.arc(center_x, center_y, radius + 12.0, 0.0, 2.0 * PI);
    context.fill();

    for segment in segments {
        let start = segment.start_angle.to_radians();
        let end = segment.end_angle.to_radians();

        context.begin_path();
        context.set_fill_style_str(&segment.color);
        context.move_to(center_x, center_y);
        let _ = context.arc(center_x, center_y, radius, start, end);
        context.close_path();
        context.fill();

        context.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        context.set_line_width(2.0);
        context.stroke();
    }

    paint_labels(context, segments, center_x, center_y, radius);

    // Hub
    context.begin_path();
    context.set_fill_style_str("#5C0A1A");
    let _ = context.arc(center_x, center_y, radius * 0.15, 0.0, 2.0 * PI);
    context.fill();
    context.set_stroke_style_str("#D4A030");
    context.set_line_width(3.0);
    context.stroke();

    // Rim
    context.begin_path();
    context.set_stroke_style_str("#D4A030");
    context.set_line_width(6.0);
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.stroke();

    paint_pointer(context, center_x, center_y - radius);
}

fn paint_labels(
    context: &CanvasRenderingContext2d,
    segments: &[SegmentDraw],
    center_x: f64,
    center_y: f64,
    radius: f64,
) {
    let font_px = (radius / 12.0).max(MIN_FONT_PX);
    let line_height = font_px * 1.1;

    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#ffffff");
    context.set_font(&format!("bold {}px 'Segoe UI', Roboto, system-ui, sans-serif", font_px));
    context.set_shadow_color("rgba(0, 0, 0, 0.6)");
    context.set_shadow_blur(3.0);

    for segment in segments {
        let mid = segment.mid_angle.to_radians();
        let label_x = center_x + radius * LABEL_RADIUS_FACTOR * mid.cos();
        let label_y = center_y + radius * LABEL_RADIUS_FACTOR * mid.sin();

        context.save();
        let _ = context.translate(label_x, label_y);
        let _ = context.rotate(segment.label_rotation.to_radians());

        let first_line = -(segment.label_lines.len() as f64 - 1.0) * line_height / 2.0;
        for (i, line) in segment.label_lines.iter().enumerate() {
            let _ = context.fill_text(line, 0.0, first_line + i as f64 * line_height);
        }
        context.restore();
    }

    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}

// Fixed at 12 o'clock, pointing down into the wheel
fn paint_pointer(context: &CanvasRenderingContext2d, tip_x: f64, rim_y: f64) {
    let tip_y = rim_y + 18.0;

    context.begin_path();
    context.move_to(tip_x, tip_y);
    context.line_to(tip_x - 14.0, rim_y - 14.0);
    context.line_to(tip_x + 14.0, rim_y - 14.0);
    context.close_path();
    context.set_fill_style_str("#D4A030");
    context.fill();
    context.set_stroke_style_str("#5C0A1A");
    context.set_line_width(2.0);
    context.stroke();
}
