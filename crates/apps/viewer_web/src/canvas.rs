use render::{DrawCommand, PathOp};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

/// Look up the drawing canvas and its 2d context.
pub fn context_for_canvas(canvas_id: &str) -> Result<CanvasRenderingContext2d, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected context type"))
}

/// Replay compositor commands onto a 2d context.
///
/// `dpr` is the device pixel ratio; the canvas backing store is assumed to
/// be `dpr` times the CSS size, so every transform is premultiplied by it.
pub fn execute(
    ctx: &CanvasRenderingContext2d,
    commands: &[DrawCommand],
    width: f64,
    height: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    for command in commands {
        match command {
            DrawCommand::Clear => {
                ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
                ctx.clear_rect(0.0, 0.0, width, height);
            }
            DrawCommand::SetTransform(t) => {
                ctx.set_transform(
                    dpr * t.scale_k,
                    0.0,
                    0.0,
                    dpr * t.scale_k,
                    dpr * t.translate_x,
                    dpr * t.translate_y,
                )?;
            }
            DrawCommand::Path { path, style } => {
                ctx.begin_path();
                for op in &path.ops {
                    match op {
                        PathOp::MoveTo(p) => ctx.move_to(p.x, p.y),
                        PathOp::LineTo(p) => ctx.line_to(p.x, p.y),
                        PathOp::BezierTo { ctrl1, ctrl2, to } => {
                            ctx.bezier_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
                        }
                        PathOp::Circle { center, radius } => {
                            ctx.move_to(center.x + radius, center.y);
                            ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
                        }
                    }
                }
                if let Some(fill) = style.fill {
                    ctx.set_fill_style_str(&css_rgba(fill));
                    ctx.fill();
                }
                if let Some(stroke) = style.stroke {
                    ctx.set_stroke_style_str(&css_rgba(stroke));
                    ctx.set_line_width(style.line_width as f64);
                    ctx.stroke();
                }
            }
        }
    }
    Ok(())
}

fn css_rgba(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}
