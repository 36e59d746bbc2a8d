//! Session Chart Component
//!
//! Dual-axis line chart on HTML5 Canvas: interaction count against the left
//! axis, unique participants against the right axis.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::SessionAnalytics;

const LEFT_COLOR: &str = "#8884d8";
const RIGHT_COLOR: &str = "#82ca9d";

/// Vertical extent of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Pad by 10% of the spread (1.0 when flat); non-negative data keeps a
    /// zero floor
    pub fn fit(values: &[f64]) -> Self {
        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }

        let non_negative = min >= 0.0;
        let spread = max - min;
        let padding = if spread > 0.0 { spread * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;
        if non_negative && min < 0.0 {
            min = 0.0;
        }

        Self { min, max }
    }

    /// Canvas y for `value` inside a plot area starting at `top`
    pub fn to_y(&self, value: f64, top: f64, height: f64) -> f64 {
        top + ((self.max - value) / (self.max - self.min)) * height
    }
}

/// Session analytics chart
#[component]
pub fn SessionChart(#[prop(into)] sessions: Signal<Vec<SessionAnalytics>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the sessions change
    create_effect(move |_| {
        let sessions = sessions.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &sessions);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-72"
            />
            <div class="flex justify-center gap-6 mt-4 text-sm">
                <LegendItem color=LEFT_COLOR label="Interaction Count" />
                <LegendItem color=RIGHT_COLOR label="Unique Participants" />
            </div>
        </div>
    }
}

#[component]
fn LegendItem(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div class="w-3 h-3 rounded-full" style=format!("background-color: {}", color) />
            <span>{label}</span>
        </div>
    }
}

/// Draw both series on canvas
fn draw_chart(canvas: &HtmlCanvasElement, sessions: &[SessionAnalytics]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins leave room for an axis on each side
    let margin_left = 50.0;
    let margin_right = 50.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let left_values: Vec<f64> = sessions.iter().map(|s| s.interaction_count as f64).collect();
    let right_values: Vec<f64> = sessions.iter().map(|s| s.unique_participants as f64).collect();
    let left = AxisRange::fit(&left_values);
    let right = AxisRange::fit(&right_values);

    // Dashed grid with labels for both axes
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(&3.0.into(), &3.0.into()));
    ctx.set_font("12px sans-serif");

    for i in 0..=5 {
        let fraction = i as f64 / 5.0;
        let y = margin_top + fraction * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&LEFT_COLOR.into());
        let value = left.max - fraction * (left.max - left.min);
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);

        ctx.set_fill_style(&RIGHT_COLOR.into());
        let value = right.max - fraction * (right.max - right.min);
        let _ = ctx.fill_text(&format!("{:.0}", value), width - margin_right + 8.0, y + 4.0);
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    if sessions.is_empty() {
        return;
    }

    // One x slot per session
    let step = if sessions.len() > 1 {
        chart_width / (sessions.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| {
        if sessions.len() > 1 {
            margin_left + i as f64 * step
        } else {
            margin_left + chart_width / 2.0
        }
    };

    for (values, range, color) in [
        (&left_values, left, LEFT_COLOR),
        (&right_values, right, RIGHT_COLOR),
    ] {
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, value) in values.iter().enumerate() {
            let y = range.to_y(*value, margin_top, chart_height);
            if i == 0 {
                ctx.move_to(x_at(i), y);
            } else {
                ctx.line_to(x_at(i), y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style(&color.into());
        for (i, value) in values.iter().enumerate() {
            let y = range.to_y(*value, margin_top, chart_height);
            ctx.begin_path();
            let _ = ctx.arc(x_at(i), y, 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // Session names along the x axis
    ctx.set_fill_style(&"#6b7280".into());
    for (i, session) in sessions.iter().enumerate() {
        let _ = ctx.fill_text(&session.name, x_at(i) - 20.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_padding() {
        assert_eq!(AxisRange::fit(&[10.0, 60.0]), AxisRange { min: 5.0, max: 65.0 });
        assert_eq!(AxisRange::fit(&[0.0, 5.0]), AxisRange { min: 0.0, max: 5.5 });
        assert_eq!(AxisRange::fit(&[4.0]), AxisRange { min: 3.0, max: 5.0 });
        assert_eq!(AxisRange::fit(&[]), AxisRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_to_y_inverts() {
        let range = AxisRange { min: 0.0, max: 10.0 };
        assert_eq!(range.to_y(10.0, 20.0, 100.0), 20.0);
        assert_eq!(range.to_y(0.0, 20.0, 100.0), 120.0);
    }
}
