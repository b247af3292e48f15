use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use crate::graph::palette;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(palette::SEA);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let info = &edge.user_data;

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_global_alpha(edge_alpha);
		ctx.set_stroke_style_str(&info.color);
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_global_alpha(arrow_alpha);
		ctx.set_fill_style_str(&info.color);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		// Labels only when readable, and never for dimmed edges.
		if let Some(label) = &info.label {
			if k >= 0.6 && (is_highlighted || t < 0.5) {
				ctx.set_global_alpha(edge_alpha);
				ctx.set_fill_style_str(palette::GOLD);
				ctx.set_font(&format!("{}px serif", 8.0 / k.max(0.8)));
				ctx.set_text_align("center");
				let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 3.0 / k);
				ctx.set_text_align("start");
			}
		}
		ctx.set_global_alpha(1.0);
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_stroke_style_str(palette::GOLD);
		ctx.set_line_width(1.0 / k);
		ctx.stroke();
		if state.is_selected(idx) {
			draw_selection_ring(ctx, x, y, radius, k);
		}
		ctx.set_global_alpha(1.0);

		if let Some(label) = &info.label {
			ctx.set_global_alpha(alpha * 0.9);
			ctx.set_fill_style_str(palette::GOLD);
			ctx.set_font(&format!("{}px serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
			ctx.set_global_alpha(1.0);
		}
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(info.radius * (1.0 + 0.35 * t), info.radius * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(239, 215, 147, {})", alpha));
				let _ = gradient.add_color_stop(
					0.6,
					&format!("rgba(239, 215, 147, {})", alpha * 0.3),
				);
				let _ = gradient.add_color_stop(1.0, "rgba(239, 215, 147, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_global_alpha(0.7 * t);
			ctx.set_stroke_style_str(palette::GOLD);
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
			ctx.set_global_alpha(1.0);
		}
		if state.is_selected(idx) {
			draw_selection_ring(ctx, x, y, radius, k);
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(palette::GOLD);
			ctx.set_font(&format!("bold {}px serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});
}

fn draw_selection_ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, k: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + 4.0 / k, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0 / k);
	ctx.stroke();
}

/// Screen-space box with the hovered node's title, one line per `\n`.
fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	if state.drag.active {
		return;
	}
	let Some(title) = state.hover_title() else {
		return;
	};
	let lines: Vec<&str> = title.lines().collect();
	let (line_h, pad) = (16.0, 6.0);
	ctx.set_font("13px serif");
	let text_w = lines
		.iter()
		.filter_map(|l| ctx.measure_text(l).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (w, h) = (text_w + 2.0 * pad, lines.len() as f64 * line_h + 2.0 * pad);

	// flip to stay on the canvas
	let (px, py) = state.hover.pointer;
	let x = if px + 14.0 + w > state.width { px - 14.0 - w } else { px + 14.0 };
	let y = if py + 14.0 + h > state.height { py - 14.0 - h } else { py + 14.0 };

	ctx.set_global_alpha(0.92);
	ctx.set_fill_style_str("#523a1a");
	ctx.fill_rect(x, y, w, h);
	ctx.set_global_alpha(1.0);
	ctx.set_stroke_style_str(palette::GOLD);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, w, h);
	ctx.set_fill_style_str(palette::GOLD);
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + pad, y + pad + (i as f64 + 0.8) * line_h);
	}
}
