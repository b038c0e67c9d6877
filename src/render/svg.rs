//! Standalone SVG frame renderer
//!
//! Shape outlines are fixed once fitted, so they are captured at
//! construction; each `present` only restyles them from the view.

use std::collections::HashMap;
use std::fmt::{self, Write};

use glam::Vec2;

use super::Surface;
use crate::sim::{Outline, Shape, ShapeState, View};
use crate::{Settings, path_d, rad};

const INK: &str = "#333333";
const BORDER: &str = "#000000";
const STRUCK_STROKE: &str = "#ff33aa";
const PADDLE_FLASH: &str = "#ff00ff";
const BACKGROUND: &str = "#f2f2f2";
const BALL_FILL: &str = "#fefeaf";
const TEXT_FILL: &str = "#dddddd";
const DOT_RADIUS: f32 = 3.0;

/// Pre-built outline of one shape
#[derive(Debug, Clone)]
enum Art {
    /// Closed rings, filled
    Area(String),
    /// Open polylines, stroked only
    Lines(String),
    Dots(Vec<Vec2>),
}

impl Art {
    fn new(shape: &Shape) -> Self {
        match shape.outline() {
            Outline::Polygons(_) => Art::Area(shape.path().trim_end().to_string()),
            Outline::Lines(lines) => Art::Lines(
                lines
                    .iter()
                    .map(|line| path_d(line, false))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Outline::Points(points) => Art::Dots(points.clone()),
        }
    }
}

/// Renders each presented view to an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f32,
    height: f32,
    margin: f32,
    art: HashMap<u32, Art>,
    document: String,
    frames: u64,
}

impl SvgSurface {
    pub fn new(settings: &Settings, shapes: &[Shape]) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            margin: settings.margin,
            art: shapes.iter().map(|s| (s.id(), Art::new(s))).collect(),
            document: String::new(),
            frames: 0,
        }
    }

    /// Last rendered frame, empty before the first `present`
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn draw(&self, view: &View, out: &mut String) -> fmt::Result {
        let (w, h, m) = (self.width, self.height, self.margin);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        )?;
        writeln!(out, r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{BACKGROUND}"/>"#)?;

        // Label and counter sit behind the map
        let headline = view.message.map_or_else(|| escape(&view.label), str::to_string);
        writeln!(
            out,
            r#"<text x="{}" y="{}" fill="{TEXT_FILL}" text-anchor="middle" font-family="monospace" font-size="20px">{headline}</text>"#,
            w / 2.0,
            h / 2.0 - 20.0
        )?;
        let (broken, total) = view.score;
        if broken > 0 {
            writeln!(
                out,
                r#"<text x="{}" y="{}" fill="{TEXT_FILL}" text-anchor="middle" font-family="monospace" font-size="20px">{broken} of {total}</text>"#,
                w / 2.0,
                h / 2.0 + 20.0
            )?;
        }

        let border = [
            Vec2::new(m, h - m),
            Vec2::new(m, m),
            Vec2::new(w - m, m),
            Vec2::new(w - m, h - m),
        ];
        writeln!(
            out,
            r#"<path d="{}" fill="transparent" stroke="{BORDER}"/>"#,
            path_d(&border, false)
        )?;
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="transparent" stroke="{INK}" stroke-width="0.5"/>"#,
            m / 2.0,
            m / 2.0,
            w - m,
            h - m
        )?;

        for shape in &view.shapes {
            let Some(art) = self.art.get(&shape.id) else {
                continue;
            };
            let (fill, stroke, stroke_width) = match shape.state {
                ShapeState::Removed => continue,
                ShapeState::Struck { .. } => ("transparent".to_string(), STRUCK_STROKE, 3.0_f32),
                ShapeState::Intact => (format!("hsl({}, 90%, 95%)", shape.hue), INK, 0.5),
            };
            match art {
                Art::Area(d) => writeln!(
                    out,
                    r#"<path d="{d}" fill="{fill}" fill-rule="evenodd" stroke="{stroke}" stroke-width="{stroke_width}"/>"#
                )?,
                Art::Lines(d) => writeln!(
                    out,
                    r#"<path d="{d}" fill="transparent" stroke="{stroke}" stroke-width="{}"/>"#,
                    stroke_width.max(1.0)
                )?,
                Art::Dots(points) => {
                    for p in points {
                        writeln!(
                            out,
                            r#"<circle cx="{}" cy="{}" r="{DOT_RADIUS}" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#,
                            p.x, p.y
                        )?;
                    }
                }
            }
        }

        let ball = view.ball;
        let tip = ball.pos + direction(ball.heading) * ball.radius * 2.0;
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{BALL_FILL}" stroke="{INK}" stroke-width="2"/>"#,
            ball.pos.x, ball.pos.y, ball.radius
        )?;
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{INK}" stroke-width="1"/>"#,
            ball.pos.x, ball.pos.y, tip.x, tip.y
        )?;

        let paddle = view.paddle;
        let corner = paddle.pos - paddle.size / 2.0;
        let lean = paddle.pos + direction(paddle.rotation) * paddle.size.y * 5.0;
        let paddle_stroke = if paddle.highlighted { PADDLE_FLASH } else { INK };
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="transparent" stroke="{paddle_stroke}" stroke-width="2"/>"#,
            corner.x, corner.y, paddle.size.x, paddle.size.y
        )?;
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{INK}" stroke-width="1" stroke-dasharray="5"/>"#,
            paddle.pos.x, paddle.pos.y, lean.x, lean.y
        )?;

        writeln!(out, "</svg>")
    }
}

impl Surface for SvgSurface {
    fn present(&mut self, view: &View) {
        let mut document = String::with_capacity(self.document.len());
        match self.draw(view, &mut document) {
            Ok(()) => {
                self.document = document;
                self.frames += 1;
            }
            Err(err) => log::error!("Failed to render frame {}: {err}", view.tick),
        }
    }
}

/// Unit vector for a heading in degrees (0 = up, clockwise)
fn direction(degrees: f32) -> Vec2 {
    let (sin, cos) = rad(degrees).sin_cos();
    Vec2::new(sin, -cos)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
