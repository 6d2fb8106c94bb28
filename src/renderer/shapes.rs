//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in scene coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Filled axis-aligned rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, rt, b, t) = (r.left(), r.right(), r.bottom(), r.top());
    vec![
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, t, color),
    ]
}

/// Rectangle border drawn inside `r`
pub fn outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let horizontal = Vec2::new(r.size.x, t);
    let vertical = Vec2::new(t, r.size.y - 2.0 * t);
    let edges = [
        Rect::new(Vec2::new(r.center.x, r.top() - t / 2.0), horizontal),
        Rect::new(Vec2::new(r.center.x, r.bottom() + t / 2.0), horizontal),
        Rect::new(Vec2::new(r.left() + t / 2.0, r.center.y), vertical),
        Rect::new(Vec2::new(r.right() - t / 2.0, r.center.y), vertical),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let (a, b, c, d) = (from + perp, from - perp, to + perp, to - perp);
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Seven-segment masks for 0-9 (bits: a b c d e f g, top clockwise then middle)
const SEGMENTS: [u8; 10] = [
    0b1111110, 0b0110000, 0b1101101, 0b1111001, 0b0110011, 0b1011011, 0b1011111, 0b1110000,
    0b1111111, 0b1111011,
];

/// One seven-segment digit centered at `center`
pub fn digit(value: u8, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mask = SEGMENTS[(value % 10) as usize];
    let w = height * 0.55;
    let t = height * 0.12;
    let (hw, hh) = (w / 2.0, height / 2.0);
    let horizontal = Vec2::new(w, t);
    let vertical = Vec2::new(t, hh);

    let segments = [
        Rect::new(center + Vec2::new(0.0, hh - t / 2.0), horizontal),
        Rect::new(center + Vec2::new(hw - t / 2.0, hh / 2.0), vertical),
        Rect::new(center + Vec2::new(hw - t / 2.0, -hh / 2.0), vertical),
        Rect::new(center + Vec2::new(0.0, -hh + t / 2.0), horizontal),
        Rect::new(center + Vec2::new(-hw + t / 2.0, -hh / 2.0), vertical),
        Rect::new(center + Vec2::new(-hw + t / 2.0, hh / 2.0), vertical),
        Rect::new(center, horizontal),
    ];

    segments
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << (6 - i)) != 0)
        .flat_map(|(_, s)| rect(s, color))
        .collect()
}

/// A decimal number centered at `center`
pub fn number(value: u64, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let text = value.to_string();
    let advance = height * 0.75;
    let width = advance * (text.len() as f32 - 1.0);
    text.bytes()
        .enumerate()
        .flat_map(|(i, b)| {
            let x = center.x - width / 2.0 + i as f32 * advance;
            digit(b - b'0', Vec2::new(x, center.y), height, color)
        })
        .collect()
}

/// Battery outline with `cells` of `max_cells` lit
pub fn battery(
    r: &Rect,
    cells: u32,
    max_cells: u32,
    body: [f32; 4],
    cell: [f32; 4],
) -> Vec<Vertex> {
    let tip = Rect::new(
        Vec2::new(r.right() + r.size.x * 0.05, r.center.y),
        Vec2::new(r.size.x * 0.1, r.size.y * 0.4),
    );
    let mut vertices = outline(r, r.size.y * 0.1, body);
    vertices.extend(rect(&tip, body));

    let inner = r.inset(r.size.y * 0.18);
    let slot = inner.size.x / max_cells.max(1) as f32;
    for i in 0..cells.min(max_cells) {
        let center = Vec2::new(inner.left() + slot * (i as f32 + 0.5), inner.center.y);
        let cell_rect = Rect::new(center, Vec2::new(slot * 0.8, inner.size.y));
        vertices.extend(rect(&cell_rect, cell));
    }
    vertices
}
