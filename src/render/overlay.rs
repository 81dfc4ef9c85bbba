//! SVG overlay for a slide: panel, title, source label, bullets, presenter figure.
//!
//! Everything drawn on top of the background is emitted as one SVG document and rasterized by
//! `resvg` in a single pass.

use crate::{
    config::RenderConfig,
    foundation::core::{Point, Rgba8},
    model::SlideSpec,
    render::{
        builtin_font,
        font::{FontResolver, FontWeight, ResolvedFont},
        layout::layout_bullets,
    },
};

/// Baseline offset from the top of a line, as a fraction of the font size.
const ASCENT: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

/// Minimal SVG document writer; elements are appended in paint order.
pub struct SvgDoc {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDoc {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            body: String::new(),
            width,
            height,
        }
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: Rgba8,
        stroke: Option<(Rgba8, f64)>,
    ) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" rx="{radius:.1}" {}{}/>"#,
            fill_attrs(fill),
            stroke_attrs(stroke)
        ));
    }

    pub fn ellipse(&mut self, c: Point, rx: f64, ry: f64, fill: Rgba8, stroke: Option<(Rgba8, f64)>) {
        self.body.push_str(&format!(
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{rx:.1}" ry="{ry:.1}" {}{}/>"#,
            c.x,
            c.y,
            fill_attrs(fill),
            stroke_attrs(stroke)
        ));
    }

    pub fn polygon(&mut self, points: &[Point], fill: Rgba8) {
        let pts = points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.body.push_str(&format!(
            r#"<polygon points="{pts}" {}/>"#,
            fill_attrs(fill)
        ));
    }

    pub fn path(&mut self, d: &str, fill: Option<Rgba8>, stroke: Option<(Rgba8, f64)>) {
        let fill = match fill {
            Some(c) => fill_attrs(c),
            None => r#"fill="none" "#.to_string(),
        };
        self.body.push_str(&format!(
            r#"<path d="{d}" {fill}{}/>"#,
            stroke_attrs(stroke)
        ));
    }

    pub fn line(&mut self, a: Point, b: Point, stroke: Rgba8, width: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {}/>"#,
            a.x,
            a.y,
            b.x,
            b.y,
            stroke_attrs(Some((stroke, width)))
        ));
    }

    /// Single line of text with its top edge at `top`.
    pub fn text(
        &mut self,
        text: &str,
        x: f64,
        top: f64,
        font: &ResolvedFont,
        color: Rgba8,
        anchor: Anchor,
    ) {
        match font {
            ResolvedFont::Face {
                family,
                weight,
                size_px,
            } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::End => "end",
                };
                self.body.push_str(&format!(
                    r#"<text x="{x:.1}" y="{:.1}" font-family="{}" font-size="{size_px}" font-weight="{}" text-anchor="{anchor}" xml:space="preserve" {}>{}</text>"#,
                    top + f64::from(*size_px) * ASCENT,
                    escape_xml(&format!("'{family}'")),
                    weight.svg_value(),
                    fill_attrs(color),
                    escape_xml(text)
                ));
            }
            ResolvedFont::Builtin { size_px } => {
                let x = match anchor {
                    Anchor::Start => x,
                    Anchor::End => x - builtin_font::text_width(text, *size_px),
                };
                let d = builtin_font::path_data(text, x, top, *size_px);
                if !d.is_empty() {
                    self.path(&d, Some(color), None);
                }
            }
        }
    }
}

fn fill_attrs(c: Rgba8) -> String {
    if c.a == 255 {
        format!(r#"fill="{}" "#, c.svg_hex())
    } else {
        format!(
            r#"fill="{}" fill-opacity="{:.3}" "#,
            c.svg_hex(),
            c.opacity()
        )
    }
}

fn stroke_attrs(stroke: Option<(Rgba8, f64)>) -> String {
    match stroke {
        None => String::new(),
        Some((c, w)) if c.a == 255 => {
            format!(r#"stroke="{}" stroke-width="{w:.1}" "#, c.svg_hex())
        }
        Some((c, w)) => format!(
            r#"stroke="{}" stroke-opacity="{:.3}" stroke-width="{w:.1}" "#,
            c.svg_hex(),
            c.opacity()
        ),
    }
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Build the complete overlay document for `spec`.
pub fn build_overlay(spec: &SlideSpec, cfg: &RenderConfig, fonts: &dyn FontResolver) -> String {
    let w = f64::from(cfg.resolution.width);
    let h = f64::from(cfg.resolution.height);
    let mut doc = SvgDoc::new(cfg.resolution.width, cfg.resolution.height);

    let panel = &cfg.panel;
    let (ix, iy) = (f64::from(panel.inset_x), f64::from(panel.inset_y));
    doc.rounded_rect(
        ix,
        iy,
        w - 2.0 * ix,
        h - 2.0 * iy,
        f64::from(panel.radius),
        panel.fill,
        Some((panel.outline, f64::from(panel.outline_width))),
    );

    let ty = &cfg.typography;
    let layout = &cfg.layout;
    let title_font = fonts.resolve(ty.title_px, FontWeight::Bold);
    doc.text(
        &spec.title,
        layout.left_x,
        layout.title_top,
        &title_font,
        ty.title_color,
        Anchor::Start,
    );

    let source_font = fonts.resolve(ty.source_px, FontWeight::Bold);
    doc.text(
        &format!("Source: {}", spec.source_label),
        w - layout.source_right_margin,
        layout.source_top,
        &source_font,
        ty.source_color,
        Anchor::End,
    );

    let body_font = fonts.resolve(ty.body_px, FontWeight::Regular);
    let placed = layout_bullets(
        &spec.bullets,
        layout,
        cfg.bullets_bottom(),
        spec.show_illustration,
    );
    for line in &placed.lines {
        doc.text(
            &line.text,
            line.x,
            line.top,
            &body_font,
            ty.body_color,
            Anchor::Start,
        );
    }

    if spec.show_illustration {
        let il = &cfg.illustration;
        draw_presenter(&mut doc, Point::new(w - il.right_offset, il.top), il.scale);

        let caption_font = fonts.resolve(ty.caption_px, FontWeight::Bold);
        draw_speech_bubble(
            &mut doc,
            Point::new(w - il.bubble_right_offset, il.bubble_top),
            il.bubble_width,
            il.bubble_height,
            &il.caption,
            &caption_font,
            ty.caption_color,
        );
    }

    doc.finish()
}

const SKIN: Rgba8 = Rgba8::rgb(255, 220, 190);
const HAIR: Rgba8 = Rgba8::rgb(35, 35, 35);
const SUIT: Rgba8 = Rgba8::rgb(35, 90, 160);
const SHIRT: Rgba8 = Rgba8::rgb(245, 245, 245);
const TIE: Rgba8 = Rgba8::rgb(220, 70, 70);
const OUTLINE: Rgba8 = Rgba8::rgb(20, 20, 20);
const MIC: Rgba8 = Rgba8::rgb(90, 90, 90);

fn on_ellipse(c: Point, rx: f64, ry: f64, deg: f64) -> Point {
    let r = deg.to_radians();
    Point::new(c.x + rx * r.cos(), c.y + ry * r.sin())
}

/// Cartoon news presenter with its top-left corner at `origin`.
fn draw_presenter(doc: &mut SvgDoc, origin: Point, scale: f64) {
    let (x, y) = (origin.x, origin.y);
    let s = |v: f64| v * scale;
    let head_r = s(52.0);
    let head_c = Point::new(x + head_r, y + head_r);

    doc.ellipse(head_c, head_r, head_r, SKIN, Some((OUTLINE, 3.0)));

    // Hair: a pie slice over the top of the head, 200° to 360° (y down).
    let (hrx, hry) = (head_r + 6.0, head_r + 10.0);
    let a = on_ellipse(head_c, hrx, hry, 200.0);
    let b = on_ellipse(head_c, hrx, hry, 360.0);
    doc.path(
        &format!(
            "M{:.1} {:.1}L{:.1} {:.1}A{hrx:.1} {hry:.1} 0 0 1 {:.1} {:.1}Z",
            head_c.x, head_c.y, a.x, a.y, b.x, b.y
        ),
        Some(HAIR),
        None,
    );

    let eye_r = s(6.5);
    let eye_y = y + s(55.0) + eye_r;
    doc.ellipse(Point::new(x + s(41.5), eye_y), eye_r, eye_r, OUTLINE, None);
    doc.ellipse(Point::new(x + s(76.5), eye_y), eye_r, eye_r, OUTLINE, None);

    let smile_c = Point::new(x + s(65.0), y + s(105.0));
    let (srx, sry) = (s(27.0), s(20.0));
    let a = on_ellipse(smile_c, srx, sry, 10.0);
    let b = on_ellipse(smile_c, srx, sry, 170.0);
    doc.path(
        &format!(
            "M{:.1} {:.1}A{srx:.1} {sry:.1} 0 0 1 {:.1} {:.1}",
            a.x, a.y, b.x, b.y
        ),
        None,
        Some((OUTLINE, 3.0)),
    );

    let body_x = x - s(18.0);
    let body_y = y + 2.0 * head_r - s(5.0);
    let (body_w, body_h) = (s(140.0), s(170.0));
    doc.rounded_rect(
        body_x,
        body_y,
        body_w,
        body_h,
        s(22.0),
        SUIT,
        Some((OUTLINE, 3.0)),
    );

    doc.polygon(
        &[
            Point::new(x + s(25.0), body_y + s(10.0)),
            Point::new(x + s(55.0), body_y + s(10.0)),
            Point::new(x + s(40.0), body_y + s(70.0)),
        ],
        SHIRT,
    );
    doc.polygon(
        &[
            Point::new(x + s(40.0), body_y + s(25.0)),
            Point::new(x + s(52.0), body_y + s(50.0)),
            Point::new(x + s(40.0), body_y + s(75.0)),
            Point::new(x + s(28.0), body_y + s(50.0)),
        ],
        TIE,
    );

    let mic_r = s(9.0);
    let mic_c = Point::new(body_x + body_w - s(30.0) + mic_r, body_y + s(60.0) + mic_r);
    doc.ellipse(mic_c, mic_r, mic_r, MIC, Some((OUTLINE, 1.0)));
    doc.line(
        Point::new(mic_c.x, mic_c.y + mic_r),
        Point::new(mic_c.x, body_y + s(105.0)),
        OUTLINE,
        3.0,
    );
}

/// Rounded bubble whose tail points up at the presenter.
fn draw_speech_bubble(
    doc: &mut SvgDoc,
    origin: Point,
    width: f64,
    height: f64,
    caption: &str,
    font: &ResolvedFont,
    color: Rgba8,
) {
    let fill = Rgba8::rgba(255, 255, 255, 235);
    doc.rounded_rect(
        origin.x,
        origin.y,
        width,
        height,
        18.0,
        fill,
        Some((Rgba8::rgb(30, 30, 30), 2.0)),
    );
    doc.polygon(
        &[
            Point::new(origin.x + 70.0, origin.y + 1.0),
            Point::new(origin.x + 95.0, origin.y - 22.0),
            Point::new(origin.x + 120.0, origin.y + 1.0),
        ],
        fill,
    );
    let top = origin.y + (height - f64::from(font.size_px())) / 2.0;
    doc.text(caption, origin.x + 18.0, top, font, color, Anchor::Start);
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
