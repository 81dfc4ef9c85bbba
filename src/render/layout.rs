use crate::{config::TextLayout, text::wrap::wrap};

/// One line of bullet text with its top-left position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f64,
    pub top: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulletLayout {
    pub lines: Vec<PlacedLine>,
    /// Bullets that made it onto the slide; the rest were cut at the bottom margin.
    pub bullets_placed: usize,
}

/// Flow bullets down from `layout.bullets_top`.
///
/// Each bullet wraps at the layout's character width and keeps at most
/// `max_lines_per_bullet` lines. A bullet that would push the cursor past `bottom` is dropped
/// together with everything after it.
pub fn layout_bullets(
    bullets: &[String],
    layout: &TextLayout,
    bottom: f64,
    show_illustration: bool,
) -> BulletLayout {
    let width = layout.wrap_width(show_illustration);
    let mut out = BulletLayout::default();
    let mut y = layout.bullets_top;

    for bullet in bullets {
        let mut wrapped = wrap(bullet.trim(), width);
        if wrapped.is_empty() {
            continue;
        }
        wrapped.truncate(layout.max_lines_per_bullet);

        let needed = (wrapped.len() as f64) * layout.line_height;
        if y + needed > bottom {
            break;
        }

        for (i, line) in wrapped.into_iter().enumerate() {
            let prefix = if i == 0 {
                &layout.bullet_marker
            } else {
                &layout.continuation_indent
            };
            out.lines.push(PlacedLine {
                text: format!("{prefix}{line}"),
                x: layout.left_x,
                top: y,
            });
            y += layout.line_height;
        }
        y += layout.bullet_gap;
        out.bullets_placed += 1;
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
