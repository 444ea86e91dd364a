//! Software rendering of the splash panel
//!
//! Both windowed surfaces draw the same 300x100 frame with tiny-skia and only
//! differ in how the pixels reach the screen.

use std::time::Duration;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Transform};

use crate::domain::window::{IndeterminateBar, SplashContent, SPLASH_HEIGHT, SPLASH_WIDTH};

/// Frame dimensions
pub const WIDTH: u32 = SPLASH_WIDTH;
pub const HEIGHT: u32 = SPLASH_HEIGHT;

/// Progress track placement inside the window
pub(crate) const TRACK_X: f32 = 24.0;
pub(crate) const TRACK_Y: f32 = 44.0;
const TRACK_WIDTH: f32 = WIDTH as f32 - 2.0 * TRACK_X;
const TRACK_HEIGHT: f32 = 8.0;

const TITLE_SIZE: f32 = 15.0;
const TITLE_BASELINE: f32 = 28.0;
const CAPTION_SIZE: f32 = 13.0;
const CAPTION_BASELINE: f32 = 80.0;

const CORNER_RADIUS: f32 = 10.0;

/// Color helpers (Color::from_rgba8 is not const)
pub(crate) fn bg_color() -> Color {
    Color::from_rgba8(30, 30, 30, 235)
}

fn track_color() -> Color {
    Color::from_rgba8(70, 70, 70, 255)
}

fn accent_color() -> Color {
    Color::from_rgba8(90, 160, 255, 255)
}

fn title_color() -> Color {
    Color::from_rgba8(235, 235, 235, 255)
}

fn caption_color() -> Color {
    Color::from_rgba8(200, 200, 200, 255)
}

/// How the panel outline is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelShape {
    /// Rounded corners over a transparent background
    Rounded,
    /// Opaque rectangle filling the frame
    Square,
}

/// Render one frame of the splash window
pub fn render_frame(
    content: &SplashContent,
    font: Option<&fontdue::Font>,
    bar: &IndeterminateBar,
    elapsed: Duration,
    shape: PanelShape,
) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(WIDTH, HEIGHT)?;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    match shape {
        PanelShape::Rounded => {
            pixmap.fill(Color::TRANSPARENT);
            paint.set_color(bg_color());
            let panel = rounded_rect(WIDTH as f32, HEIGHT as f32, CORNER_RADIUS)?;
            pixmap.fill_path(&panel, &paint, FillRule::Winding, Transform::identity(), None);
        }
        PanelShape::Square => {
            let bg = bg_color();
            pixmap.fill(Color::from_rgba(bg.red(), bg.green(), bg.blue(), 1.0)?);
        }
    }

    // Track and sweeping segment
    paint.set_color(track_color());
    let track = Rect::from_xywh(TRACK_X, TRACK_Y, TRACK_WIDTH, TRACK_HEIGHT)?;
    pixmap.fill_rect(track, &paint, Transform::identity(), None);

    let (offset, width) = bar.segment(elapsed, TRACK_WIDTH);
    if width > 0.0 {
        paint.set_color(accent_color());
        if let Some(segment) = Rect::from_xywh(TRACK_X + offset, TRACK_Y, width, TRACK_HEIGHT) {
            pixmap.fill_rect(segment, &paint, Transform::identity(), None);
        }
    }

    if let Some(font) = font {
        draw_text_centered(&mut pixmap, font, &content.title, TITLE_SIZE, TITLE_BASELINE, title_color());
        draw_text_centered(
            &mut pixmap,
            font,
            &content.caption,
            CAPTION_SIZE,
            CAPTION_BASELINE,
            caption_color(),
        );
    }

    Some(pixmap)
}

fn rounded_rect(width: f32, height: f32, radius: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(radius, 0.0);
    pb.line_to(width - radius, 0.0);
    pb.quad_to(width, 0.0, width, radius);
    pb.line_to(width, height - radius);
    pb.quad_to(width, height, width - radius, height);
    pb.line_to(radius, height);
    pb.quad_to(0.0, height, 0.0, height - radius);
    pb.line_to(0.0, radius);
    pb.quad_to(0.0, 0.0, radius, 0.0);
    pb.close();
    pb.finish()
}

/// Rasterize `text` horizontally centered with its baseline at `baseline`
fn draw_text_centered(
    pixmap: &mut Pixmap,
    font: &fontdue::Font,
    text: &str,
    size: f32,
    baseline: f32,
    color: Color,
) {
    let text_width: f32 = text
        .chars()
        .map(|ch| font.metrics(ch, size).advance_width)
        .sum();
    let mut x = ((WIDTH as f32 - text_width) / 2.0).max(4.0);

    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        if bitmap.is_empty() {
            x += metrics.advance_width;
            continue;
        }

        let glyph_x = x + metrics.xmin as f32;
        let glyph_y = baseline - metrics.height as f32 - metrics.ymin as f32;

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }

                let px = (glyph_x + gx as f32) as i32;
                let py = (glyph_y + gy as f32) as i32;
                if px < 0 || px >= WIDTH as i32 || py < 0 || py >= HEIGHT as i32 {
                    continue;
                }

                let alpha = (coverage as f32 / 255.0) * color.alpha();
                let pixel_color =
                    Color::from_rgba(color.red(), color.green(), color.blue(), alpha).unwrap_or(color);

                if let Some(existing) = pixmap.pixel(px as u32, py as u32) {
                    let blended = blend_pixel(existing, pixel_color);
                    pixmap.pixels_mut()[(py as u32 * WIDTH + px as u32) as usize] = blended;
                }
            }
        }

        x += metrics.advance_width;
    }
}

/// Blend two pixels using alpha compositing
pub(crate) fn blend_pixel(dst: PremultipliedColorU8, src: Color) -> PremultipliedColorU8 {
    let src_a = src.alpha();
    let dst_a = dst.alpha() as f32 / 255.0;

    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a == 0.0 {
        return PremultipliedColorU8::TRANSPARENT;
    }

    let out_a8 = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;

    // dst is premultiplied; src is straight alpha.
    let blend = |src_c: f32, dst_c: u8| -> u8 {
        let dst_c = dst_c as f32 / 255.0;
        let out_c = src_c * src_a + dst_c * (1.0 - src_a);
        ((out_c * 255.0).round().clamp(0.0, 255.0) as u8).min(out_a8)
    };

    PremultipliedColorU8::from_rgba(
        blend(src.red(), dst.red()),
        blend(src.green(), dst.green()),
        blend(src.blue(), dst.blue()),
        out_a8,
    )
    .unwrap_or(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(p: PremultipliedColorU8) -> (u8, u8, u8) {
        (p.red(), p.green(), p.blue())
    }

    #[test]
    fn render_without_font_draws_panel_and_bar() {
        let bar = IndeterminateBar::default();
        let pixmap = render_frame(
            &SplashContent::default(),
            None,
            &bar,
            Duration::from_millis(700),
            PanelShape::Rounded,
        )
        .unwrap();

        // Mid-sweep the segment covers the track center.
        let center = pixmap.pixel(150, (TRACK_Y + 4.0) as u32).unwrap();
        assert_eq!(rgb(center), (90, 160, 255));

        // Far left of the track is still bare track.
        let left = pixmap.pixel((TRACK_X + 4.0) as u32, (TRACK_Y + 4.0) as u32).unwrap();
        assert_eq!(rgb(left), (70, 70, 70));

        // Rounded corner stays transparent.
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn square_panel_is_opaque_everywhere() {
        let pixmap = render_frame(
            &SplashContent::default(),
            None,
            &IndeterminateBar::default(),
            Duration::ZERO,
            PanelShape::Square,
        )
        .unwrap();

        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 255);
        assert_eq!(rgb(pixmap.pixel(0, 0).unwrap()), (30, 30, 30));
        assert_eq!(pixmap.pixel(WIDTH - 1, HEIGHT - 1).unwrap().alpha(), 255);
    }

    #[test]
    fn bar_moves_between_frames() {
        let bar = IndeterminateBar::default();
        let content = SplashContent::default();
        let a = render_frame(&content, None, &bar, Duration::from_millis(300), PanelShape::Rounded)
            .unwrap();
        let b = render_frame(&content, None, &bar, Duration::from_millis(900), PanelShape::Rounded)
            .unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn blend_opaque_source_replaces_pixel() {
        let dst = PremultipliedColorU8::from_rgba(10, 10, 10, 255).unwrap();
        let out = blend_pixel(dst, Color::from_rgba8(200, 100, 50, 255));
        assert_eq!(rgb(out), (200, 100, 50));
        assert_eq!(out.alpha(), 255);
    }

    #[test]
    fn blend_transparent_source_keeps_pixel() {
        let dst = PremultipliedColorU8::from_rgba(40, 50, 60, 255).unwrap();
        let out = blend_pixel(dst, Color::from_rgba8(255, 255, 255, 0));
        assert_eq!(rgb(out), (40, 50, 60));
    }
}
