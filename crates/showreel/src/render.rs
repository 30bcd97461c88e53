//! Slide drawing. Everything is painted directly with the egui painter at a
//! scale relative to a 1920x1080 reference frame.

use eframe::egui::{self, Pos2};

use crate::deck::{SlideCopy, SlideLayout, SlideSpec};
use crate::language::Language;
use crate::theme::Theme;

pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h).max(0.3)
}

/// Render a single slide using its layout.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &egui::Ui,
    slide: &SlideSpec,
    language: Language,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    padding: f32,
) {
    let copy = slide.copy(language);
    let content = rect.shrink(padding);
    match slide.layout {
        SlideLayout::Hero => hero(ui, &copy, theme, content, opacity, scale),
        SlideLayout::Statement => statement(ui, &copy, theme, content, opacity, scale),
        SlideLayout::Video => video(ui, &copy, theme, rect, padding, opacity, scale),
        SlideLayout::Columns => columns(ui, &copy, theme, content, opacity, scale),
        SlideLayout::Closing => closing(ui, &copy, theme, content, opacity, scale),
    }
}

/// Where the video poster sits on a video slide.
pub fn video_panel_rect(rect: egui::Rect, padding: f32, scale: f32) -> egui::Rect {
    let area = rect.shrink(padding);
    let caption_space = 140.0 * scale;
    let max_w = area.width();
    let max_h = (area.height() - caption_space).max(0.0);
    let (w, h) = if max_w / 16.0 * 9.0 <= max_h {
        (max_w, max_w / 16.0 * 9.0)
    } else {
        (max_h / 9.0 * 16.0, max_h)
    };
    egui::Rect::from_min_size(
        Pos2::new(area.center().x - w / 2.0, area.top()),
        egui::vec2(w, h),
    )
}

/// Lay out `text` wrapped at `width` and paint it horizontally centered on
/// `center_x`. Returns the painted height.
fn centered_text(
    ui: &egui::Ui,
    text: &str,
    font: egui::FontId,
    color: egui::Color32,
    center_x: f32,
    y: f32,
    width: f32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, width);
    let h = galley.rect.height();
    let x = center_x - galley.rect.width() / 2.0;
    ui.painter().galley(Pos2::new(x, y), galley, color);
    h
}

fn left_text(
    ui: &egui::Ui,
    text: &str,
    font: egui::FontId,
    color: egui::Color32,
    pos: Pos2,
    width: f32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, width);
    let h = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    h
}

fn hero(
    ui: &egui::Ui,
    copy: &SlideCopy,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let title_size = theme.title_size * 1.2 * scale;
    let estimate = title_size * 1.3 + theme.subtitle_size * scale * 2.0 + theme.body_size * scale;
    let mut y = (rect.center().y - estimate / 2.0).max(rect.top());
    let cx = rect.center().x;

    y += centered_text(
        ui,
        copy.title,
        egui::FontId::proportional(title_size),
        Theme::with_opacity(theme.heading_color, opacity),
        cx,
        y,
        rect.width(),
    );
    y += 24.0 * scale;

    let rule = egui::Rect::from_center_size(
        Pos2::new(cx, y),
        egui::vec2(120.0 * scale, 3.0 * scale),
    );
    ui.painter()
        .rect_filled(rule, 0.0, Theme::with_opacity(theme.accent, opacity));
    y += 32.0 * scale;

    y += centered_text(
        ui,
        copy.subtitle,
        egui::FontId::proportional(theme.subtitle_size * scale),
        Theme::with_opacity(theme.accent, opacity),
        cx,
        y,
        rect.width(),
    );
    y += 20.0 * scale;

    centered_text(
        ui,
        copy.body,
        egui::FontId::proportional(theme.body_size * scale),
        Theme::with_opacity(theme.foreground, opacity * 0.8),
        cx,
        y,
        rect.width() * 0.7,
    );
}

fn statement(
    ui: &egui::Ui,
    copy: &SlideCopy,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let width = rect.width() * 0.8;
    let left = rect.left() + (rect.width() - width) / 2.0;
    let mut y = rect.top() + rect.height() * 0.25;

    y += left_text(
        ui,
        &copy.subtitle.to_uppercase(),
        egui::FontId::proportional(theme.caption_size * scale),
        Theme::with_opacity(theme.accent, opacity),
        Pos2::new(left, y),
        width,
    );
    y += 20.0 * scale;

    let title_top = y;
    y += left_text(
        ui,
        copy.title,
        egui::FontId::proportional(theme.title_size * 0.8 * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(left + 28.0 * scale, y),
        width - 28.0 * scale,
    );
    let bar = egui::Rect::from_min_max(
        Pos2::new(left, title_top),
        Pos2::new(left + 6.0 * scale, y),
    );
    ui.painter()
        .rect_filled(bar, 3.0 * scale, Theme::with_opacity(theme.accent, opacity));
    y += 40.0 * scale;

    left_text(
        ui,
        copy.body,
        egui::FontId::proportional(theme.body_size * scale),
        Theme::with_opacity(theme.foreground, opacity * 0.85),
        Pos2::new(left, y),
        width,
    );
}

fn video(
    ui: &egui::Ui,
    copy: &SlideCopy,
    theme: &Theme,
    rect: egui::Rect,
    padding: f32,
    opacity: f32,
    scale: f32,
) {
    let panel = video_panel_rect(rect, padding, scale);
    let painter = ui.painter();
    painter.rect_filled(
        panel,
        16.0 * scale,
        Theme::with_opacity(theme.surface, opacity),
    );

    // Play glyph in the middle of the poster.
    let r = 56.0 * scale;
    let c = panel.center();
    painter.circle_stroke(
        c,
        r,
        egui::Stroke::new(3.0 * scale, Theme::with_opacity(theme.accent, opacity)),
    );
    let tri = vec![
        Pos2::new(c.x - r * 0.3, c.y - r * 0.45),
        Pos2::new(c.x - r * 0.3, c.y + r * 0.45),
        Pos2::new(c.x + r * 0.5, c.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        tri,
        Theme::with_opacity(theme.accent, opacity),
        egui::Stroke::NONE,
    ));

    let mut y = panel.bottom() + 28.0 * scale;
    y += left_text(
        ui,
        copy.title,
        egui::FontId::proportional(theme.subtitle_size * 1.2 * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(panel.left(), y),
        panel.width(),
    );
    y += 8.0 * scale;
    let line = format!("{}  \u{00b7}  {}", copy.subtitle, copy.body);
    left_text(
        ui,
        &line,
        egui::FontId::proportional(theme.caption_size * scale),
        Theme::with_opacity(theme.subdued, opacity),
        Pos2::new(panel.left(), y),
        panel.width(),
    );
}

fn columns(
    ui: &egui::Ui,
    copy: &SlideCopy,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let gap = 80.0 * scale;
    let col_w = (rect.width() - gap) / 2.0;
    let top = rect.top() + rect.height() * 0.2;

    let h = left_text(
        ui,
        copy.title,
        egui::FontId::proportional(theme.title_size * 0.9 * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(rect.left(), top),
        col_w,
    );
    left_text(
        ui,
        copy.subtitle,
        egui::FontId::proportional(theme.subtitle_size * scale),
        Theme::with_opacity(theme.accent, opacity),
        Pos2::new(rect.left(), top + h + 24.0 * scale),
        col_w,
    );

    let right = rect.left() + col_w + gap;
    let divider = egui::Rect::from_min_max(
        Pos2::new(right - gap / 2.0, top),
        Pos2::new(right - gap / 2.0 + 1.0, rect.bottom() - rect.height() * 0.2),
    );
    ui.painter()
        .rect_filled(divider, 0.0, Theme::with_opacity(theme.subdued, opacity * 0.5));

    left_text(
        ui,
        copy.body,
        egui::FontId::proportional(theme.body_size * scale),
        Theme::with_opacity(theme.foreground, opacity * 0.85),
        Pos2::new(right, top + 12.0 * scale),
        col_w,
    );
}

fn closing(
    ui: &egui::Ui,
    copy: &SlideCopy,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let cx = rect.center().x;
    let mut y = rect.center().y - theme.title_size * scale;

    y += centered_text(
        ui,
        copy.title,
        egui::FontId::proportional(theme.title_size * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        cx,
        y,
        rect.width(),
    );
    y += 16.0 * scale;
    y += centered_text(
        ui,
        copy.subtitle,
        egui::FontId::proportional(theme.caption_size * scale),
        Theme::with_opacity(theme.subdued, opacity),
        cx,
        y,
        rect.width(),
    );
    y += 36.0 * scale;
    centered_text(
        ui,
        copy.body,
        egui::FontId::proportional(theme.subtitle_size * scale),
        Theme::with_opacity(theme.accent, opacity),
        cx,
        y,
        rect.width(),
    );
}
