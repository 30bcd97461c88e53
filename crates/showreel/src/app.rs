use std::time::{Duration, Instant};

use eframe::egui;

use crate::cli::LaunchOptions;
use crate::constants::{CONTROLS_ANIMATION_DURATION, background_tracks, track_title};
use crate::deck::Deck;
use crate::language::Language;
use crate::media::device::CpalOutput;
use crate::media::rotation::TrackRotation;
use crate::navigation::{NavCommand, NavKey, SwipeTracker};
use crate::render;
use crate::session::{Action, Session, SessionOptions};
use crate::theme::Theme;
use crate::viewport::{self, DeviceClass, Orientation};

const TOAST_DURATION: f32 = 1.5;
/// Keeps media events and overlay timers flowing while nothing animates.
const IDLE_REPAINT: Duration = Duration::from_millis(100);
const WINDOW_TITLE: &str = "Brazilian Live Sessions";

const NAV_KEYS: [(egui::Key, NavKey); 7] = [
    (egui::Key::ArrowLeft, NavKey::ArrowLeft),
    (egui::Key::ArrowUp, NavKey::ArrowUp),
    (egui::Key::ArrowRight, NavKey::ArrowRight),
    (egui::Key::ArrowDown, NavKey::ArrowDown),
    (egui::Key::Space, NavKey::Space),
    (egui::Key::Home, NavKey::Home),
    (egui::Key::End, NavKey::End),
];

const LANGUAGE_KEYS: [(egui::Key, Language); 3] = [
    (egui::Key::Num1, Language::EnUs),
    (egui::Key::Num2, Language::Es),
    (egui::Key::Num3, Language::PtBr),
];

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - fade_start) / (TOAST_DURATION - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Crossfade from the previous slide into the current one.
struct Crossfade {
    from: usize,
    start: Instant,
    duration: f32,
}

impl Crossfade {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.start.elapsed().as_secs_f32() / self.duration).clamp(0.0, 1.0)
    }

    fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

struct ShowreelApp {
    session: Session<CpalOutput>,
    theme: Theme,
    reduced_motion: bool,
    crossfade: Option<Crossfade>,
    swipe: SwipeTracker,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    last_hover_pos: Option<egui::Pos2>,
    /// When the controls bar last changed visibility, for its slide animation.
    controls_changed: Option<(bool, Instant)>,
    /// Clickable regions painted in the last frame.
    hotspots: Vec<(egui::Rect, Action)>,
}

impl ShowreelApp {
    fn new(session: Session<CpalOutput>, reduced_motion: bool) -> Self {
        Self {
            session,
            theme: Theme::showreel(),
            reduced_motion,
            crossfade: None,
            swipe: SwipeTracker::new(),
            toast: None,
            last_esc: None,
            last_hover_pos: None,
            controls_changed: None,
            hotspots: Vec::new(),
        }
    }

    /// Forward an action to the session and start the visual follow-ups.
    fn apply(&mut self, action: Action, now: Instant) {
        let before = self.session.current_slide();
        let muted_before = self.session.is_music_muted();
        let controls_before = self.session.controls_visible();

        self.session.apply(action, now);

        if self.session.current_slide() != before {
            let duration = viewport::slide_transition_duration(self.reduced_motion);
            self.crossfade = (duration > 0.0).then(|| Crossfade {
                from: before,
                start: now,
                duration,
            });
        }
        if let Some(lang) = self.session.language() {
            let muted = self.session.is_music_muted();
            if muted != muted_before {
                let text = if muted { lang.ui().muted } else { lang.ui().unmuted };
                self.toast = Some(Toast::new(text.to_string()));
            }
        }
        self.note_controls(controls_before, now);
    }

    fn note_controls(&mut self, before: bool, now: Instant) {
        let visible = self.session.controls_visible();
        if visible != before {
            self.controls_changed = Some((visible, now));
        }
    }

    /// 0 when hidden, 1 when fully shown.
    fn controls_reveal(&self) -> f32 {
        let visible = self.session.controls_visible();
        let Some((shown, at)) = self.controls_changed.filter(|(shown, _)| *shown == visible) else {
            return if visible { 1.0 } else { 0.0 };
        };
        let duration = if self.reduced_motion {
            0.0
        } else {
            CONTROLS_ANIMATION_DURATION
        };
        let t = if duration > 0.0 {
            (at.elapsed().as_secs_f32() / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if shown { t } else { 1.0 - t }
    }

    fn hit(&self, pos: egui::Pos2) -> Option<Action> {
        self.hotspots
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, action)| *action)
    }

    /// Rounded button that dispatches `action` when clicked.
    fn button(
        &mut self,
        ui: &egui::Ui,
        rect: egui::Rect,
        label: &str,
        size: f32,
        action: Action,
        opacity: f32,
    ) {
        let hovered = self.last_hover_pos.is_some_and(|p| rect.contains(p));
        let fill = if hovered {
            Theme::with_opacity(self.theme.accent, opacity * 0.35)
        } else {
            Theme::with_opacity(self.theme.surface, opacity * 0.9)
        };
        ui.painter().rect_filled(rect, rect.height() / 2.0, fill);
        let color = Theme::with_opacity(self.theme.foreground, opacity);
        let galley =
            ui.painter()
                .layout_no_wrap(label.to_string(), egui::FontId::proportional(size), color);
        let pos = rect.center() - galley.rect.size() / 2.0;
        ui.painter().galley(pos, galley, color);
        if opacity > 0.5 {
            self.hotspots.push((rect, action));
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let (pressed, released, interact, hover) = ctx.input(|i| {
            (
                i.pointer.button_pressed(egui::PointerButton::Primary),
                i.pointer.button_released(egui::PointerButton::Primary),
                i.pointer.interact_pos(),
                i.pointer.hover_pos(),
            )
        });

        let moved = match (hover, self.last_hover_pos) {
            (Some(cur), Some(prev)) => cur.distance(prev) > 1.0,
            (Some(_), None) => true,
            _ => false,
        };
        if moved || pressed {
            actions.push(Action::PointerActivity);
        }
        if hover.is_none() && self.last_hover_pos.is_some() {
            actions.push(Action::PointerLeft);
        }
        self.last_hover_pos = hover;

        let Some(pos) = interact else {
            if self.swipe.is_tracking() {
                tracing::trace!("swipe cancelled");
                self.swipe.cancel();
            }
            return;
        };
        if pressed {
            self.swipe.begin(pos.x);
        }
        if released {
            match self.swipe.end(pos.x) {
                Some(cmd) => actions.push(Action::Navigate(cmd)),
                None => {
                    if let Some(action) = self.hit(pos) {
                        actions.push(action);
                    }
                }
            }
        }
    }
}

impl eframe::App for ShowreelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let selecting = self.session.language().is_none();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut actions: Vec<Action> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit".to_string()));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if selecting {
                for (key, lang) in LANGUAGE_KEYS {
                    if i.key_pressed(key) {
                        actions.push(Action::SelectLanguage(lang));
                    }
                }
                return;
            }

            for (key, nav) in NAV_KEYS {
                if i.key_pressed(key) {
                    actions.push(Action::Navigate(nav.command()));
                }
            }
            if i.key_pressed(egui::Key::M) {
                actions.push(Action::ToggleMute);
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.handle_pointer(ctx, &mut actions);
        for action in actions {
            self.apply(action, now);
        }

        let controls_before = self.session.controls_visible();
        self.session.tick(now);
        self.note_controls(controls_before, now);

        if self.crossfade.as_ref().is_some_and(|c| c.is_complete()) {
            self.crossfade = None;
        }
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        self.hotspots.clear();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                self.session
                    .set_device_class(DeviceClass::from_width(rect.width()));
                let class = self.session.device_class();
                let scale = render::compute_scale(rect);

                match self.session.language() {
                    None => self.draw_language_selector(ui, rect, scale),
                    Some(lang) => self.draw_presentation(ui, ctx, rect, lang, class, scale),
                }

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, &self.theme, toast, rect, scale);
                }
            });

        let animating = self.crossfade.is_some()
            || self.toast.is_some()
            || self.session.music().fade().is_active()
            || self
                .controls_changed
                .is_some_and(|(_, at)| at.elapsed().as_secs_f32() < CONTROLS_ANIMATION_DURATION);
        if animating {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}

impl ShowreelApp {
    fn draw_language_selector(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let unit = scale.max(0.5);
        let strings = Language::EnUs.ui();

        let title_color = self.theme.heading_color;
        let title = ui.painter().layout_no_wrap(
            strings.selector_title.to_string(),
            egui::FontId::proportional(72.0 * unit),
            title_color,
        );
        let title_pos = egui::pos2(
            rect.center().x - title.rect.width() / 2.0,
            rect.top() + rect.height() * 0.3,
        );
        let title_bottom = title_pos.y + title.rect.height();
        ui.painter().galley(title_pos, title, title_color);

        let languages = Language::all();
        let w = 240.0 * unit;
        let h = 72.0 * unit;
        let gap = 24.0 * unit;
        let vertical = Orientation::from_size(rect.width(), rect.height()) == Orientation::Portrait
            || rect.width() < languages.len() as f32 * (w + gap) + 2.0 * gap;

        let top = title_bottom + 64.0 * unit;
        for (idx, lang) in languages.iter().enumerate() {
            let i = idx as f32;
            let min = if vertical {
                egui::pos2(rect.center().x - w / 2.0, top + i * (h + gap))
            } else {
                let total = languages.len() as f32 * w + (languages.len() - 1) as f32 * gap;
                egui::pos2(rect.center().x - total / 2.0 + i * (w + gap), top)
            };
            let button_rect = egui::Rect::from_min_size(min, egui::vec2(w, h));
            let label = format!("{}   {}", idx + 1, lang.label());
            self.button(
                ui,
                button_rect,
                &label,
                28.0 * unit,
                Action::SelectLanguage(*lang),
                1.0,
            );
        }
    }

    fn draw_presentation(
        &mut self,
        ui: &egui::Ui,
        ctx: &egui::Context,
        rect: egui::Rect,
        lang: Language,
        class: DeviceClass,
        scale: f32,
    ) {
        let padding = class.edge_padding() * 2.0;
        let current = self.session.current_slide();
        let deck = self.session.deck();

        if let Some(ref fade) = self.crossfade {
            let p = ease_in_out(fade.progress());
            if let Some(from) = deck.slide(fade.from) {
                render::render_slide(ui, from, lang, &self.theme, rect, 1.0 - p, scale, padding);
            }
            if let Some(to) = deck.slide(current) {
                render::render_slide(ui, to, lang, &self.theme, rect, p, scale, padding);
            }
            ctx.request_repaint();
        } else if let Some(slide) = deck.slide(current) {
            render::render_slide(ui, slide, lang, &self.theme, rect, 1.0, scale, padding);
        }

        let unit = scale.max(0.5);
        let strings = lang.ui();

        if self.session.has_video() && self.session.needs_video_interaction() {
            let panel = render::video_panel_rect(rect, padding, scale);
            let galley = ui.painter().layout_no_wrap(
                strings.enable_audio.to_string(),
                egui::FontId::proportional(24.0 * unit),
                self.theme.foreground,
            );
            let size = galley.rect.size() + egui::vec2(48.0, 28.0) * unit;
            let button_rect = egui::Rect::from_center_size(
                egui::pos2(panel.center().x, panel.bottom() - size.y - 24.0 * unit),
                size,
            );
            self.button(
                ui,
                button_rect,
                strings.enable_audio,
                24.0 * unit,
                Action::UnmuteVideo,
                1.0,
            );
        }

        if self.session.instructions_visible() {
            let text = if class.is_mobile() {
                strings.instruction_swipe
            } else {
                strings.instruction_arrows
            };
            draw_pill(
                ui,
                &self.theme,
                text,
                egui::pos2(rect.center().x, rect.bottom() - 160.0 * unit),
                22.0 * unit,
            );
        }

        if class.is_mobile() {
            self.draw_swipe_dots(ui, rect, unit);
        }

        let reveal = self.controls_reveal();
        if reveal > 0.0 {
            self.draw_controls(ui, ctx, rect, lang, class, unit, reveal);
        }
    }

    fn draw_swipe_dots(&self, ui: &egui::Ui, rect: egui::Rect, unit: f32) {
        let count = self.session.deck().len();
        let current = self.session.current_slide();
        let r = 4.0 * unit;
        let gap = 14.0 * unit;
        let total = (count.saturating_sub(1)) as f32 * gap;
        let y = rect.bottom() - 110.0 * unit;
        for i in 0..count {
            let x = rect.center().x - total / 2.0 + i as f32 * gap;
            let color = if i == current {
                self.theme.accent
            } else {
                Theme::with_opacity(self.theme.subdued, 0.6)
            };
            let radius = if i == current { r * 1.4 } else { r };
            ui.painter().circle_filled(egui::pos2(x, y), radius, color);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_controls(
        &mut self,
        ui: &egui::Ui,
        ctx: &egui::Context,
        rect: egui::Rect,
        lang: Language,
        class: DeviceClass,
        unit: f32,
        reveal: f32,
    ) {
        let bar_h = 72.0 * unit;
        let margin = 16.0 * unit;
        let offset = (1.0 - reveal) * (bar_h + margin);
        let bar = egui::Rect::from_min_max(
            egui::pos2(rect.left() + margin, rect.bottom() - bar_h - margin + offset),
            egui::pos2(rect.right() - margin, rect.bottom() - margin + offset),
        );
        ui.painter().rect_filled(
            bar,
            12.0 * unit,
            Theme::with_opacity(self.theme.surface, 0.85 * reveal),
        );

        let inner = bar.shrink(12.0 * unit);
        let btn = egui::vec2(inner.height(), inner.height());
        let icon = 22.0 * unit;
        let text_color = Theme::with_opacity(self.theme.foreground, reveal);
        let mut x = inner.left();

        // Slide navigation
        let nav = self.session.navigator();
        let (is_first, is_last) = (nav.is_first(), nav.is_last());
        let counter = format!("{} / {}", nav.current() + 1, nav.len());
        if !class.is_mobile() {
            let prev_opacity = if is_first { reveal * 0.4 } else { reveal };
            let r = egui::Rect::from_min_size(egui::pos2(x, inner.top()), btn);
            self.button(
                ui,
                r,
                "\u{2039}",
                icon * 1.4,
                Action::Navigate(NavCommand::Previous),
                prev_opacity,
            );
            x += btn.x + 8.0 * unit;
        }
        let galley = ui.painter().layout_no_wrap(
            counter,
            egui::FontId::monospace(18.0 * unit),
            text_color,
        );
        let counter_w = galley.rect.width();
        ui.painter().galley(
            egui::pos2(x, inner.center().y - galley.rect.height() / 2.0),
            galley,
            text_color,
        );
        x += counter_w + 8.0 * unit;
        if !class.is_mobile() {
            let next_opacity = if is_last { reveal * 0.4 } else { reveal };
            let r = egui::Rect::from_min_size(egui::pos2(x, inner.top()), btn);
            self.button(
                ui,
                r,
                "\u{203A}",
                icon * 1.4,
                Action::Navigate(NavCommand::Next),
                next_opacity,
            );
        }

        // Language switcher and mute on the right
        let state = self.session.playback_state();
        let mut right = inner.right();
        let lang_w = 96.0 * unit;
        let lang_rect = egui::Rect::from_min_max(
            egui::pos2(right - lang_w, inner.top()),
            egui::pos2(right, inner.bottom()),
        );
        self.button(
            ui,
            lang_rect,
            lang.label(),
            18.0 * unit,
            Action::SwitchLanguage(lang.next()),
            reveal,
        );
        right -= lang_w + 8.0 * unit;
        let mute_rect = egui::Rect::from_min_size(egui::pos2(right - btn.x, inner.top()), btn);
        let mute_icon = if state.is_muted { "\u{1F507}" } else { "\u{1F50A}" };
        self.button(ui, mute_rect, mute_icon, icon, Action::ToggleMute, reveal);

        // Music player in the middle
        let play_icon = if state.is_playing { "\u{23F8}" } else { "\u{25B6}" };
        let cx = inner.center().x;
        let player = [
            ("\u{23EE}", Action::PreviousTrack),
            (play_icon, Action::PlayPause),
            ("\u{23ED}", Action::NextTrack),
        ];
        let player_w = 3.0 * btn.x + 2.0 * 8.0 * unit;
        let mut px = cx - player_w / 2.0;
        for (label, action) in player {
            let r = egui::Rect::from_min_size(egui::pos2(px, inner.top()), btn);
            self.button(ui, r, label, icon, action, reveal);
            px += btn.x + 8.0 * unit;
        }

        if class != DeviceClass::Mobile {
            let music = self.session.music();
            let loading = !state.is_playing && music.pending_start().is_some();
            let title = if loading {
                format!("{}\u{2026}", lang.ui().loading)
            } else {
                track_title(music.rotation().current_source())
            };
            let title_x = px + 16.0 * unit;
            let indicator_w = 24.0 * unit;
            let max_w = (mute_rect.left() - title_x - indicator_w - 24.0 * unit).max(0.0);
            let galley = ui.painter().layout(
                title,
                egui::FontId::proportional(16.0 * unit),
                Theme::with_opacity(self.theme.subdued, reveal),
                max_w,
            );
            ui.painter().galley(
                egui::pos2(
                    title_x + indicator_w,
                    inner.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                text_color,
            );

            if state.is_playing && !state.is_muted && !music.is_fading_out() {
                let t = ctx.input(|i| i.time) as f32;
                for k in 0..3 {
                    let h = (0.3 + 0.7 * ((t * 5.0 + k as f32 * 1.7).sin() * 0.5 + 0.5))
                        * 16.0
                        * unit;
                    let bx = title_x + k as f32 * 6.0 * unit;
                    let bar_rect = egui::Rect::from_min_max(
                        egui::pos2(bx, inner.center().y + 8.0 * unit - h),
                        egui::pos2(bx + 3.0 * unit, inner.center().y + 8.0 * unit),
                    );
                    ui.painter().rect_filled(
                        bar_rect,
                        1.0,
                        Theme::with_opacity(self.theme.accent, reveal),
                    );
                }
                ctx.request_repaint_after(Duration::from_millis(50));
            }
        }
    }
}

fn draw_pill(ui: &egui::Ui, theme: &Theme, text: &str, center: egui::Pos2, size: f32) {
    let color = theme.foreground;
    let galley =
        ui.painter()
            .layout_no_wrap(text.to_string(), egui::FontId::proportional(size), color);
    let pad = egui::vec2(size * 1.2, size * 0.6);
    let pill = egui::Rect::from_center_size(center, galley.rect.size() + pad * 2.0);
    ui.painter()
        .rect_filled(pill, pill.height() / 2.0, Theme::with_opacity(theme.surface, 0.9));
    ui.painter().galley(pill.min + pad, galley, color);
}

fn draw_toast(ui: &egui::Ui, theme: &Theme, toast: &Toast, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let unit = scale.max(0.5);
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.surface, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0 * unit),
        toast_color,
    );
    let padding = 16.0 * unit;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.top() + 40.0 * unit,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * unit, toast_bg);
    let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let rotation = TrackRotation::new(background_tracks())?;
    let deck = Deck::default();
    if deck.is_empty() {
        anyhow::bail!("the deck has no slides");
    }
    tracing::debug!(
        slides = deck.len(),
        videos = ?deck.video_slides(),
        tracks = rotation.len(),
        "loaded deck"
    );

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(WINDOW_TITLE)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(WINDOW_TITLE)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!(
        windowed = options.windowed,
        slide = options.start_slide + 1,
        muted = options.muted,
        "opening presentation"
    );

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| {
            let device = options.device.clone();
            let music = CpalOutput::new("music", device.clone());
            let session_options = SessionOptions {
                start_slide: options.start_slide,
                start_muted: options.muted,
                ..SessionOptions::default()
            };
            let mut session = Session::new(
                deck,
                music,
                rotation,
                |_| CpalOutput::new("video", device.clone()),
                session_options,
            );
            if let Some(lang) = options.language {
                session.apply(Action::SelectLanguage(lang), Instant::now());
            }
            Ok(Box::new(ShowreelApp::new(session, options.reduced_motion)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
