use std::time::Instant;

use crate::{
    animation::transition::TransitionKind,
    deck::model::{Deck, Scene},
    playback::player::Player,
    ui::theme::{self, Palette},
    view::frame::{DragFrame, ViewFrame, compose_frame},
};

/// Reference size the chrome and type scale are tuned against.
const REF_SIZE: [f32; 2] = [1280.0, 720.0];

/// Clicks collected while drawing, applied after the panel closes.
#[derive(Clone, Copy, Debug)]
enum UiAction {
    Advance,
    Retreat,
    Jump(usize),
    Pick(usize),
    TogglePlay,
    ToggleMenu,
}

/// egui front-end that feeds input into a [`Player`] and draws its frames.
pub struct VignetteApp {
    player: Player,
    last_pointer_x: f32,
}

impl VignetteApp {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            last_pointer_x: 0.0,
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, now: Instant) {
        let (primary_pressed, primary_down, pointer_pos) = ctx.input(|i| {
            (
                i.pointer.button_pressed(egui::PointerButton::Primary),
                i.pointer.button_down(egui::PointerButton::Primary),
                i.pointer.hover_pos(),
            )
        });

        if let Some(pos) = pointer_pos {
            self.last_pointer_x = pos.x;
        }

        if primary_pressed {
            self.player.begin_gesture(self.last_pointer_x);
        } else if primary_down {
            self.player.update_gesture(self.last_pointer_x);
        } else if self.player.state().gesture.active {
            self.player.end_gesture(self.last_pointer_x, now);
        }
    }

    fn draw_all(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        frame: &ViewFrame,
        pending: &mut Vec<UiAction>,
    ) {
        let deck = self.player.deck();
        let palette = Palette::for_token(&frame.scene.background);

        let (sky, ground) = match &frame.transition {
            Some(tr) => {
                let from = Palette::for_token(&deck.scenes[tr.from].background);
                let to = Palette::for_token(&deck.scenes[tr.to].background);
                let t = tr.progress as f32;
                (theme::mix(from.sky, to.sky, t), theme::mix(from.ground, to.ground, t))
            }
            None => (palette.sky, palette.ground),
        };
        draw_background(ui, rect, sky, ground);

        match &frame.transition {
            Some(tr) => {
                let from_scene = &deck.scenes[tr.from];
                let to_scene = &deck.scenes[tr.to];
                let p = tr.progress as f32;
                match tr.kind {
                    TransitionKind::Zoom => {
                        draw_scene(ui, rect, from_scene, 1.0 - p, 1.0 + 0.2 * p);
                        draw_scene(ui, rect, to_scene, p, 0.8 + 0.2 * p);
                    }
                    TransitionKind::Crossfade => {
                        draw_scene(ui, rect, from_scene, 1.0 - p, 1.0);
                        draw_scene(ui, rect, to_scene, p, 1.0);
                    }
                    TransitionKind::Slide => {
                        let w = rect.width();
                        let sign = tr.direction.sign();
                        let from_offset = sign * p * w;
                        let to_offset = from_offset - sign * w;
                        let from_rect = rect.translate(egui::vec2(from_offset, 0.0));
                        let to_rect = rect.translate(egui::vec2(to_offset, 0.0));
                        draw_scene(ui, from_rect, from_scene, 1.0, 1.0);
                        draw_scene(ui, to_rect, to_scene, 1.0, 1.0);
                    }
                }
            }
            None => {
                let scene_rect = match &frame.drag {
                    Some(drag) if frame.layout.is_mobile() => {
                        rect.translate(egui::vec2(drag.shift, 0.0))
                    }
                    _ => rect,
                };
                draw_scene(ui, scene_rect, &frame.scene, 1.0, 1.0);
            }
        }

        draw_progress(ui, rect, frame, &palette);
        // The open menu is modal: the nav controls under its scrim are
        // neither drawn nor clickable until it closes.
        if !frame.menu_open {
            draw_dots(ui, rect, frame, &palette, pending);
            if !frame.layout.is_mobile() {
                draw_arrows(ui, rect, &palette, pending);
            }
            draw_play_toggle(ui, rect, frame, &palette, pending);
        }
        draw_counter(ui, rect, frame, &palette);
        if frame.layout.is_mobile() && frame.hint_visible && frame.drag.is_none() && !frame.menu_open
        {
            draw_hint(ui, rect, &palette);
        }
        if let Some(drag) = &frame.drag
            && !frame.menu_open
        {
            draw_release_indicator(ui, rect, drag, &palette);
        }
        if frame.menu_open {
            draw_menu(ui, rect, frame, &palette, pending);
        }
        // Last so the toggle sits above the scrim and keeps closing the menu.
        draw_menu_toggle(ui, rect, frame, &palette, pending);
    }
}

impl eframe::App for VignetteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.player.set_viewport_width(ctx.screen_rect().width());

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::Escape) {
                if self.player.state().menu_open {
                    self.player.toggle_menu();
                } else {
                    viewport_cmds.push(egui::ViewportCommand::Close);
                }
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::ArrowRight) {
                self.player.advance(now);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.player.retreat(now);
            }
            if i.key_pressed(egui::Key::Space) {
                self.player.toggle_play(now);
            }
            if i.key_pressed(egui::Key::M) {
                self.player.toggle_menu();
            }
            if i.key_pressed(egui::Key::Home) {
                self.player.jump_to(0, now);
            }
            if i.key_pressed(egui::Key::End) {
                let last = self.player.scene_count() - 1;
                self.player.jump_to(last, now);
            }
        });

        // Send collected viewport commands outside the input closure
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.handle_pointer(ctx, now);
        self.player.tick(now);

        let frame = compose_frame(&self.player, now);
        let mut pending: Vec<UiAction> = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_all(ui, rect, &frame, &mut pending);
            });

        let had_actions = !pending.is_empty();
        for action in pending {
            match action {
                UiAction::Advance => self.player.advance(now),
                UiAction::Retreat => self.player.retreat(now),
                UiAction::Jump(index) => self.player.jump_to(index, now),
                UiAction::Pick(index) => self.player.select_scene(index, now),
                UiAction::TogglePlay => self.player.toggle_play(now),
                UiAction::ToggleMenu => self.player.toggle_menu(),
            }
        }

        if had_actions || frame.transition.is_some() || frame.drag.is_some() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.player.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

fn scale_factor(rect: egui::Rect) -> f32 {
    (rect.width() / REF_SIZE[0])
        .min(rect.height() / REF_SIZE[1])
        .max(0.35)
}

fn draw_background(ui: &egui::Ui, rect: egui::Rect, sky: egui::Color32, ground: egui::Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), sky);
    mesh.colored_vertex(rect.right_top(), sky);
    mesh.colored_vertex(rect.left_bottom(), ground);
    mesh.colored_vertex(rect.right_bottom(), ground);
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}

fn draw_scene(ui: &egui::Ui, rect: egui::Rect, scene: &Scene, opacity: f32, zoom: f32) {
    if opacity < 0.01 {
        return;
    }
    let palette = Palette::for_token(&scene.background);
    let k = scale_factor(rect) * zoom;
    let ink = theme::with_opacity(palette.ink, opacity);
    let soft_ink = theme::with_opacity(palette.ink, opacity * 0.85);

    let title_galley = ui.painter().layout_no_wrap(
        scene.title.clone(),
        egui::FontId::proportional(64.0 * k),
        ink,
    );
    let subtitle_galley = (!scene.subtitle.is_empty()).then(|| {
        ui.painter().layout_no_wrap(
            scene.subtitle.clone(),
            egui::FontId::proportional(26.0 * k),
            soft_ink,
        )
    });
    let content_galley = {
        let mut job = egui::text::LayoutJob::simple(
            scene.content.clone(),
            egui::FontId::proportional(20.0 * k),
            soft_ink,
            rect.width() * 0.72,
        );
        job.halign = egui::Align::Center;
        ui.painter().layout_job(job)
    };

    let gap = 18.0 * k;
    let mut total = title_galley.rect.height() + gap + content_galley.rect.height();
    if let Some(g) = &subtitle_galley {
        total += g.rect.height() + 10.0 * k;
    }

    let cx = rect.center().x;
    let mut y = rect.center().y - total / 2.0;

    ui.painter().galley(
        egui::pos2(cx - title_galley.rect.width() / 2.0, y),
        title_galley.clone(),
        ink,
    );
    y += title_galley.rect.height() + 10.0 * k;

    if let Some(g) = subtitle_galley {
        ui.painter()
            .galley(egui::pos2(cx - g.rect.width() / 2.0, y), g.clone(), soft_ink);
        y += g.rect.height() + gap - 10.0 * k;
    } else {
        y += gap - 10.0 * k;
    }

    // Center-aligned jobs hang rows around pos.x.
    ui.painter()
        .galley(egui::pos2(cx, y), content_galley, soft_ink);
}

fn draw_progress(ui: &egui::Ui, rect: egui::Rect, frame: &ViewFrame, palette: &Palette) {
    let bar_h = 4.0;
    let track = egui::Rect::from_min_size(rect.left_top(), egui::vec2(rect.width(), bar_h));
    ui.painter()
        .rect_filled(track, 0.0, theme::with_opacity(palette.ink, 0.15));
    let fill = egui::Rect::from_min_size(
        rect.left_top(),
        egui::vec2(rect.width() * frame.progress_fraction as f32, bar_h),
    );
    ui.painter().rect_filled(fill, 0.0, palette.accent);
}

fn draw_dots(
    ui: &egui::Ui,
    rect: egui::Rect,
    frame: &ViewFrame,
    palette: &Palette,
    pending: &mut Vec<UiAction>,
) {
    let spacing = 22.0;
    let total = spacing * (frame.scene_count as f32 - 1.0);
    let cy = rect.bottom() - 36.0;

    for row in &frame.menu {
        let cx = rect.center().x - total / 2.0 + spacing * row.index as f32;
        let center = egui::pos2(cx, cy);
        let hit = egui::Rect::from_center_size(center, egui::vec2(18.0, 18.0));
        let resp = ui.interact(hit, ui.id().with(("dot", row.index)), egui::Sense::click());

        let (radius, color) = if row.active {
            (6.0, palette.accent)
        } else if resp.hovered() {
            (5.0, theme::with_opacity(palette.ink, 0.7))
        } else {
            (4.0, theme::with_opacity(palette.ink, 0.4))
        };
        ui.painter().circle_filled(center, radius, color);

        if resp.clicked() {
            pending.push(UiAction::Jump(row.index));
        }
    }
}

fn draw_arrows(ui: &egui::Ui, rect: egui::Rect, palette: &Palette, pending: &mut Vec<UiAction>) {
    let arrows = [
        ("\u{2039}", rect.left() + 34.0, UiAction::Retreat),
        ("\u{203A}", rect.right() - 34.0, UiAction::Advance),
    ];
    for (glyph, x, action) in arrows {
        let center = egui::pos2(x, rect.center().y);
        let hit = egui::Rect::from_center_size(center, egui::vec2(44.0, 88.0));
        let resp = ui.interact(hit, ui.id().with(("arrow", glyph)), egui::Sense::click());
        let color = theme::with_opacity(palette.ink, if resp.hovered() { 0.9 } else { 0.35 });

        let galley = ui
            .painter()
            .layout_no_wrap(glyph.to_string(), egui::FontId::proportional(48.0), color);
        let pos = egui::pos2(
            center.x - galley.rect.width() / 2.0,
            center.y - galley.rect.height() / 2.0,
        );
        ui.painter().galley(pos, galley, color);

        if resp.clicked() {
            pending.push(action);
        }
    }
}

fn draw_play_toggle(
    ui: &egui::Ui,
    rect: egui::Rect,
    frame: &ViewFrame,
    palette: &Palette,
    pending: &mut Vec<UiAction>,
) {
    let center = egui::pos2(rect.left() + 32.0, rect.bottom() - 34.0);
    let hit = egui::Rect::from_center_size(center, egui::vec2(28.0, 28.0));
    let resp = ui.interact(hit, ui.id().with("play-toggle"), egui::Sense::click());
    let color = theme::with_opacity(palette.ink, if resp.hovered() { 0.9 } else { 0.55 });

    if frame.playing {
        for off in [-4.0, 4.0] {
            let bar = egui::Rect::from_center_size(
                egui::pos2(center.x + off, center.y),
                egui::vec2(4.0, 16.0),
            );
            ui.painter().rect_filled(bar, 1.0, color);
        }
    } else {
        let points = vec![
            egui::pos2(center.x - 6.0, center.y - 8.0),
            egui::pos2(center.x + 8.0, center.y),
            egui::pos2(center.x - 6.0, center.y + 8.0),
        ];
        ui.painter()
            .add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
    }

    if resp.clicked() {
        pending.push(UiAction::TogglePlay);
    }
}

fn draw_counter(ui: &egui::Ui, rect: egui::Rect, frame: &ViewFrame, palette: &Palette) {
    let text = format!("{} / {}", frame.index + 1, frame.scene_count);
    let color = theme::with_opacity(palette.ink, 0.5);
    let galley = ui
        .painter()
        .layout_no_wrap(text, egui::FontId::monospace(14.0), color);
    let pos = egui::pos2(
        rect.right() - galley.rect.width() - 18.0,
        rect.bottom() - galley.rect.height() - 16.0,
    );
    ui.painter().galley(pos, galley, color);
}

fn draw_hint(ui: &egui::Ui, rect: egui::Rect, palette: &Palette) {
    let color = theme::with_opacity(palette.ink, 0.75);
    let galley = ui.painter().layout_no_wrap(
        "swipe to continue".to_string(),
        egui::FontId::proportional(15.0),
        color,
    );
    let padding = egui::vec2(14.0, 8.0);
    let pill = egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.bottom() - 72.0),
        galley.rect.size() + padding * 2.0,
    );
    ui.painter().rect_filled(
        pill,
        pill.height() / 2.0,
        theme::with_opacity(palette.ink, 0.12),
    );
    ui.painter().galley(pill.min + padding, galley, color);
}

fn draw_release_indicator(ui: &egui::Ui, rect: egui::Rect, drag: &DragFrame, palette: &Palette) {
    if drag.offset.abs() < 4.0 {
        return;
    }
    // Pulling leftwards drags the next scene in from the right edge.
    let x = if drag.offset < 0.0 {
        rect.right() - 26.0
    } else {
        rect.left() + 26.0
    };
    let color = if drag.armed {
        palette.accent
    } else {
        theme::with_opacity(palette.ink, 0.5)
    };

    let bar_h = 90.0 * drag.pull_fraction;
    let bar = egui::Rect::from_center_size(egui::pos2(x, rect.center().y), egui::vec2(4.0, bar_h));
    ui.painter().rect_filled(bar, 2.0, color);

    if drag.armed {
        let galley =
            ui.painter()
                .layout_no_wrap("release".to_string(), egui::FontId::proportional(13.0), color);
        let pos = egui::pos2(
            x - galley.rect.width() / 2.0,
            rect.center().y + bar_h / 2.0 + 12.0,
        );
        ui.painter().galley(pos, galley, color);
    }
}

fn draw_menu_toggle(
    ui: &egui::Ui,
    rect: egui::Rect,
    frame: &ViewFrame,
    palette: &Palette,
    pending: &mut Vec<UiAction>,
) {
    let center = egui::pos2(rect.right() - 30.0, rect.top() + 28.0);
    let hit = egui::Rect::from_center_size(center, egui::vec2(30.0, 30.0));
    let resp = ui.interact(hit, ui.id().with("menu-toggle"), egui::Sense::click());
    let base = if frame.menu_open {
        egui::Color32::WHITE
    } else {
        palette.ink
    };
    let color = theme::with_opacity(base, if resp.hovered() { 0.9 } else { 0.55 });

    if frame.menu_open {
        let stroke = egui::Stroke::new(2.0, color);
        for (from, to) in [((-7.0, -7.0), (7.0, 7.0)), ((-7.0, 7.0), (7.0, -7.0))] {
            ui.painter().line_segment(
                [
                    center + egui::vec2(from.0, from.1),
                    center + egui::vec2(to.0, to.1),
                ],
                stroke,
            );
        }
    } else {
        for dy in [-6.0, 0.0, 6.0] {
            let line = egui::Rect::from_center_size(
                egui::pos2(center.x, center.y + dy),
                egui::vec2(18.0, 2.0),
            );
            ui.painter().rect_filled(line, 1.0, color);
        }
    }

    if resp.clicked() {
        pending.push(UiAction::ToggleMenu);
    }
}

fn draw_menu(
    ui: &egui::Ui,
    rect: egui::Rect,
    frame: &ViewFrame,
    palette: &Palette,
    pending: &mut Vec<UiAction>,
) {
    // The scrim owns stray clicks; rows register after it and win on top.
    let scrim = ui.interact(rect, ui.id().with("menu-scrim"), egui::Sense::click());
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(170));

    let title_color = theme::with_opacity(egui::Color32::WHITE, 0.9);
    let title_galley = ui.painter().layout_no_wrap(
        frame.deck_title.clone(),
        egui::FontId::proportional(30.0),
        title_color,
    );
    ui.painter().galley(
        egui::pos2(rect.center().x - title_galley.rect.width() / 2.0, rect.top() + 56.0),
        title_galley,
        title_color,
    );

    let row_size = egui::vec2((rect.width() * 0.7).min(420.0), 44.0);
    let mut y = rect.top() + 130.0;

    for row in &frame.menu {
        let row_rect = egui::Rect::from_center_size(egui::pos2(rect.center().x, y), row_size);
        let resp = ui.interact(row_rect, ui.id().with(("menu-row", row.index)), egui::Sense::click());

        let color = if row.active {
            palette.accent
        } else if resp.hovered() {
            egui::Color32::WHITE
        } else {
            theme::with_opacity(egui::Color32::WHITE, 0.7)
        };

        let label = if row.subtitle.is_empty() {
            row.title.clone()
        } else {
            format!("{} \u{00b7} {}", row.title, row.subtitle)
        };
        let galley = ui
            .painter()
            .layout_no_wrap(label, egui::FontId::proportional(19.0), color);
        let pos = egui::pos2(
            row_rect.center().x - galley.rect.width() / 2.0,
            row_rect.center().y - galley.rect.height() / 2.0,
        );
        ui.painter().galley(pos, galley, color);

        if row.active {
            ui.painter().circle_filled(
                egui::pos2(row_rect.left() - 16.0, row_rect.center().y),
                3.0,
                palette.accent,
            );
        }

        if resp.clicked() {
            pending.push(UiAction::Pick(row.index));
        }
        y += row_size.y + 6.0;
    }

    if scrim.clicked() {
        pending.push(UiAction::ToggleMenu);
    }
}

/// Open a native window and drive `deck` until the user quits.
pub fn run(
    deck: Deck,
    windowed: bool,
    start_index: Option<usize>,
    autoplay: bool,
) -> anyhow::Result<()> {
    let title = deck.title.clone();
    let now = Instant::now();
    let mut player = Player::new(deck, now)?;

    if let Some(index) = start_index {
        player.jump_to(index, now);
    }
    if autoplay {
        player.toggle_play(now);
    }

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size(REF_SIZE)
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app = VignetteApp::new(player);
    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/ui/app.rs"]
mod tests;
