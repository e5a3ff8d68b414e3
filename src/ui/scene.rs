use crate::{
    core::{slots::NoteVisual, state::VisualState},
    media::MediaLibrary,
};
use egui::{Color32, Mesh, Painter, Pos2, Rect, Sense, Shape, Ui, Vec2, pos2, vec2};

/// Native size of one clip frame; the zoom transform scales against it.
pub const BASE_CLIP_SIZE: Vec2 = Vec2::new(1024., 768.);
pub const MAX_ZOOM: f32 = 5.;

pub struct UIScene {}

impl UIScene {
    pub fn new() -> Self {
        Self {}
    }

    /// Paints one frame: gradient, then each active note's circle, sprite and
    /// clip layers. The `age_and_collect` call here is also the per-frame
    /// aging step, so this runs exactly once per frame.
    pub fn ui(&mut self, ui: &mut Ui, state: &mut VisualState, media: &MediaLibrary) {
        let (viewport, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(viewport);

        paint_gradient(&painter, viewport, state.background_level());
        for visual in state.age_and_collect() {
            self.paint_note(&painter, viewport, &visual, media);
        }
    }

    fn paint_note(
        &self,
        painter: &Painter,
        viewport: Rect,
        visual: &NoteVisual,
        media: &MediaLibrary,
    ) {
        let tint = note_tint(visual.note, visual.countdown);

        painter.circle_filled(visual.position, visual.velocity as f32 / 2., tint);

        if let Some(flower) = &media.flower {
            let size = vec2(visual.note as f32 * 5., visual.velocity as f32 * 2.);
            painter.image(
                flower.id(),
                Rect::from_min_size(visual.position, size),
                uv_full(),
                tint,
            );
        }

        // all three layers share one zoom transform driven by the note number
        let clip_rect = zoom_rect(visual.note, viewport.min);
        for layer in 0..media.clip.layer_count() {
            if let Some(frame) = media.clip.layer_frame(layer) {
                painter.image(frame.id(), clip_rect, uv_full(), tint);
            }
        }
    }
}

/// Two-tone color from the note number, with the countdown as alpha. The
/// doubled note number is clamped in case the input ever leaves 0..=127.
fn note_tint(note: u8, alpha: u8) -> Color32 {
    let c = (note as u16 * 2).min(255) as u8;
    Color32::from_rgba_unmultiplied(255 - c, c, c, alpha)
}

/// Scales the base frame by `note * MAX_ZOOM / 127` and shifts it so the
/// frame's focal point stays roughly anchored instead of growing from the
/// corner.
fn zoom_rect(note: u8, origin: Pos2) -> Rect {
    let scale = note as f32 * MAX_ZOOM / 127.;
    let size = BASE_CLIP_SIZE * scale;
    let offset = size - BASE_CLIP_SIZE;
    let pos = origin - offset * (note as f32 / 127.);
    Rect::from_min_size(pos, size)
}

fn uv_full() -> Rect {
    Rect::from_min_max(Pos2::ZERO, pos2(1., 1.))
}

/// Vertical two-stop gradient, black at the top down to `gray(level)`.
fn paint_gradient(painter: &Painter, rect: Rect, level: u8) {
    let bottom = Color32::from_gray(level);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), Color32::BLACK);
    mesh.colored_vertex(rect.right_top(), Color32::BLACK);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}
