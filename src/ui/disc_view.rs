//! Album-art disc painted with the egui painter, rotated by the playback angle.

use egui::emath::Rot2;
use egui::{vec2, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, TextureHandle, Ui, Vec2};
use crate::ui::cover;

const OUTER_RADIUS: f32 = 112.0;
const DISC_RADIUS: f32 = 110.0;
const COVER_RADIUS: f32 = 100.0;
const CENTER_DOT_RADIUS: f32 = 10.0;
const GROOVES: usize = 8;
const GROOVE_SPACING: f32 = 10.0;

const SILVER: Color32 = Color32::from_rgb(192, 192, 192);
const COVER: Color32 = Color32::from_rgb(40, 52, 96);

/// Paint the disc at `angle_degrees` and reserve its space in the layout.
/// Without cover art a note glyph turns in its place.
pub fn disc(ui: &mut Ui, angle_degrees: f64, cover_art: Option<&TextureHandle>) {
    let size = Vec2::splat(OUTER_RADIUS * 2.0 + 16.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let rot = Rot2::from_angle((angle_degrees as f32).to_radians());

    // shadow, then the white disc with its rim
    painter.circle_filled(center + vec2(0.0, 8.0), DISC_RADIUS, Color32::from_black_alpha(60));
    painter.circle_stroke(center, OUTER_RADIUS, Stroke::new(1.0, Color32::BLACK));
    painter.circle_filled(center, DISC_RADIUS, Color32::WHITE);

    match cover_art {
        Some(texture) => {
            let angle = (angle_degrees as f32).to_radians();
            let mesh = cover::cover_mesh(texture.id(), texture.size(), center, COVER_RADIUS, angle);
            painter.add(Shape::mesh(mesh));
        }
        None => {
            painter.circle_filled(center, COVER_RADIUS, COVER);
            for index in 0..GROOVES {
                let radius = COVER_RADIUS - index as f32 * GROOVE_SPACING;
                painter.circle_stroke(center, radius, Stroke::new(0.5, Color32::from_gray(150).gamma_multiply(0.3)));
            }

            // Anything off-centre turns with the disc
            let label_edge = rotated(center, rot, vec2(0.0, -COVER_RADIUS + 4.0));
            let label_root = rotated(center, rot, vec2(0.0, -CENTER_DOT_RADIUS * 2.0));
            painter.line_segment([label_root, label_edge], Stroke::new(3.0, Color32::from_white_alpha(90)));
            painter.text(
                rotated(center, rot, vec2(0.0, COVER_RADIUS * 0.5)),
                Align2::CENTER_CENTER,
                "♪",
                FontId::proportional(40.0),
                Color32::WHITE,
            );
        }
    }
    painter.circle_stroke(center, COVER_RADIUS, Stroke::new(2.0, Color32::from_white_alpha(50)));

    painter.circle_filled(center + vec2(0.0, 2.0), CENTER_DOT_RADIUS, Color32::from_black_alpha(77));
    painter.circle_filled(center, CENTER_DOT_RADIUS, SILVER);
}

fn rotated(center: Pos2, rot: Rot2, offset: Vec2) -> Pos2 {
    center + rot * offset
}
