//! Full-screen player: navigation bar, disc, transport buttons, scrub slider.

use eframe::egui::*;
use crate::audio::transport::AudioTransport;
use crate::playback::PlayerScreen;
use crate::timer::Scheduler;
use crate::ui::disc_view;

const ACCENT: Color32 = Color32::from_rgb(0, 122, 255);

/// Draw the player. Returns true when the back button was pressed.
pub fn show<T, S>(
    ctx: &Context,
    screen: &mut PlayerScreen<T, S>,
    title: &str,
    cover: Option<&TextureHandle>,
) -> bool
where
    T: AudioTransport,
    S: Scheduler,
{
    let mut back = false;

    TopBottomPanel::top("nav_bar").resizable(false).show(ctx, |ui| {
        ui.horizontal(|ui| {
            let label = RichText::new("‹ Back").size(18.0).color(ACCENT);
            if ui.add(Button::new(label).frame(false)).clicked() {
                back = true;
            }
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(title).strong());
            });
        });
    });

    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            disc_view::disc(ui, screen.angle_degrees(), cover);
            ui.add_space(32.0);
            controls(ui, screen);
            ui.add_space(16.0);
            progress(ui, screen);
        });
    });

    back
}

fn controls<T: AudioTransport, S: Scheduler>(ui: &mut Ui, screen: &mut PlayerScreen<T, S>) {
    let play_glyph = if screen.is_playing() { "⏸" } else { "▶" };

    // two 32pt icons, one 48pt icon, two 40pt gaps
    ui.horizontal(|ui| {
        let row_width = 32.0 * 2.0 + 48.0 + 40.0 * 2.0;
        ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
        ui.spacing_mut().item_spacing.x = 40.0;

        if ui.add(icon("⏮", 32.0)).clicked() {
            screen.reset();
        }
        if ui.add(icon(play_glyph, 48.0)).clicked() {
            screen.toggle_play();
        }
        if ui.add(icon("⏭", 32.0)).clicked() {
            screen.reset();
        }
    });
}

fn icon(glyph: &str, size: f32) -> Button<'static> {
    Button::new(RichText::new(glyph).size(size).color(ACCENT)).frame(false)
}

fn progress<T: AudioTransport, S: Scheduler>(ui: &mut Ui, screen: &mut PlayerScreen<T, S>) {
    let mut fraction = screen.progress_fraction();
    ui.spacing_mut().slider_width = ui.available_width() - 16.0;
    let response = ui.add(Slider::new(&mut fraction, 0.0..=1.0).show_value(false));
    if response.changed() {
        screen.seek(fraction);
    }

    ui.horizontal(|ui| {
        ui.add_space(8.0);
        ui.label(RichText::new(screen.formatted_elapsed()).small());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.add_space(8.0);
            ui.label(RichText::new(screen.formatted_total()).small());
        });
    });
}
