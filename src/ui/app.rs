//! Main application UI.
//! A home screen with a single "Play music" button that covers the window
//! with the player; the player's back button returns home.
//!
//! This implementation uses eframe::App for window management and event handling.

use crossbeam::channel::Receiver;
use eframe::egui::*;
use eframe::{App, CreationContext};
use tokio::runtime::Runtime;
use tracing::{debug, info};
use crate::audio::{AudioPlayer, AudioPlayerLoader};
use crate::config::PlayerConfig;
use crate::playback::PlayerScreen;
use crate::timer::{build_runtime, coalesce, TimerEvent, TokioScheduler, MAX_ROTATION_CATCH_UP};
use crate::ui::{cover, player_view};

/// Error type for launching the application
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Timer runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("UI error: {0}")]
    Ui(#[from] eframe::Error),
}

type Screen = PlayerScreen<AudioPlayer, TokioScheduler>;

/// Application root
pub struct PlayerApp {
    config: PlayerConfig,
    loader: AudioPlayerLoader,
    scheduler: TokioScheduler,
    events: Receiver<TimerEvent>,
    screen: Option<Screen>,
    cover: Option<TextureHandle>,
    // Timer tasks live on this runtime; dropped last
    _runtime: Runtime,
}

impl PlayerApp {
    /// Create the application
    ///
    /// Called by eframe during application initialization. Timer ticks
    /// request a repaint so the frame loop picks them up promptly.
    pub fn new(cc: &CreationContext<'_>, config: PlayerConfig, runtime: Runtime) -> Self {
        let ctx = cc.egui_ctx.clone();
        let (scheduler, events) = TokioScheduler::new(runtime.handle().clone());
        let scheduler = scheduler.with_waker(move || ctx.request_repaint());
        let cover = config
            .cover_path
            .as_deref()
            .and_then(|path| cover::load_cover(&cc.egui_ctx, path));

        Self {
            config,
            loader: AudioPlayerLoader,
            scheduler,
            events,
            screen: None,
            cover,
            _runtime: runtime,
        }
    }

    fn open_player(&mut self) {
        let mut screen = PlayerScreen::new(&self.config, self.scheduler.clone());
        screen.appear(&self.loader, &self.config.audio_path);
        self.screen = Some(screen);
        info!("player opened");
    }

    fn close_player(&mut self) {
        if let Some(mut screen) = self.screen.take() {
            screen.disappear();
        }
    }

    /// Apply the timer ticks delivered since the last frame.
    /// A long backlog (e.g. while minimized) only replays its newest rotation ticks.
    fn drain_timer_events(&mut self) {
        let backlog: Vec<TimerEvent> = self.events.try_iter().collect();
        for event in coalesce(backlog, MAX_ROTATION_CATCH_UP) {
            match self.screen.as_mut() {
                Some(screen) => screen.handle_timer(event),
                None => debug!(id = %event.id, "timer event without a player"),
            }
        }
    }
}

impl App for PlayerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_timer_events();

        let mut open = false;
        let back = match self.screen.as_mut() {
            Some(screen) => {
                player_view::show(ctx, screen, &self.config.window_title, self.cover.as_ref())
            }
            None => {
                open = home(ctx);
                false
            }
        };

        if back {
            self.close_player();
        }
        if open {
            self.open_player();
        }
    }
}

impl Drop for PlayerApp {
    fn drop(&mut self) {
        self.close_player();
    }
}

/// Home screen. Returns true when the player should open.
fn home(ctx: &Context) -> bool {
    let mut clicked = false;
    CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            let label = RichText::new("Play music")
                .size(18.0)
                .strong()
                .color(Color32::WHITE);
            let button = Button::new(label)
                .fill(Color32::from_rgb(0, 0, 204))
                .stroke(Stroke::new(1.5, Color32::BLACK))
                .rounding(16.0)
                .min_size(vec2(180.0, 52.0));
            clicked = ui.add_sized([180.0, 52.0], button).clicked();
        });
    });
    clicked
}

/// Open the window and run until it is closed
pub fn run(config: PlayerConfig) -> Result<(), LaunchError> {
    let runtime = build_runtime()?;
    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([390.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Disc Player",
        native_options,
        Box::new(move |cc| Box::new(PlayerApp::new(cc, config, runtime))),
    )?;
    Ok(())
}
