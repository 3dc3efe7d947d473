mod board_view;
pub mod config;
pub mod palette;
pub mod state;

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use egui::{Color32, Visuals, style::Widgets};
use log::error;

use crate::status::{RefreshTrigger, StatusOutput};

pub use config::AppConfig;
use state::{BoardState, BoardView};

pub(crate) const PANEL_FILL: Color32 = Color32::from_rgb(0x15, 0x16, 0x18);

// How often the UI polls the status channel when nothing else repaints it.
const REPAINT_INTERVAL_MS: u64 = 250;

/// `BoardApp` is the application window showing the live status board.
///
/// # Fields
///
/// * `status_receiver` - snapshots and failures from the collector thread.
/// * `trigger_sender` - manual refresh requests back to the collector.
/// * `state` - the board state machine the panels render from.
/// * `app_config` - persisted refresh cadence and window geometry.
pub struct BoardApp {
    status_receiver: Receiver<StatusOutput>,
    trigger_sender: Sender<RefreshTrigger>,
    state: BoardState,
    app_config: AppConfig,
}

impl BoardApp {
    pub fn new(
        status_receiver: Receiver<StatusOutput>,
        trigger_sender: Sender<RefreshTrigger>,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            panel_fill: PANEL_FILL,
            faint_bg_color: PANEL_FILL,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: false,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        Self {
            status_receiver,
            trigger_sender,
            state: BoardState::new(),
            app_config,
        }
    }

    fn request_refresh(&mut self) {
        if self.trigger_sender.send(RefreshTrigger).is_ok() {
            self.state.begin_refresh();
        } else {
            error!("status collector is gone, manual refresh dropped");
            self.state.view =
                BoardView::Failed("The status collector stopped; restart the board.".to_string());
        }
    }
}

impl eframe::App for BoardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply everything queued; the newest message wins the frame, which
        // is exactly the wholesale-replacement the board promises.
        while let Ok(output) = self.status_receiver.try_recv() {
            self.state.apply(output);
        }

        self.board_view(ctx, _frame);

        if let Some(outer_rect) = ctx.input(|is| is.viewport().outer_rect) {
            self.app_config.window_position = outer_rect.min.into();
            self.app_config.window_size = outer_rect.size().into();
        }

        // keep polling the channel even when no input arrives
        ctx.request_repaint_after(Duration::from_millis(REPAINT_INTERVAL_MS));
    }
}
