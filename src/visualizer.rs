//! The action display window.
//!
//! A small egui window showing the live active-action line plus a per-action
//! grid for quick visual confirmation. One poll-session frame runs per
//! repaint; egui's repaint scheduling provides the frame throttle.

use eframe::egui;
use std::time::Duration;
use tracing::info;

use crate::actions::{Action, ActionSet};
use crate::config::WindowConfig;
use crate::input::{GilrsPad, PollablePad};
use crate::session::{echo_transition, PollSession, FRAME_RATE};

const WINDOW_TITLE: &str = "Testeur de Mappage Manette";

/// The eframe application driving the poll session.
pub struct MapperWindow {
    pad: GilrsPad,
    session: PollSession,
    display_line: String,
    actions: ActionSet,
}

impl MapperWindow {
    pub fn new(pad: GilrsPad, session: PollSession) -> Self {
        Self {
            pad,
            session,
            display_line: String::new(),
            actions: ActionSet::new(),
        }
    }

    /// One poll cycle: quit check, pad poll, translate, echo, stash for
    /// rendering.
    fn step(&mut self, ctx: &egui::Context) {
        if !self.session.is_running() {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.session.stop();
            return;
        }

        self.pad.poll();
        let output = self.session.frame(&self.pad);

        if let Some(line) = &output.console_line {
            echo_transition(line);
        }
        self.display_line = output.display_line;
        self.actions = output.actions;

        if output.stop {
            info!("start pressed, closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn render_action_grid(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for action in Action::ALL {
                let active = self.actions.is_active(action);
                let fill = if active {
                    egui::Color32::from_rgb(100, 255, 100)
                } else {
                    egui::Color32::from_gray(60)
                };
                let text_color = if active {
                    egui::Color32::BLACK
                } else {
                    egui::Color32::from_gray(150)
                };

                let button = egui::Button::new(
                    egui::RichText::new(action.label())
                        .color(text_color)
                        .size(11.0)
                        .family(egui::FontFamily::Monospace),
                )
                .fill(fill)
                .min_size(egui::vec2(64.0, 22.0));

                ui.add(button);
            }
        });
    }
}

impl eframe::App for MapperWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                egui::RichText::new(&self.display_line)
                    .family(egui::FontFamily::Monospace)
                    .size(14.0)
                    .color(egui::Color32::WHITE),
            );

            ui.add_space(8.0);
            self.render_action_grid(ui);
        });

        // Repaint at the poll rate rather than as fast as possible.
        ctx.request_repaint_after(Duration::from_secs(1) / FRAME_RATE);
    }
}

/// Open the display window and block until it closes.
pub fn run_window(window: WindowConfig, pad: GilrsPad, session: PollSession) -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([window.width, window.height]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(MapperWindow::new(pad, session)))),
    )
    .map_err(|e| anyhow::anyhow!("display window failed: {e}"))
}
