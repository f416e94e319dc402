use std::time::Duration;

use client_core::view::prediction_rows;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::protocol::ACCEPTED_EXTENSIONS;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{err_label, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{apply_ui_event, ViewState},
};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 174, 239);
const HEADER: egui::Color32 = egui::Color32::from_rgb(144, 202, 249);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewState,
    backend_url: String,
}

impl PredictorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        backend_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewState::new(),
            backend_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.view, event);
        }
    }

    fn choose_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("WAV audio", ACCEPTED_EXTENSIONS)
            .pick_file()
        {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SelectFile { path },
                &mut self.view.status,
            );
        }
    }

    fn show_upload_card(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(egui::RichText::new("ML Genre Identifier").strong());
            ui.label(
                egui::RichText::new("Upload an audio file (.wav) and discover the genre")
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(16.0);

            if ui
                .add(egui::Button::new(
                    egui::RichText::new("Choose Audio File").color(ACCENT),
                ))
                .clicked()
            {
                self.choose_file();
            }

            if let Some(name) = &self.view.snapshot.selected_file_name {
                ui.label(
                    egui::RichText::new(format!("Selected: {name}"))
                        .small()
                        .color(egui::Color32::LIGHT_GRAY),
                );
            }
            ui.add_space(8.0);

            if let Some(error) = &self.view.last_error {
                ui.colored_label(
                    ERROR_RED,
                    format!("{} error. {}", err_label(error.category()), error.summary()),
                );
            }

            if self.view.snapshot.in_flight {
                ui.add(egui::Spinner::new());
            } else {
                let upload = ui.add_enabled(
                    self.view.snapshot.can_submit(),
                    egui::Button::new("Upload & Predict"),
                );
                if upload.clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Submit,
                        &mut self.view.status,
                    );
                }
            }
        });
    }

    fn show_predictions(&self, ui: &mut egui::Ui) {
        let rows = prediction_rows(self.view.snapshot.results());
        if rows.is_empty() {
            return;
        }

        ui.add_space(24.0);
        ui.label(
            egui::RichText::new("Top Predictions:")
                .size(18.0)
                .strong()
                .color(HEADER),
        );
        ui.add_space(12.0);

        for row in rows {
            ui.horizontal(|ui| {
                ui.add_sized([90.0, 20.0], egui::Label::new(row.genre));
                ui.add(
                    egui::ProgressBar::new(row.bar_fraction)
                        .desired_height(20.0)
                        .fill(ACCENT)
                        .text(row.percent_label),
                );
            });
            ui.add_space(8.0);
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.view.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.backend_url)
                            .small()
                            .color(egui::Color32::GRAY),
                    );
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_max_width(560.0);
            self.show_upload_card(ui);
            self.show_predictions(ui);
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
