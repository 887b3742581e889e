use super::VideoUploaderApp;
use crate::upload::{Privacy, VideoType};
use crate::utils::color::{status_color, ACCENT, MUTED};
use eframe::egui::{self, Align, RichText};

impl VideoUploaderApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut pick_requested = false;
        let mut submit_requested = false;
        let mut reset_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 30.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("YouTube Video Uploader");
                        ui.add_space(5.0);
                        let subtitle = "Drop a video, describe it and publish it to your channel";
                        ui.label(
                            RichText::new(subtitle)
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    if self.render_drop_zone(ui).clicked() {
                        pick_requested = true;
                    }
                    self.render_file_info(ui);

                    ui.add_space(15.0);
                    self.render_fields(ui);
                    ui.add_space(20.0);

                    ui.vertical_centered(|ui| {
                        let control = self.form.submit_control();
                        let button =
                            egui::Button::new(control.label).min_size(egui::vec2(200.0, 40.0));
                        if ui.add_enabled(control.enabled, button).clicked() {
                            submit_requested = true;
                        }

                        ui.add_space(5.0);
                        if ui
                            .add_enabled(!self.form.is_busy(), egui::Button::new("🗑 Clear"))
                            .clicked()
                        {
                            reset_requested = true;
                        }
                    });

                    ui.add_space(15.0);
                    self.render_progress(ui);
                    self.render_status(ui);
                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(8.0);
                self.render_footer(ui);
            });
        });

        if pick_requested {
            self.open_picker();
        }
        if submit_requested {
            self.submit();
        }
        if reset_requested {
            self.form.reset();
        }
    }

    fn render_drop_zone(&self, ui: &mut egui::Ui) -> egui::Response {
        let active = self.form.is_drop_active();
        let (stroke, fill) = if active {
            (ACCENT, ACCENT.gamma_multiply(0.15))
        } else {
            (MUTED, ui.visuals().extreme_bg_color)
        };

        let frame = egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(2.0, stroke))
            .rounding(8.0)
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📂").size(32.0));
                    ui.label(if active {
                        "Release to select this video"
                    } else {
                        "Drag a video here or click to browse"
                    });
                    ui.label(
                        RichText::new("MP4, MOV, AVI, MKV, FLV, WMV, WebM (max 5 GB)")
                            .small()
                            .color(MUTED),
                    );
                });
            });

        frame
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }

    fn render_file_info(&self, ui: &mut egui::Ui) {
        if let Some(info) = self.form.file_info() {
            ui.add_space(10.0);
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&info.name_label).strong());
                ui.label(RichText::new(&info.size_label).color(MUTED));
            });
        }
    }

    fn render_fields(&mut self, ui: &mut egui::Ui) {
        let editable = !self.form.is_busy();
        let fields = &mut self.form.fields;

        ui.add_enabled_ui(editable, |ui| {
            ui.group(|ui| {
                ui.label("Title");
                ui.add(
                    egui::TextEdit::singleline(&mut fields.title)
                        .desired_width(f32::INFINITY)
                        .hint_text("Video title"),
                );
                ui.add_space(8.0);

                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut fields.description)
                        .desired_width(f32::INFINITY)
                        .desired_rows(4),
                );
                ui.add_space(8.0);

                ui.label("Tags");
                ui.add(
                    egui::TextEdit::singleline(&mut fields.tags)
                        .desired_width(f32::INFINITY)
                        .hint_text("travel, vlog, summer"),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Privacy:");
                    for option in Privacy::ALL {
                        ui.radio_value(&mut fields.privacy, option, option.label());
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Type:");
                    for option in VideoType::ALL {
                        ui.radio_value(&mut fields.video_type, option, option.label());
                    }
                });
            });
        });
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        let progress = self.form.progress();
        if !progress.visible {
            return;
        }

        let progress_bar = egui::ProgressBar::new(progress.fraction())
            .show_percentage()
            .animate(false)
            .fill(ACCENT);
        ui.add(progress_bar);
        ui.add_space(10.0);
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(message) = self.form.status() {
            ui.vertical_centered(|ui| {
                ui.colored_label(status_color(message.kind), &message.text);
            });
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new(format!("Uploading to {}", self.uploader.upload_url()))
                .small()
                .color(MUTED),
        );
    }
}
