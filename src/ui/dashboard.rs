//! The lap comparison dashboard. Every frame re-derives the whole view from
//! the current selections: selections feed the (cached) provider, the picked
//! laps feed the chart and the summary row. No incremental state beyond the
//! last loaded session.

use std::sync::Arc;

use egui::{Color32, RichText, Ui, Visuals, style::Widgets};
use egui_plot::{Legend, Line, PlotPoints};
use log::error;

use crate::laps::Lap;
use crate::laptime::{FasterDriver, LapDelta, format_laptime};
use crate::season::archive::SeasonArchive;
use crate::season::cache::SessionCache;
use crate::season::{SeasonDataProvider, SessionData, SessionKey, SessionKind, colors};
use crate::ui::config::AppConfig;
use crate::ui::{BANNER_SUCCESS, BANNER_WARNING, PALETTE_BLACK, PALETTE_BROWN, PALETTE_MAROON};

const MIN_YEAR: u16 = 2015;
const MAX_YEAR: u16 = 2025;

const DEFAULT_WINDOW_TRANSPARENCY: u8 = 191;

pub struct LapCompareApp {
    provider: SessionCache<SeasonArchive>,
    app_config: AppConfig,

    year: u16,
    event_name: String,
    session_kind: SessionKind,
    driver1: String,
    driver2: String,
    compare_fastest: bool,
    lap1_pick: Option<u32>,
    lap2_pick: Option<u32>,

    loaded: Option<(SessionKey, Arc<SessionData>)>,
    load_error: Option<String>,
}

impl LapCompareApp {
    pub fn new(
        provider: SessionCache<SeasonArchive>,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_MAROON,
            faint_bg_color: PALETTE_BLACK,
            extreme_bg_color: PALETTE_BROWN,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            window_fill: Color32::from_rgba_premultiplied(
                PALETTE_BLACK.r(),
                PALETTE_BLACK.g(),
                PALETTE_BLACK.b(),
                DEFAULT_WINDOW_TRANSPARENCY,
            ),
            widgets: Widgets::dark(),
            striped: false,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let year = app_config.default_year.clamp(MIN_YEAR, MAX_YEAR);

        Self {
            provider,
            app_config,
            year,
            event_name: String::new(),
            session_kind: SessionKind::Race,
            driver1: String::new(),
            driver2: String::new(),
            compare_fastest: true,
            lap1_pick: None,
            lap2_pick: None,
            loaded: None,
            load_error: None,
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("SessionSelection")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Session Selection");
                ui.separator();

                ui.label("Year");
                ui.add(egui::DragValue::new(&mut self.year).range(MIN_YEAR..=MAX_YEAR));
                ui.add_space(5.0);

                match self.provider.event_schedule(self.year) {
                    Ok(schedule) => {
                        let names: Vec<String> =
                            schedule.into_iter().map(|e| e.name).collect();
                        if !names.contains(&self.event_name) {
                            self.event_name = names.first().cloned().unwrap_or_default();
                        }
                        ui.label("Race");
                        egui::ComboBox::from_id_salt("race_select")
                            .width(180.0)
                            .selected_text(self.event_name.clone())
                            .show_ui(ui, |ui| {
                                for name in &names {
                                    ui.selectable_value(
                                        &mut self.event_name,
                                        name.clone(),
                                        name,
                                    );
                                }
                            });
                    }
                    Err(e) => {
                        self.event_name.clear();
                        ui.colored_label(BANNER_WARNING, format!("⚠ {}", e));
                    }
                }
                ui.add_space(5.0);

                ui.label("Session");
                egui::ComboBox::from_id_salt("session_select")
                    .width(180.0)
                    .selected_text(self.session_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in SessionKind::ALL {
                            ui.selectable_value(&mut self.session_kind, kind, kind.label());
                        }
                    });

                ui.separator();
                if ui.button("📂 Load archive…").clicked()
                    && let Some(path) = rfd::FileDialog::new().pick_file()
                {
                    match SeasonArchive::load(&path) {
                        Ok(archive) => {
                            self.provider =
                                SessionCache::new(archive, self.app_config.cache_sessions);
                            self.loaded = None;
                            self.load_error = None;
                        }
                        Err(e) => {
                            error!("Could not load archive {:?}: {}", path, e);
                            self.load_error = Some(e.to_string());
                        }
                    }
                }
            });
    }

    /// Loads the selected session through the cache when the selection
    /// changed since the last frame.
    fn refresh_session(&mut self) {
        if self.event_name.is_empty() {
            self.loaded = None;
            return;
        }
        let key = SessionKey {
            year: self.year,
            event_name: self.event_name.clone(),
            kind: self.session_kind,
        };
        if self.loaded.as_ref().map(|(k, _)| k) == Some(&key) {
            return;
        }
        match self
            .provider
            .load_session(self.year, &self.event_name, self.session_kind)
        {
            Ok(session) => {
                self.loaded = Some((key, Arc::new(session)));
                self.load_error = None;
                self.lap1_pick = None;
                self.lap2_pick = None;
            }
            Err(e) => {
                self.loaded = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn show_driver_selectors(&mut self, ui: &mut Ui, session: &SessionData) {
        let driver_codes = session.driver_codes();
        if !driver_codes.contains(&self.driver1) {
            self.driver1.clear();
        }
        if !driver_codes.contains(&self.driver2) {
            self.driver2.clear();
        }

        ui.columns(2, |cols| {
            cols[0].label("Driver 1");
            egui::ComboBox::from_id_salt("driver1_select")
                .selected_text(self.driver1.clone())
                .show_ui(&mut cols[0], |ui| {
                    for code in &driver_codes {
                        ui.selectable_value(&mut self.driver1, code.clone(), code);
                    }
                });
            cols[1].label("Driver 2");
            egui::ComboBox::from_id_salt("driver2_select")
                .selected_text(self.driver2.clone())
                .show_ui(&mut cols[1], |ui| {
                    for code in &driver_codes {
                        ui.selectable_value(&mut self.driver2, code.clone(), code);
                    }
                });
        });
    }

    fn show_lap_selectors(&mut self, ui: &mut Ui, session: &SessionData) {
        let numbers_d1 = session.laps.pick_driver(&self.driver1).lap_numbers();
        let numbers_d2 = session.laps.pick_driver(&self.driver2).lap_numbers();

        // a pick left over from another driver or session is dropped
        if let Some(n) = self.lap1_pick
            && !numbers_d1.contains(&n)
        {
            self.lap1_pick = None;
        }
        if let Some(n) = self.lap2_pick
            && !numbers_d2.contains(&n)
        {
            self.lap2_pick = None;
        }

        ui.columns(2, |cols| {
            lap_number_selector(
                &mut cols[0],
                "lap1_select",
                &format!("{} Lap", self.driver1),
                &numbers_d1,
                &mut self.lap1_pick,
            );
            lap_number_selector(
                &mut cols[1],
                "lap2_select",
                &format!("{} Lap", self.driver2),
                &numbers_d2,
                &mut self.lap2_pick,
            );
        });
    }

    fn show_chart(&self, ui: &mut Ui, session: &SessionData, lap1: Option<&Lap>, lap2: Option<&Lap>) {
        ui.label(
            RichText::new(format!(
                "{} vs {} — {} {} ({})",
                self.driver1,
                self.driver2,
                session.info.event_name,
                session.info.year,
                session.info.kind.code()
            ))
            .color(Color32::WHITE)
            .strong(),
        );

        let color_d1 = colors::driver_color(&self.driver1, session);
        let color_d2 = colors::driver_color(&self.driver2, session);
        let trace_d1 = lap1.map(Lap::speed_trace);
        let trace_d2 = lap2.map(Lap::speed_trace);
        let (name_d1, name_d2) = (self.driver1.clone(), self.driver2.clone());

        egui_plot::Plot::new("speed_distance")
            .legend(Legend::default())
            .x_axis_label("Distance (m)")
            .y_axis_label("Speed (km/h)")
            .include_y(0.)
            .height(ui.available_height() * 0.6)
            .show(ui, |plot_ui| {
                if let Some(trace) = trace_d1 {
                    plot_ui.line(
                        Line::new(name_d1, PlotPoints::new(trace))
                            .color(color_d1)
                            .width(3.),
                    );
                }
                if let Some(trace) = trace_d2 {
                    plot_ui.line(
                        Line::new(name_d2, PlotPoints::new(trace))
                            .color(color_d2)
                            .width(3.),
                    );
                }
            });
    }

    fn show_summary(&self, ui: &mut Ui, lap1: Option<&Lap>, lap2: Option<&Lap>) {
        let time_d1 = lap1.and_then(|l| l.time);
        let time_d2 = lap2.and_then(|l| l.time);

        // either time missing: skip the whole block silently
        let Some(delta) = LapDelta::between(time_d1, time_d2) else {
            return;
        };
        let faster_driver = match delta.faster {
            FasterDriver::First => &self.driver1,
            FasterDriver::Second => &self.driver2,
        };

        ui.separator();
        ui.label(
            RichText::new("Lap Time Summary")
                .color(Color32::WHITE)
                .strong(),
        );
        ui.columns(3, |cols| {
            metric(&mut cols[0], &self.driver1, &format_laptime(time_d1));
            metric(&mut cols[1], &self.driver2, &format_laptime(time_d2));
            metric(
                &mut cols[2],
                &format!("Faster Driver: {}", faster_driver),
                &delta.gap_label(),
            );
        });

        ui.add_space(5.0);
        ui.colored_label(
            BANNER_SUCCESS,
            format!(
                "✓ {} was quicker by {:.3} seconds in this lap.",
                faster_driver, delta.gap_s
            ),
        );
    }
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).color(Color32::GRAY).small());
    ui.label(RichText::new(value).color(Color32::WHITE).heading());
}

fn lap_number_selector(
    ui: &mut Ui,
    id_salt: &str,
    label: &str,
    numbers: &[u32],
    pick: &mut Option<u32>,
) {
    ui.label(label);
    let selected = pick.map(|n| n.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(id_salt.to_string())
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for number in numbers {
                ui.selectable_value(pick, Some(*number), number.to_string());
            }
        });
}

impl eframe::App for LapCompareApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.app_config.window_position = rect.min.into();
        }

        self.show_sidebar(ctx);
        self.refresh_session();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("🏎 Lap Telemetry").color(Color32::WHITE));
            ui.add_space(5.0);

            let session = match (&self.loaded, &self.load_error) {
                (Some((_, session)), _) => Arc::clone(session),
                (None, Some(message)) => {
                    ui.heading(RichText::new(message.clone()).color(Color32::RED).strong());
                    return;
                }
                (None, None) => {
                    ui.colored_label(BANNER_WARNING, "⚠ No session selected.");
                    return;
                }
            };

            self.show_driver_selectors(ui, &session);
            if self.driver1.is_empty() || self.driver2.is_empty() {
                ui.add_space(5.0);
                ui.colored_label(
                    BANNER_WARNING,
                    "⚠ Please select both drivers to compare their laps.",
                );
                return;
            }

            ui.checkbox(&mut self.compare_fastest, "Compare fastest lap");

            let laps_d1 = session.laps.pick_driver(&self.driver1);
            let laps_d2 = session.laps.pick_driver(&self.driver2);
            let (lap1, lap2) = if self.compare_fastest {
                (
                    laps_d1.pick_fastest().cloned(),
                    laps_d2.pick_fastest().cloned(),
                )
            } else {
                self.show_lap_selectors(ui, &session);
                // an absent pick means no trace and no summary for that side
                (
                    self.lap1_pick.and_then(|n| laps_d1.pick_number(n)).cloned(),
                    self.lap2_pick.and_then(|n| laps_d2.pick_number(n)).cloned(),
                )
            };

            self.show_chart(ui, &session, lap1.as_ref(), lap2.as_ref());
            self.show_summary(ui, lap1.as_ref(), lap2.as_ref());
        });
    }
}
