#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use nalgebra::Point3;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tank_vent_toolbox::{
    analysis::{self, AnalysisOptions, VentAnalysis, VentCase},
    config,
    i18n,
    tank::geometry::{TankOrientation, TankSpec},
    tank::report::{format_report, ReportInput},
    tank::streamlines::TraceOptions,
    tank::ventilation,
    viz::{cylinder_wireframe, mesh::DEFAULT_SEGMENTS, OrbitCamera},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "C-NLOPB Tank Ventilation",
        cfg,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg.clone()))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["tank_vent.png", "icon.png", "assets/icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 속도 크기를 파랑(느림)→빨강(빠름) 그라데이션 색으로 바꾼다.
fn speed_to_color(speed: f64, min_speed: f64, max_speed: f64) -> egui::Color32 {
    let span = max_speed - min_speed;
    let t = if span > 0.0 {
        ((speed - min_speed) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let r = (t * 255.0) as u8;
    let b = ((1.0 - t) * 255.0) as u8;
    let g = (((1.0 - t) * t * 4.0) * 255.0) as u8;
    egui::Color32::from_rgb(r, g, b)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_save_status: Option<String>,
    // 탱크 입력
    orientation: TankOrientation,
    diameter: f64,
    height: f64,
    length: f64,
    // 프리셋별 입력 범위
    dim_min: f64,
    max_diameter_vertical: f64,
    max_diameter_horizontal: f64,
    max_height: f64,
    max_length: f64,
    // 입출구 위치
    inlet: [f64; 3],
    outlet: [f64; 3],
    // 뷰포트
    camera: OrbitCamera,
    // 계산 결과 캐시. 입력이 바뀌면 무효화된다.
    result: Option<VentAnalysis>,
    speed_range: (f64, f64),
    dirty: bool,
    geometry_error: Option<String>,
    report_status: Option<String>,
    show_settings_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_input = config.language.clone();
        let mut s = Self {
            config: config.clone(),
            tr,
            lang_input,
            lang_save_status: None,
            orientation: TankOrientation::Vertical,
            diameter: 3.0,
            height: 10.0,
            length: 15.0,
            dim_min: 0.1,
            max_diameter_vertical: 50.0,
            max_diameter_horizontal: 20.0,
            max_height: 100.0,
            max_length: 100.0,
            inlet: [0.0, 0.0, 0.0],
            outlet: [0.0, 0.0, 0.0],
            camera: OrbitCamera::default(),
            result: None,
            speed_range: (0.0, 0.0),
            dirty: true,
            geometry_error: None,
            report_status: None,
            show_settings_modal: false,
        };
        s.apply_unit_preset(s.config.unit_system);
        s
    }

    /// 단위 시스템 프리셋을 기본 치수/범위와 입출구 기본 위치에 적용한다.
    pub(crate) fn apply_unit_preset(&mut self, system: config::UnitSystem) {
        match system {
            config::UnitSystem::Metric => {
                self.diameter = 3.0;
                self.height = 10.0;
                self.length = 15.0;
                self.dim_min = 0.1;
                self.max_diameter_vertical = 50.0;
                self.max_diameter_horizontal = 20.0;
                self.max_height = 100.0;
                self.max_length = 100.0;
            }
            config::UnitSystem::Imperial => {
                self.diameter = 10.0;
                self.height = 33.0;
                self.length = 50.0;
                self.dim_min = 0.5;
                self.max_diameter_vertical = 160.0;
                self.max_diameter_horizontal = 65.0;
                self.max_height = 330.0;
                self.max_length = 330.0;
            }
        }
        self.reset_ports();
        self.dirty = true;
    }

    /// 입출구를 축 기준 기본 위치(바닥 1/3 급기, 천장 1/3 배기)로 되돌린다.
    fn reset_ports(&mut self) {
        if let Ok(spec) = self.current_spec() {
            let half = spec.half_extents();
            let offset_y = match self.config.unit_system {
                config::UnitSystem::Metric => 0.1,
                config::UnitSystem::Imperial => 0.3,
            };
            self.inlet = [0.0, 0.0, -half.z * 2.0 / 3.0];
            self.outlet = [0.0, offset_y.min(half.y), half.z * 2.0 / 3.0];
        }
    }

    fn current_spec(&self) -> Result<TankSpec, tank_vent_toolbox::tank::geometry::GeometryError> {
        match self.orientation {
            TankOrientation::Vertical => TankSpec::vertical(self.diameter, self.height),
            TankOrientation::Horizontal => TankSpec::horizontal(self.length, self.diameter),
        }
    }

    /// 입력으로부터 전체 파이프라인을 다시 평가한다.
    fn recompute(&mut self) {
        self.dirty = false;
        let spec = match self.current_spec() {
            Ok(spec) => spec,
            Err(e) => {
                self.geometry_error = Some(e.to_string());
                self.result = None;
                return;
            }
        };
        self.geometry_error = None;

        let half = spec.half_extents();
        for axis in 0..3 {
            self.inlet[axis] = self.inlet[axis].clamp(-half[axis], half[axis]);
            self.outlet[axis] = self.outlet[axis].clamp(-half[axis], half[axis]);
        }

        let case = VentCase {
            spec,
            inlet: Point3::new(self.inlet[0], self.inlet[1], self.inlet[2]),
            outlet: Point3::new(self.outlet[0], self.outlet[1], self.outlet[2]),
            options: AnalysisOptions {
                trace: TraceOptions {
                    jitter_sigma: self.config.unit_system.seed_jitter_sigma(),
                    ..TraceOptions::default()
                },
                ..AnalysisOptions::default()
            },
        };
        let result = analysis::evaluate(&case);

        let mut min_speed = f64::INFINITY;
        let mut max_speed = 0.0f64;
        for line in &result.streamlines {
            for s in &line.speeds {
                min_speed = min_speed.min(*s);
                max_speed = max_speed.max(*s);
            }
        }
        if !min_speed.is_finite() {
            min_speed = 0.0;
        }
        self.speed_range = (min_speed, max_speed);
        self.result = Some(result);
    }

    fn ui_tank_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let len_label = self.config.unit_system.length_label();

        heading_with_tip(
            ui,
            &txt("gui.tank.heading", "Tank"),
            &txt(
                "gui.tank.tip",
                "Cylindrical tank orientation and dimensions.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("tank_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.tank.orientation", "Orientation"),
                        &txt("gui.tank.orientation_tip", "Vertical or horizontal axis"),
                    );
                    ui.horizontal(|ui| {
                        let before = self.orientation;
                        ui.selectable_value(
                            &mut self.orientation,
                            TankOrientation::Vertical,
                            txt("gui.tank.vertical", "Vertical"),
                        );
                        ui.selectable_value(
                            &mut self.orientation,
                            TankOrientation::Horizontal,
                            txt("gui.tank.horizontal", "Horizontal"),
                        );
                        if before != self.orientation {
                            self.reset_ports();
                            self.dirty = true;
                        }
                    });
                    ui.end_row();

                    match self.orientation {
                        TankOrientation::Vertical => {
                            label_with_tip(
                                ui,
                                &format!("{} [{len_label}]", txt("gui.tank.diameter", "Diameter")),
                                &txt("gui.tank.diameter_tip", "Tank diameter"),
                            );
                            if ui
                                .add(
                                    egui::DragValue::new(&mut self.diameter)
                                        .speed(0.1)
                                        .clamp_range(self.dim_min..=self.max_diameter_vertical),
                                )
                                .changed()
                            {
                                self.dirty = true;
                            }
                            ui.end_row();

                            label_with_tip(
                                ui,
                                &format!("{} [{len_label}]", txt("gui.tank.height", "Height")),
                                &txt("gui.tank.height_tip", "Cylinder height along the axis"),
                            );
                            if ui
                                .add(
                                    egui::DragValue::new(&mut self.height)
                                        .speed(0.1)
                                        .clamp_range(self.dim_min..=self.max_height),
                                )
                                .changed()
                            {
                                self.dirty = true;
                            }
                            ui.end_row();
                        }
                        TankOrientation::Horizontal => {
                            label_with_tip(
                                ui,
                                &format!("{} [{len_label}]", txt("gui.tank.length", "Length")),
                                &txt("gui.tank.length_tip", "Cylinder length along the axis"),
                            );
                            if ui
                                .add(
                                    egui::DragValue::new(&mut self.length)
                                        .speed(0.1)
                                        .clamp_range(self.dim_min..=self.max_length),
                                )
                                .changed()
                            {
                                self.dirty = true;
                            }
                            ui.end_row();

                            label_with_tip(
                                ui,
                                &format!("{} [{len_label}]", txt("gui.tank.diameter", "Diameter")),
                                &txt("gui.tank.diameter_tip", "Tank diameter"),
                            );
                            if ui
                                .add(
                                    egui::DragValue::new(&mut self.diameter)
                                        .speed(0.1)
                                        .clamp_range(self.dim_min..=self.max_diameter_horizontal),
                                )
                                .changed()
                            {
                                self.dirty = true;
                            }
                            ui.end_row();
                        }
                    }
                });
        });

        ui.add_space(8.0);
        if let Some(err) = &self.geometry_error {
            ui.colored_label(egui::Color32::RED, err);
            return;
        }
        if let Some(result) = &self.result {
            let vol_label = self.config.unit_system.volume_label();
            let flow_label = self.config.unit_system.flow_label();
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(txt("gui.metric.volume", "Volume"));
                    ui.heading(format!("{:.1} {vol_label}", result.volume));
                    ui.add_space(4.0);
                    ui.label(txt("gui.metric.flow", "Required flow (12 ACH)"));
                    ui.heading(format!("{:.1} {flow_label}", result.required_flow));
                });
            });
        }
    }

    fn ui_port_sliders(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let half = match self.current_spec() {
            Ok(spec) => spec.half_extents(),
            Err(_) => return,
        };

        egui::Grid::new("port_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                let axis_names = ["X", "Y", "Z"];
                for axis in 0..3 {
                    let range = -half[axis]..=half[axis];
                    ui.label(format!(
                        "{} {}",
                        txt("gui.port.inlet", "Inlet"),
                        axis_names[axis]
                    ));
                    if ui
                        .add(egui::Slider::new(&mut self.inlet[axis], range.clone()))
                        .changed()
                    {
                        self.dirty = true;
                    }
                    ui.end_row();
                }
                for axis in 0..3 {
                    let range = -half[axis]..=half[axis];
                    ui.label(format!(
                        "{} {}",
                        txt("gui.port.outlet", "Outlet"),
                        axis_names[axis]
                    ));
                    if ui
                        .add(egui::Slider::new(&mut self.outlet[axis], range.clone()))
                        .changed()
                    {
                        self.dirty = true;
                    }
                    ui.end_row();
                }
            });
    }

    /// 3D 뷰포트: 드래그로 회전, 스크롤로 줌.
    fn ui_viewport(&mut self, ui: &mut egui::Ui) {
        let spec = match self.current_spec() {
            Ok(spec) => spec,
            Err(_) => return,
        };
        let available = ui.available_size();
        let size = egui::vec2(available.x, (available.y - 80.0).max(240.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

        if response.dragged() {
            let delta = response.drag_delta();
            self.camera
                .rotate_by(delta.x as f64 * 0.01, delta.y as f64 * 0.01);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom_by(scroll as f64 / 50.0);
            }
        }

        let rect = response.rect;
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(18));

        let half = spec.half_extents();
        let world_radius = half.norm().max(1e-9);
        let scale = 0.45 * rect.width().min(rect.height()) as f64 / world_radius;
        let to_screen = |p: &Point3<f64>| -> egui::Pos2 {
            let (xy, _depth) = self.camera.project(p);
            egui::pos2(
                rect.center().x + (xy[0] * scale) as f32,
                rect.center().y - (xy[1] * scale) as f32,
            )
        };

        // 반투명 원통 와이어프레임
        let wire = cylinder_wireframe(
            spec.diameter() / 2.0,
            spec.axis_length(),
            spec.orientation(),
            DEFAULT_SEGMENTS,
        );
        let shell = egui::Color32::from_rgba_unmultiplied(140, 190, 235, 70);
        for polyline in &wire.polylines {
            for pair in polyline.windows(2) {
                painter.line_segment(
                    [to_screen(&pair[0]), to_screen(&pair[1])],
                    egui::Stroke::new(1.0, shell),
                );
            }
        }

        // 속도 색 매핑된 유선
        if let Some(result) = &self.result {
            let (min_speed, max_speed) = self.speed_range;
            for line in &result.streamlines {
                for i in 1..line.points.len() {
                    let color = speed_to_color(line.speeds[i - 1], min_speed, max_speed);
                    painter.line_segment(
                        [to_screen(&line.points[i - 1]), to_screen(&line.points[i])],
                        egui::Stroke::new(1.5, color),
                    );
                }
            }
        }

        // 입구(빨강)/출구(파랑) 마커
        let inlet = Point3::new(self.inlet[0], self.inlet[1], self.inlet[2]);
        let outlet = Point3::new(self.outlet[0], self.outlet[1], self.outlet[2]);
        painter.circle_filled(to_screen(&inlet), 6.0, egui::Color32::RED);
        painter.circle_filled(to_screen(&outlet), 6.0, egui::Color32::from_rgb(70, 120, 255));
    }

    fn ui_coverage_and_report(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let Some(coverage) = self.result.as_ref().map(|r| r.coverage) else {
            return;
        };

        let mut save_clicked = false;
        ui.horizontal(|ui| {
            ui.label(txt("gui.metric.coverage", "Coverage"));
            ui.heading(format!("{:.1} %", coverage * 100.0));
            if ventilation::is_compliant(coverage) {
                ui.colored_label(
                    egui::Color32::from_rgb(60, 170, 90),
                    txt("gui.metric.compliant", "COMPLIANT"),
                );
            } else {
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 60),
                    txt("gui.metric.non_compliant", "NON-COMPLIANT"),
                );
            }

            ui.separator();
            if ui
                .button(txt("gui.report.save", "Save report…"))
                .on_hover_text(txt(
                    "gui.report.save_tip",
                    "Export a plain-text ventilation report.",
                ))
                .clicked()
            {
                save_clicked = true;
            }
        });
        if save_clicked {
            self.save_report();
        }
        if let Some(status) = &self.report_status {
            ui.small(status);
        }
    }

    fn save_report(&mut self) {
        let (Ok(spec), Some(result)) = (self.current_spec(), self.result.as_ref()) else {
            return;
        };
        let report = format_report(&ReportInput {
            spec: &spec,
            volume: result.volume,
            required_flow: result.required_flow,
            inlet: Point3::new(self.inlet[0], self.inlet[1], self.inlet[2]),
            outlet: Point3::new(self.outlet[0], self.outlet[1], self.outlet[2]),
            coverage: result.coverage,
            unit_system: self.config.unit_system,
        });
        let picked = FileDialog::new()
            .set_file_name("tank_vent_report.txt")
            .add_filter("Text", &["txt"])
            .save_file();
        if let Some(path) = picked {
            self.report_status = match fs::write(&path, report) {
                Ok(()) => Some(format!("Saved: {}", path.display())),
                Err(e) => Some(format!("Save failed: {e}")),
            };
        }
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(txt("gui.settings.unit_system", "Unit system"));
                ui.horizontal(|ui| {
                    let before = self.config.unit_system;
                    ui.selectable_value(
                        &mut self.config.unit_system,
                        config::UnitSystem::Metric,
                        txt("gui.settings.metric", "Metric (m)"),
                    );
                    ui.selectable_value(
                        &mut self.config.unit_system,
                        config::UnitSystem::Imperial,
                        txt("gui.settings.imperial", "Imperial (ft)"),
                    );
                    if before != self.config.unit_system {
                        self.apply_unit_preset(self.config.unit_system);
                    }
                });
                ui.add_space(6.0);

                ui.label(txt("gui.settings.language", "Language (auto/en-us/ko-kr)"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.lang_input);
                    if ui.button(txt("gui.settings.apply", "Apply")).clicked() {
                        self.config.language = self.lang_input.trim().to_string();
                        let code =
                            i18n::resolve_language("auto", Some(self.config.language.as_str()));
                        self.tr = i18n::Translator::new_with_pack(
                            &code,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.lang_save_status = Some(format!("Language: {code}"));
                    }
                });
                if let Some(status) = &self.lang_save_status {
                    ui.small(status);
                }
                ui.add_space(6.0);

                if ui.button(txt("gui.settings.save", "Save config")).clicked() {
                    if let Err(e) = self.config.save() {
                        eprintln!("Config save error: {e}");
                    }
                }
            });
        self.show_settings_modal = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.dirty {
            self.recompute();
        }
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::SidePanel::left("inputs").min_width(260.0).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(txt("gui.nav.app_title", "C-NLOPB Tank Ventilation"));
            });
            ui.add_space(8.0);
            self.ui_tank_inputs(ui);
            ui.add_space(12.0);
            ui.separator();
            if ui.button(txt("gui.nav.settings", "Settings…")).clicked() {
                self.show_settings_modal = true;
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            heading_with_tip(
                ui,
                &txt("gui.viewport.heading", "Flow Visualization"),
                &txt(
                    "gui.viewport.tip",
                    "Streamlines from inlet to outlet; drag to rotate, scroll to zoom.",
                ),
            );
            ui.add_space(4.0);
            self.ui_port_sliders(ui);
            ui.add_space(4.0);
            self.ui_viewport(ui);
            ui.add_space(4.0);
            self.ui_coverage_and_report(ui);
        });

        if self.show_settings_modal {
            self.ui_settings_modal(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_metric_applies_metric_defaults() {
        let mut app = GuiApp::new(config::Config::default());
        app.apply_unit_preset(config::UnitSystem::Metric);
        assert_eq!(app.diameter, 3.0);
        assert_eq!(app.height, 10.0);
        assert_eq!(app.length, 15.0);
        assert_eq!(app.max_height, 100.0);
        // 급기구는 바닥 1/3 지점
        assert!((app.inlet[2] - (-10.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn preset_imperial_applies_imperial_defaults() {
        let mut app = GuiApp::new(config::Config::default());
        app.apply_unit_preset(config::UnitSystem::Imperial);
        assert_eq!(app.diameter, 10.0);
        assert_eq!(app.height, 33.0);
        assert_eq!(app.max_height, 330.0);
        assert_eq!(app.dim_min, 0.5);
    }

    #[test]
    fn current_spec_mirrors_dimensions() {
        let mut app = GuiApp::new(config::Config::default());
        app.orientation = TankOrientation::Horizontal;
        let spec = app.current_spec().unwrap();
        assert_eq!(spec.height(), spec.diameter());
    }

    #[test]
    fn speed_color_endpoints() {
        let slow = speed_to_color(0.0, 0.0, 1.0);
        let fast = speed_to_color(1.0, 0.0, 1.0);
        assert_eq!(slow, egui::Color32::from_rgb(0, 0, 255));
        assert_eq!(fast, egui::Color32::from_rgb(255, 0, 0));
    }
}
