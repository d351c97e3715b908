#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use machine_price_estimator::{
    config,
    estimator::{self, Estimate},
    format::{format_amount, format_plain, format_price},
    i18n::{self, keys},
    logging,
    report::EstimateReport,
    Attribute, InputRecord, MachineType, Scenario,
};
use rfd::FileDialog;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(
    name = "price_estimator",
    version,
    about = "Workshop machine price estimator (desktop)"
)]
struct GuiArgs {
    /// Configuration file path
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// UI language: auto, en-us, ko-kr
    #[arg(short = 'L', long)]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    logging::init_tracing("warn");
    let args = GuiArgs::parse();

    let mut app_cfg = match config::load_or_default_at(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "config load failed; using defaults");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([660.0, 780.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let config_path = args.config;
    eframe::run_native(
        "Workshop Machine Price Estimator",
        options,
        Box::new(move |cc| {
            if let Some(path) = app_cfg.font_path.as_deref() {
                if let Err(e) = load_custom_font(&cc.egui_ctx, path) {
                    tracing::warn!(error = %e, "custom font not applied");
                }
            }
            Box::new(GuiApp::new(app_cfg, config_path))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui 기본 패밀리 맨 앞에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 설정의 font_path 폰트를 등록한다 (한글 UI용).
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read font file {path}: {e}"))?;
    apply_font_bytes(ctx, bytes, "custom_font");
    Ok(())
}

/// 모든 항목을 기종 범위 최솟값으로 채운다. 시나리오를 바꿔도 값이 남도록 10개 모두 보관한다.
fn machine_minimums(machine: MachineType) -> InputRecord {
    Attribute::ALL
        .into_iter()
        .map(|a| (a, machine.range(a).min))
        .collect()
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    scenario: Scenario,
    machine: MachineType,
    values: InputRecord,
    result: Option<(Estimate, InputRecord)>,
    error: Option<String>,
    export_status: Option<String>,
    show_settings: bool,
    show_about: bool,
    lang_input: String,
    currency_input: String,
    window_alpha: f32,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = %lang_code, "GUI language resolved");
        Self {
            scenario: config.default_scenario,
            machine: config.default_machine,
            values: machine_minimums(config.default_machine),
            lang_input: config.language.clone(),
            currency_input: config.currency_symbol.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            config_path,
            tr,
            result: None,
            error: None,
            export_status: None,
            show_settings: false,
            show_about: false,
            settings_status: None,
        }
    }

    /// 기종을 바꾸면 기존 값을 새 범위로 잘라 넣는다.
    fn set_machine(&mut self, machine: MachineType) {
        if machine == self.machine {
            return;
        }
        self.machine = machine;
        self.values = self
            .values
            .iter()
            .map(|(a, v)| (a, machine.range(a).clamp(v)))
            .collect();
        self.clear_result();
    }

    fn set_scenario(&mut self, scenario: Scenario) {
        if scenario != self.scenario {
            self.scenario = scenario;
            self.clear_result();
        }
    }

    fn clear_result(&mut self) {
        self.result = None;
        self.error = None;
        self.export_status = None;
    }

    fn reset_inputs(&mut self) {
        self.values = machine_minimums(self.machine);
        self.clear_result();
    }

    /// 산정 요청용 레코드. 시나리오에서 빠진 항목은 폼처럼 0으로 보낸다.
    fn request(&self) -> InputRecord {
        Attribute::ALL
            .into_iter()
            .map(|a| {
                let value = if self.scenario.includes(a) {
                    self.values
                        .get(a)
                        .unwrap_or_else(|| self.machine.range(a).min)
                } else {
                    0.0
                };
                (a, value)
            })
            .collect()
    }

    fn calculate(&mut self) {
        let input = self.request();
        match estimator::estimate(self.scenario, self.machine, &input) {
            Ok(estimate) => {
                self.result = Some((estimate, input));
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "estimate failed");
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
        self.export_status = None;
    }

    fn export_report(&mut self) {
        let Some((estimate, input)) = &self.result else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("estimate.toml")
            .save_file()
        else {
            return;
        };
        let report = EstimateReport::new(estimate, input, &self.config.currency_symbol);
        self.export_status = Some(match report.save(&path) {
            Ok(()) => self
                .tr
                .tf(keys::GUI_EXPORTED, &[("path", path.display().to_string())]),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let symbol = self.currency_input.trim();
        if !symbol.is_empty() {
            self.config.currency_symbol = symbol.to_string();
        }
        self.config.window_alpha = self.window_alpha;
        self.config.default_scenario = self.scenario;
        self.config.default_machine = self.machine;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => self.tr.t(keys::GUI_SAVED).to_string(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_selection(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let mut scenario = self.scenario;
        let mut machine = self.machine;
        egui::Grid::new("selection_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::GUI_SCENARIO));
                egui::ComboBox::from_id_source("scenario_choice")
                    .width(300.0)
                    .selected_text(scenario.name())
                    .show_ui(ui, |ui| {
                        for s in Scenario::ALL {
                            ui.selectable_value(&mut scenario, s, s.name());
                        }
                    });
                ui.end_row();
                ui.label(tr.t(keys::GUI_MACHINE));
                egui::ComboBox::from_id_source("machine_choice")
                    .width(300.0)
                    .selected_text(machine.name())
                    .show_ui(ui, |ui| {
                        for m in MachineType::ALL {
                            ui.selectable_value(&mut machine, m, m.name());
                        }
                    });
                ui.end_row();
            });
        self.set_scenario(scenario);
        self.set_machine(machine);
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_INPUTS));
        let mut changed = false;
        egui::Grid::new("inputs_grid")
            .num_columns(2)
            .striped(true)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for attribute in Attribute::ALL {
                    // 시나리오에서 빠진 항목은 폼에서 숨긴다.
                    if !self.scenario.includes(attribute) {
                        continue;
                    }
                    let range = self.machine.range(attribute);
                    let mut value = self.values.get(attribute).unwrap_or(range.min);
                    ui.label(attribute.label(&self.config.currency_symbol))
                        .on_hover_text(format!(
                            "{} – {}",
                            format_plain(range.min),
                            format_plain(range.max)
                        ));
                    let drag = egui::DragValue::new(&mut value)
                        .clamp_range(range.min..=range.max)
                        .speed(((range.max - range.min) / 200.0).max(1.0))
                        .max_decimals(if attribute.is_count() { 0 } else { 2 });
                    if ui.add(drag).changed() {
                        let value = if attribute.is_count() { value.round() } else { value };
                        self.values.set(attribute, value);
                        changed = true;
                    }
                    ui.end_row();
                }
            });
        if changed {
            self.clear_result();
        }
    }

    fn ui_actions(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_CALCULATE)).clicked() {
                self.calculate();
            }
            if ui.button(tr.t(keys::GUI_RESET)).clicked() {
                self.reset_inputs();
            }
            if ui
                .add_enabled(self.result.is_some(), egui::Button::new(tr.t(keys::GUI_EXPORT)))
                .clicked()
            {
                self.export_report();
            }
        });
    }

    fn ui_result(&self, ui: &mut egui::Ui) {
        if let Some(err) = &self.error {
            ui.colored_label(
                egui::Color32::from_rgb(0xc6, 0x28, 0x28),
                format!("{}: {err}", self.tr.t(keys::ERROR_PREFIX)),
            );
        }
        let Some((estimate, _)) = &self.result else {
            return;
        };
        ui.colored_label(
            egui::Color32::from_rgb(0x2e, 0x7d, 0x32),
            egui::RichText::new(self.tr.tf(
                keys::ESTIMATE_RESULT,
                &[("price", format_price(estimate.price, &self.config.currency_symbol))],
            ))
            .strong()
            .size(18.0),
        );
        if estimate.clamped() {
            ui.label(self.tr.tf(
                keys::ESTIMATE_CLAMPED,
                &[("raw", format_amount(estimate.raw_sum))],
            ));
        }
        ui.add_space(6.0);
        egui::CollapsingHeader::new(self.tr.t(keys::ESTIMATE_BREAKDOWN))
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("breakdown_grid")
                    .num_columns(4)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong(self.tr.t(keys::GUI_COL_ATTRIBUTE));
                        ui.strong(self.tr.t(keys::GUI_COL_VALUE));
                        ui.strong(self.tr.t(keys::GUI_COL_COEFFICIENT));
                        ui.strong(self.tr.t(keys::GUI_COL_CONTRIBUTION));
                        ui.end_row();
                        for term in &estimate.terms {
                            ui.label(term.attribute.name());
                            ui.label(format_plain(term.value));
                            ui.label(format_plain(term.coefficient));
                            ui.label(format_amount(term.contribution));
                            ui.end_row();
                        }
                        ui.strong(self.tr.t(keys::ESTIMATE_RAW_SUM));
                        ui.label("");
                        ui.label("");
                        ui.strong(format_amount(estimate.raw_sum));
                        ui.end_row();
                    });
            });
        if let Some(msg) = &self.export_status {
            ui.label(msg);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::GUI_APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = true;
                }
                if ui.button(tr.t(keys::GUI_ABOUT)).clicked() {
                    self.show_about = true;
                }
            });
        });

        if self.show_settings {
            let mut open = self.show_settings;
            egui::Window::new(tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::GUI_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.as_str())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), tr.t(keys::GUI_LANGUAGE_AUTO));
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(tr.t(keys::GUI_CURRENCY));
                        ui.add(egui::TextEdit::singleline(&mut self.currency_input).desired_width(60.0));
                    });
                    ui.separator();
                    ui.label(tr.t(keys::GUI_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    if ui.button(tr.t(keys::GUI_SAVE)).clicked() {
                        self.save_settings();
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            self.show_settings = open;
        }

        if self.show_about {
            let mut open = self.show_about;
            egui::Window::new(tr.t(keys::GUI_ABOUT))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(tr.t(keys::GUI_APP_TITLE));
                    ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(tr.t(keys::GUI_ABOUT_BODY));
                    ui.label(tr.t(keys::DISCLAIMER));
                });
            self.show_about = open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(tr.t(keys::DISCLAIMER)).small());
                    ui.add_space(8.0);
                    self.ui_selection(ui);
                    ui.separator();
                    self.ui_inputs(ui);
                    ui.add_space(8.0);
                    self.ui_actions(ui);
                    ui.separator();
                    self.ui_result(ui);
                });
        });
    }
}
