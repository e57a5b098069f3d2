use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui::{
    self, Key, KeyboardShortcut, Modifiers, Sense, TextureHandle, TextureOptions, ViewportCommand,
};
use log::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::dicom::DecodedDicom;
use crate::error::LoadError;
use crate::generation::{GenerationCounter, Ticket};
use crate::launch::LaunchRequest;
use crate::renderer::render_color_image;
use crate::series::{scan_series_folder, SeriesEntry};
use crate::viewport::{
    Outcome, RenderFrame, RenderSink, ScrollDirection, ViewTransform, ViewerEvent,
    ViewportController, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::worker::{JobResult, Worker};
use crate::worklist::WorklistEntry;

pub const APP_TITLE: &str = "Greyscope";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const CENTER_RANGE: RangeInclusive<i32> = -1000..=3000;
const WIDTH_RANGE: RangeInclusive<i32> = 1..=4000;
const POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiAction {
    OpenFile,
    OpenFolder,
    Exit,
    ZoomIn,
    ZoomOut,
    ResetView,
    RefreshWorklist,
    ConfigureConnection,
    Reconstruction(&'static str),
    ServerSideOnly(&'static str),
}

/// Uploads windowed pixels into an egui texture and remembers the transform
/// to paint it with.
struct TextureSink {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    transform: ViewTransform,
}

impl RenderSink for TextureSink {
    fn present(&mut self, frame: RenderFrame<'_>) {
        if frame.pixels_changed || self.texture.is_none() {
            let color_image = render_color_image(frame.image);
            if let Some(texture) = self.texture.as_mut() {
                texture.set(color_image, TextureOptions::LINEAR);
            } else {
                self.texture = Some(self.ctx.load_texture(
                    "dicom-image",
                    color_image,
                    TextureOptions::LINEAR,
                ));
            }
        }
        self.transform = frame.transform;
        self.ctx.request_repaint();
    }
}

/// Turns continuous wheel deltas into discrete zoom steps.
#[derive(Debug, Default)]
struct ScrollSteps {
    accum: f32,
}

impl ScrollSteps {
    const DEAD_ZONE: f32 = 0.5;
    const POINTS_PER_STEP: f32 = 40.0;

    fn feed(&mut self, scroll: f32) -> Option<(ScrollDirection, u32)> {
        if scroll.abs() <= Self::DEAD_ZONE {
            return None;
        }

        // Drop leftovers from the opposite direction.
        if self.accum != 0.0 && scroll.signum() != self.accum.signum() {
            self.accum = 0.0;
        }
        self.accum += scroll;

        let steps = (self.accum / Self::POINTS_PER_STEP).trunc();
        if steps == 0.0 {
            return None;
        }
        self.accum -= steps * Self::POINTS_PER_STEP;

        let direction = if steps > 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        Some((direction, steps.abs() as u32))
    }
}

struct ConnectionDraft {
    base_url: String,
    auth_token: String,
}

pub struct DicomViewerApp {
    viewer: ViewportController<TextureSink>,
    worker: Worker,
    config: ViewerConfig,
    settings_path: Option<PathBuf>,
    pending_launch_request: Option<LaunchRequest>,
    series: Vec<SeriesEntry>,
    selected_row: Option<usize>,
    info: Vec<(String, String)>,
    current_path: Option<PathBuf>,
    loading_path: Option<PathBuf>,
    worklist_requests: GenerationCounter,
    worklist_in_flight: bool,
    last_worklist_refresh: Option<Instant>,
    window_center: i32,
    window_width: i32,
    scroll_steps: ScrollSteps,
    hover_readout: Option<String>,
    connection_draft: Option<ConnectionDraft>,
    status_line: String,
}

impl DicomViewerApp {
    pub fn new(
        ctx: egui::Context,
        config: ViewerConfig,
        settings_path: Option<PathBuf>,
        initial_request: Option<LaunchRequest>,
    ) -> Self {
        let sink = TextureSink {
            ctx,
            texture: None,
            transform: ViewTransform::default(),
        };
        let viewer = ViewportController::new(sink);
        let window = viewer.window_level();

        let mut app = Self {
            viewer,
            worker: Worker::new(),
            config,
            settings_path,
            pending_launch_request: initial_request,
            series: Vec::new(),
            selected_row: None,
            info: Vec::new(),
            current_path: None,
            loading_path: None,
            worklist_requests: GenerationCounter::new(),
            worklist_in_flight: false,
            last_worklist_refresh: None,
            window_center: window.center(),
            window_width: window.width(),
            scroll_steps: ScrollSteps::default(),
            hover_readout: None,
            connection_draft: None,
            status_line: "Ready".to_string(),
        };
        app.refresh_worklist();
        app
    }

    fn is_busy(&self) -> bool {
        self.loading_path.is_some() || self.worklist_in_flight
    }

    fn request_load(&mut self, path: PathBuf) -> Option<Ticket> {
        match self.viewer.handle(ViewerEvent::LoadRequested(path)) {
            Outcome::DecodeRequested { ticket, path } => {
                info!("Opening {}", path.display());
                self.status_line = "Loading DICOM file...".to_string();
                self.loading_path = Some(path.clone());
                self.worker.spawn_decode(ticket, path);
                Some(ticket)
            }
            _ => None,
        }
    }

    fn open_series_folder(&mut self, dir: PathBuf) {
        match scan_series_folder(&dir) {
            Ok(entries) => {
                self.status_line = format!("Found {} DICOM files", entries.len());
                self.series = entries;
                self.selected_row = None;
                if !self.series.is_empty() {
                    self.select_row(0);
                }
            }
            Err(err) => {
                self.status_line = format!("{err:#}");
            }
        }
    }

    fn select_row(&mut self, row: usize) {
        let Some(entry) = self.series.get(row) else {
            return;
        };
        let path = entry.path.clone();
        self.selected_row = Some(row);
        self.request_load(path);
    }

    fn refresh_worklist(&mut self) {
        if !self.config.backend.is_configured() {
            return;
        }
        let ticket = self.worklist_requests.issue();
        debug!(
            "Refreshing worklist from {} (generation {})",
            self.config.backend.base_url,
            ticket.generation()
        );
        self.worker
            .spawn_worklist_fetch(ticket, self.config.backend.clone());
        self.worklist_in_flight = true;
        self.last_worklist_refresh = Some(Instant::now());
    }

    fn schedule_worklist_refresh(&mut self, ctx: &egui::Context) {
        let Some(interval) = self.config.worklist.refresh_interval() else {
            return;
        };
        if !self.config.backend.is_configured() {
            return;
        }

        let elapsed = self
            .last_worklist_refresh
            .map(|last| last.elapsed())
            .unwrap_or(interval);
        if elapsed >= interval {
            if !self.worklist_in_flight {
                self.refresh_worklist();
            }
            ctx.request_repaint_after(interval);
        } else {
            ctx.request_repaint_after(interval - elapsed);
        }
    }

    fn poll_jobs(&mut self) {
        while let Some(job) = self.worker.try_next() {
            self.handle_job(job);
        }
    }

    fn handle_job(&mut self, job: JobResult) {
        match job {
            JobResult::Decoded {
                ticket,
                path,
                result,
            } => self.handle_decoded(ticket, path, result),
            JobResult::Worklist { ticket, result } => {
                if !self.worklist_requests.is_current(ticket) {
                    debug!(
                        "Discarding stale worklist response (generation {})",
                        ticket.generation()
                    );
                    return;
                }
                self.worklist_in_flight = false;
                match result {
                    Ok(entries) => {
                        info!("Worklist updated: {} items", entries.len());
                        self.status_line = format!("Worklist updated: {} items", entries.len());
                        self.series = series_from_worklist(entries);
                        self.selected_row = None;
                    }
                    Err(err) => {
                        self.status_line = format!("Error fetching worklist: {err}");
                    }
                }
            }
        }
    }

    fn handle_decoded(
        &mut self,
        ticket: Ticket,
        path: PathBuf,
        result: Result<DecodedDicom, LoadError>,
    ) {
        let (image, info) = match result {
            Ok(decoded) => (Ok(decoded.image), decoded.info),
            Err(err) => (Err(err), Vec::new()),
        };

        match self
            .viewer
            .handle(ViewerEvent::ImageDecoded { ticket, result: image })
        {
            Outcome::Loaded { width, height } => {
                self.sync_window_controls();
                self.info = info;
                self.current_path = Some(path);
                self.loading_path = None;
                self.status_line = format!("DICOM file loaded ({width}x{height})");
            }
            Outcome::Failed(err) => {
                self.loading_path = None;
                self.status_line = err.to_string();
            }
            _ => {}
        }
    }

    fn sync_window_controls(&mut self) {
        let window = self.viewer.window_level();
        self.window_center = window.center();
        self.window_width = window.width();
    }

    /// The controls always show the parameters actually in effect.
    fn apply_window_controls(&mut self, center: i32, width: i32) {
        self.viewer
            .handle(ViewerEvent::ParameterChanged { center, width });
        self.sync_window_controls();
    }

    fn collect_shortcuts(ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        // Ctrl+Shift+O must be consumed before Ctrl+O.
        let shortcuts = [
            (Modifiers::COMMAND | Modifiers::SHIFT, Key::O, UiAction::OpenFolder),
            (Modifiers::COMMAND, Key::O, UiAction::OpenFile),
            (Modifiers::COMMAND, Key::Plus, UiAction::ZoomIn),
            (Modifiers::COMMAND, Key::Equals, UiAction::ZoomIn),
            (Modifiers::COMMAND, Key::Minus, UiAction::ZoomOut),
            (Modifiers::COMMAND, Key::Num0, UiAction::ResetView),
            (Modifiers::COMMAND, Key::Q, UiAction::Exit),
        ];
        ctx.input_mut(|input| {
            for (modifiers, key, action) in shortcuts {
                if input.consume_shortcut(&KeyboardShortcut::new(modifiers, key)) {
                    actions.push(action);
                }
            }
        });
    }

    fn apply_action(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::OpenFile => {
                let picked = rfd::FileDialog::new()
                    .add_filter("DICOM Files", &["dcm", "dicom", "DCM", "DICOM"])
                    .add_filter("All Files", &["*"])
                    .pick_file();
                if let Some(path) = picked {
                    self.request_load(path);
                }
            }
            UiAction::OpenFolder => {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    self.open_series_folder(dir);
                }
            }
            UiAction::Exit => ctx.send_viewport_cmd(ViewportCommand::Close),
            UiAction::ZoomIn => {
                self.viewer.handle(ViewerEvent::Zoom {
                    factor: ZOOM_IN_FACTOR,
                    focus: None,
                });
            }
            UiAction::ZoomOut => {
                self.viewer.handle(ViewerEvent::Zoom {
                    factor: ZOOM_OUT_FACTOR,
                    focus: None,
                });
            }
            UiAction::ResetView => {
                self.viewer.handle(ViewerEvent::ResetRequested);
            }
            UiAction::RefreshWorklist => {
                if self.config.backend.is_configured() {
                    self.refresh_worklist();
                } else {
                    self.status_line = "No backend URL configured".to_string();
                }
            }
            UiAction::ConfigureConnection => {
                self.connection_draft = Some(ConnectionDraft {
                    base_url: self.config.backend.base_url.clone(),
                    auth_token: self.config.backend.auth_token.clone().unwrap_or_default(),
                });
            }
            UiAction::Reconstruction(kind) => {
                info!("Reconstruction requested: {kind}");
                self.status_line = format!("Requested {kind} reconstruction (server-side).");
            }
            UiAction::ServerSideOnly(feature) => {
                self.status_line = format!(
                    "{feature}: this feature will be performed server-side and displayed here."
                );
            }
        }
    }

    fn apply_connection(&mut self, draft: ConnectionDraft) {
        self.config.backend.base_url = draft.base_url.trim().to_string();
        let token = draft.auth_token.trim();
        self.config.backend.auth_token = (!token.is_empty()).then(|| token.to_string());

        match self.settings_path.as_deref() {
            Some(path) => match self.config.save(path) {
                Ok(()) => self.status_line = "Backend connection configured".to_string(),
                Err(err) => {
                    warn!("{err:#}");
                    self.status_line = format!("Could not save settings: {err:#}");
                }
            },
            None => self.status_line = "Backend connection configured".to_string(),
        }
        self.refresh_worklist();
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("menu-bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    menu_item(ui, "Open DICOM File...", Some("Ctrl+O"), UiAction::OpenFile, actions);
                    menu_item(
                        ui,
                        "Open DICOM Folder...",
                        Some("Ctrl+Shift+O"),
                        UiAction::OpenFolder,
                        actions,
                    );
                    ui.separator();
                    menu_item(ui, "Exit", Some("Ctrl+Q"), UiAction::Exit, actions);
                });
                ui.menu_button("View", |ui| {
                    menu_item(ui, "Zoom In", Some("Ctrl++"), UiAction::ZoomIn, actions);
                    menu_item(ui, "Zoom Out", Some("Ctrl+-"), UiAction::ZoomOut, actions);
                    menu_item(ui, "Reset Zoom", Some("Ctrl+0"), UiAction::ResetView, actions);
                });
                ui.menu_button("Worklist", |ui| {
                    menu_item(ui, "Refresh", None, UiAction::RefreshWorklist, actions);
                    menu_item(
                        ui,
                        "Configure Connection...",
                        None,
                        UiAction::ConfigureConnection,
                        actions,
                    );
                });
                ui.menu_button("Reconstruction", |ui| {
                    for (label, kind) in [("MPR", "mpr"), ("MIP", "mip"), ("Bone", "bone")] {
                        menu_item(ui, label, None, UiAction::Reconstruction(kind), actions);
                    }
                    ui.separator();
                    for feature in ["Virtual Endoscopy", "Virtual Surgery"] {
                        menu_item(ui, feature, None, UiAction::ServerSideOnly(feature), actions);
                    }
                });
            });
        });
    }

    fn show_toolbar(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (label, action) in [
                    ("Open File", UiAction::OpenFile),
                    ("Open Folder", UiAction::OpenFolder),
                    ("Zoom In", UiAction::ZoomIn),
                    ("Zoom Out", UiAction::ZoomOut),
                    ("Reset", UiAction::ResetView),
                    ("Refresh Worklist", UiAction::RefreshWorklist),
                ] {
                    if ui.button(label).clicked() {
                        actions.push(action);
                    }
                }
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.is_busy() {
                    ui.spinner();
                }
                ui.label(&self.status_line);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.viewer.is_loaded() {
                        ui.label(format!("{:.0}%", self.viewer.transform().scale * 100.0));
                    }
                    if let Some(readout) = &self.hover_readout {
                        ui.label(readout);
                    }
                });
            });
        });
    }

    fn show_window_level_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("window-level-controls").show(ctx, |ui| {
            let mut center = self.window_center;
            let mut width = self.window_width;
            let mut changed = false;

            ui.add_enabled_ui(self.viewer.is_loaded(), |ui| {
                ui.horizontal(|ui| {
                    ui.label("Window Center:");
                    changed |= ui
                        .add(egui::Slider::new(&mut center, CENTER_RANGE).show_value(false))
                        .changed();
                    changed |= ui
                        .add(egui::DragValue::new(&mut center).range(CENTER_RANGE))
                        .changed();
                    ui.add_space(12.0);
                    ui.label("Window Width:");
                    changed |= ui
                        .add(egui::Slider::new(&mut width, WIDTH_RANGE).show_value(false))
                        .changed();
                    changed |= ui
                        .add(egui::DragValue::new(&mut width).range(WIDTH_RANGE))
                        .changed();
                });
            });

            if changed {
                self.apply_window_controls(center, width);
            }
        });
    }

    fn show_side_panel(&mut self, ctx: &egui::Context) {
        let mut clicked_row = None;
        egui::SidePanel::left("series-panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.label("Series:");
                egui::ScrollArea::vertical()
                    .id_salt("series-list")
                    .max_height(ui.available_height() * 0.5)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (row, entry) in self.series.iter().enumerate() {
                            let selected = self.selected_row == Some(row);
                            if ui.selectable_label(selected, &entry.label).clicked() {
                                clicked_row = Some(row);
                            }
                        }
                    });

                ui.separator();
                ui.label("DICOM Information:");
                egui::ScrollArea::vertical()
                    .id_salt("dicom-info")
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        egui::Grid::new("dicom-info-grid")
                            .num_columns(2)
                            .striped(true)
                            .show(ui, |ui| {
                                ui.strong("Tag");
                                ui.strong("Value");
                                ui.end_row();
                                for (tag, value) in &self.info {
                                    ui.label(tag);
                                    ui.label(value);
                                    ui.end_row();
                                }
                            });
                    });
            });

        if let Some(row) = clicked_row {
            if self.selected_row != Some(row) {
                self.select_row(row);
            }
        }
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (canvas_rect, response) =
                    ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
                self.viewer
                    .handle(ViewerEvent::Resized(canvas_rect.size()));
                let origin = canvas_rect.min.to_vec2();
                let local = |pos: egui::Pos2| pos - origin;

                if response.double_clicked() {
                    self.viewer.handle(ViewerEvent::ResetRequested);
                }
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.viewer.handle(ViewerEvent::DragStart(local(pos)));
                    }
                }
                if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.viewer.handle(ViewerEvent::DragMove(local(pos)));
                    }
                }
                if response.drag_stopped() {
                    self.viewer.handle(ViewerEvent::DragEnd);
                }

                self.hover_readout = None;
                if let Some(hover) = response.hover_pos() {
                    let focus = Some(local(hover));
                    let (zoom_delta, raw_scroll) =
                        ui.input(|input| (input.zoom_delta(), input.raw_scroll_delta));
                    if (zoom_delta - 1.0).abs() > f32::EPSILON {
                        self.viewer.handle(ViewerEvent::Zoom {
                            factor: zoom_delta,
                            focus,
                        });
                    } else if let Some((direction, steps)) =
                        self.scroll_steps.feed(dominant_scroll_axis(raw_scroll))
                    {
                        for _ in 0..steps {
                            self.viewer
                                .handle(ViewerEvent::Scroll { direction, focus });
                        }
                    }

                    self.hover_readout = self.viewer.probe(local(hover)).map(|(x, y, shown)| {
                        let stored = self
                            .viewer
                            .source()
                            .and_then(|source| source.pixel(x, y))
                            .unwrap_or(shown);
                        format!("x={x} y={y} stored={stored} shown={shown}")
                    });
                }
                if self.viewer.is_panning() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                }

                let painter = ui.painter_at(canvas_rect);
                match (self.viewer.source(), self.viewer.sink().texture.as_ref()) {
                    (Some(source), Some(texture)) => {
                        let image_size =
                            egui::vec2(source.width() as f32, source.height() as f32);
                        let image_rect = self
                            .viewer
                            .sink()
                            .transform
                            .image_rect(image_size, canvas_rect.size())
                            .translate(origin);
                        painter.image(
                            texture.id(),
                            image_rect,
                            egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    _ => {
                        let message = if self.loading_path.is_some() {
                            "Loading DICOM file..."
                        } else {
                            "Open a DICOM file or folder to start."
                        };
                        painter.text(
                            canvas_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            message,
                            egui::FontId::proportional(16.0),
                            egui::Color32::from_gray(160),
                        );
                    }
                }
            });
    }

    fn show_connection_dialog(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.connection_draft.as_mut() else {
            return;
        };

        let mut accepted = false;
        let mut cancelled = false;
        egui::Window::new("Configure Backend Connection")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("connection-form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Base URL:");
                        ui.text_edit_singleline(&mut draft.base_url);
                        ui.end_row();
                        ui.label("Auth Token:");
                        ui.add(egui::TextEdit::singleline(&mut draft.auth_token).password(true));
                        ui.end_row();
                    });
                ui.horizontal(|ui| {
                    accepted = ui.button("OK").clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        if accepted {
            if let Some(draft) = self.connection_draft.take() {
                self.apply_connection(draft);
            }
        } else if cancelled {
            self.connection_draft = None;
        }
    }
}

impl eframe::App for DicomViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(request) = self.pending_launch_request.take() {
            match request {
                LaunchRequest::File(path) => {
                    self.request_load(path);
                }
                LaunchRequest::Folder(dir) => self.open_series_folder(dir),
            }
        }

        self.poll_jobs();
        self.schedule_worklist_refresh(ctx);

        let mut actions = Vec::new();
        if self.connection_draft.is_none() {
            Self::collect_shortcuts(ctx, &mut actions);
        }

        self.show_menu_bar(ctx, &mut actions);
        self.show_toolbar(ctx, &mut actions);
        self.show_status_bar(ctx);
        self.show_window_level_controls(ctx);
        self.show_side_panel(ctx);
        self.show_canvas(ctx);
        self.show_connection_dialog(ctx);

        for action in actions {
            self.apply_action(action, ctx);
        }

        if self.is_busy() {
            ctx.set_cursor_icon(egui::CursorIcon::Progress);
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

fn menu_item(
    ui: &mut egui::Ui,
    label: &str,
    shortcut: Option<&str>,
    action: UiAction,
    actions: &mut Vec<UiAction>,
) {
    let mut button = egui::Button::new(label);
    if let Some(shortcut) = shortcut {
        button = button.shortcut_text(shortcut);
    }
    if ui.add(button).clicked() {
        actions.push(action);
        ui.close_menu();
    }
}

fn dominant_scroll_axis(delta: egui::Vec2) -> f32 {
    if delta.y.abs() >= delta.x.abs() {
        delta.y
    } else {
        delta.x
    }
}

fn series_from_worklist(entries: Vec<WorklistEntry>) -> Vec<SeriesEntry> {
    entries
        .into_iter()
        .map(|entry| SeriesEntry {
            label: entry.label,
            path: PathBuf::from(entry.reference),
        })
        .collect()
}

pub fn window_title() -> String {
    format!("{APP_TITLE} v{APP_VERSION}")
}
