//! Zoom/pan/window-level state for the single displayed image.
//!
//! The controller is driven through [`ViewportController::handle`] with
//! [`ViewerEvent`]s and pushes every visible change to a [`RenderSink`].
//! Coordinates are viewport-local pixels with the origin at the top-left
//! corner of the display area.

use std::path::PathBuf;

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::error::LoadError;
use crate::generation::{GenerationCounter, Ticket};
use crate::grayscale::GrayscaleImage;
use crate::renderer::{render_window_level, WindowLevel};

pub const MIN_SCALE: f32 = 0.01;
pub const MAX_SCALE: f32 = 100.0;
pub const ZOOM_IN_FACTOR: f32 = 1.25;
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Screen pixels per image pixel.
    pub scale: f32,
    /// Offset of the image center from the viewport center.
    pub pan: Vec2,
}

impl ViewTransform {
    pub fn fit(image_size: Vec2, viewport_size: Vec2) -> Self {
        let scale = if image_size.x > 0.0
            && image_size.y > 0.0
            && viewport_size.x > 0.0
            && viewport_size.y > 0.0
        {
            (viewport_size.x / image_size.x).min(viewport_size.y / image_size.y)
        } else {
            1.0
        };

        Self {
            scale: scale.max(MIN_SCALE),
            pan: Vec2::ZERO,
        }
    }

    /// Where the image is drawn inside a viewport of `viewport_size`.
    pub fn image_rect(&self, image_size: Vec2, viewport_size: Vec2) -> Rect {
        let center = (viewport_size * 0.5).to_pos2() + self.pan;
        Rect::from_center_size(center, image_size * self.scale)
    }

    /// Image coordinate (in image pixels, possibly outside the image) shown at
    /// `screen`.
    pub fn screen_to_image(&self, screen: Pos2, image_size: Vec2, viewport_size: Vec2) -> Pos2 {
        let rect = self.image_rect(image_size, viewport_size);
        ((screen - rect.min) / self.scale).to_pos2()
    }

    #[cfg(test)]
    pub fn image_to_screen(&self, image: Pos2, image_size: Vec2, viewport_size: Vec2) -> Pos2 {
        let rect = self.image_rect(image_size, viewport_size);
        rect.min + image.to_vec2() * self.scale
    }

    fn zoom_around(&mut self, factor: f32, focus: Pos2, viewport_size: Vec2) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let old_scale = self.scale;
        // A fit scale above MAX_SCALE is kept; zooming never pushes past it.
        let new_scale = (old_scale * factor).clamp(MIN_SCALE, MAX_SCALE.max(old_scale));
        if new_scale == old_scale {
            return false;
        }

        let ratio = new_scale / old_scale;
        let offset = focus - (viewport_size * 0.5).to_pos2();
        let pan = offset * (1.0 - ratio) + self.pan * ratio;
        if !pan.x.is_finite() || !pan.y.is_finite() {
            return false;
        }
        self.pan = pan;
        self.scale = new_scale;
        true
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

/// One presentation update pushed to the sink.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub image: &'a GrayscaleImage,
    pub transform: ViewTransform,
    /// False when only the transform moved since the previous frame.
    pub pixels_changed: bool,
}

pub trait RenderSink {
    fn present(&mut self, frame: RenderFrame<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn zoom_factor(self) -> f32 {
        match self {
            ScrollDirection::Up => ZOOM_IN_FACTOR,
            ScrollDirection::Down => ZOOM_OUT_FACTOR,
        }
    }
}

#[derive(Debug)]
pub enum ViewerEvent {
    Scroll {
        direction: ScrollDirection,
        focus: Option<Pos2>,
    },
    Zoom {
        factor: f32,
        focus: Option<Pos2>,
    },
    DragStart(Pos2),
    DragMove(Pos2),
    DragEnd,
    ParameterChanged {
        center: i32,
        width: i32,
    },
    ResetRequested,
    Resized(Vec2),
    LoadRequested(PathBuf),
    ImageDecoded {
        ticket: Ticket,
        result: Result<GrayscaleImage, LoadError>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Unchanged,
    Redrawn,
    DecodeRequested { ticket: Ticket, path: PathBuf },
    Loaded { width: usize, height: usize },
    Stale { ticket: Ticket },
    Failed(LoadError),
}

#[derive(Debug)]
struct LoadedImage {
    source: GrayscaleImage,
    displayed: GrayscaleImage,
}

pub struct ViewportController<S> {
    sink: S,
    loaded: Option<LoadedImage>,
    window: WindowLevel,
    transform: ViewTransform,
    viewport_size: Vec2,
    pan_anchor: Option<Pos2>,
    loads: GenerationCounter,
}

impl<S: RenderSink> ViewportController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            loaded: None,
            window: WindowLevel::default(),
            transform: ViewTransform::default(),
            viewport_size: Vec2::ZERO,
            pan_anchor: None,
            loads: GenerationCounter::new(),
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Outcome {
        match event {
            ViewerEvent::Scroll { direction, focus } => self.zoom(direction.zoom_factor(), focus),
            ViewerEvent::Zoom { factor, focus } => self.zoom(factor, focus),
            ViewerEvent::DragStart(point) => self.begin_pan(point),
            ViewerEvent::DragMove(point) => self.continue_pan(point),
            ViewerEvent::DragEnd => self.end_pan(),
            ViewerEvent::ParameterChanged { center, width } => {
                self.set_window_level(center, width)
            }
            ViewerEvent::ResetRequested => self.reset_view(),
            ViewerEvent::Resized(size) => self.set_viewport_size(size),
            ViewerEvent::LoadRequested(path) => {
                let ticket = self.request_load();
                Outcome::DecodeRequested { ticket, path }
            }
            ViewerEvent::ImageDecoded { ticket, result } => self.complete_load(ticket, result),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    pub fn source(&self) -> Option<&GrayscaleImage> {
        self.loaded.as_ref().map(|loaded| &loaded.source)
    }

    #[cfg(test)]
    pub fn displayed(&self) -> Option<&GrayscaleImage> {
        self.loaded.as_ref().map(|loaded| &loaded.displayed)
    }

    pub fn window_level(&self) -> WindowLevel {
        self.window
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Starts a new asynchronous load; completions for earlier tickets are
    /// dropped from now on.
    pub fn request_load(&mut self) -> Ticket {
        self.loads.issue()
    }

    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: Result<GrayscaleImage, LoadError>,
    ) -> Outcome {
        if !self.loads.is_current(ticket) {
            debug!(
                "Discarding stale decode completion (generation {})",
                ticket.generation()
            );
            return Outcome::Stale { ticket };
        }

        match result {
            Ok(image) => self.load_image(image),
            Err(err) => Outcome::Failed(err),
        }
    }

    pub fn load_image(&mut self, image: GrayscaleImage) -> Outcome {
        let (width, height) = (image.width(), image.height());
        self.window = WindowLevel::default();
        self.transform = ViewTransform::fit(image_size(&image), self.viewport_size);
        self.pan_anchor = None;
        self.loaded = Some(LoadedImage {
            displayed: render_window_level(&image, self.window),
            source: image,
        });
        self.present(true);
        Outcome::Loaded { width, height }
    }

    pub fn set_window_level(&mut self, center: i32, width: i32) -> Outcome {
        let window = WindowLevel::new(center, width);
        let Some(loaded) = self.loaded.as_mut() else {
            return Outcome::Unchanged;
        };
        if window == self.window {
            return Outcome::Unchanged;
        }

        self.window = window;
        loaded.displayed = render_window_level(&loaded.source, window);
        self.present(true);
        Outcome::Redrawn
    }

    pub fn zoom(&mut self, factor: f32, focus: Option<Pos2>) -> Outcome {
        if self.loaded.is_none() {
            return Outcome::Unchanged;
        }

        let focus = focus.unwrap_or_else(|| (self.viewport_size * 0.5).to_pos2());
        if !self.transform.zoom_around(factor, focus, self.viewport_size) {
            return Outcome::Unchanged;
        }
        self.present(false);
        Outcome::Redrawn
    }

    pub fn reset_view(&mut self) -> Outcome {
        let Some(loaded) = self.loaded.as_ref() else {
            return Outcome::Unchanged;
        };

        self.transform = ViewTransform::fit(image_size(&loaded.source), self.viewport_size);
        self.pan_anchor = None;
        self.present(false);
        Outcome::Redrawn
    }

    pub fn begin_pan(&mut self, point: Pos2) -> Outcome {
        if self.loaded.is_none() {
            return Outcome::Unchanged;
        }
        self.pan_anchor = Some(point);
        Outcome::Unchanged
    }

    pub fn continue_pan(&mut self, point: Pos2) -> Outcome {
        let Some(last) = self.pan_anchor else {
            return Outcome::Unchanged;
        };

        let delta = point - last;
        self.pan_anchor = Some(point);
        if delta == Vec2::ZERO {
            return Outcome::Unchanged;
        }
        self.transform.pan += delta;
        self.present(false);
        Outcome::Redrawn
    }

    pub fn end_pan(&mut self) -> Outcome {
        self.pan_anchor = None;
        Outcome::Unchanged
    }

    pub fn set_viewport_size(&mut self, size: Vec2) -> Outcome {
        if size == self.viewport_size {
            return Outcome::Unchanged;
        }
        self.viewport_size = size;
        Outcome::Unchanged
    }

    /// Displayed value under a viewport point, with its image coordinate.
    pub fn probe(&self, screen: Pos2) -> Option<(usize, usize, u8)> {
        let loaded = self.loaded.as_ref()?;
        let point =
            self.transform
                .screen_to_image(screen, image_size(&loaded.source), self.viewport_size);
        if !point.x.is_finite() || !point.y.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let (x, y) = (point.x.floor() as usize, point.y.floor() as usize);
        loaded.displayed.pixel(x, y).map(|value| (x, y, value))
    }

    fn present(&mut self, pixels_changed: bool) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };
        self.sink.present(RenderFrame {
            image: &loaded.displayed,
            transform: self.transform,
            pixels_changed,
        });
    }
}

fn image_size(image: &GrayscaleImage) -> Vec2 {
    Vec2::new(image.width() as f32, image.height() as f32)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(GrayscaleImage, ViewTransform, bool)>,
    }

    impl RenderSink for RecordingSink {
        fn present(&mut self, frame: RenderFrame<'_>) {
            self.frames
                .push((frame.image.clone(), frame.transform, frame.pixels_changed));
        }
    }

    fn gradient(width: usize, height: usize) -> GrayscaleImage {
        let pixels = (0..width * height)
            .map(|index| (index % 256) as u8)
            .collect::<Vec<_>>();
        GrayscaleImage::new(width, height, pixels).expect("valid image")
    }

    fn loaded_controller(image: GrayscaleImage) -> ViewportController<RecordingSink> {
        let mut controller = ViewportController::new(RecordingSink::default());
        controller.handle(ViewerEvent::Resized(Vec2::new(400.0, 300.0)));
        controller.load_image(image);
        controller
    }

    #[test]
    fn empty_controller_ignores_interaction() {
        let mut controller = ViewportController::new(RecordingSink::default());
        assert_eq!(
            controller.handle(ViewerEvent::Scroll {
                direction: ScrollDirection::Up,
                focus: None,
            }),
            Outcome::Unchanged
        );
        assert_eq!(
            controller.handle(ViewerEvent::ParameterChanged {
                center: 10,
                width: 20,
            }),
            Outcome::Unchanged
        );
        assert_eq!(controller.handle(ViewerEvent::ResetRequested), Outcome::Unchanged);
        assert_eq!(
            controller.handle(ViewerEvent::DragStart(Pos2::new(1.0, 1.0))),
            Outcome::Unchanged
        );
        assert!(!controller.is_panning());
        assert!(!controller.is_loaded());
        assert!(controller.sink().frames.is_empty());
    }

    #[test]
    fn load_fits_image_and_resets_parameters() {
        let mut controller = loaded_controller(gradient(200, 100));
        controller.set_window_level(40, 80);
        controller.load_image(gradient(100, 300));

        assert_eq!(controller.window_level(), WindowLevel::default());
        let transform = controller.transform();
        assert_relative_eq!(transform.scale, 1.0);
        assert_eq!(transform.pan, Vec2::ZERO);

        let (_, _, pixels_changed) = controller.sink().frames.last().expect("frame pushed");
        assert!(*pixels_changed);
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let transform = ViewTransform::fit(Vec2::new(200.0, 100.0), Vec2::new(400.0, 300.0));
        assert_relative_eq!(transform.scale, 2.0);
        let rect = transform.image_rect(Vec2::new(200.0, 100.0), Vec2::new(400.0, 300.0));
        assert_relative_eq!(rect.width(), 400.0);
        assert_relative_eq!(rect.height(), 200.0);
        assert_relative_eq!(rect.center().x, 200.0);
        assert_relative_eq!(rect.center().y, 150.0);
    }

    #[test]
    fn window_level_always_rerenders_from_source() {
        let source = gradient(32, 8);
        let mut controller = loaded_controller(source.clone());

        controller.set_window_level(60, 10);
        controller.set_window_level(200, 90);

        let loaded_source = controller.source().expect("loaded");
        assert_eq!(loaded_source, &source);
        assert!(loaded_source.shares_pixels_with(&source));
        assert_eq!(
            controller.displayed().expect("loaded"),
            &render_window_level(&source, WindowLevel::new(200, 90))
        );
    }

    #[test]
    fn repeating_parameters_is_idempotent() {
        let source = gradient(16, 16);
        let mut controller = loaded_controller(source.clone());

        assert_eq!(controller.set_window_level(90, 30), Outcome::Redrawn);
        let first = controller.displayed().cloned();
        assert_eq!(controller.set_window_level(90, 30), Outcome::Unchanged);
        assert_eq!(controller.displayed().cloned(), first);

        controller.set_window_level(128, 256);
        controller.set_window_level(90, 30);
        assert_eq!(controller.displayed().cloned(), first);
    }

    #[test]
    fn zero_width_is_clamped() {
        let mut controller = loaded_controller(gradient(4, 4));
        controller.handle(ViewerEvent::ParameterChanged {
            center: 5,
            width: 0,
        });
        assert_eq!(controller.window_level().width(), 1);
    }

    #[test]
    fn contrast_changes_leave_transform_alone() {
        let mut controller = loaded_controller(gradient(200, 100));
        controller.zoom(1.25, Some(Pos2::new(30.0, 40.0)));
        let before = controller.transform();

        controller.set_window_level(10, 10);
        assert_eq!(controller.transform(), before);
        let (_, transform, pixels_changed) = controller.sink().frames.last().expect("frame");
        assert_eq!(*transform, before);
        assert!(*pixels_changed);
    }

    #[test]
    fn view_changes_leave_contrast_alone() {
        let mut controller = loaded_controller(gradient(200, 100));
        controller.set_window_level(70, 12);
        let displayed = controller.displayed().cloned();

        controller.zoom(2.0, None);
        controller.begin_pan(Pos2::new(0.0, 0.0));
        controller.continue_pan(Pos2::new(15.0, -4.0));
        controller.end_pan();
        controller.reset_view();

        assert_eq!(controller.window_level(), WindowLevel::new(70, 12));
        assert_eq!(controller.displayed().cloned(), displayed);
        let (_, _, pixels_changed) = controller.sink().frames.last().expect("frame");
        assert!(!*pixels_changed);
    }

    #[test]
    fn zoom_round_trip_keeps_focus_fixed() {
        let mut controller = loaded_controller(gradient(200, 100));
        let image = Vec2::new(200.0, 100.0);
        let viewport = controller.viewport_size();
        let focus = Pos2::new(310.0, 95.0);
        let start = controller.transform();
        let anchored = start.screen_to_image(focus, image, viewport);

        controller.handle(ViewerEvent::Scroll {
            direction: ScrollDirection::Up,
            focus: Some(focus),
        });
        let zoomed = controller.transform();
        assert_relative_eq!(zoomed.scale, start.scale * 1.25, epsilon = 1e-5);
        let during = zoomed.image_to_screen(anchored, image, viewport);
        assert_relative_eq!(during.x, focus.x, epsilon = 1e-3);
        assert_relative_eq!(during.y, focus.y, epsilon = 1e-3);

        controller.handle(ViewerEvent::Scroll {
            direction: ScrollDirection::Down,
            focus: Some(focus),
        });
        let back = controller.transform();
        assert_relative_eq!(back.scale, start.scale, epsilon = 1e-5);
        assert_relative_eq!(back.pan.x, start.pan.x, epsilon = 1e-3);
        assert_relative_eq!(back.pan.y, start.pan.y, epsilon = 1e-3);
        let after = back.image_to_screen(anchored, image, viewport);
        assert_relative_eq!(after.x, focus.x, epsilon = 1e-3);
        assert_relative_eq!(after.y, focus.y, epsilon = 1e-3);
    }

    #[test]
    fn repeated_zoom_in_stops_at_max_scale_and_can_zoom_back_out() {
        let mut controller = loaded_controller(gradient(200, 100));
        // Fit scale 2 puts image pixel (105.5, 55.5) under this point.
        let focus = Some(Pos2::new(211.0, 161.0));

        let mut steps = 0;
        while controller.zoom(ZOOM_IN_FACTOR, focus) == Outcome::Redrawn {
            steps += 1;
            assert!(steps < 1000, "zoom-in never saturated");
        }
        let saturated = controller.transform();
        assert_eq!(saturated.scale, MAX_SCALE);
        assert!(saturated.pan.x.is_finite() && saturated.pan.y.is_finite());

        assert_eq!(controller.zoom(ZOOM_OUT_FACTOR, focus), Outcome::Redrawn);
        assert_relative_eq!(
            controller.transform().scale,
            MAX_SCALE * ZOOM_OUT_FACTOR,
            epsilon = 1e-3
        );
        let (x, y, _) = controller
            .probe(Pos2::new(211.0, 161.0))
            .expect("anchored pixel stays under the focus");
        assert_eq!((x, y), (105, 55));
    }

    #[test]
    fn huge_pinch_factor_is_clamped() {
        let mut controller = loaded_controller(gradient(200, 100));
        assert_eq!(controller.zoom(1e30, None), Outcome::Redrawn);
        let transform = controller.transform();
        assert_eq!(transform.scale, MAX_SCALE);
        assert!(transform.pan.x.is_finite() && transform.pan.y.is_finite());
        assert_eq!(controller.zoom(f32::INFINITY, None), Outcome::Unchanged);
    }

    #[test]
    fn zoom_without_focus_anchors_viewport_center() {
        let mut controller = loaded_controller(gradient(200, 100));
        controller.zoom(3.0, None);
        assert_eq!(controller.transform().pan, Vec2::ZERO);
        assert_relative_eq!(controller.transform().scale, 6.0);
    }

    #[test]
    fn zoom_out_stops_at_minimum_scale() {
        let mut controller = loaded_controller(gradient(200, 100));
        for _ in 0..100 {
            controller.zoom(ZOOM_OUT_FACTOR, Some(Pos2::new(5.0, 5.0)));
        }
        assert_relative_eq!(controller.transform().scale, MIN_SCALE);
        assert_eq!(
            controller.zoom(ZOOM_OUT_FACTOR, None),
            Outcome::Unchanged
        );
        assert_eq!(controller.zoom(0.0, None), Outcome::Unchanged);
        assert_eq!(controller.zoom(f32::NAN, None), Outcome::Unchanged);
    }

    #[test]
    fn pan_only_moves_between_begin_and_end() {
        let mut controller = loaded_controller(gradient(200, 100));

        assert_eq!(
            controller.handle(ViewerEvent::DragMove(Pos2::new(50.0, 50.0))),
            Outcome::Unchanged
        );
        assert_eq!(controller.transform().pan, Vec2::ZERO);

        controller.handle(ViewerEvent::DragStart(Pos2::new(10.0, 10.0)));
        controller.handle(ViewerEvent::DragMove(Pos2::new(25.0, 5.0)));
        controller.handle(ViewerEvent::DragMove(Pos2::new(30.0, 0.0)));
        assert_eq!(controller.transform().pan, Vec2::new(20.0, -10.0));

        controller.handle(ViewerEvent::DragEnd);
        controller.handle(ViewerEvent::DragMove(Pos2::new(90.0, 90.0)));
        assert_eq!(controller.transform().pan, Vec2::new(20.0, -10.0));
    }

    #[test]
    fn reset_restores_post_load_transform() {
        let mut controller = loaded_controller(gradient(200, 100));
        let after_load = controller.transform();

        controller.zoom(1.25, Some(Pos2::new(12.0, 250.0)));
        controller.begin_pan(Pos2::new(0.0, 0.0));
        controller.continue_pan(Pos2::new(-40.0, 33.0));
        controller.end_pan();
        controller.zoom(0.8, None);
        controller.zoom(1.25, Some(Pos2::new(390.0, 1.0)));
        assert_ne!(controller.transform(), after_load);

        assert_eq!(controller.handle(ViewerEvent::ResetRequested), Outcome::Redrawn);
        assert_eq!(controller.transform(), after_load);
    }

    #[test]
    fn resize_does_not_refit_until_reset() {
        let mut controller = loaded_controller(gradient(200, 100));
        controller.handle(ViewerEvent::Resized(Vec2::new(100.0, 100.0)));
        assert_relative_eq!(controller.transform().scale, 2.0);
        controller.reset_view();
        assert_relative_eq!(controller.transform().scale, 0.5);
    }

    #[test]
    fn stale_completion_cannot_replace_newer_image() {
        let mut controller = ViewportController::new(RecordingSink::default());
        controller.handle(ViewerEvent::Resized(Vec2::new(64.0, 64.0)));

        let Outcome::DecodeRequested { ticket: ticket_a, .. } =
            controller.handle(ViewerEvent::LoadRequested(PathBuf::from("a.dcm")))
        else {
            panic!("expected decode request for a.dcm");
        };
        let Outcome::DecodeRequested { ticket: ticket_b, path } =
            controller.handle(ViewerEvent::LoadRequested(PathBuf::from("b.dcm")))
        else {
            panic!("expected decode request for b.dcm");
        };
        assert_eq!(path, PathBuf::from("b.dcm"));

        let image_b = GrayscaleImage::new(2, 2, vec![9; 4]).expect("valid image");
        let image_a = GrayscaleImage::new(3, 3, vec![1; 9]).expect("valid image");

        assert_eq!(
            controller.handle(ViewerEvent::ImageDecoded {
                ticket: ticket_b,
                result: Ok(image_b.clone()),
            }),
            Outcome::Loaded {
                width: 2,
                height: 2
            }
        );
        assert_eq!(
            controller.handle(ViewerEvent::ImageDecoded {
                ticket: ticket_a,
                result: Ok(image_a),
            }),
            Outcome::Stale { ticket: ticket_a }
        );

        assert_eq!(controller.source(), Some(&image_b));
        assert_eq!(controller.sink().frames.len(), 1);
    }

    #[test]
    fn failed_decode_keeps_previous_image() {
        let original = gradient(8, 8);
        let mut controller = loaded_controller(original.clone());
        controller.zoom(2.0, None);
        let transform = controller.transform();

        let ticket = controller.request_load();
        let outcome = controller.complete_load(
            ticket,
            Err(LoadError::EmptyImage {
                width: 0,
                height: 0,
            }),
        );

        assert!(matches!(outcome, Outcome::Failed(LoadError::EmptyImage { .. })));
        assert_eq!(controller.source(), Some(&original));
        assert_eq!(controller.transform(), transform);
    }

    #[test]
    fn stale_failure_is_silent() {
        let mut controller = ViewportController::new(RecordingSink::default());
        let old = controller.request_load();
        let _new = controller.request_load();
        let outcome = controller.complete_load(
            old,
            Err(LoadError::Decode {
                path: PathBuf::from("old.dcm"),
                message: "boom".to_string(),
            }),
        );
        assert_eq!(outcome, Outcome::Stale { ticket: old });
    }

    #[test]
    fn probe_reads_displayed_value_under_point() {
        let image = GrayscaleImage::new(2, 1, vec![0, 255]).expect("valid image");
        let mut controller = ViewportController::new(RecordingSink::default());
        controller.handle(ViewerEvent::Resized(Vec2::new(200.0, 100.0)));
        controller.load_image(image);

        assert_eq!(controller.probe(Pos2::new(50.0, 50.0)), Some((0, 0, 0)));
        assert_eq!(controller.probe(Pos2::new(150.0, 50.0)), Some((1, 0, 254)));
        assert_eq!(controller.probe(Pos2::new(250.0, 50.0)), None);
    }
}
