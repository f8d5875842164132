// SPDX: CC0-1.0

//! Pan and zoom control laws.
//!
//! Panning divides by zoom, so a drag of N screen pixels always moves the
//! view N pixels. Zooming works in log space, so every wheel notch scales by
//! the same factor, and re-anchors the camera first so the point under the
//! pointer stays put.

use crate::{
    config::{
        PAN_SENSITIVITY, PAN_SHORTCUT_SENSITIVITY, ZOOM_MAX, ZOOM_MIN, ZOOM_SENSITIVITY,
        ZOOM_SHORTCUT_SENSITIVITY,
    },
    input::FrameInput,
    transform::Camera,
    Number, Point, Screen,
};

pub fn pan_by(camera: &mut Camera, delta: Point<Number>, sensitivity: Number) {
    camera.target = camera.target + delta.scale(-sensitivity / camera.zoom);
}

pub fn zoom_log_scaling(camera: &mut Camera, amount: Number, sensitivity: Number) {
    let scaled = camera.zoom.ln() + sensitivity * amount;
    camera.zoom = scaled.exp().clamp(ZOOM_MIN, ZOOM_MAX);
}

/// Zooms by `amount` while keeping the world point under `anchor` fixed.
pub fn zoom_at(camera: &mut Camera, anchor: Point<Number>, amount: Number, sensitivity: Number) {
    camera.anchor_at(anchor);
    zoom_log_scaling(camera, amount, sensitivity);
}

pub fn reset(camera: &mut Camera, screen: Screen) {
    *camera = Camera::new(screen);
    log::debug!("camera reset");
}

/// Applies one frame of input to the camera.
///
/// `drag_enabled` is false while the pointer is busy with the overlay, so a
/// click there doesn't also pan.
pub fn update_camera(camera: &mut Camera, input: &FrameInput, screen: Screen, drag_enabled: bool) {
    if input.keys.reset_pressed {
        reset(camera, screen);
    }

    if drag_enabled && input.primary_held {
        pan_by(camera, input.pointer_delta, PAN_SENSITIVITY);
    }

    if input.scroll != 0.0 {
        zoom_at(camera, input.pointer, input.scroll, ZOOM_SENSITIVITY);
    }

    let pan = input.keys.pan_vector();
    if pan != Point::ZERO {
        pan_by(camera, pan, PAN_SHORTCUT_SENSITIVITY);
    }

    let zoom = input.keys.zoom_direction();
    if zoom != 0.0 {
        zoom_at(camera, screen.center(), zoom, ZOOM_SHORTCUT_SENSITIVITY);
    }
}
