//! 360-degree view control
//!
//! Keeps the consumer-facing orientation as a quaternion and pushes it to
//! the decoder as Euler angles plus a field of view. State is cached on
//! the player side; the decoder only ever sees complete viewpoint
//! updates.

use reel_core::{Decoder, Viewpoint};
use std::sync::Arc;
use tracing::trace;

/// Unit quaternion, scalar part first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Orientation = Orientation {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Build from yaw/pitch/roll in degrees (applied roll, then pitch,
    /// then yaw).
    pub fn from_euler_degrees(yaw: f32, pitch: f32, roll: f32) -> Orientation {
        let (sy, cy) = (yaw.to_radians() / 2.0).sin_cos();
        let (sp, cp) = (pitch.to_radians() / 2.0).sin_cos();
        let (sr, cr) = (roll.to_radians() / 2.0).sin_cos();

        Orientation {
            w: cy * cp * cr + sy * sp * sr,
            x: cy * cp * sr - sy * sp * cr,
            y: cy * sp * cr + sy * cp * sr,
            z: sy * cp * cr - cy * sp * sr,
        }
    }

    /// Decompose into (yaw, pitch, roll) in degrees.
    pub fn to_euler_degrees(self) -> (f32, f32, f32) {
        let roll = (2.0 * (self.w * self.x + self.y * self.z))
            .atan2(1.0 - 2.0 * (self.x * self.x + self.y * self.y));
        let pitch = (2.0 * (self.w * self.y - self.z * self.x)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (self.w * self.z + self.x * self.y))
            .atan2(1.0 - 2.0 * (self.y * self.y + self.z * self.z));

        (yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::IDENTITY
    }
}

/// Hamilton product `lhs * rhs` (apply `rhs` first).
impl std::ops::Mul for Orientation {
    type Output = Orientation;

    fn mul(self, rhs: Orientation) -> Orientation {
        Orientation {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

/// Cached view state for the current session.
#[derive(Debug, Clone)]
pub struct View {
    field_of_view: f32,
    orientation: Orientation,
}

impl View {
    pub fn new() -> Self {
        View {
            field_of_view: 90.0,
            orientation: Orientation::IDENTITY,
        }
    }

    /// Restore the defaults (media closed or reopened).
    pub fn reset(&mut self) {
        *self = View::new();
    }

    /// Current horizontal and vertical field of view, in degrees. The
    /// decoder exposes a single angle, reported for both axes.
    pub fn view_field(&self) -> (f32, f32) {
        (self.field_of_view, self.field_of_view)
    }

    /// Current view orientation.
    pub fn view_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the field of view, clamped to [10, 360] degrees. A relative
    /// update adds to the current value before clamping.
    pub fn set_view_field(
        &mut self,
        horizontal: f32,
        _vertical: f32,
        absolute: bool,
        decoder: &Arc<dyn Decoder>,
    ) -> bool {
        let requested = if absolute {
            horizontal
        } else {
            self.field_of_view + horizontal
        };

        let field_of_view = requested.clamp(10.0, 360.0);

        if !self.push(decoder, self.orientation, field_of_view) {
            return false;
        }

        self.field_of_view = field_of_view;
        true
    }

    /// Set the view orientation; a relative update composes with the
    /// current orientation.
    pub fn set_view_orientation(
        &mut self,
        orientation: Orientation,
        absolute: bool,
        decoder: &Arc<dyn Decoder>,
    ) -> bool {
        let orientation = if absolute {
            orientation
        } else {
            orientation * self.orientation
        };

        if !self.push(decoder, orientation, self.field_of_view) {
            return false;
        }

        self.orientation = orientation;
        true
    }

    fn push(&self, decoder: &Arc<dyn Decoder>, orientation: Orientation, fov: f32) -> bool {
        let (yaw, pitch, roll) = orientation.to_euler_degrees();

        trace!(yaw, pitch, roll, fov, "pushing viewpoint");

        decoder.set_viewpoint(Viewpoint {
            yaw,
            pitch,
            roll,
            field_of_view: fov,
        })
    }
}

impl Default for View {
    fn default() -> Self {
        View::new()
    }
}
