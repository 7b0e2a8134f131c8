//! Follow camera
//!
//! Fixed x and height; z eases toward a point just ahead of the player each
//! frame. Pure presentation state, never read by the simulation.

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub x: f32,
    pub z: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CameraRig {
    /// Camera already settled on `player_z`
    pub fn new(player_z: f32) -> Self {
        Self {
            x: CAMERA_POSITION_X,
            z: Self::target_z(player_z),
        }
    }

    pub fn target_z(player_z: f32) -> f32 {
        player_z + CAMERA_LEAD_Z - CAMERA_OFFSET_Z
    }

    /// Ease one frame toward the player
    pub fn follow(&mut self, player_z: f32) {
        let target = Self::target_z(player_z);
        self.z += (target - self.z) * CAMERA_FOLLOW_SPEED;
    }

    pub fn snap(&mut self, player_z: f32) {
        self.z = Self::target_z(player_z);
    }
}
