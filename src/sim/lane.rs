//! Lane data model
//!
//! A lane is one unit-deep strip of the world at integer `z` (negative is
//! forward). Its kind and layout are fixed at generation time; the only
//! per-tick state is the x offset of a road or water lane's mover.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lane kind without payload, for quick comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Grass,
    Road,
    Water,
}

/// Static scenery that blocks a grass cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    TrafficLight,
}

/// What floats on a water lane (presentation differs, behaviour does not)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaterVariant {
    #[default]
    Log,
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Gem,
}

/// Travel direction of a lane's mover along x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficDirection {
    /// Toward -x
    Left,
    /// Toward +x
    Right,
}

impl TrafficDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TrafficDirection::Left => -1.0,
            TrafficDirection::Right => 1.0,
        }
    }
}

/// A coin or gem sitting on a grass cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Unique id, `"{z}-{x}"`
    pub id: String,
    pub position: Vec3,
    pub kind: CollectibleKind,
    pub value: u64,
    pub collected: bool,
}

impl Collectible {
    pub fn new(z: i32, x: i32, kind: CollectibleKind, value: u64) -> Self {
        Self {
            id: format!("{z}-{x}"),
            position: Vec3::new(x as f32, 0.0, z as f32),
            kind,
            value,
            collected: false,
        }
    }

    /// Grid column
    pub fn x(&self) -> i32 {
        self.position.x as i32
    }
}

/// The single vehicle or platform travelling along a road or water lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// Speed magnitude (units/s)
    pub speed: f32,
    pub direction: TrafficDirection,
    /// Footprint along x
    pub width: f32,
    /// Current center x
    pub offset: f32,
}

impl Mover {
    pub fn new(speed: f32, direction: TrafficDirection, width: f32) -> Self {
        Self {
            speed,
            direction,
            width,
            offset: 0.0,
        }
    }

    /// Signed displacement for a timestep
    #[inline]
    pub fn displacement(&self, dt: f32) -> f32 {
        self.speed * dt * self.direction.sign()
    }

    /// Move by one timestep, wrapping at `+/- wrap_x`. Returns the displacement.
    pub fn advance(&mut self, dt: f32, wrap_x: f32) -> f32 {
        let delta = self.displacement(dt);
        let mut x = self.offset + delta;
        match self.direction {
            TrafficDirection::Right if x > wrap_x => x -= 2.0 * wrap_x,
            TrafficDirection::Left if x < -wrap_x => x += 2.0 * wrap_x,
            _ => {}
        }
        self.offset = x;
        delta
    }

    /// Whether a point at `x` overlaps the mover, padded by `hitbox`
    #[inline]
    pub fn overlaps(&self, x: f32, hitbox: f32) -> bool {
        (self.offset - x).abs() < self.width / 2.0 + hitbox
    }
}

/// Kind-specific lane payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaneContent {
    Grass {
        /// Occupied columns and what occupies them
        obstacles: BTreeMap<i32, ObstacleKind>,
        /// In generation (x) order
        collectibles: Vec<Collectible>,
    },
    Road(Mover),
    Water {
        platform: Mover,
        variant: WaterVariant,
    },
}

/// One row of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub z: i32,
    /// Generation index, `z == -raw_index`
    pub raw_index: i32,
    pub content: LaneContent,
}

impl Lane {
    pub fn grass(raw_index: i32) -> Self {
        Self {
            z: -raw_index,
            raw_index,
            content: LaneContent::Grass {
                obstacles: BTreeMap::new(),
                collectibles: Vec::new(),
            },
        }
    }

    pub fn road(raw_index: i32, vehicle: Mover) -> Self {
        Self {
            z: -raw_index,
            raw_index,
            content: LaneContent::Road(vehicle),
        }
    }

    pub fn water(raw_index: i32, platform: Mover, variant: WaterVariant) -> Self {
        Self {
            z: -raw_index,
            raw_index,
            content: LaneContent::Water { platform, variant },
        }
    }

    /// Add an obstacle (grass lanes only; ignored elsewhere)
    pub fn with_obstacle(mut self, x: i32, kind: ObstacleKind) -> Self {
        if let LaneContent::Grass { obstacles, .. } = &mut self.content {
            obstacles.insert(x, kind);
        }
        self
    }

    /// Add a collectible (grass lanes only; ignored elsewhere)
    pub fn with_collectible(mut self, x: i32, kind: CollectibleKind, value: u64) -> Self {
        let z = self.z;
        if let LaneContent::Grass { collectibles, .. } = &mut self.content {
            collectibles.push(Collectible::new(z, x, kind, value));
        }
        self
    }

    pub fn kind(&self) -> LaneKind {
        match self.content {
            LaneContent::Grass { .. } => LaneKind::Grass,
            LaneContent::Road(_) => LaneKind::Road,
            LaneContent::Water { .. } => LaneKind::Water,
        }
    }

    /// Whether the column holds an obstacle
    pub fn is_blocked(&self, x: i32) -> bool {
        match &self.content {
            LaneContent::Grass { obstacles, .. } => obstacles.contains_key(&x),
            _ => false,
        }
    }

    pub fn obstacle_at(&self, x: i32) -> Option<ObstacleKind> {
        match &self.content {
            LaneContent::Grass { obstacles, .. } => obstacles.get(&x).copied(),
            _ => None,
        }
    }

    pub fn collectibles(&self) -> &[Collectible] {
        match &self.content {
            LaneContent::Grass { collectibles, .. } => collectibles,
            _ => &[],
        }
    }

    pub fn collectibles_mut(&mut self) -> Option<&mut Vec<Collectible>> {
        match &mut self.content {
            LaneContent::Grass { collectibles, .. } => Some(collectibles),
            _ => None,
        }
    }

    /// The vehicle or platform, if this lane has one
    pub fn mover(&self) -> Option<&Mover> {
        match &self.content {
            LaneContent::Road(vehicle) => Some(vehicle),
            LaneContent::Water { platform, .. } => Some(platform),
            LaneContent::Grass { .. } => None,
        }
    }

    pub fn mover_mut(&mut self) -> Option<&mut Mover> {
        match &mut self.content {
            LaneContent::Road(vehicle) => Some(vehicle),
            LaneContent::Water { platform, .. } => Some(platform),
            LaneContent::Grass { .. } => None,
        }
    }
}

/// The generated world, ordered by raw index (front of the vector is furthest back)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneTable {
    lanes: Vec<Lane>,
}

impl LaneTable {
    pub fn new(mut lanes: Vec<Lane>) -> Self {
        lanes.sort_by_key(|l| l.raw_index);
        lanes.dedup_by_key(|l| l.raw_index);
        Self { lanes }
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    fn index_of(&self, z: i32) -> Option<usize> {
        self.lanes.binary_search_by_key(&-z, |l| l.raw_index).ok()
    }

    /// Lane at world `z`, or `None` outside the generated span
    pub fn lane_at(&self, z: i32) -> Option<&Lane> {
        self.index_of(z).map(|i| &self.lanes[i])
    }

    pub fn lane_at_mut(&mut self, z: i32) -> Option<&mut Lane> {
        self.index_of(z).map(move |i| &mut self.lanes[i])
    }

    /// Lanes within `distance` of `player_z`, for the renderer
    pub fn visible(&self, player_z: f32, distance: i32) -> impl Iterator<Item = &Lane> {
        self.lanes
            .iter()
            .filter(move |l| (l.z as f32 - player_z).abs() < distance as f32)
    }

    /// Mark every collectible uncollected (restart)
    pub fn reset_collectibles(&mut self) {
        for lane in &mut self.lanes {
            if let Some(collectibles) = lane.collectibles_mut() {
                for c in collectibles.iter_mut() {
                    c.collected = false;
                }
            }
        }
    }

    /// Number of collectibles not yet picked up
    pub fn remaining_collectibles(&self) -> usize {
        self.lanes
            .iter()
            .flat_map(|l| l.collectibles())
            .filter(|c| !c.collected)
            .count()
    }
}
