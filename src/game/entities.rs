//=========================================================================
// Level Entities
//=========================================================================
//
// Logic-side mirrors of the bodies a level spawns.
//
// The physics service owns the real bodies. These structs keep what the
// level logic needs between ticks (which body is which, whether a star
// is still active, the last velocity reported for an enemy, which clip
// is playing) so commands are only sent when something changes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::{
    CLIP_DOWN, CLIP_ENEMY_LEFT, CLIP_ENEMY_RIGHT, CLIP_IDLE, CLIP_LEFT, CLIP_RIGHT, CLIP_UP,
    PLAYER_SPEED,
};
use crate::core::physics::{BodyId, Vec2};

//=== Direction ===========================================================

/// Single axis of player movement for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Resolution order when several directions are held.
    pub const PRIORITY: [Direction; 4] =
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn velocity(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-PLAYER_SPEED, 0.0),
            Direction::Right => Vec2::new(PLAYER_SPEED, 0.0),
            Direction::Up => Vec2::new(0.0, -PLAYER_SPEED),
            Direction::Down => Vec2::new(0.0, PLAYER_SPEED),
        }
    }

    pub const fn clip(self) -> &'static str {
        match self {
            Direction::Left => CLIP_LEFT,
            Direction::Right => CLIP_RIGHT,
            Direction::Up => CLIP_UP,
            Direction::Down => CLIP_DOWN,
        }
    }
}

//=== Player ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Clip last sent to the presenter; `None` until the first tick.
    pub clip: Option<&'static str>,
}

impl Player {
    pub fn new(body: BodyId, position: Vec2) -> Self {
        Self {
            body,
            position,
            velocity: Vec2::ZERO,
            clip: None,
        }
    }

    /// Sets velocity and clip for this tick's direction.
    ///
    /// Returns the clip to play if it differs from the current one.
    pub fn steer(&mut self, direction: Option<Direction>) -> Option<&'static str> {
        let (velocity, clip) = match direction {
            Some(dir) => (dir.velocity(), dir.clip()),
            None => (Vec2::ZERO, CLIP_IDLE),
        };

        self.velocity = velocity;
        switch_clip(&mut self.clip, clip)
    }
}

//=== Collectible =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub body: BodyId,
    pub position: Vec2,
    pub active: bool,
}

impl Collectible {
    pub fn new(body: BodyId, position: Vec2) -> Self {
        Self {
            body,
            position,
            active: true,
        }
    }

    /// Deactivates the star; `false` if it was already inactive.
    pub fn collect(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

//=== GoalMarker ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GoalMarker {
    pub body: BodyId,
    pub position: Vec2,
}

//=== Enemy ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: BodyId,
    pub position: Vec2,
    /// Last horizontal velocity reported by the physics service.
    pub velocity_x: f32,
    pub clip: Option<&'static str>,
}

impl Enemy {
    pub fn new(body: BodyId, position: Vec2, velocity_x: f32) -> Self {
        Self {
            body,
            position,
            velocity_x,
            clip: None,
        }
    }

    /// Matches the clip to the sign of the velocity; zero keeps the clip.
    ///
    /// Returns the clip to play if it changed.
    pub fn sync_clip(&mut self) -> Option<&'static str> {
        let wanted = if self.velocity_x > 0.0 {
            CLIP_ENEMY_RIGHT
        } else if self.velocity_x < 0.0 {
            CLIP_ENEMY_LEFT
        } else {
            return None;
        };

        switch_clip(&mut self.clip, wanted)
    }
}

//--- Helpers -------------------------------------------------------------

fn switch_clip(current: &mut Option<&'static str>, wanted: &'static str) -> Option<&'static str> {
    if *current == Some(wanted) {
        None
    } else {
        *current = Some(wanted);
        Some(wanted)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
