//=========================================================================
// Physics Service Boundary
//=========================================================================
//
// Contract between scenes and the external physics/collision service.
//
// The engine does not simulate anything itself. Scenes describe bodies
// and contact subscriptions with `BodyCommand`s; the service integrates
// motion, resolves collisions and reports back with `PhysicsEvent`s.
//
// Flow (one tick):
// ```text
//   Scene::update ──push──> BodyCommand ──> PhysicsService::step
//        ↑                                         │
//        └──────── read ── PhysicsEvent <──push────┘  (next tick)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::message_bus::MessageBus;

//=== Geometry ============================================================

/// 2D vector in world pixels (positions) or pixels/second (velocities).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== Bodies ==============================================================

/// Opaque handle for a body owned by the physics service.
///
/// Handles are never reused within a scene, so events addressed to a
/// body from a previous build simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Collision group a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Player,
    Collectible,
    Goal,
    Enemy,
}

/// How the service should report contact between two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactMode {
    /// Bodies are separated and the contact is reported.
    Collide,

    /// Bodies pass through each other; overlap is reported every step.
    Overlap,
}

/// Physical parameters for a new body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Restitution per axis (1.0 keeps full speed after a bounce).
    pub bounce: Vec2,
    pub collide_world_bounds: bool,
    /// Static bodies never move and ignore velocity.
    pub is_static: bool,
}

//=== Messages ============================================================

/// Requests from a scene to the physics service.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCommand {
    /// Removes every body and subscription owned by the scene.
    Clear,

    /// Creates a body.
    Spawn { body: BodyId, spec: BodySpec },

    /// Removes a body from simulation and hides it.
    Disable { body: BodyId },

    /// Overrides a body's velocity for the next step.
    SetVelocity { body: BodyId, velocity: Vec2 },

    /// Sets the rectangle bodies with `collide_world_bounds` stay inside.
    SetWorldBounds { width: f32, height: f32 },

    /// Asks for contacts between groups `a` and `b` to be reported.
    Subscribe { a: BodyKind, b: BodyKind, mode: ContactMode },
}

/// Reports from the physics service, consumed by scenes on the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    /// Two bodies in subscribed groups touched during the last step.
    Contact { a: BodyId, b: BodyId, mode: ContactMode },

    /// A dynamic body's state after the last step.
    Moved { body: BodyId, position: Vec2, velocity: Vec2 },
}

//=== PhysicsService ======================================================

/// External physics/collision backend.
///
/// Called once per tick after scenes have updated. Implementations drain
/// `BodyCommand`s from the bus and push `PhysicsEvent`s describing the
/// step they just simulated.
pub trait PhysicsService: Send {
    fn step(&mut self, dt: f32, bus: &mut MessageBus);
}

/// Backend that accepts commands and never reports anything.
///
/// Default for engines built without a physics backend; levels stay
/// responsive to input but no contacts ever occur.
#[derive(Debug, Default)]
pub struct NullPhysics;

impl PhysicsService for NullPhysics {
    fn step(&mut self, _dt: f32, bus: &mut MessageBus) {
        let dropped = bus.drain::<BodyCommand>().len();
        if dropped > 0 {
            trace!(target: "physics", "NullPhysics discarded {} body commands", dropped);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_physics_consumes_commands_without_events() {
        let mut bus = MessageBus::new();
        bus.push(BodyCommand::Clear);
        bus.push(BodyCommand::Disable { body: BodyId(4) });

        NullPhysics.step(1.0 / 60.0, &mut bus);

        assert!(!bus.has_messages::<BodyCommand>());
        assert!(!bus.has_messages::<PhysicsEvent>());
    }

    #[test]
    fn body_ids_order_by_allocation() {
        assert!(BodyId(1) < BodyId(2));
    }

    #[test]
    fn vec2_zero_is_default() {
        assert_eq!(Vec2::default(), Vec2::ZERO);
        assert_eq!(Vec2::new(3.0, -1.0).y, -1.0);
    }
}
