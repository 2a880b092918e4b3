//=========================================================================
// Level Controller
//=========================================================================
//
// Progression and scoring state machine shared by both levels.
//
// Lifecycle:
// ```text
//   Uninitialized ──init──> Loading ──load_assets──> Loading
//        ↑                                             │ build_scene
//        │                                             ↓
//      on_exit <── Transitioning <──goal── Active ──enemy / R──> Restarting
//                                            ↑                      │
//                                            └──── init + build ────┘
// ```
//
// Per tick (as a `Scene`):
//   1. Physics events from the last step: contacts are routed to
//      on_collect / on_goal_contact / on_enemy_contact, motion reports
//      update the entity mirrors.
//   2. Player steering, enemy clips and the restart trigger.
//
// Outputs go through the message bus: `BodyCommand` for the physics
// service, `PresentCommand` for the renderer, `SceneTransition` when the
// goal is satisfied.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::config::{
    LevelConfig, ENEMY_BOUNCE, ENEMY_SPEED, PLAYER_BOUNCE, STAR_BOUNCE_RANGE,
};
use super::contacts::{ContactHandler, ContactRouter};
use super::definition::{EntityTag, LevelDefinition, MapLayer};
use super::entities::{Collectible, Direction, Enemy, GoalMarker, Player};
use super::error::LevelError;
use super::state::LevelState;
use super::{GameAction, GameContext, GameScene};
use crate::core::input::ActionState;
use crate::core::physics::{BodyCommand, BodyId, BodyKind, BodySpec, ContactMode, PhysicsEvent, Vec2};
use crate::core::presentation::PresentCommand;
use crate::core::scene::{Scene, SceneError, SceneTransition};

//=== Phases & Outcomes ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    Uninitialized,
    Loading,
    Active,
    Restarting,
    Transitioning,
}

/// Result of a player/star contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected { score: u32 },
    /// Star already inactive or not part of this build. Nothing changed.
    AlreadyCollected,
}

/// Result of a player/goal contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Transition to `next` has been requested.
    Advanced { next: GameScene },
    ThresholdNotMet { score: u32, required: u32 },
    /// Level already transitioning, or the body is not a goal of this build.
    Ignored,
}

//=== FrameInput ==========================================================

/// Input a level consumes on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub direction: Option<Direction>,
    /// Restart key went down this tick.
    pub restart: bool,
}

impl FrameInput {
    /// Reads held directions (left > right > up > down) and the restart edge.
    pub fn from_actions(actions: &ActionState<GameAction>) -> Self {
        let direction = Direction::PRIORITY
            .into_iter()
            .find(|dir| actions.is_down(GameAction::from(*dir)));

        Self {
            direction,
            restart: actions.is_pressed(GameAction::Restart),
        }
    }
}

//=== LevelController =====================================================

/// Lifecycle hooks and contact handlers of a level.
///
/// Hooks write their outputs into the context's message bus; only
/// `on_goal_contact` touches the progress handoff.
pub trait LevelController {
    /// Resets the score: the carried score when the level chains, else 0.
    fn init(&mut self, carried_score: u32);

    /// Requests assets and clips from the renderer and parses the level
    /// definition on first use.
    fn load_assets(&mut self, context: &mut GameContext) -> Result<(), LevelError>;

    /// Spawns every body, registers contact subscriptions and shows the HUD.
    fn build_scene(&mut self, context: &mut GameContext) -> Result<(), LevelError>;

    fn per_frame_update(
        &mut self,
        input: FrameInput,
        context: &mut GameContext,
    ) -> Result<(), LevelError>;

    fn on_collect(&mut self, star: BodyId, context: &mut GameContext) -> CollectOutcome;

    fn on_goal_contact(&mut self, goal: BodyId, context: &mut GameContext) -> GoalOutcome;

    fn on_enemy_contact(&mut self, enemy: BodyId, context: &mut GameContext) -> Result<(), LevelError>;

    /// Re-runs `init` with the current handoff and rebuilds the scene.
    fn restart(&mut self, context: &mut GameContext) -> Result<(), LevelError>;
}

//=== PlatformerLevel =====================================================

/// One tile-map level, parameterized by [`LevelConfig`].
pub struct PlatformerLevel {
    config: LevelConfig,
    definition: Option<LevelDefinition>,
    phase: LevelPhase,
    initial_score: u32,
    state: LevelState,

    player: Option<Player>,
    collectibles: Vec<Collectible>,
    goals: Vec<GoalMarker>,
    enemies: Vec<Enemy>,

    contacts: ContactRouter,
    next_body: u32,
}

impl PlatformerLevel {
    //--- Construction -----------------------------------------------------

    pub fn new(config: LevelConfig) -> Self {
        Self {
            config,
            definition: None,
            phase: LevelPhase::Uninitialized,
            initial_score: 0,
            state: LevelState::default(),
            player: None,
            collectibles: Vec::new(),
            goals: Vec::new(),
            enemies: Vec::new(),
            contacts: ContactRouter::new(),
            next_body: 1,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn goals(&self) -> &[GoalMarker] {
        &self.goals
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    //--- Internal Helpers -------------------------------------------------

    /// Hands out a body id; ids are never reused by this level.
    fn allocate_body(&mut self) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        id
    }

    fn spawn(&mut self, spec: BodySpec, context: &mut GameContext) -> BodyId {
        let body = self.allocate_body();
        self.contacts.register_body(body, spec.kind);
        context.message_bus.push(BodyCommand::Spawn { body, spec });
        body
    }

    fn accepted_tags(&self) -> &'static [EntityTag] {
        if self.config.enemies_enabled {
            &EntityTag::ORDER
        } else {
            &[EntityTag::Star, EntityTag::Goal]
        }
    }

    fn push_hud(&self, context: &mut GameContext) {
        let frame = self.state.hud_frame(&self.config.hud, self.config.hud_pinned);
        context.message_bus.push(PresentCommand::Hud(frame));
    }

    fn clear_entities(&mut self) {
        self.contacts.reset();
        self.player = None;
        self.collectibles.clear();
        self.goals.clear();
        self.enemies.clear();
    }

    fn dispatch_contact(&mut self, a: BodyId, b: BodyId, mode: ContactMode, context: &mut GameContext) {
        let Some((handler, target)) = self.contacts.route(a, b, mode) else {
            return;
        };

        match handler {
            ContactHandler::Collect => {
                self.on_collect(target, context);
            }
            ContactHandler::Goal => {
                self.on_goal_contact(target, context);
            }
            ContactHandler::Enemy => {
                if let Err(e) = self.on_enemy_contact(target, context) {
                    error!(target: "level", "{:?} failed to restart: {}", self.config.key, e);
                }
            }
        }
    }

    fn apply_motion(&mut self, body: BodyId, position: Vec2, velocity: Vec2) {
        match self.contacts.kind_of(body) {
            Some(BodyKind::Player) => {
                if let Some(player) = self.player.as_mut() {
                    player.position = position;
                    player.velocity = velocity;
                }
            }
            Some(BodyKind::Enemy) => {
                if let Some(enemy) = self.enemies.iter_mut().find(|e| e.body == body) {
                    enemy.position = position;
                    enemy.velocity_x = velocity.x;
                }
            }
            Some(BodyKind::Collectible) => {
                if let Some(star) = self.collectibles.iter_mut().find(|c| c.body == body) {
                    star.position = position;
                }
            }
            Some(BodyKind::Goal) | None => {}
        }
    }
}

//=== LevelController Implementation ======================================

impl LevelController for PlatformerLevel {
    //--- init() -----------------------------------------------------------

    fn init(&mut self, carried_score: u32) {
        self.initial_score = if self.config.carries_score {
            carried_score
        } else {
            0
        };
        self.phase = LevelPhase::Loading;

        info!(target: "level", "{:?} init (score {})", self.config.key, self.initial_score);
    }

    //--- load_assets() ----------------------------------------------------

    fn load_assets(&mut self, context: &mut GameContext) -> Result<(), LevelError> {
        self.phase = LevelPhase::Loading;

        context
            .message_bus
            .push(PresentCommand::LoadAssets(self.config.asset_manifest()));
        context
            .message_bus
            .push(PresentCommand::DefineClips(self.config.clips()));

        if self.definition.is_none() {
            let definition = LevelDefinition::load(&self.config.map)?;
            debug!(
                target: "level",
                "{:?} definition loaded ({}x{} tiles)",
                self.config.key, definition.width, definition.height
            );
            self.definition = Some(definition);
        }

        Ok(())
    }

    //--- build_scene() ----------------------------------------------------
    //
    // Everything that can fail is read from the definition first, so an
    // error leaves the previous build untouched.
    //
    fn build_scene(&mut self, context: &mut GameContext) -> Result<(), LevelError> {
        let definition = self.definition.as_ref().ok_or(LevelError::NotLoaded)?;
        let layer = definition.object_layer(&self.config.object_layer)?;
        let spawn = layer.spawn_point().ok_or_else(|| LevelError::MissingSpawnPoint {
            level: format!("{:?}", self.config.key),
        })?;

        let accepted = self.accepted_tags();
        let entries: Vec<(EntityTag, Vec2)> = layer
            .objects
            .iter()
            .filter_map(|obj| MapLayer::classify(obj, accepted).map(|tag| (tag, obj.position())))
            .collect();
        let (map_width, map_height) = definition.pixel_size();

        //--- Reset ----------------------------------------------------------
        self.clear_entities();
        context.message_bus.push(BodyCommand::Clear);

        //--- Bodies ---------------------------------------------------------
        let player_body = self.spawn(
            BodySpec {
                kind: BodyKind::Player,
                position: spawn,
                velocity: Vec2::ZERO,
                bounce: Vec2::new(PLAYER_BOUNCE, PLAYER_BOUNCE),
                collide_world_bounds: true,
                is_static: false,
            },
            context,
        );
        self.player = Some(Player::new(player_body, spawn));

        let mut rng = rand::thread_rng();
        for (tag, position) in entries {
            match tag {
                EntityTag::Star => {
                    let bounce_y = rng.gen_range(STAR_BOUNCE_RANGE.0..STAR_BOUNCE_RANGE.1);
                    let body = self.spawn(
                        BodySpec {
                            kind: BodyKind::Collectible,
                            position,
                            velocity: Vec2::ZERO,
                            bounce: Vec2::new(0.0, bounce_y),
                            collide_world_bounds: false,
                            is_static: false,
                        },
                        context,
                    );
                    self.collectibles.push(Collectible::new(body, position));
                }
                EntityTag::Goal => {
                    let body = self.spawn(
                        BodySpec {
                            kind: BodyKind::Goal,
                            position,
                            velocity: Vec2::ZERO,
                            bounce: Vec2::ZERO,
                            collide_world_bounds: false,
                            is_static: true,
                        },
                        context,
                    );
                    self.goals.push(GoalMarker { body, position });
                }
                EntityTag::Enemy => {
                    let body = self.spawn(
                        BodySpec {
                            kind: BodyKind::Enemy,
                            position,
                            velocity: Vec2::new(ENEMY_SPEED, 0.0),
                            bounce: ENEMY_BOUNCE,
                            collide_world_bounds: true,
                            is_static: false,
                        },
                        context,
                    );
                    self.enemies.push(Enemy::new(body, position, ENEMY_SPEED));
                }
            }
        }

        if self.config.bounds_from_map {
            context.message_bus.push(BodyCommand::SetWorldBounds {
                width: map_width,
                height: map_height,
            });
        }

        //--- Subscriptions --------------------------------------------------
        let mut subscriptions = vec![
            self.contacts.subscribe(
                BodyKind::Player,
                BodyKind::Collectible,
                ContactMode::Collide,
                ContactHandler::Collect,
            ),
            self.contacts.subscribe(
                BodyKind::Player,
                BodyKind::Goal,
                ContactMode::Overlap,
                ContactHandler::Goal,
            ),
        ];
        if self.config.enemies_enabled {
            subscriptions.push(self.contacts.subscribe(
                BodyKind::Player,
                BodyKind::Enemy,
                ContactMode::Collide,
                ContactHandler::Enemy,
            ));
        }
        for command in subscriptions {
            context.message_bus.push(command);
        }

        //--- State & HUD ----------------------------------------------------
        self.state = LevelState::new(self.initial_score, self.collectibles.len() as u32);
        self.phase = LevelPhase::Active;
        self.push_hud(context);

        info!(
            target: "level",
            "{:?} built: {} stars, {} goals, {} enemies",
            self.config.key,
            self.collectibles.len(),
            self.goals.len(),
            self.enemies.len()
        );

        Ok(())
    }

    //--- per_frame_update() -----------------------------------------------

    fn per_frame_update(
        &mut self,
        input: FrameInput,
        context: &mut GameContext,
    ) -> Result<(), LevelError> {
        if input.restart {
            info!(target: "level", "{:?} restart requested", self.config.key);
            return self.restart(context);
        }

        if let Some(player) = self.player.as_mut() {
            if let Some(clip) = player.steer(input.direction) {
                context
                    .message_bus
                    .push(PresentCommand::PlayClip { body: player.body, clip });
            }
            context.message_bus.push(BodyCommand::SetVelocity {
                body: player.body,
                velocity: player.velocity,
            });
        }

        for enemy in &mut self.enemies {
            if let Some(clip) = enemy.sync_clip() {
                context
                    .message_bus
                    .push(PresentCommand::PlayClip { body: enemy.body, clip });
            }
        }

        Ok(())
    }

    //--- on_collect() -----------------------------------------------------

    fn on_collect(&mut self, star: BodyId, context: &mut GameContext) -> CollectOutcome {
        let collected = self
            .collectibles
            .iter_mut()
            .find(|c| c.body == star)
            .is_some_and(Collectible::collect);

        if !collected {
            debug!(target: "level", "Star {:?} already collected", star);
            return CollectOutcome::AlreadyCollected;
        }

        self.state.record_collect();
        context.message_bus.push(BodyCommand::Disable { body: star });
        self.push_hud(context);

        debug!(
            target: "level",
            "Collected {:?}: score {} ({}/{})",
            star, self.state.score, self.state.collected_count, self.state.total_collectibles
        );

        CollectOutcome::Collected {
            score: self.state.score,
        }
    }

    //--- on_goal_contact() ------------------------------------------------

    fn on_goal_contact(&mut self, goal: BodyId, context: &mut GameContext) -> GoalOutcome {
        if self.phase != LevelPhase::Active || self.state.goal_reached {
            return GoalOutcome::Ignored;
        }

        if !self.goals.iter().any(|g| g.body == goal) {
            warn!(target: "level", "Contact with unknown goal {:?}", goal);
            return GoalOutcome::Ignored;
        }

        let required = self.config.required_score;
        if !self.state.meets(required) {
            debug!(
                target: "level",
                "Goal needs {} stars, have {}",
                required, self.state.score
            );
            return GoalOutcome::ThresholdNotMet {
                score: self.state.score,
                required,
            };
        }

        self.state.goal_reached = true;
        self.phase = LevelPhase::Transitioning;

        if self.config.persists_score {
            context.progress.store(self.state.score);
        }

        let next = self.config.next;
        context
            .message_bus
            .push(SceneTransition::Replace(self.config.key, next));

        info!(
            target: "level",
            "{:?} complete with score {}, moving to {:?}",
            self.config.key, self.state.score, next
        );

        GoalOutcome::Advanced { next }
    }

    //--- on_enemy_contact() -----------------------------------------------

    fn on_enemy_contact(&mut self, enemy: BodyId, context: &mut GameContext) -> Result<(), LevelError> {
        if self.phase != LevelPhase::Active {
            return Ok(());
        }

        info!(target: "level", "{:?} player hit enemy {:?}", self.config.key, enemy);
        self.restart(context)
    }

    //--- restart() --------------------------------------------------------

    fn restart(&mut self, context: &mut GameContext) -> Result<(), LevelError> {
        self.phase = LevelPhase::Restarting;
        self.init(context.progress.carried_score());
        self.build_scene(context)
    }
}

//=== Scene Implementation ================================================

impl Scene<GameScene, GameAction> for PlatformerLevel {
    fn on_enter(&mut self, context: &mut GameContext) -> Result<(), SceneError> {
        let key = self.config.key;
        self.init(context.progress.carried_score());

        let result = self
            .load_assets(context)
            .and_then(|()| self.build_scene(context));

        result.map_err(|e| {
            self.phase = LevelPhase::Uninitialized;
            SceneError::with_source(format!("entering {:?} failed", key), e)
        })
    }

    fn on_exit(&mut self, context: &mut GameContext) {
        self.clear_entities();
        self.phase = LevelPhase::Uninitialized;
        context.message_bus.push(BodyCommand::Clear);

        debug!(target: "level", "{:?} exited", self.config.key);
    }

    fn update(&mut self, context: &mut GameContext) {
        if self.phase != LevelPhase::Active {
            return;
        }

        //--- 1. Physics reports -----------------------------------------
        let events: Vec<PhysicsEvent> = context.message_bus.read::<PhysicsEvent>().to_vec();
        for event in events {
            if self.phase != LevelPhase::Active {
                break;
            }

            match event {
                PhysicsEvent::Contact { a, b, mode } => self.dispatch_contact(a, b, mode, context),
                PhysicsEvent::Moved { body, position, velocity } => {
                    self.apply_motion(body, position, velocity)
                }
            }
        }

        //--- 2. Input ---------------------------------------------------
        if self.phase != LevelPhase::Active {
            return;
        }

        let input = FrameInput::from_actions(&context.actions);
        if let Err(e) = self.per_frame_update(input, context) {
            error!(target: "level", "{:?} update failed: {}", self.config.key, e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
