//=========================================================================
// Level Configuration
//=========================================================================
//
// Everything that distinguishes Level-A from Level-B, plus the tuning
// constants both share.
//
// The two levels run the same `PlatformerLevel` logic; a `LevelConfig`
// switches on the differences:
//
//   Level-A: starts at 0, persists its score on completion
//   Level-B: starts from the carried score, has patrolling enemies,
//            clamps bodies to the map and pins the HUD to the camera
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

//=== Internal Dependencies ===============================================

use super::definition::MapSource;
use super::GameScene;
use crate::core::physics::Vec2;
use crate::core::presentation::{AnimationClip, AssetKind, AssetRequest};

//=== Tuning ==============================================================

/// Score needed before the goal marker lets the player through.
pub const REQUIRED_SCORE: u32 = 5;

/// Player speed along the single active axis, px/s.
pub const PLAYER_SPEED: f32 = 160.0;

/// Initial enemy patrol speed, px/s.
pub const ENEMY_SPEED: f32 = 100.0;

pub const PLAYER_BOUNCE: f32 = 0.2;

/// Vertical bounce range for stars, `[min, max)`.
pub const STAR_BOUNCE_RANGE: (f32, f32) = (0.4, 0.8);

/// Enemies keep full horizontal speed after hitting a wall.
pub const ENEMY_BOUNCE: Vec2 = Vec2::new(1.0, 0.0);

//=== Asset Keys ==========================================================

pub const TILESET_KEY: &str = "tileset";
pub const STAR_KEY: &str = "star";
pub const GOAL_KEY: &str = "meta";
pub const PLAYER_SHEET: &str = "dude3";
pub const ENEMY_SHEET: &str = "enemigo2";

//=== Animation Clips =====================================================

pub const CLIP_LEFT: &str = "left";
pub const CLIP_RIGHT: &str = "right";
pub const CLIP_UP: &str = "up";
pub const CLIP_DOWN: &str = "down";
pub const CLIP_IDLE: &str = "turn";
pub const CLIP_ENEMY_RIGHT: &str = "enemy_right";
pub const CLIP_ENEMY_LEFT: &str = "enemy_left";

const fn walk(key: &'static str, sheet: &'static str, first: u32, last: u32) -> AnimationClip {
    AnimationClip {
        key,
        sheet,
        first_frame: first,
        last_frame: last,
        frame_rate: 10.0,
        looping: true,
    }
}

pub const PLAYER_CLIPS: [AnimationClip; 5] = [
    walk(CLIP_DOWN, PLAYER_SHEET, 0, 3),
    walk(CLIP_LEFT, PLAYER_SHEET, 4, 7),
    walk(CLIP_RIGHT, PLAYER_SHEET, 8, 11),
    walk(CLIP_UP, PLAYER_SHEET, 12, 15),
    AnimationClip {
        key: CLIP_IDLE,
        sheet: PLAYER_SHEET,
        first_frame: 0,
        last_frame: 0,
        frame_rate: 20.0,
        looping: false,
    },
];

pub const ENEMY_CLIPS: [AnimationClip; 2] = [
    walk(CLIP_ENEMY_RIGHT, ENEMY_SHEET, 6, 8),
    walk(CLIP_ENEMY_LEFT, ENEMY_SHEET, 3, 5),
];

//=== HudLayout ===========================================================

/// Screen placement of the score label and the star icon row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    pub label_position: Vec2,
    /// Position of icon 0; icon `i` sits `i * icon_spacing` to its right.
    pub icon_origin: Vec2,
    pub icon_spacing: f32,
    pub icon_scale: f32,
}

impl HudLayout {
    pub fn icon_position(&self, index: usize) -> Vec2 {
        Vec2::new(
            self.icon_origin.x + index as f32 * self.icon_spacing,
            self.icon_origin.y,
        )
    }
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            label_position: Vec2::new(2.0, 0.0),
            icon_origin: Vec2::new(400.0, 10.0),
            icon_spacing: 32.0,
            icon_scale: 0.5,
        }
    }
}

//=== LevelConfig =========================================================

/// Per-level settings for [`super::PlatformerLevel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    /// Scene this level is registered under.
    pub key: GameScene,

    /// Scene entered when the goal is satisfied.
    pub next: GameScene,

    /// Asset key of the tilemap.
    pub map_key: String,
    pub map: MapSource,

    /// Name of the Tiled object layer holding spawn, stars, goals, enemies.
    pub object_layer: String,

    pub required_score: u32,

    /// Start from the carried score instead of 0.
    pub carries_score: bool,

    /// Write the score into the handoff when the goal is satisfied.
    pub persists_score: bool,

    pub enemies_enabled: bool,

    /// Clamp bodies to the map's pixel rectangle.
    pub bounds_from_map: bool,

    /// HUD ignores camera scrolling.
    pub hud_pinned: bool,

    pub hud: HudLayout,
}

impl LevelConfig {
    //--- Presets ----------------------------------------------------------

    /// First level: fresh score, hands its score on.
    pub fn level_a() -> Self {
        Self {
            key: GameScene::LevelA,
            next: GameScene::LevelB,
            map_key: "level_a".to_string(),
            map: MapSource::File(PathBuf::from("assets/tilemap/level_a.json")),
            object_layer: "Objetos".to_string(),
            required_score: REQUIRED_SCORE,
            carries_score: false,
            persists_score: true,
            enemies_enabled: false,
            bounds_from_map: false,
            hud_pinned: false,
            hud: HudLayout::default(),
        }
    }

    /// Second level: carried score, enemies, map bounds, pinned HUD.
    ///
    /// Its goal leads back to Level-A without persisting.
    pub fn level_b() -> Self {
        Self {
            key: GameScene::LevelB,
            next: GameScene::LevelA,
            map_key: "level_b".to_string(),
            map: MapSource::File(PathBuf::from("assets/tilemap/level_b.json")),
            object_layer: "Objetos".to_string(),
            required_score: REQUIRED_SCORE,
            carries_score: true,
            persists_score: false,
            enemies_enabled: true,
            bounds_from_map: true,
            hud_pinned: true,
            hud: HudLayout::default(),
        }
    }

    //--- Overrides --------------------------------------------------------

    pub fn with_map_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.map = MapSource::File(path.into());
        self
    }

    /// Uses an in-memory Tiled JSON document instead of a file.
    pub fn with_map_json(mut self, json: impl Into<String>) -> Self {
        self.map = MapSource::Inline(json.into());
        self
    }

    pub fn with_object_layer(mut self, name: impl Into<String>) -> Self {
        self.object_layer = name.into();
        self
    }

    pub fn with_hud_layout(mut self, hud: HudLayout) -> Self {
        self.hud = hud;
        self
    }

    //--- Derived Data -----------------------------------------------------

    /// Assets the renderer must load before the level is built.
    pub fn asset_manifest(&self) -> Vec<AssetRequest> {
        let mut manifest = vec![
            AssetRequest {
                key: self.map_key.clone(),
                path: self.map.asset_path(),
                kind: AssetKind::Tilemap,
            },
            image(TILESET_KEY, "assets/texture2.png"),
            image(STAR_KEY, "assets/star.png"),
            image(GOAL_KEY, "assets/meta.png"),
            sheet(PLAYER_SHEET, "assets/dude3.png", 39),
        ];

        if self.enemies_enabled {
            manifest.push(sheet(ENEMY_SHEET, "assets/enemigo2.png", 26));
        }

        manifest
    }

    /// Animation clips this level plays.
    pub fn clips(&self) -> Vec<AnimationClip> {
        let mut clips = PLAYER_CLIPS.to_vec();
        if self.enemies_enabled {
            clips.extend_from_slice(&ENEMY_CLIPS);
        }
        clips
    }
}

fn image(key: &str, path: &str) -> AssetRequest {
    AssetRequest {
        key: key.to_string(),
        path: path.to_string(),
        kind: AssetKind::Image,
    }
}

fn sheet(key: &str, path: &str, frame: u32) -> AssetRequest {
    AssetRequest {
        key: key.to_string(),
        path: path.to_string(),
        kind: AssetKind::SpriteSheet {
            frame_width: frame,
            frame_height: frame,
        },
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_chain_in_both_directions() {
        let a = LevelConfig::level_a();
        let b = LevelConfig::level_b();

        assert_eq!((a.key, a.next), (GameScene::LevelA, GameScene::LevelB));
        assert_eq!((b.key, b.next), (GameScene::LevelB, GameScene::LevelA));
        assert_eq!(a.required_score, 5);
        assert_eq!(b.required_score, 5);
    }

    #[test]
    fn only_level_a_persists_and_only_level_b_carries() {
        let a = LevelConfig::level_a();
        let b = LevelConfig::level_b();

        assert!(a.persists_score && !a.carries_score);
        assert!(b.carries_score && !b.persists_score);
    }

    #[test]
    fn enemy_sheet_only_requested_with_enemies() {
        let a = LevelConfig::level_a().asset_manifest();
        let b = LevelConfig::level_b().asset_manifest();

        assert!(a.iter().all(|r| r.key != ENEMY_SHEET));
        let enemy = b.iter().find(|r| r.key == ENEMY_SHEET).unwrap();
        assert_eq!(enemy.kind, AssetKind::SpriteSheet { frame_width: 26, frame_height: 26 });
    }

    #[test]
    fn manifest_starts_with_tilemap() {
        let manifest = LevelConfig::level_a().with_map_json("{}").asset_manifest();
        assert_eq!(manifest[0].kind, AssetKind::Tilemap);
        assert_eq!(manifest[0].path, "<inline>");
    }

    #[test]
    fn idle_clip_is_single_frame() {
        let idle = PLAYER_CLIPS.iter().find(|c| c.key == CLIP_IDLE).unwrap();
        assert_eq!((idle.first_frame, idle.last_frame), (0, 0));
        assert!(!idle.looping);
    }

    #[test]
    fn hud_icons_are_spaced_horizontally() {
        let layout = HudLayout::default();
        assert_eq!(layout.icon_position(0), Vec2::new(400.0, 10.0));
        assert_eq!(layout.icon_position(3), Vec2::new(496.0, 10.0));
    }
}
