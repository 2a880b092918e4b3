//=========================================================================
// Presentation Boundary
//=========================================================================
//
// Contract between scenes and the external renderer (assets, sprite
// animation, HUD text and icons).
//
// Scenes push `PresentCommand`s; the configured `Presenter` drains them
// once per tick. Decoding images, drawing and playing frames all happen
// on the other side of this boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::message_bus::MessageBus;
use super::physics::{BodyId, Vec2};

//=== Assets ==============================================================

/// What kind of resource an [`AssetRequest`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Tiled JSON map.
    Tilemap,

    /// Single image (tileset, pickup, marker).
    Image,

    /// Grid of equally sized animation frames.
    SpriteSheet { frame_width: u32, frame_height: u32 },
}

/// One resource a scene needs loaded before it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: String,
    pub path: String,
    pub kind: AssetKind,
}

//=== Animation ===========================================================

/// Frame range on a sprite sheet played as one named clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub key: &'static str,
    pub sheet: &'static str,
    pub first_frame: u32,
    pub last_frame: u32,
    pub frame_rate: f32,
    pub looping: bool,
}

//=== HUD =================================================================

/// A single HUD icon with its tint as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudIcon {
    pub position: Vec2,
    pub scale: f32,
    pub tint: u32,
}

/// Complete HUD contents; each frame replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct HudFrame {
    pub label: String,
    pub label_position: Vec2,
    pub icons: Vec<HudIcon>,
    /// Pinned HUDs ignore camera scrolling.
    pub pinned: bool,
}

//=== Messages ============================================================

/// Requests from a scene to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentCommand {
    LoadAssets(Vec<AssetRequest>),
    DefineClips(Vec<AnimationClip>),
    PlayClip { body: BodyId, clip: &'static str },
    Hud(HudFrame),
}

//=== Presenter ===========================================================

/// External rendering backend.
pub trait Presenter: Send {
    fn present(&mut self, commands: Vec<PresentCommand>);
}

/// Presenter that discards everything.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, commands: Vec<PresentCommand>) {
        if !commands.is_empty() {
            trace!(target: "present", "NullPresenter discarded {} commands", commands.len());
        }
    }
}

//--- present_pending() ---------------------------------------------------
//
// Drains this tick's presentation commands into the presenter.
//
pub(crate) fn present_pending(presenter: &mut dyn Presenter, bus: &mut MessageBus) {
    let commands = bus.drain::<PresentCommand>();
    if !commands.is_empty() {
        presenter.present(commands);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
