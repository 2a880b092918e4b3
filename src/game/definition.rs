//=========================================================================
// Level Definition
//=========================================================================
//
// Serde model of the Tiled JSON map a level is built from.
//
// Only the parts the level logic reads are modelled: map size, layer
// names and the objects of object layers. Tile data is decoded by the
// renderer and ignored here.
//
// Tags:
//   An object carries its tag in `type` (Tiled < 1.9), `class`
//   (Tiled >= 1.9) or `name`. `EntityTag::matches` accepts any of them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::error::LevelError;
use crate::core::physics::Vec2;

//=== MapSource ===========================================================

/// Where a level's Tiled JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    File(PathBuf),
    Inline(String),
}

impl MapSource {
    /// Path reported to the renderer's asset loader.
    pub fn asset_path(&self) -> String {
        match self {
            MapSource::File(path) => path.display().to_string(),
            MapSource::Inline(_) => "<inline>".to_string(),
        }
    }
}

//=== Tiled Model =========================================================

/// Root of a Tiled JSON map.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapLayer {
    pub name: String,

    /// `"tilelayer"` or `"objectgroup"`.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub objects: Vec<MapObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub class: String,

    #[serde(default)]
    pub x: f32,

    #[serde(default)]
    pub y: f32,
}

impl MapObject {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

//=== EntityTag ===========================================================

/// Object tags the level logic understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Star,
    Goal,
    Enemy,
}

impl EntityTag {
    /// Classification order; the first matching tag wins.
    pub const ORDER: [EntityTag; 3] = [EntityTag::Star, EntityTag::Goal, EntityTag::Enemy];

    pub const fn as_str(self) -> &'static str {
        match self {
            EntityTag::Star => "star",
            EntityTag::Goal => "meta",
            EntityTag::Enemy => "enemigo",
        }
    }

    pub fn matches(self, object: &MapObject) -> bool {
        let tag = self.as_str();
        object.kind == tag || object.class == tag || object.name == tag
    }
}

/// Object name marking the player spawn anchor.
pub const SPAWN_NAME: &str = "player";

//=== LevelDefinition API =================================================

impl LevelDefinition {
    //--- Loading ----------------------------------------------------------

    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LevelError> {
        let json = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "level", "Read level definition {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn load(source: &MapSource) -> Result<Self, LevelError> {
        match source {
            MapSource::File(path) => Self::from_path(path),
            MapSource::Inline(json) => Self::from_json_str(json),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Map size in world pixels.
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.tilewidth as f32,
            self.height as f32 * self.tileheight as f32,
        )
    }

    /// Returns the layer called `name`.
    pub fn object_layer(&self, name: &str) -> Result<&MapLayer, LevelError> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| LevelError::MissingObjectLayer {
                layer: name.to_string(),
            })
    }
}

impl MapLayer {
    /// First object named `"player"`.
    pub fn spawn_point(&self) -> Option<Vec2> {
        self.objects
            .iter()
            .find(|object| object.name == SPAWN_NAME)
            .map(MapObject::position)
    }

    /// Tag of `object`, skipping tags not in `accepted`.
    pub fn classify(object: &MapObject, accepted: &[EntityTag]) -> Option<EntityTag> {
        EntityTag::ORDER
            .into_iter()
            .filter(|tag| accepted.contains(tag))
            .find(|tag| tag.matches(object))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
