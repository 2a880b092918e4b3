//=========================================================================
// Level State
//=========================================================================
//
// Score bookkeeping for one build of a level, and the HUD derived from it.
//
// Created by `build_scene`, mutated only by contact handlers, replaced
// wholesale on restart.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::HudLayout;
use crate::core::presentation::{HudFrame, HudIcon};

//=== IconTint ============================================================

/// Display state of one HUD star icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconTint {
    Acquired,
    Pending,
}

impl IconTint {
    /// Tint as `0xRRGGBB`.
    pub const fn rgb(self) -> u32 {
        match self {
            IconTint::Acquired => 0xFF_FF_FF,
            IconTint::Pending => 0x88_88_88,
        }
    }
}

//=== LevelState ==========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelState {
    pub score: u32,
    pub collected_count: u32,
    /// Stars present at build time; fixed for the life of the state.
    pub total_collectibles: u32,
    pub goal_reached: bool,
}

impl LevelState {
    pub fn new(score: u32, total_collectibles: u32) -> Self {
        Self {
            score,
            collected_count: 0,
            total_collectibles,
            goal_reached: false,
        }
    }

    /// Records one newly collected star.
    pub fn record_collect(&mut self) {
        self.score += 1;
        self.collected_count += 1;
    }

    pub fn meets(&self, required_score: u32) -> bool {
        self.score >= required_score
    }

    //--- HUD --------------------------------------------------------------

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Icon `i` is acquired iff `i < score`.
    ///
    /// A carried score colours icons the player has not collected in
    /// this level; the row reflects score, not pickups.
    pub fn icon_tints(&self) -> Vec<IconTint> {
        (0..self.total_collectibles)
            .map(|i| {
                if i < self.score {
                    IconTint::Acquired
                } else {
                    IconTint::Pending
                }
            })
            .collect()
    }

    pub fn hud_frame(&self, layout: &HudLayout, pinned: bool) -> HudFrame {
        let icons = self
            .icon_tints()
            .into_iter()
            .enumerate()
            .map(|(i, tint)| HudIcon {
                position: layout.icon_position(i),
                scale: layout.icon_scale,
                tint: tint.rgb(),
            })
            .collect();

        HudFrame {
            label: self.score_label(),
            label_position: layout.label_position,
            icons,
            pinned,
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
    fn tints_follow_score() {
        let state = LevelState { score: 2, ..LevelState::new(0, 4) };
        assert_eq!(
            state.icon_tints(),
            vec![IconTint::Acquired, IconTint::Acquired, IconTint::Pending, IconTint::Pending]
        );
    }

    #[test]
    fn tint_property_holds_for_every_score() {
        for score in 0..=7 {
            let state = LevelState::new(score, 5);
            for (i, tint) in state.icon_tints().into_iter().enumerate() {
                assert_eq!(tint == IconTint::Acquired, (i as u32) < score);
            }
        }
    }

    #[test]
    fn record_collect_bumps_both_counters() {
        let mut state = LevelState::new(3, 5);
        state.record_collect();
        assert_eq!((state.score, state.collected_count), (4, 1));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(!LevelState::new(4, 5).meets(5));
        assert!(LevelState::new(5, 5).meets(5));
    }

    #[test]
    fn hud_frame_layout() {
        let frame = LevelState::new(1, 2).hud_frame(&HudLayout::default(), true);

        assert_eq!(frame.label, "Score: 1");
        assert_eq!(frame.icons.len(), 2);
        assert_eq!(frame.icons[0].tint, 0xFFFFFF);
        assert_eq!(frame.icons[1].tint, 0x888888);
        assert_eq!(frame.icons[1].position.x, 432.0);
        assert_eq!(frame.icons[0].scale, 0.5);
        assert!(frame.pinned);
    }
}
