//=========================================================================
// Progress Handoff
//=========================================================================
//
// The one piece of state that outlives a level: the score carried from
// a completed level into the next one.
//
// Lives in `GlobalContext` and is handed to scenes explicitly; there is
// no ambient registry.
//
//=========================================================================

/// Carried score written on level completion and read on level entry.
///
/// An unset handoff reads as zero, so a chained level entered without
/// its predecessor starts from nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressHandoff {
    carried_score: Option<u32>,
}

impl ProgressHandoff {
    /// Creates an empty handoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the carried score, or 0 when nothing has been stored.
    pub fn carried_score(&self) -> u32 {
        self.carried_score.unwrap_or(0)
    }

    /// Returns `true` once a level has stored its score.
    pub fn is_set(&self) -> bool {
        self.carried_score.is_some()
    }

    /// Overwrites the carried score.
    pub fn store(&mut self, score: u32) {
        self.carried_score = Some(score);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_handoff_reads_zero() {
        let handoff = ProgressHandoff::new();
        assert_eq!(handoff.carried_score(), 0);
        assert!(!handoff.is_set());
    }

    #[test]
    fn store_overwrites_previous_value() {
        let mut handoff = ProgressHandoff::new();
        handoff.store(5);
        handoff.store(7);
        assert_eq!(handoff.carried_score(), 7);
        assert!(handoff.is_set());
    }
}
