//=========================================================================
// Contact Router
//=========================================================================
//
// Maps physics contacts onto level handlers.
//
// A level registers every body it spawns together with its kind, and a
// subscription per (kind, kind, mode) pair it cares about. When the
// physics service reports a contact, the router looks up both bodies
// and returns the handler plus the non-player body it concerns.
//
// Bodies from a previous build are unknown to a reset router, so late
// contacts addressed to them fall through silently.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use crate::core::physics::{BodyCommand, BodyId, BodyKind, ContactMode};

//=== ContactHandler ======================================================

/// Level callback a subscription is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContactHandler {
    Collect,
    Goal,
    Enemy,
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    a: BodyKind,
    b: BodyKind,
    mode: ContactMode,
    handler: ContactHandler,
}

//=== ContactRouter =======================================================

#[derive(Debug, Default)]
pub(crate) struct ContactRouter {
    kinds: HashMap<BodyId, BodyKind>,
    subscriptions: Vec<Subscription>,
}

impl ContactRouter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forgets every body and subscription.
    pub(crate) fn reset(&mut self) {
        self.kinds.clear();
        self.subscriptions.clear();
    }

    pub(crate) fn register_body(&mut self, body: BodyId, kind: BodyKind) {
        self.kinds.insert(body, kind);
    }

    pub(crate) fn kind_of(&self, body: BodyId) -> Option<BodyKind> {
        self.kinds.get(&body).copied()
    }

    /// Records a subscription and returns the command asking the physics
    /// service to report it.
    pub(crate) fn subscribe(
        &mut self,
        a: BodyKind,
        b: BodyKind,
        mode: ContactMode,
        handler: ContactHandler,
    ) -> BodyCommand {
        self.subscriptions.push(Subscription { a, b, mode, handler });
        BodyCommand::Subscribe { a, b, mode }
    }

    /// Resolves a contact to its handler and target body.
    ///
    /// The target is the body matching the subscription's second kind,
    /// regardless of the order the service reported the pair in.
    pub(crate) fn route(
        &self,
        a: BodyId,
        b: BodyId,
        mode: ContactMode,
    ) -> Option<(ContactHandler, BodyId)> {
        let kind_a = self.kind_of(a)?;
        let kind_b = self.kind_of(b)?;

        self.subscriptions
            .iter()
            .filter(|sub| sub.mode == mode)
            .find_map(|sub| {
                if (sub.a, sub.b) == (kind_a, kind_b) {
                    Some((sub.handler, b))
                } else if (sub.a, sub.b) == (kind_b, kind_a) {
                    Some((sub.handler, a))
                } else {
                    None
                }
            })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ContactRouter {
        let mut router = ContactRouter::new();
        router.register_body(BodyId(1), BodyKind::Player);
        router.register_body(BodyId(2), BodyKind::Collectible);
        router.register_body(BodyId(3), BodyKind::Goal);
        router.subscribe(
            BodyKind::Player,
            BodyKind::Collectible,
            ContactMode::Collide,
            ContactHandler::Collect,
        );
        router.subscribe(BodyKind::Player, BodyKind::Goal, ContactMode::Overlap, ContactHandler::Goal);
        router
    }

    #[test]
    fn subscribe_emits_matching_command() {
        let mut router = ContactRouter::new();
        let cmd = router.subscribe(
            BodyKind::Player,
            BodyKind::Enemy,
            ContactMode::Collide,
            ContactHandler::Enemy,
        );
        assert_eq!(
            cmd,
            BodyCommand::Subscribe {
                a: BodyKind::Player,
                b: BodyKind::Enemy,
                mode: ContactMode::Collide,
            }
        );
    }

    #[test]
    fn routes_in_either_order() {
        let router = router();
        let expected = Some((ContactHandler::Collect, BodyId(2)));

        assert_eq!(router.route(BodyId(1), BodyId(2), ContactMode::Collide), expected);
        assert_eq!(router.route(BodyId(2), BodyId(1), ContactMode::Collide), expected);
    }

    #[test]
    fn mode_must_match_subscription() {
        let router = router();
        assert_eq!(router.route(BodyId(1), BodyId(3), ContactMode::Collide), None);
        assert_eq!(
            router.route(BodyId(1), BodyId(3), ContactMode::Overlap),
            Some((ContactHandler::Goal, BodyId(3)))
        );
    }

    #[test]
    fn unknown_bodies_are_not_routed() {
        let router = router();
        assert_eq!(router.route(BodyId(1), BodyId(99), ContactMode::Collide), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut router = router();
        router.reset();
        assert_eq!(router.kind_of(BodyId(1)), None);
        assert_eq!(router.route(BodyId(1), BodyId(2), ContactMode::Collide), None);
    }
}
