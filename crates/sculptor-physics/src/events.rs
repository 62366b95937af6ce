use std::sync::{Mutex, MutexGuard};

use rapier3d::prelude::*;
use sculptor_core::BodyId;

/// Collects the body pairs that reported a contact force during a step.
/// Colliders carry their `BodyId` in `user_data`.
#[derive(Default)]
pub struct ContactForceCollector {
    pairs: Mutex<Vec<(BodyId, BodyId)>>,
}

impl ContactForceCollector {
    fn pairs(&self) -> MutexGuard<'_, Vec<(BodyId, BodyId)>> {
        self.pairs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pairs seen since the last drain, in report order.
    pub fn drain(&self) -> Vec<(BodyId, BodyId)> {
        std::mem::take(&mut *self.pairs())
    }

    /// Forgets pending pairs, keeping the buffer.
    pub fn clear(&self) {
        self.pairs().clear();
    }
}

pub(crate) fn body_of(colliders: &ColliderSet, handle: ColliderHandle) -> Option<BodyId> {
    colliders.get(handle).map(|c| BodyId(c.user_data as u32))
}

impl EventHandler for ContactForceCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        colliders: &ColliderSet,
        contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        let (Some(a), Some(b)) = (
            body_of(colliders, contact_pair.collider1),
            body_of(colliders, contact_pair.collider2),
        ) else {
            return;
        };
        self.pairs().push((a, b));
    }
}
