//! Trigger volumes and the enter-event queue.
//!
//! Every physics step the actor's bounds are compared against each volume.
//! A `TriggerEntered` event is queued only on the step the actor starts
//! overlapping a volume; staying inside does not repeat it.

use crate::collision::Aabb;
use crate::lens::LensColor;
use bevy::prelude::*;
use bevy::utils::HashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    Checkpoint,
    Lens(LensColor),
    /// Touching it costs a life and returns the actor to the last checkpoint.
    KillZone,
}

/// Non-solid box volume centered on the entity's `Transform`.
#[derive(Component, Debug, Clone, Copy)]
pub struct TriggerVolume {
    pub kind: TriggerKind,
    pub half_extents: Vec3,
}

impl TriggerVolume {
    #[must_use]
    pub fn aabb_at(&self, translation: Vec3) -> Aabb {
        Aabb::from_center(translation, self.half_extents)
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TriggerEntered {
    pub actor: Entity,
    pub volume: Entity,
    pub kind: TriggerKind,
    /// World position of the volume at the time of entry.
    pub position: Vec3,
}

/// Volumes the actor overlapped on the previous step.
#[derive(Component, Debug, Default, Clone)]
pub struct Occupancy {
    inside: HashSet<Entity>,
}

impl Occupancy {
    #[must_use]
    pub fn contains(&self, volume: Entity) -> bool {
        self.inside.contains(&volume)
    }

    /// Replace the overlap set with this step's overlaps and return the
    /// volumes that were not overlapped last step, in input order.
    pub fn update<I>(&mut self, actor: &Aabb, volumes: I) -> Vec<Entity>
    where
        I: IntoIterator<Item = (Entity, Aabb)>,
    {
        let mut now = HashSet::default();
        let mut entered = Vec::new();
        for (entity, aabb) in volumes {
            if !actor.intersects(&aabb) {
                continue;
            }
            if !self.inside.contains(&entity) {
                entered.push(entity);
            }
            now.insert(entity);
        }
        self.inside = now;
        entered
    }
}
