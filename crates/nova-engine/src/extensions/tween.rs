// extensions/tween.rs
//
// Tween system: animates entity properties by EntityId, with start delays and
// completion groups so a multi-track sequence can resolve a single signal.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(id, Tween::scale_uniform(1.0, 0.1, 1.5, Easing::QuadIn));
//   let group = tweens.add_group(vec![(a, t1), (b, t2.with_delay(1.5))], DONE_EVENT);
//   tweens.tick(dt, &mut scene);
//   for event in tweens.drain_completed() { ... }

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec3};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Animate Entity.scale
    Scale { from: Vec3, to: Vec3 },
    /// Animate sprite alpha, or point-cloud alpha when there is no sprite.
    Alpha { from: f32, to: f32 },
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Seconds to wait before the tween starts touching its target.
    pub delay: f32,
    /// Time since the tween was added (delay included).
    pub elapsed: f32,
    pub easing: Easing,
    group: Option<TweenGroupId>,
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            delay: 0.0,
            elapsed: 0.0,
            easing,
            group: None,
        }
    }

    pub fn scale(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale { from, to }, duration, easing)
    }

    /// Uniform scale on all three axes.
    pub fn scale_uniform(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::scale(Vec3::splat(from), Vec3::splat(to), duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Handle to a set of tweens that resolves one event when all of them finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenGroupId(pub u32);

#[derive(Debug)]
struct TweenGroup {
    remaining: usize,
    on_complete: u32,
}

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (EntityId, Tween)>,
    groups: HashMap<TweenGroupId, TweenGroup>,
    next_id: u32,
    next_group: u32,
    /// Completed group events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for an entity. Returns a handle for later control.
    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    /// Add several tweens that together resolve `on_complete` exactly once,
    /// after the last of them finishes. An empty group resolves immediately.
    pub fn add_group(&mut self, tweens: Vec<(EntityId, Tween)>, on_complete: u32) -> TweenGroupId {
        let group = TweenGroupId(self.next_group);
        self.next_group += 1;

        if tweens.is_empty() {
            self.completed_events.push(on_complete);
            return group;
        }

        self.groups.insert(group, TweenGroup { remaining: tweens.len(), on_complete });
        for (entity, mut tween) in tweens {
            tween.group = Some(group);
            self.add(entity, tween);
        }
        group
    }

    /// Remove a tween by handle. A removed grouped tween no longer holds its group open,
    /// but removal never fires the group's event.
    pub fn remove(&mut self, id: TweenId) -> bool {
        match self.tweens.remove(&id) {
            Some((_, tween)) => {
                self.release_group(tween.group, false);
                true
            }
            None => false,
        }
    }

    /// Remove all tweens for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        let ids: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, (e, _))| *e == entity)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            self.remove(id);
        }
    }

    /// Advance all tweens and apply them to entities in the scene.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut completed = Vec::new();

        for (&id, (entity_id, tween)) in self.tweens.iter_mut() {
            tween.elapsed += dt;

            let local = tween.elapsed - tween.delay;
            if local < 0.0 {
                continue;
            }
            let t = if tween.duration > 0.0 {
                (local / tween.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };

            if let Some(entity) = scene.get_mut(*entity_id) {
                match tween.target {
                    TweenTarget::Scale { from, to } => {
                        entity.scale = ease_vec3(from, to, t, tween.easing);
                    }
                    TweenTarget::Alpha { from, to } => {
                        let alpha = ease(from, to, t, tween.easing);
                        if let Some(sprite) = &mut entity.sprite {
                            sprite.alpha = alpha;
                        } else if let Some(points) = &mut entity.points {
                            points.alpha = alpha;
                        }
                    }
                }
            }

            if local >= tween.duration {
                completed.push(id);
            }
        }

        // Stable order so events resolve deterministically.
        completed.sort();
        let count = completed.len();
        for id in completed {
            if let Some((_, tween)) = self.tweens.remove(&id) {
                self.release_group(tween.group, true);
            }
        }

        count
    }

    fn release_group(&mut self, group: Option<TweenGroupId>, fire: bool) {
        let Some(group_id) = group else { return };
        let done = match self.groups.get_mut(&group_id) {
            Some(g) => {
                g.remaining = g.remaining.saturating_sub(1);
                g.remaining == 0
            }
            None => false,
        };
        if done {
            if let Some(g) = self.groups.remove(&group_id) {
                if fire {
                    self.completed_events.push(g.on_complete);
                }
            }
        }
    }

    /// Drain completed tween events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
