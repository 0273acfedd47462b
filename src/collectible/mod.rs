//! Gems: data definitions, the level's collection tally and pickup checks.
//!
//! Gem kinds are defined as RON files under `data/gems/` (`(name: "Red",
//! value: 1)`) and looked up by name when the level spawns its gems. The
//! `CollectibleTracker` resource keeps the running score shown on the HUD.
use bevy::log::warn;
use bevy::math::Vec3;
use bevy::prelude::{Component, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ron_loader::load_ron_files;

pub const GEMS_DIR: &str = "data/gems";
/// Distance between player and gem centres at which the gem is picked up.
pub const PICKUP_RADIUS: f32 = 1.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemData {
    pub name: String, // Display name, gems are named by colour
    #[serde(default)]
    pub value: u32, // Score added when collected
}

/// Gem kinds keyed by name.
#[derive(Resource, Debug, Clone, Default)]
pub struct GemRegistry {
    gems: HashMap<String, GemData>,
}

impl GemRegistry {
    #[must_use]
    pub fn from_gems(gems: Vec<GemData>) -> Self {
        Self {
            gems: gems.into_iter().map(|g| (g.name.clone(), g)).collect(),
        }
    }

    /// Load every gem definition from `path`.
    #[must_use]
    pub fn load_from_dir(path: &str) -> Self {
        Self::from_gems(load_ron_files(path))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GemData> {
        self.gems.get(name)
    }

    /// Score of the named gem; unknown names are worth nothing.
    #[must_use]
    pub fn value_of(&self, name: &str) -> u32 {
        if let Some(gem) = self.gems.get(name) {
            gem.value
        } else {
            warn!("Unknown gem kind {name}, counting it as 0");
            0
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }
}

/// A gem placed in the level.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Gem {
    pub kind: String,
    pub value: u32,
}

/// Tally after one pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectProgress {
    pub gem_count: u32,
    pub gem_value: u32,
    pub percentage: f32,
    pub complete: bool,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CollectibleTracker {
    gem_count: u32,
    gem_value: u32,
    total_gems: u32,
}

impl CollectibleTracker {
    /// Tracker for a level holding `total_gems` gems.
    #[must_use]
    pub fn new(total_gems: u32) -> Self {
        Self { gem_count: 0, gem_value: 0, total_gems }
    }

    pub fn gem_count(&self) -> u32 { self.gem_count }
    pub fn gem_value(&self) -> u32 { self.gem_value }
    pub fn total_gems(&self) -> u32 { self.total_gems }

    pub fn add_gem(&mut self, value: u32) -> CollectProgress {
        self.gem_count += 1;
        self.gem_value += value;
        CollectProgress {
            gem_count: self.gem_count,
            gem_value: self.gem_value,
            percentage: self.percentage(),
            complete: self.is_complete(),
        }
    }

    /// Collected share of the level's gems, 0 to 100. A level without gems
    /// counts as fully collected.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total_gems == 0 {
            return 100.0;
        }
        self.gem_count as f32 / self.total_gems as f32 * 100.0
    }

    /// Progress bar fill in `0..=1`.
    #[must_use]
    pub fn fill_amount(&self) -> f32 {
        (self.percentage() / 100.0).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gem_count >= self.total_gems
    }

    #[must_use]
    pub fn value_text(&self) -> String {
        format!("Gems Value: {}", self.gem_value)
    }

    #[must_use]
    pub fn percentage_text(&self) -> String {
        if self.is_complete() {
            "100% Level Complete!".to_string()
        } else {
            format!("{}%", self.percentage().round())
        }
    }
}

/// Whether a player at `player` is close enough to pick up a gem at `gem`.
#[must_use]
pub fn in_pickup_range(player: Vec3, gem: Vec3, radius: f32) -> bool {
    player.distance_squared(gem) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> GemRegistry {
        GemRegistry::from_gems(vec![
            GemData { name: "Red".into(), value: 1 },
            GemData { name: "Blue".into(), value: 10 },
        ])
    }

    #[test]
    fn registry_lookup_and_unknown_kind() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.value_of("Blue"), 10);
        assert_eq!(reg.value_of("Purple"), 0);
        assert!(reg.get("Red").is_some());
    }

    #[test]
    fn shipped_gems_load() {
        let reg = GemRegistry::load_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data/gems"));
        assert_eq!(reg.value_of("Red"), 1);
        assert_eq!(reg.value_of("Green"), 5);
        assert_eq!(reg.value_of("Blue"), 10);
    }

    #[test]
    fn tally_and_texts() {
        let mut tracker = CollectibleTracker::new(3);
        assert_eq!(tracker.percentage_text(), "0%");

        let p = tracker.add_gem(5);
        assert_eq!((p.gem_count, p.gem_value), (1, 5));
        assert!(!p.complete);
        assert_eq!(tracker.value_text(), "Gems Value: 5");
        assert_eq!(tracker.percentage_text(), "33%");
        assert!((tracker.fill_amount() - 1.0 / 3.0).abs() < 1e-5);

        tracker.add_gem(10);
        assert_eq!(tracker.percentage_text(), "67%");
        let p = tracker.add_gem(1);
        assert!(p.complete);
        assert_eq!(p.gem_value, 16);
        assert_eq!(tracker.percentage_text(), "100% Level Complete!");
        assert_eq!(tracker.fill_amount(), 1.0);
    }

    #[test]
    fn level_without_gems_is_complete() {
        let tracker = CollectibleTracker::new(0);
        assert_eq!(tracker.percentage(), 100.0);
        assert_eq!(tracker.percentage_text(), "100% Level Complete!");
    }

    #[test]
    fn pickup_range_is_inclusive() {
        assert!(in_pickup_range(Vec3::ZERO, Vec3::new(1.2, 0.0, 0.0), PICKUP_RADIUS));
        assert!(!in_pickup_range(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), PICKUP_RADIUS));
    }
}
