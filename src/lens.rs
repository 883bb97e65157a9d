//! Collectible lenses and the color filter selector.
//!
//! `LensInventory` is the lens/filter collaborator: it records pickups and the
//! active filter. `FilterSelector` is the radial-button logic sitting on top of
//! it, deciding when switching filters should also switch the music cue.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Color of a collectible lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LensColor {
    Red,
    Blue,
    Green,
}

impl LensColor {
    pub const ALL: [LensColor; 3] = [LensColor::Red, LensColor::Blue, LensColor::Green];

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            LensColor::Red => Color::srgb(0.9, 0.15, 0.15),
            LensColor::Blue => Color::srgb(0.15, 0.3, 0.9),
            LensColor::Green => Color::srgb(0.15, 0.8, 0.25),
        }
    }
}

/// Active screen filter. `Normal` needs no lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterColor {
    #[default]
    Normal,
    Red,
    Blue,
    Green,
}

impl From<LensColor> for FilterColor {
    fn from(c: LensColor) -> Self {
        match c {
            LensColor::Red => FilterColor::Red,
            LensColor::Blue => FilterColor::Blue,
            LensColor::Green => FilterColor::Green,
        }
    }
}

impl FilterColor {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FilterColor::Normal => "Normal",
            FilterColor::Red => "Red",
            FilterColor::Blue => "Blue",
            FilterColor::Green => "Green",
        }
    }
}

/// Lenses picked up so far and the filter currently applied.
#[derive(Resource, Debug, Clone, Default)]
pub struct LensInventory {
    red: bool,
    blue: bool,
    green: bool,
    active: FilterColor,
}

impl LensInventory {
    pub fn collect(&mut self, lens: LensColor) {
        match lens {
            LensColor::Red => self.red = true,
            LensColor::Blue => self.blue = true,
            LensColor::Green => self.green = true,
        }
    }

    #[must_use]
    pub fn has_color(&self, color: FilterColor) -> bool {
        match color {
            FilterColor::Normal => true,
            FilterColor::Red => self.red,
            FilterColor::Blue => self.blue,
            FilterColor::Green => self.green,
        }
    }

    #[must_use]
    pub fn all_collected(&self) -> bool {
        self.red && self.blue && self.green
    }

    #[must_use]
    pub fn collected_count(&self) -> usize {
        LensColor::ALL.iter().filter(|c| self.has_color((**c).into())).count()
    }

    #[must_use]
    pub fn active(&self) -> FilterColor {
        self.active
    }

    pub fn set_active(&mut self, color: FilterColor) {
        self.active = color;
    }
}

/// Radial filter selector. Tracks the music cue tied to the active filter.
#[derive(Resource, Debug, Clone)]
pub struct FilterSelector {
    current_cue: Option<FilterColor>,
    can_interact: bool,
    cue_paused: bool,
}

impl Default for FilterSelector {
    fn default() -> Self {
        Self {
            current_cue: None,
            can_interact: true,
            cue_paused: false,
        }
    }
}

impl FilterSelector {
    #[must_use]
    pub fn current_cue(&self) -> Option<FilterColor> {
        self.current_cue
    }

    #[must_use]
    pub fn cue_paused(&self) -> bool {
        self.cue_paused
    }

    /// Lock cue switching once every lens is collected. Returns whether
    /// interaction is still allowed.
    pub fn check_interaction(&mut self, inventory: &LensInventory) -> bool {
        if inventory.all_collected() && self.can_interact {
            self.can_interact = false;
            if self.current_cue.is_some() {
                self.cue_paused = true;
            }
        }
        self.can_interact
    }

    /// Switch the filter. The filter always changes; the returned cue is
    /// `Some` only when the lens is held, the cue differs from the playing
    /// one and interaction is still allowed.
    pub fn select(&mut self, color: FilterColor, inventory: &mut LensInventory) -> Option<FilterColor> {
        inventory.set_active(color);
        if !inventory.has_color(color) || self.current_cue == Some(color) || !self.can_interact {
            return None;
        }
        self.current_cue = Some(color);
        Some(color)
    }
}
