//! The bubble grid: every lattice slot of the playfield and what occupies it
//!
//! Slots are created once and never added or removed afterwards. A key that
//! is not in the map is terrain, not an empty slot.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coords::{Playfield, SlotKey};
use crate::error::GameError;

/// Bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl Color {
    /// CSS color used by canvas renderers
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#e8413c",
            Color::Orange => "#ff8800",
            Color::Yellow => "#f5d442",
            Color::Green => "#4cc35a",
            Color::Blue => "#36c1d4",
            Color::Purple => "#9b59d0",
            Color::White => "#ffffff",
        }
    }

    /// Single-character glyph for text output
    pub fn glyph(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
            Color::White => 'W',
        }
    }

    /// Uniformly sample a color from a non-empty palette
    pub fn sample(palette: &[Color], rng: &mut impl Rng) -> Option<Color> {
        if palette.is_empty() {
            return None;
        }
        Some(palette[rng.random_range(0..palette.len())])
    }
}

/// What a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Bubble(Color),
}

impl Occupant {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Occupant::Bubble(color) => Some(*color),
            Occupant::Empty => None,
        }
    }
}

/// Fixed-shape map from slot key to occupant.
///
/// Backed by a `BTreeMap` so iteration order is stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleGrid {
    playfield: Playfield,
    #[serde(with = "slot_entries")]
    slots: BTreeMap<SlotKey, Occupant>,
}

impl BubbleGrid {
    /// Build the full lattice, filling the top `filled_rows` rows with random colors
    pub fn create(
        playfield: Playfield,
        filled_rows: u32,
        palette: &[Color],
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        if playfield.width == 0 || playfield.height == 0 {
            return Err(GameError::config(format!(
                "grid must be at least 1x1, got {}x{}",
                playfield.width, playfield.height
            )));
        }
        if filled_rows > playfield.height {
            return Err(GameError::config(format!(
                "cannot fill {} rows of a {}-row grid",
                filled_rows, playfield.height
            )));
        }
        if palette.is_empty() {
            return Err(GameError::config("palette is empty"));
        }

        let mut slots = BTreeMap::new();
        for row in 0..playfield.height as i32 {
            for col in 0..playfield.width as i32 {
                let occupant = if (row as u32) < filled_rows {
                    Color::sample(palette, rng).map_or(Occupant::Empty, Occupant::Bubble)
                } else {
                    Occupant::Empty
                };
                slots.insert(playfield.slot_key(row, col), occupant);
            }
        }

        Ok(Self { playfield, slots })
    }

    /// A grid of the given shape with every slot empty
    pub fn empty(playfield: Playfield) -> Self {
        let mut slots = BTreeMap::new();
        for row in 0..playfield.height as i32 {
            for col in 0..playfield.width as i32 {
                slots.insert(playfield.slot_key(row, col), Occupant::Empty);
            }
        }
        Self { playfield, slots }
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Occupant of a slot, or `None` if the key is not part of the grid
    #[inline]
    pub fn get(&self, key: SlotKey) -> Option<Occupant> {
        self.slots.get(&key).copied()
    }

    /// Replace the occupant of an existing slot
    pub fn set(&mut self, key: SlotKey, occupant: Occupant) -> Result<(), GameError> {
        match self.slots.get_mut(&key) {
            Some(slot) => {
                *slot = occupant;
                Ok(())
            }
            None => Err(GameError::NoSuchSlot { key }),
        }
    }

    /// Set by `(row, col)` rather than key
    pub fn set_at(&mut self, row: i32, col: i32, occupant: Occupant) -> Result<(), GameError> {
        let key = self.playfield.slot_key(row, col);
        self.set(key, occupant)
    }

    #[inline]
    pub fn contains(&self, key: SlotKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// True once every slot is empty
    pub fn is_cleared(&self) -> bool {
        self.slots.values().all(Occupant::is_empty)
    }

    /// All slots in stable order
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, Occupant)> + '_ {
        self.slots.iter().map(|(key, occupant)| (*key, *occupant))
    }

    /// Occupied slots with their colors
    pub fn bubbles(&self) -> impl Iterator<Item = (SlotKey, Color)> + '_ {
        self.slots
            .iter()
            .filter_map(|(key, occupant)| occupant.color().map(|color| (*key, color)))
    }

    /// Number of slots (occupied or not)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots
    pub fn bubble_count(&self) -> usize {
        self.bubbles().count()
    }
}

/// JSON object keys must be strings, so the slot map is written as a list of pairs.
mod slot_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Occupant, SlotKey};

    pub fn serialize<S: Serializer>(
        slots: &BTreeMap<SlotKey, Occupant>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let entries: Vec<(&SlotKey, &Occupant)> = slots.iter().collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<SlotKey, Occupant>, D::Error> {
        let entries = Vec::<(SlotKey, Occupant)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
