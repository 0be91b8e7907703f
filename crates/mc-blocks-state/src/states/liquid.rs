//! Water and lava cells.

use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};
use crate::math::Vec3;

const FLAG_FALLING: u8 = 0x08;
const DECAY_MASK: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidSpecies {
    Water,
    Lava,
}

impl LiquidSpecies {
    pub fn name(self) -> &'static str {
        match self {
            LiquidSpecies::Water => "water",
            LiquidSpecies::Lava => "lava",
        }
    }
}

/// A liquid cell.
///
/// `still` selects which of the flowing/still identifier pair the cell is
/// stored under. The flow vector is a neighborhood-dependent cache: it is
/// never encoded, ignored by equality, and dropped whenever state is re-read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Liquid {
    pub species: LiquidSpecies,
    decay: u8,
    pub falling: bool,
    pub still: bool,
    #[serde(skip)]
    flow_vector: Option<Vec3>,
}

impl PartialEq for Liquid {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species
            && self.decay == other.decay
            && self.falling == other.falling
            && self.still == other.still
    }
}

impl Eq for Liquid {}

impl Liquid {
    pub const MAX_DECAY: u8 = 7;

    /// A still source block.
    pub fn source(species: LiquidSpecies) -> Self {
        Self {
            species,
            decay: 0,
            falling: false,
            still: true,
            flow_vector: None,
        }
    }

    /// A flowing cell with the given decay.
    pub fn flowing(species: LiquidSpecies, decay: u8, falling: bool) -> Result<Self, StateError> {
        let mut liquid = Self {
            species,
            decay: 0,
            falling,
            still: false,
            flow_vector: None,
        };
        liquid.set_decay(decay)?;
        Ok(liquid)
    }

    pub fn decay(&self) -> u8 {
        self.decay
    }

    pub fn set_decay(&mut self, decay: u8) -> Result<&mut Self, StateError> {
        check_range("decay", decay as i32, 0, Self::MAX_DECAY as i32)?;
        self.decay = decay;
        Ok(self)
    }

    pub fn is_source(&self) -> bool {
        !self.falling && self.decay == 0
    }

    pub fn is_same_species(&self, other: &Liquid) -> bool {
        self.species == other.species
    }

    pub fn still_form(&self) -> Self {
        Self {
            still: true,
            ..*self
        }
    }

    pub fn flowing_form(&self) -> Self {
        Self {
            still: false,
            ..*self
        }
    }

    /// Visual fill fraction in ninths.
    pub fn fluid_height_percent(&self) -> f64 {
        let level = if self.falling { 0 } else { self.decay };
        f64::from(level + 1) / 9.0
    }

    pub fn cached_flow_vector(&self) -> Option<Vec3> {
        self.flow_vector
    }

    pub fn cache_flow_vector(&mut self, vector: Vec3) {
        self.flow_vector = Some(vector);
    }

    pub fn invalidate_flow_vector(&mut self) {
        self.flow_vector = None;
    }
}

impl StateCodec for Liquid {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.decay = read_bounded_int("decay", (meta & DECAY_MASK) as i32, 0, Self::MAX_DECAY as i32) as u8;
        self.falling = meta & FLAG_FALLING != 0;
        self.still = variant.is_secondary();
        self.flow_vector = None;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.decay | if self.falling { FLAG_FALLING } else { 0 }
    }

    fn id_variant(&self) -> IdVariant {
        IdVariant::from_flag(self.still)
    }
}
