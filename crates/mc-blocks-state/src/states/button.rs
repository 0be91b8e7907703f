use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;
use crate::facing::{read_facing, write_facing, Facing};

const FLAG_PRESSED: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonMaterial {
    Stone,
    Wood,
}

impl ButtonMaterial {
    /// Ticks a press stays active.
    pub fn activation_ticks(self) -> u32 {
        match self {
            ButtonMaterial::Stone => 20,
            ButtonMaterial::Wood => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Button {
    pub material: ButtonMaterial,
    /// Face of the supporting block the button is mounted on.
    pub facing: Facing,
    pub pressed: bool,
}

impl Button {
    pub fn new(material: ButtonMaterial) -> Self {
        Self {
            material,
            facing: Facing::Down,
            pressed: false,
        }
    }
}

impl StateCodec for Button {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        let raw = meta & 0x07;
        self.facing = read_facing(raw).ok_or_else(|| StateError::invalid("button", "facing", raw))?;
        self.pressed = meta & FLAG_PRESSED != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        write_facing(self.facing) | if self.pressed { FLAG_PRESSED } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_states_round_trip() {
        for facing in Facing::ALL {
            for pressed in [false, true] {
                let b = Button {
                    material: ButtonMaterial::Wood,
                    facing,
                    pressed,
                };
                let mut decoded = Button::new(ButtonMaterial::Wood);
                decoded.read_state(IdVariant::Primary, b.write_state()).unwrap();
                assert_eq!(decoded, b);
            }
        }
    }

    #[test]
    fn undefined_facing_is_rejected() {
        let mut b = Button::new(ButtonMaterial::Stone);
        assert!(b.read_state(IdVariant::Primary, 6).is_err());
        assert!(b.read_state(IdVariant::Primary, 0x0f).is_err());
    }

    #[test]
    fn read_keeps_material() {
        let mut b = Button::new(ButtonMaterial::Wood);
        b.read_state(IdVariant::Primary, 0x09).unwrap();
        assert_eq!(b.material, ButtonMaterial::Wood);
        assert_eq!(b.facing, Facing::Up);
        assert!(b.pressed);
    }
}
