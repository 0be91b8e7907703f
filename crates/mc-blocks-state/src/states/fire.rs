use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fire {
    age: u8,
}

impl Fire {
    pub const MAX_AGE: u8 = 15;

    pub fn new(age: u8) -> Result<Self, StateError> {
        let mut fire = Self::default();
        fire.set_age(age)?;
        Ok(fire)
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn set_age(&mut self, age: u8) -> Result<&mut Self, StateError> {
        check_range("age", age as i32, 0, Self::MAX_AGE as i32)?;
        self.age = age;
        Ok(self)
    }
}

impl StateCodec for Fire {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.age = read_bounded_int("age", meta as i32, 0, Self::MAX_AGE as i32) as u8;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_round_trip() {
        for age in 0..=Fire::MAX_AGE {
            let f = Fire::new(age).unwrap();
            assert_eq!(Fire::decode(IdVariant::Primary, f.write_state()).unwrap(), f);
        }
    }

    #[test]
    fn stored_age_is_clamped() {
        assert_eq!(Fire::decode(IdVariant::Primary, 200).unwrap().age(), 15);
    }

    #[test]
    fn setter_rejects_out_of_range() {
        assert!(Fire::new(16).is_err());
    }
}
