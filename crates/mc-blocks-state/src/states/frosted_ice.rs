use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrostedIce {
    age: u8,
}

impl FrostedIce {
    pub const MAX_AGE: u8 = 3;

    pub fn new(age: u8) -> Result<Self, StateError> {
        let mut ice = Self::default();
        ice.set_age(age)?;
        Ok(ice)
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

impl StateCodec for FrostedIce {
    const STATE_BITMASK: u8 = 0b11;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.age = read_bounded_int("age", meta as i32, 0, Self::MAX_AGE as i32) as u8;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.age
    }
}
