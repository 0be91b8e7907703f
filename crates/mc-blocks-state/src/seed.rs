//! Position-seeded pseudo-randomness with a fixed 32-bit arithmetic contract.
//!
//! Results must match externally generated worlds bit for bit, so every step
//! wraps at 32 bits regardless of the native integer width.

/// Multiplier applied to the z coordinate.
const Z_MULTIPLIER: u32 = 0x06eb_fff5;
/// Multiplier applied to the x coordinate.
const X_MULTIPLIER: u32 = 0x002f_c20f;
/// Final mixing multiplier.
const MIX_MULTIPLIER: u32 = 0x0285_b825;
/// Final mixing addend.
const MIX_ADDEND: u32 = 0xb;

/// Lowest maximum height a bamboo stalk can reach.
pub const BAMBOO_MIN_MAX_HEIGHT: i32 = 12;
/// Number of distinct maximum heights above the minimum.
pub const BAMBOO_HEIGHT_VARIANCE: u32 = 5;

/// Compute the 32-bit offset seed for a block position.
pub fn position_seed(x: i32, y: i32, z: i32) -> u32 {
    let p1 = (z as u32).wrapping_mul(Z_MULTIPLIER);
    let p2 = (x as u32).wrapping_mul(X_MULTIPLIER);
    let xord = p1 ^ p2 ^ (y as u32);

    xord.wrapping_mul(MIX_MULTIPLIER)
        .wrapping_add(MIX_ADDEND)
        .wrapping_mul(xord)
}

/// Maximum height of a bamboo stalk rooted in column `(x, z)`.
pub fn bamboo_max_height(x: i32, z: i32) -> i32 {
    BAMBOO_MIN_MAX_HEIGHT + (position_seed(x, 0, z) % BAMBOO_HEIGHT_VARIANCE) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_seed_is_zero() {
        assert_eq!(position_seed(0, 0, 0), 0);
    }

    #[test]
    fn reference_vectors() {
        assert_eq!(position_seed(100, 0, -50), 2_010_060_018);
        assert_eq!(position_seed(1, 0, 0), 1_197_169_450);
        assert_eq!(position_seed(0, 0, 1), 3_136_293_124);
        assert_eq!(position_seed(-1, 0, -1), 2_243_233_522);
        assert_eq!(position_seed(123_456, 64, -987_654), 115_671_274);
    }

    #[test]
    fn seed_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(position_seed(7, 0, 3), 521_015_878);
        }
    }

    #[test]
    fn bamboo_heights() {
        assert_eq!(bamboo_max_height(0, 0), 12);
        assert_eq!(bamboo_max_height(100, -50), 15);
        assert_eq!(bamboo_max_height(0, 1), 16);
        assert_eq!(bamboo_max_height(-1, -1), 14);
        for x in -20..20 {
            for z in -20..20 {
                let h = bamboo_max_height(x, z);
                assert!((12..=16).contains(&h));
            }
        }
    }
}
