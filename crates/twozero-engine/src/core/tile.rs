use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::InvalidTileError;

/// A single numbered tile.
///
/// Tiles are stored by their base-2 exponent ("rank"): rank 1 is the value 2, rank 11
/// is 2048. Values that are not powers of two cannot be represented, and
/// `Option<Tile>` has the same size as a `u8`.
///
/// # Example
///
/// ```
/// use twozero_engine::Tile;
///
/// let tile = Tile::from_value(64).unwrap();
/// assert_eq!(tile.rank(), 6);
/// assert_eq!(tile.merged().unwrap().value(), 128);
/// assert!(Tile::from_value(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Tile(NonZeroU8);

impl Tile {
    /// Highest representable rank (`2^63`). Tiles of this rank never merge.
    pub const MAX_RANK: u8 = 63;

    pub const TWO: Self = Self(NonZeroU8::MIN);
    pub const FOUR: Self = Self(NonZeroU8::new(2).unwrap());

    /// The two values the game ever spawns.
    pub const SPAWNABLE: [Self; 2] = [Self::TWO, Self::FOUR];

    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        if rank > Self::MAX_RANK {
            return None;
        }
        match NonZeroU8::new(rank) {
            Some(rank) => Some(Self(rank)),
            None => None,
        }
    }

    pub const fn from_value(value: u64) -> Result<Self, InvalidTileError> {
        if value < 2 || !value.is_power_of_two() {
            return Err(InvalidTileError { value });
        }
        #[expect(clippy::cast_possible_truncation)]
        let rank = value.trailing_zeros() as u8;
        match Self::from_rank(rank) {
            Some(tile) => Ok(tile),
            None => Err(InvalidTileError { value }),
        }
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0.get()
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        1 << self.0.get()
    }

    /// Returns the tile produced by merging two tiles equal to `self`.
    ///
    /// `None` at [`Self::MAX_RANK`], where the doubled value no longer fits.
    #[must_use]
    pub const fn merged(self) -> Option<Self> {
        Self::from_rank(self.rank() + 1)
    }
}

impl TryFrom<u64> for Tile {
    type Error = InvalidTileError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Tile> for u64 {
    fn from(tile: Tile) -> Self {
        tile.value()
    }
}
