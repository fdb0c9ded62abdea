pub use self::{board::*, direction::*, moves::*, tile::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod moves;
pub(crate) mod tile;
