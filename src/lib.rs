pub mod error;
pub mod game;
pub mod grid;
pub mod movegen;
pub mod piece;
pub mod player;
pub mod record;
pub mod rules;
pub mod status;

pub use error::*;
pub use game::*;
pub use grid::*;
pub use piece::*;
pub use player::*;
pub use record::*;
pub use rules::*;
pub use status::*;
