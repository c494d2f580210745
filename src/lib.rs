pub mod args;
pub mod error;
pub mod game;
pub mod handicap;
pub mod model;
pub mod mvu;
pub mod payout;
pub mod settlement;

pub use error::CoreError;
