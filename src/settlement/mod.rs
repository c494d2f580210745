pub mod ledger;
pub mod simplify;

pub use ledger::*;
pub use simplify::*;
