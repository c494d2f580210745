pub mod config;
pub mod course;
pub mod ingest;
pub mod money;
pub mod result;
pub mod roster;
pub mod scorecard;
pub mod snapshot;

pub use config::*;
pub use course::*;
pub use money::*;
pub use result::*;
pub use roster::*;
pub use scorecard::*;
pub use snapshot::*;
