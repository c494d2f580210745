pub mod event;
pub mod runtime;

pub use event::{Effect, EventModel, Msg, update};
pub use runtime::{EffectSink, run_event};
