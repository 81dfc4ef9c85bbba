pub mod fx;

pub use fx::{Effect, EffectStack};
