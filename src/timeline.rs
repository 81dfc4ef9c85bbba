pub mod assemble;
pub mod clip;

pub use assemble::{assemble, stretch_durations};
pub use clip::{Clip, ClipRole, Timeline};
