pub mod bullets;
pub mod script;
pub mod segment;
pub mod wrap;
