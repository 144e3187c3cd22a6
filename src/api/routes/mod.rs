pub mod calculate;
pub mod index;
