pub mod capacity;
pub mod converters;
