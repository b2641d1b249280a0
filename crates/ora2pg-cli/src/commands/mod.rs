pub mod convert;
pub mod kinds;
pub mod sample;
