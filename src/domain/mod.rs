// Domain layer - Plain data types, no I/O
pub mod display;
pub mod environment;
pub mod farm;
