pub mod color;

pub mod bridge;

pub mod error;
