pub mod application;
pub mod graphics;
pub mod math;
