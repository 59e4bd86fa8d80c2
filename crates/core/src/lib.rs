pub mod application;
pub mod domain;
pub mod generator;
pub mod ports;
pub mod utils;
