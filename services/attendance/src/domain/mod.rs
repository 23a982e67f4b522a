pub mod geo;
pub mod repository;
pub mod rut;
pub mod types;
pub mod window;
