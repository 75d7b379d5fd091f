pub mod integrator;
pub mod landing;
pub mod runner;

pub use integrator::rk4_step;
pub use runner::{air_density, landing_state, shoot, simulate};
