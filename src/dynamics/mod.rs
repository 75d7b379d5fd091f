pub mod disc;
pub mod state;

pub use disc::{derivatives, precession_rates};
pub use state::{Deriv, FlightState, SimConfig, G0};
