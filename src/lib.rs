//! Flight simulation of a spinning disc-golf disc.
//!
//! Pick a [`DiscProfile`] (usually from a [`ProfileRegistry`]), describe the
//! release with a [`Throw`], run [`simulate`] to get a [`ShotRecord`], then
//! [`derive`] per-sample aerodynamic diagnostics from it.

pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod post;
pub mod profile;
pub mod shot;
pub mod sim;
pub mod throw;

pub use dynamics::state::{FlightState, SimConfig};
pub use error::{Error, Result};
pub use post::{derive, DerivedQuantities};
pub use profile::{DiscProfile, ProfileRegistry};
pub use shot::ShotRecord;
pub use sim::{shoot, simulate};
pub use throw::Throw;
