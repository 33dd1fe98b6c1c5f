pub mod forecast;
pub mod gdd;
pub mod recommendation;
pub mod snapshot;
pub mod state;
pub mod turf;

pub use forecast::*;
pub use gdd::*;
pub use recommendation::*;
pub use snapshot::*;
pub use state::*;
pub use turf::*;
