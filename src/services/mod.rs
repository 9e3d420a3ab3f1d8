//! Service layer: discovery, ranking, and the booking coordinator.
//!
//! Services orchestrate the pure scheduler functions with the repository and
//! lock collaborators. Discovery is read-only and freely parallelizable; the
//! booking coordinator owns the single serialization point of the write
//! path.

pub mod booking;
pub mod discovery;
pub mod error;
pub mod ranking;

pub use booking::{
    cancel, day_bookings, BookingConfirmation, BookingCoordinator, BookingOutcome, BookingRequest,
    DayBookingItem, DaySchedule, EngineSettings,
};
pub use discovery::{discover, find_gaps, DiscoverRequest, Discovery};
pub use error::EngineError;
pub use ranking::rank;
