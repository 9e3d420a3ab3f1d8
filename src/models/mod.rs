//! Domain models for tables, service windows, gaps, and bookings.

pub mod booking;
pub mod gap;
pub mod time;


pub use booking::{Booking, BookingStatus, NewBooking, ServiceWindow, Table};
pub use gap::{Gap, GapKind, ScoredGap};
