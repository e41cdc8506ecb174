pub mod event;
pub mod booking;

pub use event::{Event, EventSummary};
pub use booking::Booking;
