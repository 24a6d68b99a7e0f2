// DevEvents Core
//
// Domain rules for the event listing service, with no IO:
// - Event and Booking entity types shared by storage and the HTTP API
// - Slug generation and date/time normalization (pure functions)
// - Schema validation that reports one message per invalid field
// - The pre-persist step, driven by an explicit set of touched fields
// - StoreError, the taxonomy every persistence failure is reduced to

pub mod booking;
pub mod error;
pub mod event;
pub mod normalize;
pub mod slug;
pub mod validation;

// Telemetry (tracing subscriber setup for binaries)
pub mod telemetry;

// Re-exports for convenience
pub use booking::{is_valid_email, normalize_email, Booking, BookingInput, NewBooking};
pub use error::{Result, StoreError};
pub use event::{
    Event, EventDraft, EventInput, EventMode, NewEvent, TouchedFields, MODE_VALUES_MESSAGE,
};
pub use normalize::{normalize_date, normalize_time};
pub use slug::generate_slug;
pub use validation::{FieldError, ValidationErrors};
