// Services layer for business logic
// Services own validation and the pre-persist step, calling storage directly

pub mod booking;
pub mod event;

pub use booking::BookingService;
pub use event::EventService;
