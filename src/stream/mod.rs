pub mod controller;
pub mod session;

pub use controller::{register_event_source, ActiveStream, StreamController};
pub use session::{Session, SessionState, StreamEvent, DONE_LINE, ERROR_LINE};
