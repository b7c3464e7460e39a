//! Game event logging system
//!
//! The EventBus is the audit trail of a session: every delivery, contact,
//! boundary and wicket lands on it, and the logger writes the stream out as
//! JSON lines for later inspection.

mod bus;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use logger::{EventLogConfig, EventLogger, log_events};
pub use types::{EndReason, GameEvent};
