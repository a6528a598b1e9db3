//! Node state
//!
//! Startup phases of the sensor node and the runtime state owned by the
//! display node's loop. Both are explicit values threaded through the loops
//! rather than ambient globals.

pub mod display;
pub mod events;
pub mod machine;

pub use display::DisplayState;
pub use events::{ReceiverEvent, SenderEvent};
pub use machine::{HaltReason, ReceiverPhase, SenderPhase};
