//! Tooltip module
//!
//! The hover tooltip controller. One [`HoverTooltip`] per session, owned by
//! whatever wires up the host's hover notifications.

mod timer;
mod tooltip_events;
mod tooltip_state;

pub use timer::TimerSlot;
pub use tooltip_state::{HIDE_GRACE_PERIOD, HoverTooltip, TooltipEvent, TooltipPhase};
