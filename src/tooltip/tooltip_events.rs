//! Host notification handlers
//!
//! Entry points the host calls from its event loop: hover start/end on a
//! marker, pan/zoom, marker redraws and view teardown.

use super::tooltip_state::{HoverTooltip, TooltipEvent};
use crate::config::TooltipSettings;
use crate::content::{Marker, MarkerId};
use crate::host::TooltipHost;

impl<H: TooltipHost> HoverTooltip<H> {
    /// Pointer entered a marker: cancel any pending hide and show after the
    /// configured delay, if the marker is still hovered by then.
    ///
    /// Must be called inside a tokio runtime.
    pub fn on_hover_start(&mut self, marker: Marker) {
        let settings = TooltipSettings::read(self.host());
        if !settings.enabled {
            return;
        }

        self.clear_delayed_hide();
        self.pending_show = Some(marker.id.clone());
        let delay = settings.show_delay();
        self.show_timer.schedule(delay, &self.events_tx, move |seq| {
            TooltipEvent::ShowDelayElapsed { seq, marker }
        });
    }

    /// Pointer left a marker: drop its pending show and start the grace timer.
    /// A pending show for a different marker survives the grace period.
    ///
    /// Must be called inside a tokio runtime.
    pub fn on_hover_end(&mut self, marker: &MarkerId) {
        if self.pending_show.as_ref() == Some(marker) {
            self.show_timer.cancel();
            self.pending_show = None;
        }
        self.delayed_hide();
    }

    /// Canvas panned or zoomed
    pub fn on_viewport_changed(&mut self) -> bool {
        if !self.is_visible() || !self.current_is_hovered() {
            return false;
        }
        self.update_position()
    }

    /// A marker was redrawn; follow it if it is the one being shown
    pub fn on_marker_refresh(&mut self, marker: &MarkerId) -> bool {
        if self.current_marker() != Some(marker) || !self.is_visible() {
            return false;
        }
        if !self.current_is_hovered() {
            return false;
        }
        self.update_position()
    }

    /// Scene or view closed: hide and forget any scheduled show
    pub fn on_teardown(&mut self) {
        self.hide();
    }

    fn current_is_hovered(&self) -> bool {
        self.current_marker()
            .is_some_and(|id| self.host().is_hovered(id))
    }
}

#[cfg(test)]
#[path = "tooltip_events_tests.rs"]
mod tooltip_events_tests;
