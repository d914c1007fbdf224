use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::timer::TimerSlot;
use crate::config::TooltipSettings;
use crate::content::{Marker, MarkerId, TooltipContent, resolve_content};
use crate::host::TooltipHost;
use crate::overlay::{ANCHOR_MARGIN, Overlay, OverlayStyle, place_near_anchor};

/// Delay between hover-end and the actual hide
pub const HIDE_GRACE_PERIOD: Duration = Duration::from_millis(100);

/// Where the tooltip is in its show/hide cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPhase {
    Hidden,
    /// Content resolution in flight
    Showing,
    Visible,
    /// Visible with the grace timer running
    PendingHide,
}

/// Messages posted back to the controller by spawned tasks
#[derive(Debug)]
pub enum TooltipEvent {
    /// Content resolution finished
    Resolved {
        /// Request this result belongs to, used to drop stale results
        request_id: u64,
        marker: MarkerId,
        content: TooltipContent,
    },
    /// Hover delay elapsed for a marker
    ShowDelayElapsed { seq: u64, marker: Marker },
    /// Grace period after hover-end elapsed
    HideDelayElapsed { seq: u64 },
}

/// Hover tooltip controller
///
/// All state lives here and is only mutated by the owner, either through the
/// notification handlers or while processing [`TooltipEvent`]s from
/// [`process_pending`](Self::process_pending) / [`process_next`](Self::process_next).
pub struct HoverTooltip<H: TooltipHost> {
    host: Arc<H>,
    /// Created on first show, reused afterwards
    overlay: Option<Overlay>,
    /// Marker whose tooltip is shown or being resolved
    current: Option<Marker>,
    /// Incremented for every show; results for older ids are stale
    request_id: u64,
    /// Request whose result is still awaited
    in_flight_request_id: Option<u64>,
    pub(super) hide_timer: TimerSlot,
    pub(super) show_timer: TimerSlot,
    /// Marker the pending show timer was scheduled for
    pub(super) pending_show: Option<MarkerId>,
    pub(super) events_tx: UnboundedSender<TooltipEvent>,
    events_rx: UnboundedReceiver<TooltipEvent>,
}

impl<H: TooltipHost> HoverTooltip<H> {
    pub fn new(host: Arc<H>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            host,
            overlay: None,
            current: None,
            request_id: 0,
            in_flight_request_id: None,
            hide_timer: TimerSlot::new(),
            show_timer: TimerSlot::new(),
            pending_show: None,
            events_tx,
            events_rx,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn current_marker(&self) -> Option<&MarkerId> {
        self.current.as_ref().map(|m| &m.id)
    }

    pub fn is_visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_visible)
    }

    pub fn phase(&self) -> TooltipPhase {
        if self.in_flight_request_id.is_some() {
            TooltipPhase::Showing
        } else if self.is_visible() {
            if self.hide_timer.is_pending() {
                TooltipPhase::PendingHide
            } else {
                TooltipPhase::Visible
            }
        } else {
            TooltipPhase::Hidden
        }
    }

    /// Whether a timer or content resolution will still post an event
    pub fn has_pending_work(&self) -> bool {
        self.in_flight_request_id.is_some()
            || self.hide_timer.is_pending()
            || self.show_timer.is_pending()
    }

    /// Show the tooltip for `marker`.
    ///
    /// Markers without a journal entry are ignored. Content is resolved on a
    /// spawned task; only the most recent show may render its result. Must be
    /// called inside a tokio runtime.
    pub fn show(&mut self, marker: Marker) {
        if marker.entry.is_none() {
            log::debug!("Marker {} has no journal entry, not showing", marker.id);
            return;
        }

        self.hide_timer.cancel();
        self.show_timer.cancel();
        self.pending_show = None;
        self.ensure_overlay();

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        self.in_flight_request_id = Some(request_id);
        self.current = Some(marker.clone());
        log::debug!("Resolving content for marker {} (request {})", marker.id, request_id);

        let host = Arc::clone(&self.host);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let content = resolve_content(host.as_ref(), &marker).await;
            let _ = tx.send(TooltipEvent::Resolved {
                request_id,
                marker: marker.id,
                content,
            });
        });
    }

    /// Hide immediately and drop any scheduled show. Safe to call when
    /// already hidden.
    pub fn hide(&mut self) {
        self.show_timer.cancel();
        self.pending_show = None;
        self.collapse();
    }

    /// Hide after [`HIDE_GRACE_PERIOD`], replacing any pending hide.
    ///
    /// Unlike [`hide`](Self::hide), the grace timer leaves a pending show for
    /// another marker alone. Must be called inside a tokio runtime.
    pub fn delayed_hide(&mut self) {
        self.hide_timer
            .schedule(HIDE_GRACE_PERIOD, &self.events_tx, |seq| {
                TooltipEvent::HideDelayElapsed { seq }
            });
    }

    /// Cancel a pending delayed hide without hiding
    pub fn clear_delayed_hide(&mut self) {
        if self.hide_timer.cancel() {
            log::debug!("Cancelled pending hide");
        }
    }

    /// Reposition the overlay next to the current marker.
    ///
    /// Skipped when nothing is visible, while a newer show is still resolving
    /// (the overlay holds the previous marker's content), or when the marker
    /// has no screen position. Returns whether the overlay moved.
    pub fn update_position(&mut self) -> bool {
        if self.in_flight_request_id.is_some() {
            return false;
        }
        let Some(marker) = self.current.as_ref() else {
            return false;
        };
        let Some(overlay) = self.overlay.as_mut() else {
            return false;
        };
        if !overlay.is_visible() {
            return false;
        }
        let Some(anchor) = self.host.screen_position(&marker.id) else {
            log::debug!("No screen position for marker {}, skipping", marker.id);
            return false;
        };

        let size = self.host.measure(overlay);
        let viewport = self.host.viewport();
        overlay.move_to(place_near_anchor(anchor, size, viewport, ANCHOR_MARGIN));
        true
    }

    /// Apply every event already queued, without waiting
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait for the next event and apply it
    pub async fn process_next(&mut self) {
        // The controller holds a sender, so the channel never closes
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    /// Process events until no timer or resolution is outstanding
    pub async fn settle(&mut self) {
        while self.has_pending_work() {
            self.process_next().await;
        }
        self.process_pending();
    }

    pub fn handle_event(&mut self, event: TooltipEvent) {
        match event {
            TooltipEvent::Resolved {
                request_id,
                marker,
                content,
            } => {
                self.apply_resolved(request_id, &marker, content);
            }
            TooltipEvent::ShowDelayElapsed { seq, marker } => {
                if !self.show_timer.fire(seq) {
                    return;
                }
                self.pending_show = None;
                if self.host.is_hovered(&marker.id) {
                    self.show(marker);
                } else {
                    log::debug!("Marker {} no longer hovered, not showing", marker.id);
                }
            }
            TooltipEvent::HideDelayElapsed { seq } => {
                if self.hide_timer.fire(seq) {
                    self.collapse();
                }
            }
        }
    }

    fn apply_resolved(&mut self, request_id: u64, marker: &MarkerId, content: TooltipContent) -> bool {
        if self.in_flight_request_id != Some(request_id) {
            log::debug!(
                "Discarding stale content for marker {} (request {}, current {:?})",
                marker,
                request_id,
                self.in_flight_request_id
            );
            return false;
        }
        self.in_flight_request_id = None;

        let settings = TooltipSettings::read(self.host.as_ref());
        let overlay = self.ensure_overlay();
        overlay.set_style(OverlayStyle::from_settings(&settings));
        overlay.display(content);
        self.update_position();
        true
    }

    /// Clear the overlay and forget the current marker and request
    fn collapse(&mut self) {
        self.hide_timer.cancel();
        self.in_flight_request_id = None;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.clear();
        }
        self.current = None;
    }

    fn ensure_overlay(&mut self) -> &mut Overlay {
        self.overlay.get_or_insert_with(|| {
            log::debug!("Creating tooltip overlay");
            Overlay::default()
        })
    }
}

#[cfg(test)]
#[path = "tooltip_state_tests.rs"]
mod tooltip_state_tests;
