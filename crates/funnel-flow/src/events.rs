//! Cross-section event channel.
//!
//! Marketing sections elsewhere on the page can ask the funnel to select
//! an offer without knowing the orchestrator exists. The channel is an
//! explicit typed publisher/receiver pair rather than an ambient global
//! broadcast, so the coupling stays visible and testable.

use funnel_commerce::ids::OfferId;
use futures::channel::mpsc;

/// Events unrelated page content can send to the funnel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunnelEvent {
    /// Select this offer and show checkout.
    OfferRequested { offer_id: OfferId },
}

/// Create a connected publisher/receiver pair.
pub fn funnel_event_channel() -> (FunnelEventPublisher, FunnelEventReceiver) {
    let (tx, rx) = mpsc::unbounded();
    (
        FunnelEventPublisher { tx },
        FunnelEventReceiver { rx },
    )
}

/// Cloneable sending half, handed to emitting page sections.
#[derive(Debug, Clone)]
pub struct FunnelEventPublisher {
    tx: mpsc::UnboundedSender<FunnelEvent>,
}

impl FunnelEventPublisher {
    /// Publish an event. Best-effort: a closed channel is ignored.
    pub fn publish(&self, event: FunnelEvent) {
        let _ = self.tx.unbounded_send(event);
    }

    /// Ask the funnel to select an offer and show checkout.
    pub fn request_offer(&self, offer_id: impl Into<OfferId>) {
        self.publish(FunnelEvent::OfferRequested {
            offer_id: offer_id.into(),
        });
    }
}

/// Receiving half, owned by the orchestrator and drained cooperatively.
#[derive(Debug)]
pub struct FunnelEventReceiver {
    rx: mpsc::UnboundedReceiver<FunnelEvent>,
}

impl FunnelEventReceiver {
    /// Take the next pending event without blocking.
    pub fn try_next(&mut self) -> Option<FunnelEvent> {
        self.rx.try_next().ok().flatten()
    }
}
