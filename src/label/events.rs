//! Tap events delivered to the host

use serde::{Deserialize, Serialize};

use crate::text::{LinkRange, LinkType};

/// Outcome of a completed tap
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "event", content = "link")]
pub enum LabelEvent {
    LinkTapped(LinkRange),
    BackgroundTapped,
}

impl LabelEvent {
    /// Route a tap that landed on `hit`
    ///
    /// Action ranges report as background taps so the host can run its own
    /// handling keyed off `BackgroundTapped`.
    pub fn for_tap(hit: Option<LinkRange>) -> Self {
        match hit {
            Some(link) if link.link_type != LinkType::Action => LabelEvent::LinkTapped(link),
            _ => LabelEvent::BackgroundTapped,
        }
    }

    pub fn dispatch(&self, delegate: &mut dyn LabelDelegate) {
        match self {
            LabelEvent::LinkTapped(link) => delegate.on_link_tapped(link),
            LabelEvent::BackgroundTapped => delegate.on_background_tapped(),
        }
    }
}

/// Host callbacks for tap events
pub trait LabelDelegate {
    fn on_link_tapped(&mut self, _link: &LinkRange) {}

    fn on_background_tapped(&mut self) {}
}
