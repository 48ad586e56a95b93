//! TouchTracker - press / drag / release state of a single gesture

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::text::LinkRange;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum TouchState {
    #[default]
    Idle,
    PressedOnLink(LinkRange),
    PressedOutsideLink,
}

/// How a gesture finished
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum TouchEnd {
    /// Moved past the drag threshold; no tap is delivered
    Dragged,
    /// Released without dragging at this point
    Released(Point),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchTracker {
    state: TouchState,
    down_point: Option<Point>,
    dragged: bool,
    /// Movement beyond this distance turns the gesture into a drag
    threshold: f32,
}

impl TouchTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &TouchState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.max(0.0);
    }

    /// Start a gesture; `hit` is the link under the down point
    pub fn began(&mut self, point: Point, hit: Option<LinkRange>) -> &TouchState {
        self.down_point = Some(point);
        self.dragged = false;
        self.state = match hit {
            Some(link) => TouchState::PressedOnLink(link),
            None => TouchState::PressedOutsideLink,
        };
        &self.state
    }

    /// Returns true once the gesture has become a drag
    pub fn moved(&mut self, point: Point) -> bool {
        if self.dragged {
            return true;
        }
        // A move without a matching down still counts as a drag
        let moved_far = match self.down_point {
            Some(down) => down.distance_to(point) > self.threshold,
            None => true,
        };
        self.dragged = moved_far;
        self.dragged
    }

    /// Finish the gesture and return to `Idle`
    pub fn ended(&mut self, point: Point) -> TouchEnd {
        let dragged = self.dragged;
        self.reset();
        if dragged {
            TouchEnd::Dragged
        } else {
            TouchEnd::Released(point)
        }
    }

    pub fn cancelled(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = TouchState::Idle;
        self.down_point = None;
        self.dragged = false;
    }
}
