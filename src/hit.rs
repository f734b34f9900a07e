//! Records delivered by the upstream hit reconstruction.

use std::ops::Index;
use geometry::Point;
use units::todo::Lengthf32;

use crate::error::{Error, Result};

pub type LayerId = u32;

/// Reconstructed position of a gamma interaction in a scintillator, together
/// with the detector layer it was attributed to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub position: Point,
    pub layer: LayerId,
}

impl Hit {
    pub fn new(x: Lengthf32, y: Lengthf32, layer: LayerId) -> Self {
        Self { position: Point::new(x, y), layer }
    }
}

/// Hits attributed to a single coincidence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    hits: Vec<Hit>,
}

impl Event {
    pub fn new(hits: Vec<Hit>) -> Self { Self { hits } }
    pub fn hits(&self) -> &[Hit] { &self.hits }
}

impl From<Vec<Hit>> for Event {
    fn from(hits: Vec<Hit>) -> Self { Self::new(hits) }
}

/// Events found in one slice of the detector data stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeWindow {
    events: Vec<Event>,
}

impl TimeWindow {
    pub fn new(events: Vec<Event>) -> Self { Self { events } }
    pub fn number_of_events(&self) -> usize { self.events.len() }
    pub fn events(&self) -> impl Iterator<Item = &Event> { self.events.iter() }
}

impl Index<usize> for TimeWindow {
    type Output = Event;
    fn index(&self, i: usize) -> &Self::Output { &self.events[i] }
}

impl FromIterator<Event> for TimeWindow {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self { Self::new(iter.into_iter().collect()) }
}

/// Unit of work handed over by the event source on each invocation.
///
/// Sources may pass along containers of some other kind; these are reported
/// as malformed rather than processed.
#[derive(Clone, Debug, PartialEq)]
pub enum Batch {
    Window(TimeWindow),
    Unexpected { kind: String },
}

impl Batch {
    pub fn time_window(&self) -> Result<&TimeWindow> {
        match self {
            Batch::Window(window) => Ok(window),
            Batch::Unexpected { kind } => Err(Error::MalformedBatch { found: kind.clone() }),
        }
    }
}

impl From<TimeWindow> for Batch {
    fn from(window: TimeWindow) -> Self { Batch::Window(window) }
}
