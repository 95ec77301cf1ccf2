use chrono::NaiveDate;

use crate::dates;
use crate::models::{SegmentCollection, StreetSegment};

/// What the UI must do after a date was selected.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// Weekend — no data exists, nothing to request.
    Skip,
    /// Request `<base>/<key>.geojson` and report back with `generation`.
    Request { key: String, generation: u64 },
}

/// Result of a finished fetch, as seen by the controller.
///
/// `NoData` covers HTTP 404 and everything else that went wrong (other
/// status codes, transport errors, undecodable payloads) — the UI surfaces
/// exactly one failure mode, the warning banner.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(SegmentCollection),
    NoData,
}

/// The street layer currently attached to the map, plus its hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    date: NaiveDate,
    collection: SegmentCollection,
    highlighted: Option<String>,
}

impl Overlay {
    fn new(date: NaiveDate, collection: SegmentCollection) -> Self {
        Overlay {
            date,
            collection,
            highlighted: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn segments(&self) -> &[StreetSegment] {
        &self.collection.segments
    }

    /// Highlight the name group of the hovered segment.
    ///
    /// Selection is exclusive: the previously highlighted group reverts
    /// before the new one is applied. Hovering an unnamed segment clears
    /// the group. There is deliberately no pointer-leave counterpart; a
    /// group stays highlighted until the next hover.
    pub fn hover(&mut self, index: usize) {
        self.highlighted = self
            .collection
            .segments
            .get(index)
            .and_then(|segment| segment.name.clone());
    }

    /// Whether the segment at `index` currently renders in hover style.
    pub fn is_highlighted(&self, index: usize) -> bool {
        match (&self.highlighted, self.collection.segments.get(index)) {
            (Some(name), Some(segment)) => segment.name.as_deref() == Some(name.as_str()),
            _ => false,
        }
    }

    pub fn highlighted_name(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }
}

/// Keeps the displayed overlay consistent with the selected calendar date.
///
/// Owns the only mutable pieces of UI state: the attached overlay (at most
/// one) and the warning-banner visibility. Fetches are sequenced with a
/// generation counter so that under rapid date changes the last *requested*
/// date wins, never the last response to arrive.
#[derive(Debug, Default)]
pub struct LayerController {
    overlay: Option<Overlay>,
    banner_visible: bool,
    generation: u64,
}

impl LayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    /// React to a date picked in the UI (or the initial load).
    ///
    /// Weekends never produce a request: the banner comes up and any
    /// attached overlay is detached immediately. Weekdays yield a
    /// [`FetchPlan::Request`] tagged with a fresh generation; earlier
    /// in-flight requests become stale at this point.
    pub fn select_date(&mut self, date: NaiveDate) -> FetchPlan {
        self.generation += 1;
        if dates::is_weekend(date) {
            self.overlay = None;
            self.banner_visible = true;
            return FetchPlan::Skip;
        }

        FetchPlan::Request {
            key: dates::resource_key(date),
            generation: self.generation,
        }
    }

    /// Feed back the outcome of a request started by [`select_date`].
    ///
    /// Returns `false` when the outcome belonged to a superseded request
    /// and was dropped. On success the new overlay replaces the previous
    /// one — at most one overlay is ever attached.
    ///
    /// [`select_date`]: LayerController::select_date
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        date: NaiveDate,
        outcome: FetchOutcome,
    ) -> bool {
        if generation != self.generation {
            return false;
        }

        match outcome {
            FetchOutcome::Loaded(collection) => {
                self.overlay = Some(Overlay::new(date, collection));
                self.banner_visible = false;
            }
            FetchOutcome::NoData => {
                self.overlay = None;
                self.banner_visible = true;
            }
        }
        true
    }
}
