use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::geometry::{clip_tangent, intersect, Point, TangentParams, TangentSegment, Viewport};

/// Number of tangent slots.
pub const SLOT_COUNT: usize = 2;

/// A drawn tangent: its line parameters and the segment currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tangent {
    /// Line parameters
    pub params: TangentParams,
    /// Segment clipped to the main viewport at the time of the last clip
    pub segment: TangentSegment,
}

/// Two tangent slots, one of them active.
///
/// A new tangent always overwrites the active slot. Slots are independent of
/// the curve data and are reset wholesale when a new dataset is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TangentSlots {
    slots: [Option<Tangent>; SLOT_COUNT],
    active: usize,
}

fn check_index(index: usize) -> Result<(), SessionError> {
    if index >= SLOT_COUNT {
        return Err(SessionError::InvalidSlot(index));
    }
    Ok(())
}

impl TangentSlots {
    /// Both slots empty, slot 0 active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the slot the next tangent goes into.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Make `index` the active slot. Slot contents are untouched.
    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Tangent in slot `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Tangent> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Clip `params` to `viewport` and store the result in the active slot.
    pub fn draw(
        &mut self,
        params: TangentParams,
        viewport: &Viewport,
        span_percent: f64,
    ) -> &Tangent {
        let segment = clip_tangent(&params, viewport, span_percent);
        log::debug!(
            "Tangent {} built: slope {:.6}, anchor ({:.2}, {:.4}), {:?}",
            self.active + 1,
            params.slope,
            params.anchor_x,
            params.anchor_y,
            segment.clipping
        );
        self.slots[self.active].insert(Tangent { params, segment })
    }

    /// Empty slot `index`, returning what it held.
    pub fn clear(&mut self, index: usize) -> Result<Option<Tangent>, SessionError> {
        check_index(index)?;
        Ok(self.slots[index].take())
    }

    /// Empty both slots. The active slot is kept.
    pub fn clear_all(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no slot holds a tangent.
    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    /// Slot contents in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Tangent>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Intersection of the two tangents; `None` unless both slots are filled
    /// and the tangents are not parallel.
    pub fn intersection(&self) -> Option<Point> {
        match (&self.slots[0], &self.slots[1]) {
            (Some(first), Some(second)) => intersect(&first.params, &second.params),
            _ => None,
        }
    }

    /// Recompute every stored segment against `viewport`.
    pub fn reclip(&mut self, viewport: &Viewport, span_percent: f64) {
        for tangent in self.slots.iter_mut().flatten() {
            tangent.segment = clip_tangent(&tangent.params, viewport, span_percent);
        }
    }
}
