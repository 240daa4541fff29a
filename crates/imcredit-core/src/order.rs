//! Author ordering protocol
//!
//! A project's authors are totally ordered by an integer `author_order`.
//! The only way to reorder is to exchange the order values of two adjacent
//! authors; new authors go after every order value the project has ever
//! handed out. Gaps left by deletions are never compacted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{CreditError, Result};

/// Which neighbour to swap with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the front of the list (-1)
    Up,
    /// Towards the back of the list (+1)
    Down,
}

impl Direction {
    pub fn offset(&self) -> i64 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }

    pub fn from_offset(offset: i64) -> Result<Self> {
        match offset {
            -1 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            _ => Err(CreditError::validation(
                "authorId and direction (-1 or 1) are required",
            )),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.offset())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let offset = i64::deserialize(deserializer)?;
        Direction::from_offset(offset).map_err(serde::de::Error::custom)
    }
}

/// An author's position as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSlot {
    pub author_id: Uuid,
    pub author_order: i64,
}

impl OrderSlot {
    pub fn new(author_id: Uuid, author_order: i64) -> Self {
        Self {
            author_id,
            author_order,
        }
    }
}

/// The two order updates that make up one swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlan {
    /// The author that asked to move, with its new order value
    pub moved: OrderSlot,
    /// The neighbour it trades places with, with its new order value
    pub displaced: OrderSlot,
}

/// Plan a swap of `author_id` with its neighbour in `direction`.
///
/// `slots` must be sorted ascending by `author_order`. Fails with
/// `NotFound` for an unknown author and `Boundary` when the author is
/// already first (moving up) or last (moving down).
pub fn plan_swap(slots: &[OrderSlot], author_id: Uuid, direction: Direction) -> Result<SwapPlan> {
    let idx = slots
        .iter()
        .position(|slot| slot.author_id == author_id)
        .ok_or_else(CreditError::author_not_found)?;

    let swap_idx = match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => Some(idx + 1).filter(|&i| i < slots.len()),
    }
    .ok_or(CreditError::Boundary)?;

    let a = slots[idx];
    let b = slots[swap_idx];
    Ok(SwapPlan {
        moved: OrderSlot::new(a.author_id, b.author_order),
        displaced: OrderSlot::new(b.author_id, a.author_order),
    })
}

/// Apply a plan to an in-memory slot list and restore ascending order.
pub fn apply_swap(slots: &mut [OrderSlot], plan: &SwapPlan) {
    for slot in slots.iter_mut() {
        if slot.author_id == plan.moved.author_id {
            slot.author_order = plan.moved.author_order;
        } else if slot.author_id == plan.displaced.author_id {
            slot.author_order = plan.displaced.author_order;
        }
    }
    slots.sort_by_key(|slot| slot.author_order);
}

/// Order value for a newly added author.
///
/// `current_max` is the largest order among existing authors and
/// `high_water` the largest order ever assigned in the project, so values
/// freed by deleting the last author are not handed out again.
pub fn next_author_order(current_max: Option<i64>, high_water: Option<i64>) -> i64 {
    match current_max.max(high_water) {
        Some(max) => max + 1,
        None => 0,
    }
}
