//! # Ranking Function
//!
//! Pure scoring for the cache's shared sorted index. Higher scores list
//! first (the index is read in descending order).
//!
//! Known weakness, kept deliberately: the base term grows with wall-clock
//! time, so the score is not monotonic by priority across time. An old
//! high-priority todo can rank below a recently created low-priority one.
//! List ordering served from the primary store uses a different contract
//! (priority dominates recency) and does not share this property.

use crate::models::{Priority, Status, Todo};

/// Compute the rank score for a todo.
///
/// Done todos collapse to zero regardless of priority or age. For everything
/// else the score scales a time base (`created_at` unix seconds / 100 000)
/// by priority, with a flat `+1` offset for low priority.
pub fn rank_score(todo: &Todo) -> f64 {
    if todo.status == Status::Done {
        return 0.0;
    }

    let base = todo.created_at.timestamp() as f64 / 100_000.0;
    match todo.priority {
        Priority::High => base * 3.0,
        Priority::Medium => base * 2.0,
        Priority::Low => base + 1.0,
    }
}
