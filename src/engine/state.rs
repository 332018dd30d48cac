use serde::Serialize;

use super::messages::PointerMove;
use crate::domain::{NormalizedAmount, Rect};

/// The currently locked price: where it is on screen and what it is worth.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub rect: Rect,
    pub price: NormalizedAmount,
}

/// Scheduler state. At most one `Hit` is ever live, and only in `Locked`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState<E> {
    /// No live hit, no frame pending
    Idle,
    /// Pointer is inside the hit's rect
    Locked(Hit),
    /// A frame was requested; holds the latest pointer-move only
    ScanPending(PointerMove<E>),
    /// Inside `on_frame`; never observable between calls
    Scanning,
}

impl<E> ScanState<E> {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Idle => "Idle",
            ScanState::Locked(_) => "Locked",
            ScanState::ScanPending(_) => "ScanPending",
            ScanState::Scanning => "Scanning",
        }
    }

    pub fn hit(&self) -> Option<&Hit> {
        match self {
            ScanState::Locked(hit) => Some(hit),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ScanState::ScanPending(_))
    }
}
