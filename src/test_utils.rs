//! Test doubles shared by unit tests

use std::cell::RefCell;

use crate::error::Failure;
use crate::wpctl::AudioControl;

/// In-memory [`AudioControl`] with canned responses
///
/// Records every id passed to `set_default`.
pub(crate) struct FakeControl {
    status: Result<String, String>,
    apply_error: Option<String>,
    applied: RefCell<Vec<u32>>,
}

impl FakeControl {
    /// Status query returns `report`; every apply succeeds
    pub fn with_status(report: &str) -> Self {
        Self {
            status: Ok(report.to_string()),
            apply_error: None,
            applied: RefCell::new(Vec::new()),
        }
    }

    /// Status query fails with `detail`
    pub fn failing_status(detail: &str) -> Self {
        Self {
            status: Err(detail.to_string()),
            ..Self::with_status("")
        }
    }

    /// Every apply fails with `detail`
    pub fn rejecting_apply(detail: &str) -> Self {
        Self {
            apply_error: Some(detail.to_string()),
            ..Self::with_status("")
        }
    }

    /// Ids passed to `set_default`, in call order
    pub fn applied(&self) -> Vec<u32> {
        self.applied.borrow().clone()
    }
}

impl AudioControl for FakeControl {
    fn status_query(&self) -> Result<String, Failure> {
        self.status.clone().map_err(|detail| Failure::Query { detail })
    }

    fn set_default(&self, id: u32) -> Result<(), Failure> {
        if let Some(detail) = &self.apply_error {
            return Err(Failure::Apply {
                id,
                detail: detail.clone(),
            });
        }
        self.applied.borrow_mut().push(id);
        Ok(())
    }
}
