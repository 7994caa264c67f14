//! Highlight timer
//!
//! Transient visual state for just-updated items: apply the "updated"
//! marker, schedule its removal after a fixed delay.
//!
//! Overlapping highlights on the same item each schedule their own
//! independent removal. A pending removal is never cancelled, so a timer
//! from an earlier highlight can clear the marker before a later
//! highlight's full duration has elapsed. This is intentional; strict
//! overlap correctness would need one cancellable handle per item.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::channel::types::AuctionId;
use crate::core::page::{ItemStore, SharedPage};

/// Applies the "updated" marker and schedules its timed removal
pub struct Highlighter<S> {
    page: SharedPage<S>,
    duration: Duration,
}

impl<S> Clone for Highlighter<S> {
    fn clone(&self) -> Self {
        Self {
            page: Arc::clone(&self.page),
            duration: self.duration,
        }
    }
}

impl<S: ItemStore + 'static> Highlighter<S> {
    pub fn new(page: SharedPage<S>, duration: Duration) -> Self {
        Self { page, duration }
    }

    /// Mark the item as recently updated and schedule removal of the marker.
    ///
    /// A miss (item no longer on the page) is a soft no-op, both when
    /// applying and when the removal fires.
    pub async fn highlight(&self, id: &AuctionId) {
        {
            let mut page = self.page.write().await;
            page.set_highlight(id, true);
        }

        let page = Arc::clone(&self.page);
        let id = id.clone();
        let duration = self.duration;

        tokio::spawn(async move {
            sleep(duration).await;
            let mut page = page.write().await;
            page.set_highlight(&id, false);
        });
    }
}
