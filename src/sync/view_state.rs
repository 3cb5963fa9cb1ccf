use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cached snapshot of one REST resource on one surface.
///
/// A slot is only ever replaced wholesale; failures and empty responses keep
/// the previous value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewState<T> {
    data: Option<T>,
    loading: bool,
    stale: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            stale: false,
            updated_at: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// True until the first fetch for this slot settles.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when the most recent fetch failed or timed out.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub(crate) fn replace(&mut self, value: T) {
        self.data = Some(value);
        self.loading = false;
        self.stale = false;
        self.updated_at = Some(Utc::now());
    }

    pub(crate) fn keep(&mut self) {
        self.loading = false;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.loading = false;
        self.stale = true;
    }
}
