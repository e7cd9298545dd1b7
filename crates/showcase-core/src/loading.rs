//! Progress of the initial model fetches.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadingState {
    pub total: usize,
    pub loaded: usize,
    pub error: Option<String>,
}

impl LoadingState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            loaded: 0,
            error: None,
        }
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = (self.loaded + 1).min(self.total);
    }

    /// Keep the first error; later failures are only logged by the caller.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }

    /// Whole percent, 100 for an empty set.
    pub fn progress(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.loaded as f32 / self.total as f32) * 100.0).round() as u32
    }

    #[inline]
    pub fn complete(&self) -> bool {
        self.loaded >= self.total
    }

    /// The loading screen stays up until everything loaded or an error shows.
    #[inline]
    pub fn screen_visible(&self) -> bool {
        !self.complete() || self.error.is_some()
    }
}
