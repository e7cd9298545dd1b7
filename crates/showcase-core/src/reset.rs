//! Black fade wrapped around an explicit deselect.

use crate::constants::{RESET_FADE_IN_SEC, RESET_FADE_OUT_SEC, RESET_HOLD_SEC};

#[derive(Clone, Debug, Default)]
pub struct ResetFade {
    elapsed: Option<f32>,
    applied: bool,
}

impl ResetFade {
    #[inline]
    pub fn running(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Start a fade. Returns `false` if one is already running.
    pub fn request(&mut self) -> bool {
        if self.running() {
            return false;
        }
        self.elapsed = Some(0.0);
        self.applied = false;
        true
    }

    /// Advance; returns `true` on the frame the screen is fully black and the
    /// deselect should be applied.
    pub fn advance(&mut self, dt_sec: f32) -> bool {
        let Some(t) = self.elapsed.as_mut() else {
            return false;
        };
        *t += dt_sec.max(0.0);
        let t = *t;

        let mut apply = false;
        if !self.applied && t >= RESET_FADE_IN_SEC {
            self.applied = true;
            apply = true;
        }
        if t >= RESET_FADE_IN_SEC + RESET_HOLD_SEC + RESET_FADE_OUT_SEC {
            self.elapsed = None;
        }
        apply
    }

    pub fn opacity(&self) -> f32 {
        let Some(t) = self.elapsed else {
            return 0.0;
        };
        let hold_end = RESET_FADE_IN_SEC + RESET_HOLD_SEC;
        if t < RESET_FADE_IN_SEC {
            t / RESET_FADE_IN_SEC
        } else if t < hold_end {
            1.0
        } else {
            (1.0 - (t - hold_end) / RESET_FADE_OUT_SEC).clamp(0.0, 1.0)
        }
    }
}
