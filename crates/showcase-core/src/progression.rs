//! Application phases and the white fade between them.

use crate::constants::{DESKTOP_MIN_WIDTH, PHASE_FADE_CLEAR_SEC, PHASE_FADE_SWITCH_SEC};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Intro,
    Main,
    AlternateLanding,
    Thanks,
}

impl Phase {
    /// Value used for the `data-phase` attribute on the page root.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Main => "main",
            Phase::AlternateLanding => "alternate-landing",
            Phase::Thanks => "thanks",
        }
    }
}

#[inline]
pub fn is_desktop_width(width_css_px: f64) -> bool {
    width_css_px >= DESKTOP_MIN_WIDTH as f64
}

/// Outcome of one viewport width observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateUpdate {
    pub desktop: bool,
    /// The desktop/narrow verdict differs from the previous observation.
    pub changed: bool,
    /// First time the viewport is wide enough; boot the experience now.
    pub start: bool,
}

/// Re-evaluated on every resize. The experience boots once, the first time
/// the viewport is wide enough, and is never torn down; narrowing afterwards
/// only brings the notice back.
#[derive(Clone, Debug, Default)]
pub struct DesktopGate {
    desktop: Option<bool>,
    started: bool,
}

impl DesktopGate {
    pub fn observe(&mut self, width_css_px: f64) -> GateUpdate {
        let desktop = is_desktop_width(width_css_px);
        let changed = self.desktop != Some(desktop);
        self.desktop = Some(desktop);
        let start = desktop && !self.started;
        if start {
            self.started = true;
        }
        GateUpdate {
            desktop,
            changed,
            start,
        }
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }
}

#[derive(Clone, Copy, Debug)]
struct PhaseFade {
    elapsed: f32,
    to: Phase,
    switched: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PhaseFlow {
    phase: Phase,
    fade: Option<PhaseFade>,
}

impl PhaseFlow {
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn finish_intro(&mut self) -> bool {
        if self.phase != Phase::Intro {
            return false;
        }
        self.phase = Phase::Main;
        log::info!("[phase] intro -> main");
        true
    }

    /// Start the fade into the alternate landing. The caller checks the
    /// discovery gate.
    pub fn begin_continue(&mut self) -> bool {
        self.begin(Phase::Main, Phase::AlternateLanding)
    }

    pub fn complete_landing(&mut self) -> bool {
        self.begin(Phase::AlternateLanding, Phase::Thanks)
    }

    fn begin(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from || self.fade.is_some() {
            return false;
        }
        self.fade = Some(PhaseFade {
            elapsed: 0.0,
            to,
            switched: false,
        });
        true
    }

    /// Advance the fade; returns the new phase on the frame it switches.
    pub fn advance(&mut self, dt_sec: f32) -> Option<Phase> {
        let fade = self.fade.as_mut()?;
        fade.elapsed += dt_sec.max(0.0);
        let mut changed = None;
        if !fade.switched && fade.elapsed >= PHASE_FADE_SWITCH_SEC {
            fade.switched = true;
            log::info!("[phase] {:?} -> {:?}", self.phase, fade.to);
            self.phase = fade.to;
            changed = Some(fade.to);
        }
        if fade.elapsed >= PHASE_FADE_CLEAR_SEC + PHASE_FADE_SWITCH_SEC {
            self.fade = None;
        }
        changed
    }

    /// White overlay opacity: ramps in until the switch, holds until the
    /// clear point, then ramps out over the same duration.
    pub fn fade_opacity(&self) -> f32 {
        let Some(fade) = self.fade else {
            return 0.0;
        };
        let ramp = PHASE_FADE_SWITCH_SEC;
        let t = fade.elapsed;
        if t < ramp {
            t / ramp
        } else if t < PHASE_FADE_CLEAR_SEC {
            1.0
        } else {
            (1.0 - (t - PHASE_FADE_CLEAR_SEC) / ramp).clamp(0.0, 1.0)
        }
    }
}
