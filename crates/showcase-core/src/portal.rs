//! The portal transition: a fast one-shot video that flips the facet halfway
//! through and holds on an interstitial quote.
//!
//! The state machine emits `TransitionCommand`s; the web layer applies the
//! video ones and the `Showcase` applies the facet switch. Overlay and
//! interstitial visibility are read from `phase()`.

use crate::constants::{INTERSTITIAL_DISPLAY_SEC, PORTAL_MID_OFFSET_SEC, PORTAL_PLAYBACK_RATE};
use crate::registry::Facet;
use crate::schedule::{CancelToken, Scheduler};
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalPhase {
    Idle,
    /// Video running up to the midpoint.
    Playing,
    /// Video paused, quote on screen.
    Interstitial,
    /// Video running from the midpoint to the end.
    Finishing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalEvent {
    FacetSwitch,
    InterstitialEnd,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionCommand {
    ResetVideo,
    PlayVideo { rate: f64 },
    PauseVideo,
    ResumeVideo,
    SetFacet(Facet),
}

pub type Commands = SmallVec<[TransitionCommand; 2]>;

/// Delay from playback start to the facet switch, in wall-clock seconds.
#[inline]
pub fn switch_delay(duration_sec: f64, rate: f64) -> f64 {
    (duration_sec * 0.5 + PORTAL_MID_OFFSET_SEC) / rate
}

#[derive(Debug)]
pub struct PortalTransition {
    phase: PortalPhase,
    rate: f64,
    token: CancelToken,
    scheduler: Scheduler<PortalEvent>,
    switch_scheduled: bool,
    switched: bool,
}

impl Default for PortalTransition {
    fn default() -> Self {
        Self {
            phase: PortalPhase::Idle,
            rate: PORTAL_PLAYBACK_RATE,
            token: CancelToken::new(),
            scheduler: Scheduler::default(),
            switch_scheduled: false,
            switched: false,
        }
    }
}

impl PortalTransition {
    #[inline]
    pub fn phase(&self) -> PortalPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != PortalPhase::Idle
    }

    #[inline]
    pub fn interstitial_visible(&self) -> bool {
        self.phase == PortalPhase::Interstitial
    }

    #[inline]
    pub fn switch_pending(&self) -> bool {
        self.switch_scheduled && !self.switched
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_len()
    }

    /// Begin the transition. Ignored while one is already running.
    pub fn start(&mut self) -> Commands {
        if self.is_active() {
            return Commands::new();
        }
        self.token = CancelToken::new();
        self.phase = PortalPhase::Playing;
        self.switch_scheduled = false;
        self.switched = false;
        log::info!("[portal] start at {}x", self.rate);
        smallvec![
            TransitionCommand::ResetVideo,
            TransitionCommand::PlayVideo { rate: self.rate },
        ]
    }

    /// The video reported its metadata. Without a usable duration the switch
    /// waits for the end of the video instead.
    pub fn on_duration_known(&mut self, duration_sec: Option<f64>) {
        if self.phase != PortalPhase::Playing || self.switch_scheduled {
            return;
        }
        match duration_sec.filter(|d| d.is_finite() && *d > 0.0) {
            Some(d) => {
                let delay = switch_delay(d, self.rate);
                self.scheduler
                    .schedule(delay, &self.token, PortalEvent::FacetSwitch);
                self.switch_scheduled = true;
                log::info!("[portal] switch in {delay:.2}s (clip {d:.2}s)");
            }
            None => log::warn!("[portal] video duration unknown; switching at the end"),
        }
    }

    pub fn advance(&mut self, dt_sec: f64) -> Commands {
        let mut out = Commands::new();
        for event in self.scheduler.advance(dt_sec) {
            match event {
                PortalEvent::FacetSwitch => {
                    self.switched = true;
                    self.phase = PortalPhase::Interstitial;
                    self.scheduler.schedule(
                        INTERSTITIAL_DISPLAY_SEC,
                        &self.token,
                        PortalEvent::InterstitialEnd,
                    );
                    out.push(TransitionCommand::PauseVideo);
                    out.push(TransitionCommand::SetFacet(Facet::Alternate));
                }
                PortalEvent::InterstitialEnd => {
                    self.phase = PortalPhase::Finishing;
                    out.push(TransitionCommand::ResumeVideo);
                }
            }
        }
        out
    }

    /// The video reached its end: hide everything, applying the switch now if
    /// it never happened.
    pub fn on_video_ended(&mut self) -> Commands {
        if !self.is_active() {
            return Commands::new();
        }
        let mut out = Commands::new();
        if !self.switched {
            out.push(TransitionCommand::SetFacet(Facet::Alternate));
            self.switched = true;
        }
        self.finish();
        log::info!("[portal] done");
        out
    }

    /// Tear down a running transition, dropping any pending switch.
    pub fn abort(&mut self) -> Commands {
        if !self.is_active() {
            return Commands::new();
        }
        self.finish();
        log::info!("[portal] aborted");
        smallvec![TransitionCommand::PauseVideo]
    }

    fn finish(&mut self) {
        self.token.cancel();
        self.phase = PortalPhase::Idle;
        self.switch_scheduled = false;
    }
}
