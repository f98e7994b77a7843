//! Scroll-driven bottom toolbar.
//!
//! [`ToolbarController`] is a two-state machine fed with scroll samples. It
//! only decides the target; moving pixels is the [`ToolbarAnimator`]'s job.
//! [`ToolbarTrack`] is an animator that keeps the offset in memory for
//! embedders that position the toolbar themselves each frame.

use echoes_platform::ToolbarAnimator;
use echoes_types::config::ToolbarConfig;
use echoes_types::event::ScrollSample;

use crate::animation::Tween;

/// Whether the toolbar is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarVisibility {
    Visible,
    Hidden,
}

/// Instruction to move the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarCommand {
    pub target: ToolbarVisibility,
    /// Vertical translation from the resting position, in logical pixels.
    pub translation_y: f32,
    pub duration_ms: u32,
}

impl ToolbarCommand {
    /// Forward this command to an animator.
    pub fn apply(&self, animator: &mut dyn ToolbarAnimator) {
        animator.animate_to(self.translation_y, self.duration_ms);
    }
}

// ---------------------------------------------------------------------------
// ToolbarController
// ---------------------------------------------------------------------------

/// Show/hide state machine with a hysteresis band around zero delta.
#[derive(Debug, Clone)]
pub struct ToolbarController {
    visibility: ToolbarVisibility,
    height: f32,
    threshold: i32,
    duration_ms: u32,
}

impl ToolbarController {
    /// Starts `Visible`.
    pub fn new(config: &ToolbarConfig) -> Self {
        Self {
            visibility: ToolbarVisibility::Visible,
            height: config.height,
            threshold: config.hide_threshold,
            duration_ms: config.animation_ms,
        }
    }

    pub fn visibility(&self) -> ToolbarVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == ToolbarVisibility::Visible
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Update the toolbar height (after a resize).
    ///
    /// A hidden toolbar must stay fully off-screen, so this returns an
    /// immediate command re-targeting it at the new height.
    pub fn set_height(&mut self, height: f32) -> Option<ToolbarCommand> {
        self.height = height;
        match self.visibility {
            ToolbarVisibility::Hidden => Some(ToolbarCommand {
                target: ToolbarVisibility::Hidden,
                translation_y: height,
                duration_ms: 0,
            }),
            ToolbarVisibility::Visible => None,
        }
    }

    /// Feed one pair of scroll offsets.
    ///
    /// Returns the command to issue when the state flips, `None` otherwise.
    pub fn on_scroll(&mut self, previous: i32, current: i32) -> Option<ToolbarCommand> {
        self.on_sample(ScrollSample::new(previous, current))
    }

    pub fn on_sample(&mut self, sample: ScrollSample) -> Option<ToolbarCommand> {
        let delta = sample.delta();
        let target = match self.visibility {
            ToolbarVisibility::Visible if delta > self.threshold => ToolbarVisibility::Hidden,
            ToolbarVisibility::Hidden if delta < -self.threshold => ToolbarVisibility::Visible,
            _ => return None,
        };
        self.visibility = target;
        log::debug!("toolbar -> {target:?} (delta {delta})");

        let translation_y = match target {
            ToolbarVisibility::Hidden => self.height,
            ToolbarVisibility::Visible => 0.0,
        };
        Some(ToolbarCommand {
            target,
            translation_y,
            duration_ms: self.duration_ms,
        })
    }
}

// ---------------------------------------------------------------------------
// ToolbarTrack
// ---------------------------------------------------------------------------

/// In-memory toolbar offset driven by tweens.
///
/// A new target always starts from the current offset, so a command issued
/// mid-animation reverses smoothly instead of jumping.
#[derive(Debug, Clone, Default)]
pub struct ToolbarTrack {
    offset: f32,
    tween: Option<Tween>,
}

impl ToolbarTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current translation from the resting position.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the running animation. Returns the new offset, or `None`
    /// when idle.
    pub fn tick(&mut self, dt_ms: u32) -> Option<f32> {
        let tween = self.tween.as_mut()?;
        self.offset = tween.tick(dt_ms);
        if tween.is_finished() {
            self.tween = None;
        }
        Some(self.offset)
    }
}

impl ToolbarAnimator for ToolbarTrack {
    fn animate_to(&mut self, translation_y: f32, duration_ms: u32) {
        if duration_ms == 0 {
            self.offset = translation_y;
            self.tween = None;
            return;
        }
        self.tween = Some(Tween::new(self.offset, translation_y, duration_ms));
    }
}
