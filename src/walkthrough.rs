//! # Guided Walkthrough
//!
//! Builds both tangents automatically on a loaded dataset, one small step at
//! a time, so a newcomer can follow how the transition temperature is found.
//!
//! The walkthrough is an ordered list of [`Step`]s. Before each step the
//! [`CancellationToken`] is checked; a step that already started always
//! finishes. Pauses go through a [`Pacer`], so tests run instantly and a
//! terminal demo can sleep between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::WalkthroughConfig;
use crate::session::{AnalysisSession, SessionError};

/// Shared stop flag checked between walkthrough steps.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. The current step finishes first.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Something that can wait.
pub trait Pacer {
    /// Block for `duration`.
    fn wait(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Returns immediately, adding up what it was asked to wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer {
    /// Total requested waiting time
    pub waited: Duration,
}

impl Pacer for InstantPacer {
    fn wait(&mut self, duration: Duration) {
        self.waited += duration;
    }
}

/// Walkthrough steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Point the user at the derivative curve
    AnalyseDerivative,
    /// Zoom both charts to the transition region
    Zoom,
    /// Find the baseline anchor
    LocateFirstAnchor,
    /// Build the baseline tangent in slot 0
    BuildFirstTangent,
    /// Make slot 1 active
    SwitchSlot,
    /// Find the steepest point of the transition
    LocateSecondAnchor,
    /// Build the transition tangent in slot 1
    BuildSecondTangent,
    /// Show the result
    Finish,
}

impl Step {
    /// All steps, in order.
    pub const ALL: [Step; 8] = [
        Step::AnalyseDerivative,
        Step::Zoom,
        Step::LocateFirstAnchor,
        Step::BuildFirstTangent,
        Step::SwitchSlot,
        Step::LocateSecondAnchor,
        Step::BuildSecondTangent,
        Step::Finish,
    ];

    /// One-based position of the step.
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

/// Report of a finished step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    /// Which step ran
    pub step: Step,
    /// What happened, for display
    pub message: String,
    /// Temperature range to highlight on the derivative chart
    pub highlight: Option<(f64, f64)>,
}

impl StepEvent {
    fn new(step: Step, message: String) -> Self {
        Self {
            step,
            message,
            highlight: None,
        }
    }
}

/// How a walkthrough ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughOutcome {
    /// Every step ran
    Completed,
    /// Cancelled before step `at_step` started
    Cancelled {
        /// One-based number of the step that did not run
        at_step: usize,
    },
}

/// Runs the scripted two-tangent demonstration against a session.
#[derive(Debug)]
pub struct Walkthrough<P: Pacer> {
    config: WalkthroughConfig,
    pacer: P,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct Anchors {
    first: Option<usize>,
    second: Option<usize>,
}

impl<P: Pacer> Walkthrough<P> {
    /// Create a walkthrough with its own cancellation token.
    pub fn new(config: WalkthroughConfig, pacer: P) -> Self {
        Self {
            config,
            pacer,
            token: CancellationToken::new(),
        }
    }

    /// Handle that stops this walkthrough between steps.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// The pacer, e.g. to read back an [`InstantPacer`]'s total.
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    fn step_delay(&self) -> Duration {
        Duration::from_millis(self.config.step_delay_ms)
    }

    fn half_step_delay(&self) -> Duration {
        Duration::from_millis(self.config.step_delay_ms / 2)
    }

    fn highlight_around(&self, x: f64) -> (f64, f64) {
        let half = self.config.highlight_half_width;
        (x - half, x + half)
    }

    /// Run every step against `session`, calling `observer` after each one.
    ///
    /// Both tangent slots are cleared first. Fails with
    /// [`SessionError::NoData`] when nothing is loaded.
    pub fn run<F>(
        &mut self,
        session: &mut AnalysisSession,
        mut observer: F,
    ) -> Result<WalkthroughOutcome, SessionError>
    where
        F: FnMut(&StepEvent),
    {
        if session.dataset().is_none() {
            return Err(SessionError::NoData);
        }
        session.clear_all();
        session.select_slot(0)?;

        let mut anchors = Anchors::default();
        for step in Step::ALL {
            if self.token.is_cancelled() {
                log::info!("Walkthrough cancelled before step {}", step.number());
                return Ok(WalkthroughOutcome::Cancelled {
                    at_step: step.number(),
                });
            }

            log::info!("Walkthrough step {}: {:?}", step.number(), step);
            let (event, pause) = self.execute(step, session, &mut anchors)?;
            observer(&event);
            self.pacer.wait(pause);
        }

        Ok(WalkthroughOutcome::Completed)
    }

    /// Perform one step. Returns its event and the pause that follows it.
    fn execute(
        &mut self,
        step: Step,
        session: &mut AnalysisSession,
        anchors: &mut Anchors,
    ) -> Result<(StepEvent, Duration), SessionError> {
        let dataset = session.dataset().ok_or(SessionError::NoData)?;

        match step {
            Step::AnalyseDerivative => {
                let message = format!(
                    "Derivative curve has {} points; peaks mark where the signal changes fastest",
                    dataset.derivative().len()
                );
                Ok((StepEvent::new(step, message), self.step_delay()))
            }
            Step::Zoom => {
                let [x_min, x_max] = self.config.zoom;
                session.on_main_x_range_changed(x_min, x_max)?;
                let message = format!("Zoomed both charts to {:.1}..{:.1} °C", x_min, x_max);
                Ok((StepEvent::new(step, message), self.half_step_delay()))
            }
            Step::LocateFirstAnchor => {
                let target = self.config.first_anchor_temperature;
                let index = dataset
                    .nearest_derivative_index(target)
                    .ok_or(SessionError::NoData)?;
                let x = dataset.derivative()[index].x;
                anchors.first = Some(index);

                let mut event = StepEvent::new(step, format!("Baseline anchor at {:.2} °C", x));
                event.highlight = Some(self.highlight_around(x));
                Ok((event, Duration::from_millis(self.config.highlight_duration_ms)))
            }
            Step::BuildFirstTangent => self.build(step, session, 0, anchors.first),
            Step::SwitchSlot => {
                self.pacer.wait(self.half_step_delay());
                session.select_slot(1)?;
                let event = StepEvent::new(step, "Switched to tangent 2".to_string());
                Ok((event, self.half_step_delay()))
            }
            Step::LocateSecondAnchor => {
                let [x_min, x_max] = self.config.zoom;
                let Some(index) = dataset.min_derivative_index_in(x_min, x_max) else {
                    let message = "No derivative points inside the zoom range".to_string();
                    return Ok((StepEvent::new(step, message), Duration::ZERO));
                };
                let x = dataset.derivative()[index].x;
                anchors.second = Some(index);

                let mut event = StepEvent::new(
                    step,
                    format!("Steepest point of the transition at {:.2} °C", x),
                );
                event.highlight = Some(self.highlight_around(x));
                Ok((event, Duration::from_millis(self.config.highlight_duration_ms)))
            }
            Step::BuildSecondTangent => self.build(step, session, 1, anchors.second),
            Step::Finish => {
                let message = match session.intersection() {
                    Some(point) => format!("Tangents cross at {:.1} °C", point.x),
                    None => "Tangents do not cross".to_string(),
                };
                Ok((StepEvent::new(step, message), self.step_delay()))
            }
        }
    }

    fn build(
        &mut self,
        step: Step,
        session: &mut AnalysisSession,
        slot: usize,
        anchor: Option<usize>,
    ) -> Result<(StepEvent, Duration), SessionError> {
        let Some(index) = anchor else {
            let message = format!("No anchor found, tangent {} skipped", slot + 1);
            return Ok((StepEvent::new(step, message), Duration::ZERO));
        };

        self.pacer
            .wait(Duration::from_millis(self.config.click_delay_ms));
        session.select_slot(slot)?;

        let message = match session.draw_from_derivative(index) {
            Ok(tangent) => format!(
                "Tangent {}: slope {:.6} through ({:.2}, {:.4})",
                slot + 1,
                tangent.params.slope,
                tangent.params.anchor_x,
                tangent.params.anchor_y
            ),
            Err(SessionError::ZeroTemperatureGradient { x }) => {
                log::warn!("Walkthrough cannot build tangent {} at {:.2}", slot + 1, x);
                format!("Temperature is constant at {:.2} °C, tangent {} skipped", x, slot + 1)
            }
            Err(SessionError::UndefinedSlope { x, .. }) => {
                log::warn!("Walkthrough cannot build tangent {} at {:.2}", slot + 1, x);
                format!("Slope is not finite at {:.2} °C, tangent {} skipped", x, slot + 1)
            }
            Err(e) => return Err(e),
        };
        Ok((StepEvent::new(step, message), Duration::ZERO))
    }
}
