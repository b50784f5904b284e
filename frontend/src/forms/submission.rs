use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::{debug, info, warn};
use rand::Rng;
use thiserror::Error;

use super::snapshot::FormSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// One submit attempt. A fresh state is created at every submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmissionState {
    attempt: u64,
    phase: SubmissionPhase,
    history: Vec<SubmissionPhase>,
}

impl FormSubmissionState {
    pub fn new(attempt: u64) -> Self {
        Self {
            attempt,
            phase: SubmissionPhase::Idle,
            history: vec![SubmissionPhase::Idle],
        }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Phases visited by this attempt, oldest first.
    #[cfg(test)]
    pub fn history(&self) -> &[SubmissionPhase] {
        &self.history
    }

    pub(crate) fn enter(&mut self, phase: SubmissionPhase) {
        debug!("submission #{} {:?} -> {:?}", self.attempt, self.phase, phase);
        self.phase = phase;
        self.history.push(phase);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission failed")]
pub struct SubmissionError;

/// Deferred execution, so timers can be replaced in tests.
pub trait Clock {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()>;
}

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// The remote end a form hands its values to. One attempt per user submit;
/// retrying is up to the user.
pub trait Submitter {
    fn submit_form(&self, payload: FormSnapshot) -> LocalBoxFuture<'static, Result<(), SubmissionError>>;
}

pub struct GlooClock;

impl Clock for GlooClock {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::TimeoutFuture::new(millis).boxed_local()
    }
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Stands in for a real endpoint: waits a fixed delay, then succeeds when a
/// single uniform draw lands below the success rate.
pub struct SimulatedSubmitter<C, R> {
    clock: C,
    random: R,
    delay_ms: u32,
    success_rate: f64,
}

impl<C: Clock, R: RandomSource> SimulatedSubmitter<C, R> {
    pub fn new(clock: C, random: R, delay_ms: u32, success_rate: f64) -> Self {
        Self {
            clock,
            random,
            delay_ms,
            success_rate,
        }
    }
}

impl<C: Clock, R: RandomSource> Submitter for SimulatedSubmitter<C, R> {
    fn submit_form(&self, payload: FormSnapshot) -> LocalBoxFuture<'static, Result<(), SubmissionError>> {
        match serde_json::to_string(&payload) {
            Ok(json) => debug!("simulating submission of {} bytes", json.len()),
            Err(e) => warn!("could not render submission payload: {}", e),
        }
        let delay = self.clock.sleep(self.delay_ms);
        let draw = self.random.next_unit();
        let succeeds = draw < self.success_rate;
        async move {
            delay.await;
            if succeeds {
                info!("simulated submission accepted (draw {:.3})", draw);
                Ok(())
            } else {
                warn!("simulated submission rejected (draw {:.3})", draw);
                Err(SubmissionError)
            }
        }
        .boxed_local()
    }
}
