#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Train/test harness for the two-state Markov bandit environment.
//!
//! This crate drives a pluggable [`Agent`] through simulated episodes:
//! a training phase with learning enabled, then a testing phase that
//! freezes learning and scores the agent against an oracle which always
//! picks the realized best action. It follows the principle:
//! **the harness owns episode mechanics, never the learning algorithm**.

use hochlern_core::{Action, Agent, RunResult, SimConfig, State};
use hochlern_markov::MarkovChain;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub mod error;

pub use error::{HarnessError, Result};

// Validation constants
/// Tolerance when checking that a configured probability row sums to one
const ROW_SUM_TOLERANCE: f32 = 1e-3;

// Fallback constants
/// Fallback timestamp when formatting fails
const FALLBACK_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// Phase of a simulation run, reported to the caller's observer before
/// each phase begins. Carries no computational meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Training,
    Testing,
}

/// Cooperative cancellation flag, checked between episodes.
///
/// Clones share the same flag, so a token handed out before a run can
/// stop that run from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn warn(msg: &str) {
    #[cfg(feature = "telemetry")]
    tracing::warn!("{msg}");
    #[cfg(not(feature = "telemetry"))]
    eprintln!("hochlern-harness: {msg}");
}

fn check_probability(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(HarnessError::InvalidConfig(format!(
            "{name} must be a probability in [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// Validate a configuration before any simulation work begins.
///
/// Rejects non-finite fields, probabilities outside [0, 1], non-positive
/// payoffs and zero period/iteration counts. Complement fields that do
/// not sum to one with their counterpart only produce a warning: the
/// transition step never consults them, so the run is still well defined.
pub fn validate(cfg: &SimConfig) -> Result<()> {
    for (name, value) in [("highPayoff", cfg.high_payoff), ("lowPayoff", cfg.low_payoff)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(HarnessError::InvalidConfig(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }

    for (name, value) in [
        ("startHigh", cfg.start_high),
        ("startLow", cfg.start_low),
        ("highGivenHigh", cfg.high_given_high),
        ("lowGivenHigh", cfg.low_given_high),
        ("highGivenLow", cfg.high_given_low),
        ("lowGivenLow", cfg.low_given_low),
        ("discountFactor", cfg.discount_factor),
        ("learningRate", cfg.learning_rate),
    ] {
        check_probability(name, value)?;
    }

    for (name, value) in [
        ("numPeriods", cfg.num_periods),
        ("numLearnIterations", cfg.num_learn_iterations),
        ("numTestIterations", cfg.num_test_iterations),
    ] {
        if value == 0 {
            return Err(HarnessError::InvalidConfig(format!(
                "{name} must be at least 1"
            )));
        }
    }

    for (row, a, b) in [
        ("startHigh/startLow", cfg.start_high, cfg.start_low),
        (
            "highGivenHigh/lowGivenHigh",
            cfg.high_given_high,
            cfg.low_given_high,
        ),
        (
            "highGivenLow/lowGivenLow",
            cfg.high_given_low,
            cfg.low_given_low,
        ),
    ] {
        if (a + b - 1.0).abs() > ROW_SUM_TOLERANCE {
            warn(&format!(
                "{row} sum to {:.3}, not 1; only the High entry drives the chain",
                a + b
            ));
        }
    }

    Ok(())
}

/// Drive the agent through one episode.
///
/// Per period the agent decides from the revealed history (the current
/// period still hidden), then the true state is revealed, then the reward
/// is accounted: action Low always earns `low_payoff`, action High earns
/// `high_payoff` only when the true state is High. Rewards are fed back
/// via [`Agent::learn`] only when `learning` is set.
fn run_episode<A>(cfg: &SimConfig, outcomes: &[State], agent: &mut A, learning: bool) -> Vec<f32>
where
    A: Agent + ?Sized,
{
    let mut revealed: Vec<Option<State>> = vec![None; outcomes.len()];
    let mut rewards = vec![0.0_f32; outcomes.len()];

    for (i, &outcome) in outcomes.iter().enumerate() {
        let action = agent.decide(&revealed);
        revealed[i] = Some(outcome);

        let reward = match (action, outcome) {
            (Action::Low, _) => cfg.low_payoff,
            (Action::High, State::High) => cfg.high_payoff,
            (Action::High, State::Low) => 0.0,
        };
        if learning {
            agent.learn(reward);
        }
        rewards[i] = reward;
    }

    rewards
}

/// Run the training phase: `num_learn_iterations` fresh episodes with
/// learning enabled. Per-episode rewards are discarded; the only output
/// is the agent's updated internal state.
pub fn run_training<A, R>(
    cfg: &SimConfig,
    agent: &mut A,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<()>
where
    A: Agent,
    R: Rng + ?Sized,
{
    let chain = MarkovChain::from_config(cfg);
    agent.set_training(true);

    for _ in 0..cfg.num_learn_iterations {
        if cancel.is_cancelled() {
            return Err(HarnessError::Cancelled);
        }
        let outcomes = chain.generate(cfg.num_periods, rng);
        let _rewards = run_episode(cfg, &outcomes, agent, true);
    }

    Ok(())
}

/// Run the testing phase: `num_test_iterations` fresh episodes with
/// learning disabled, scored against the oracle best case.
///
/// Returns the per-episode averages of achieved and oracle-maximum
/// reward. A zero iteration count is rejected here as well, so a direct
/// caller cannot produce a 0/0 average.
pub fn run_testing<A, R>(
    cfg: &SimConfig,
    agent: &mut A,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<RunResult>
where
    A: Agent,
    R: Rng + ?Sized,
{
    if cfg.num_test_iterations == 0 {
        return Err(HarnessError::InvalidConfig(
            "numTestIterations must be at least 1".to_string(),
        ));
    }

    let chain = MarkovChain::from_config(cfg);
    agent.set_training(false);

    let mut achieved_sum = 0.0_f32;
    let mut maximum_sum = 0.0_f32;

    for _ in 0..cfg.num_test_iterations {
        if cancel.is_cancelled() {
            return Err(HarnessError::Cancelled);
        }
        let outcomes = chain.generate(cfg.num_periods, rng);
        let rewards = run_episode(cfg, &outcomes, agent, false);

        let achieved: f32 = rewards.iter().sum();
        let maximum: f32 = outcomes.iter().map(|s| s.best_payoff(cfg)).sum();
        debug_assert!(
            achieved <= maximum + f32::EPSILON * maximum.abs(),
            "oracle must weakly dominate any policy"
        );

        achieved_sum += achieved;
        maximum_sum += maximum;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = cfg.num_test_iterations as f32;
    Ok(RunResult {
        achieved: achieved_sum / n,
        maximum: maximum_sum / n,
    })
}

/// Controller for a single simulation submission.
///
/// Owns the validated configuration and a cancellation token. Each call
/// to [`run`](Simulation::run) constructs a fresh agent through the
/// caller-supplied factory, so no state leaks between runs.
#[derive(Debug, Clone)]
pub struct Simulation {
    cfg: SimConfig,
    cancel: CancelToken,
}

impl Simulation {
    /// Validate the configuration and build a controller around it.
    pub fn new(cfg: SimConfig) -> Result<Self> {
        validate(&cfg)?;
        Ok(Self {
            cfg,
            cancel: CancelToken::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// A handle that cancels this controller's runs between episodes.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run training then testing with a freshly constructed agent.
    ///
    /// `observe` is called with [`Phase::Training`] and [`Phase::Testing`]
    /// before the respective phase begins; training always completes
    /// before testing starts.
    pub fn run<A, F, R, O>(&self, make_agent: F, rng: &mut R, mut observe: O) -> Result<RunResult>
    where
        A: Agent,
        F: FnOnce(&SimConfig) -> A,
        R: Rng + ?Sized,
        O: FnMut(Phase),
    {
        let mut agent = make_agent(&self.cfg);

        observe(Phase::Training);
        run_training(&self.cfg, &mut agent, rng, &self.cancel)?;

        observe(Phase::Testing);
        run_testing(&self.cfg, &mut agent, rng, &self.cancel)
    }
}

/// Result of one submission as presented to the caller: the averages
/// plus a timestamp and the achieved share of the oracle ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated
    pub ts: String,
    /// Average per-episode achieved reward
    pub achieved: f32,
    /// Average per-episode oracle-best reward
    pub maximum: f32,
    /// `achieved / maximum`, 0 when the ceiling is 0
    pub score_fraction: f32,
}

impl RunReport {
    #[must_use]
    pub fn new(result: RunResult) -> Self {
        Self {
            ts: iso8601_now(),
            achieved: result.achieved,
            maximum: result.maximum,
            score_fraction: result.score_fraction(),
        }
    }
}

fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}
