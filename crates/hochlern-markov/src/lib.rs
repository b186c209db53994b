//! Ausgangsgenerator und Beispiel-Agent für die Zwei-Zustands-Umgebung.
//!
//! Die [`MarkovChain`] erzeugt pro Episode eine endliche Folge verborgener
//! Zustände aus einer Markov-Kette erster Ordnung. Der [`PayoffBandit`]
//! demonstriert, wie das [`Agent`](hochlern_core::Agent)-Trait für diese
//! Umgebung implementiert werden kann: ein ε-greedy-Bandit mit
//! inkrementellen Wertschätzungen pro Aktion.

use hochlern_core::{Action, Agent, Revealed, SimConfig, State};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

pub mod error;

pub use error::{BanditError, Result};

/// Übergangsparameter der Zwei-Zustands-Kette.
///
/// Nur `start_high`, `high_given_high` und `high_given_low` steuern die
/// Kette; die Komplementfelder der [`SimConfig`] bleiben unbeachtet
/// (historisch gewachsenes Verhalten, siehe `hochlern-core::config`).
#[derive(Debug, Clone, Copy)]
pub struct MarkovChain {
    start_high: f32,
    high_given_high: f32,
    high_given_low: f32,
}

impl MarkovChain {
    /// Übernimmt die relevanten Felder aus der Konfiguration.
    #[must_use]
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            start_high: cfg.start_high,
            high_given_high: cfg.high_given_high,
            high_given_low: cfg.high_given_low,
        }
    }

    /// Erzeugt genau `num_periods` Zustände; `0` ergibt eine leere Folge.
    ///
    /// Der Zufall wird injiziert, damit Tests mit einem geseedeten
    /// Generator deterministisch laufen.
    pub fn generate<R: Rng + ?Sized>(&self, num_periods: usize, rng: &mut R) -> Vec<State> {
        let mut outcomes = Vec::with_capacity(num_periods);
        if num_periods == 0 {
            return outcomes;
        }

        let first = if rng.gen::<f32>() < self.start_high {
            State::High
        } else {
            State::Low
        };
        outcomes.push(first);

        for i in 1..num_periods {
            let next = self.next(outcomes[i - 1], rng);
            outcomes.push(next);
        }
        outcomes
    }

    /// Ein Übergangsschritt; kein Gedächtnis über den Vorzustand hinaus.
    fn next<R: Rng + ?Sized>(&self, prev: State, rng: &mut R) -> State {
        let r = rng.gen::<f32>();
        let p_high = match prev {
            State::Low => self.high_given_low,
            State::High => self.high_given_high,
        };
        if r <= p_high {
            State::High
        } else {
            State::Low
        }
    }
}

fn action_index(action: Action) -> usize {
    match action {
        Action::Low => 0,
        Action::High => 1,
    }
}

fn warn(msg: &str) {
    #[cfg(feature = "telemetry")]
    tracing::warn!("{msg}");
    #[cfg(not(feature = "telemetry"))]
    eprintln!("hochlern-markov: {msg}");
}

/// Einfache ε-greedy Policy über die beiden Aktionen.
///
/// Mit Wahrscheinlichkeit `epsilon` wird im Trainingsmodus zufällig
/// exploriert, andernfalls die Aktion mit der höheren Wertschätzung
/// gewählt. Bei Gleichstand fällt die Wahl auf [`Action::Low`], die
/// garantierte Auszahlung.
#[derive(Debug)]
pub struct PayoffBandit {
    /// Wahrscheinlichkeit für Explorationsschritte zwischen 0.0 und 1.0.
    pub epsilon: f32,
    values: [f32; 2],
    pulls: [u64; 2],
    last_action: Option<Action>,
    training: bool,
    rng: StdRng,
}

impl PayoffBandit {
    /// Erzeugt einen Banditen mit explizitem Epsilon.
    ///
    /// Ohne Seed wird aus Entropie initialisiert; mit Seed ist jede
    /// Entscheidung reproduzierbar.
    #[must_use]
    pub fn new(epsilon: f32, seed: Option<u64>) -> Self {
        Self {
            epsilon: epsilon.clamp(0.0, 1.0),
            values: [0.0; 2],
            pulls: [0; 2],
            last_action: None,
            training: true,
            rng: match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            },
        }
    }

    /// Leitet die Hyperparameter aus der Laufkonfiguration ab.
    ///
    /// Die Lernrate des Formulars wird als Explorations-Epsilon
    /// interpretiert. Der Diskontfaktor hat für einen zustandslosen
    /// Banditen keine Wirkung und wird ignoriert.
    #[must_use]
    pub fn from_config(cfg: &SimConfig, seed: Option<u64>) -> Self {
        Self::new(cfg.learning_rate, seed)
    }

    /// Rekonstruiert einen Banditen aus einem [`snapshot`](Agent::snapshot).
    pub fn try_from_snapshot(snapshot: Value, seed: Option<u64>) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct Snap {
            epsilon: f32,
            values: [f32; 2],
            pulls: [u64; 2],
        }
        let snap: Snap = serde_json::from_value(snapshot)?;
        if !snap.epsilon.is_finite() || !(0.0..=1.0).contains(&snap.epsilon) {
            return Err(BanditError::SnapshotField("epsilon"));
        }
        let mut agent = Self::new(snap.epsilon, seed);
        agent.values = snap.values;
        agent.pulls = snap.pulls;
        Ok(agent)
    }

    /// Aktuelle Wertschätzungen, Reihenfolge `[Low, High]`.
    #[must_use]
    pub fn values(&self) -> [f32; 2] {
        self.values
    }
}

impl Agent for PayoffBandit {
    /// Wählt eine Aktion per ε-greedy; die Historie bleibt ungenutzt.
    // TODO: Aufgedeckte Historie für zustandsabhängige Schätzung nutzen.
    fn decide(&mut self, _revealed: &Revealed) -> Action {
        let explore = self.training && self.rng.gen::<f32>() < self.epsilon;
        let action = if explore {
            if self.rng.gen::<bool>() {
                Action::High
            } else {
                Action::Low
            }
        } else if self.values[1] > self.values[0] {
            Action::High
        } else {
            Action::Low
        };
        self.last_action = Some(action);
        action
    }

    /// Inkrementelles Mittelwert-Update der zuletzt gewählten Aktion.
    fn learn(&mut self, reward: f32) {
        if !self.training {
            return;
        }
        let Some(action) = self.last_action else {
            warn("learn() ohne vorhergehendes decide() ignoriert");
            return;
        };
        let i = action_index(action);
        self.pulls[i] += 1;
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / self.pulls[i] as f32;
        self.values[i] += step * (reward - self.values[i]);
    }

    fn set_training(&mut self, on: bool) {
        self.training = on;
    }

    fn is_training(&self) -> bool {
        self.training
    }

    /// Persistiert Epsilon, Wertschätzungen und Zählstände als JSON.
    fn snapshot(&self) -> Value {
        json!({
            "epsilon": self.epsilon,
            "values": self.values,
            "pulls": self.pulls,
        })
    }

    /// Übernimmt Felder aus einem Snapshot; ungültige Werte werden mit
    /// einer Warnung verworfen statt den Agenten zu korrumpieren.
    fn load(&mut self, snapshot: Value) {
        match Self::try_from_snapshot(snapshot, None) {
            Ok(loaded) => {
                self.epsilon = loaded.epsilon;
                self.values = loaded.values;
                self.pulls = loaded.pulls;
            }
            Err(e) => warn(&format!("Snapshot verworfen: {e}")),
        }
    }
}
