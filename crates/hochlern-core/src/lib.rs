//! Kerntypen und Traits für die Hochlern-Simulation.
//!
//! Dieses Crate definiert das Vokabular der Zwei-Zustands-Bandit-Umgebung:
//! den verborgenen Markov-Zustand ([`State`]), die Aktion des Agenten
//! ([`Action`]) sowie das [`Agent`]-Trait, über das der Harness mit einer
//! beliebigen Entscheidungs-/Lernstrategie spricht. Konkrete Algorithmen
//! leben in eigenen Crates (z. B. `hochlern-markov`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod config;

pub use config::{RunResult, SimConfig};

/// Der verborgene Zustand der Umgebung in einer Periode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Low,
    High,
}

impl State {
    /// Auszahlung des Orakels, das den Zustand im Voraus kennt.
    #[must_use]
    pub fn best_payoff(self, cfg: &SimConfig) -> f32 {
        match self {
            State::High => cfg.high_payoff,
            State::Low => cfg.low_payoff,
        }
    }
}

/// Die Aktion, die der Agent pro Periode wählt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Low,
    High,
}

/// Die Beobachtungshistorie einer Episode: `None` bedeutet, dass der
/// wahre Zustand dieser Periode dem Agenten noch nicht aufgedeckt wurde.
pub type Revealed = [Option<State>];

/// Entscheidungs-/Lernfähigkeit, über die der Harness polymorph ist.
///
/// Der Harness ruft pro Periode zuerst [`decide`](Agent::decide) mit der
/// bisher aufgedeckten Historie auf, deckt dann den wahren Zustand auf und
/// meldet die Belohnung über [`learn`](Agent::learn) zurück — letzteres nur,
/// solange der Trainingsmodus aktiv ist.
pub trait Agent {
    /// Wählt eine Aktion auf Basis der bisher aufgedeckten Zustände.
    fn decide(&mut self, revealed: &Revealed) -> Action;
    /// Verarbeitet die Belohnung der zuletzt gewählten Aktion.
    fn learn(&mut self, reward: f32);
    /// Schaltet Gewichts-Updates an oder ab.
    fn set_training(&mut self, on: bool);
    /// Ob Gewichts-Updates derzeit aktiv sind.
    fn is_training(&self) -> bool;
    /// Persistiert den inneren Zustand als JSON.
    fn snapshot(&self) -> Value;
    /// Rekonstruiert den inneren Zustand aus einem Snapshot.
    fn load(&mut self, snapshot: Value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_payoff_follows_state() {
        let cfg = SimConfig::default();
        assert!((State::High.best_payoff(&cfg) - cfg.high_payoff).abs() < f32::EPSILON);
        assert!((State::Low.best_payoff(&cfg) - cfg.low_payoff).abs() < f32::EPSILON);
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&State::High).expect("Serialization failed");
        assert_eq!(json, "\"high\"");
        let back: State = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(back, State::High);
    }
}
