//! Konfiguration und Ergebnisstruktur eines Simulationslaufs.
//!
//! Die [`SimConfig`] bündelt alle zwölf numerischen Felder, die ein
//! Aufrufer (CLI oder Bibliotheksnutzer) für einen Lauf angibt. Sie ist
//! für die Dauer eines Laufs unveränderlich; der Controller besitzt sie
//! exklusiv. Die JSON-Feldnamen sind camelCase, damit Konfigurationsdateien
//! 1:1 dem historischen Formularformat entsprechen.

use serde::{Deserialize, Serialize};

/// Vollständige Konfiguration eines Simulationslaufs.
///
/// Hinweis: `low_given_high` und `low_given_low` werden vom
/// Übergangsschritt nicht konsultiert — nur `high_given_high` und
/// `high_given_low` steuern die Kette. Die Felder werden trotzdem
/// angenommen; der Harness warnt, wenn eine Übergangszeile nicht zu 1
/// summiert (siehe `hochlern-harness`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Auszahlung, wenn Aktion High auf Zustand High trifft.
    pub high_payoff: f32,
    /// Garantierte Auszahlung der Aktion Low.
    pub low_payoff: f32,
    /// Wahrscheinlichkeit, dass die erste Periode im Zustand High startet.
    pub start_high: f32,
    /// Komplementfeld zu `start_high`; wird nicht konsultiert.
    pub start_low: f32,
    /// Pr(High | High) für den Übergangsschritt.
    pub high_given_high: f32,
    /// Pr(Low | High); wird nicht konsultiert.
    pub low_given_high: f32,
    /// Pr(High | Low) für den Übergangsschritt.
    pub high_given_low: f32,
    /// Pr(Low | Low); wird nicht konsultiert.
    pub low_given_low: f32,
    /// Diskontfaktor, als Hyperparameter an den Agenten durchgereicht.
    pub discount_factor: f32,
    /// Lernrate, als Explorations-Epsilon an den Agenten durchgereicht.
    pub learning_rate: f32,
    /// Episodenlänge in Perioden.
    pub num_periods: usize,
    /// Anzahl Trainings-Episoden.
    pub num_learn_iterations: usize,
    /// Anzahl Test-Episoden.
    pub num_test_iterations: usize,
}

impl Default for SimConfig {
    /// Die historischen Formular-Startwerte.
    fn default() -> Self {
        Self {
            high_payoff: 10.0,
            low_payoff: 5.0,
            start_high: 0.2,
            start_low: 0.8,
            high_given_high: 0.2,
            low_given_high: 0.8,
            high_given_low: 0.2,
            low_given_low: 0.8,
            discount_factor: 0.99,
            learning_rate: 0.10,
            num_periods: 50,
            num_learn_iterations: 100,
            num_test_iterations: 100,
        }
    }
}

/// Mittelwerte über alle Test-Episoden eines Laufs.
///
/// Invariante: `0 <= achieved <= maximum` gilt für jede einzelne Episode
/// (das Orakel dominiert jede Politik schwach) und damit auch für die
/// Mittelwerte.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Mittlere erzielte Episodenbelohnung.
    pub achieved: f32,
    /// Mittlere Orakel-Obergrenze pro Episode.
    pub maximum: f32,
}

impl RunResult {
    /// Anteil der Orakel-Obergrenze, den der Agent erreicht hat (0..=1).
    #[must_use]
    pub fn score_fraction(&self) -> f32 {
        if self.maximum == 0.0 {
            return 0.0;
        }
        self.achieved / self.maximum
    }
}
