use serde::{Deserialize, Serialize};

use crate::resources::{require_positive, ConfigError};

/// Hard limits that trigger a go-around before touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Largest tolerated cross-track offset [m]
    pub max_lateral_deviation: f64,
    /// Largest tolerated rate of descent [m/s]
    pub max_descent_rate: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_lateral_deviation: 1000.0,
            max_descent_rate: 12.0,
        }
    }
}

impl SafetyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("safety.max_lateral_deviation", self.max_lateral_deviation)?;
        require_positive("safety.max_descent_rate", self.max_descent_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    LateralDeviation { deviation: f64, limit: f64 },
    DescentRate { descent_rate: f64, limit: f64 },
    /// Flew past the far end of the runway without touching down
    ThresholdOverflown { along_track: f64 },
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::LateralDeviation { deviation, limit } => {
                write!(f, "lateral deviation {deviation:.1} m beyond {limit:.1} m")
            }
            AbortReason::DescentRate {
                descent_rate,
                limit,
            } => write!(
                f,
                "descent rate {descent_rate:.2} m/s beyond {limit:.2} m/s"
            ),
            AbortReason::ThresholdOverflown { along_track } => {
                write!(f, "runway overflown at x = {along_track:.1} m")
            }
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TerminalState {
    Landed,
    Aborted(AbortReason),
    TimedOut,
}

impl TerminalState {
    pub fn is_landed(&self) -> bool {
        matches!(self, TerminalState::Landed)
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, TerminalState::Aborted(_))
    }
}

impl std::fmt::Display for TerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalState::Landed => write!(f, "LANDED"),
            TerminalState::Aborted(reason) => write!(f, "ABORTED ({reason})"),
            TerminalState::TimedOut => write!(f, "TIMED_OUT"),
        }
    }
}

/// Runner state: running until exactly one terminal state is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Finished(TerminalState),
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }

    pub fn terminal(&self) -> Option<TerminalState> {
        match self {
            RunStatus::Running => None,
            RunStatus::Finished(state) => Some(*state),
        }
    }
}
