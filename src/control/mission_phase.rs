use std::fmt;

use serde::{Deserialize, Serialize};

use crate::telemetry_system::telemetry::TelemetryState;

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionPhase {
    PreLaunch,
    Ignition,
    Ascent,
    /// Main engine cut-off: propellant exhausted, still climbing.
    Meco,
    Apogee,
    Descent,
    Landed,
}

impl MissionPhase {
    /// Resolves the phase for the next tick from the state the tick starts with.
    ///
    /// `Ignition` has no duration of its own: it becomes `Ascent` on the first
    /// tick that finds propellant in the tanks. The ground-impact override is
    /// applied later by the physics step, not here.
    pub fn next(self, state: &TelemetryState) -> MissionPhase {
        match self {
            MissionPhase::PreLaunch => MissionPhase::PreLaunch,
            MissionPhase::Ignition | MissionPhase::Ascent => {
                if state.fuel > 0.0 {
                    MissionPhase::Ascent
                } else {
                    MissionPhase::Meco
                }
            }
            MissionPhase::Meco => {
                if state.velocity < 0.0 {
                    MissionPhase::Apogee
                } else {
                    MissionPhase::Meco
                }
            }
            MissionPhase::Apogee => {
                if state.altitude <= 0.0 {
                    MissionPhase::Landed
                } else {
                    MissionPhase::Descent
                }
            }
            MissionPhase::Descent => {
                if state.altitude <= 0.0 {
                    MissionPhase::Landed
                } else {
                    MissionPhase::Descent
                }
            }
            MissionPhase::Landed => MissionPhase::Landed,
        }
    }

    pub fn is_burning(self) -> bool {
        matches!(self, MissionPhase::Ascent)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MissionPhase::Landed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MissionPhase::PreLaunch => "PRE_LAUNCH",
            MissionPhase::Ignition => "IGNITION",
            MissionPhase::Ascent => "ASCENT",
            MissionPhase::Meco => "MECO",
            MissionPhase::Apogee => "APOGEE",
            MissionPhase::Descent => "DESCENT",
            MissionPhase::Landed => "LANDED",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
