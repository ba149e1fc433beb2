use serde::{Deserialize, Serialize};

/// How many arrivals may be admitted on a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// At most one arrival per tick. Jobs sharing an arrival time are
    /// admitted on consecutive ticks.
    #[default]
    SingleHead,
    /// Every arrival due by the current clock is admitted in the same tick.
    DrainAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlfqConfig {
    pub admission: AdmissionPolicy,
}

impl MlfqConfig {
    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }
}
