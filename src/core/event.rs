use serde::Serialize;

use crate::core::{Level, Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    Arrival {
        pid: Pid,
        clock: Ticks,
        required: Ticks,
    },
    Dispatch {
        pid: Pid,
        clock: Ticks,
        level: Level,
    },
    // `level` is the level the job was demoted to
    Preemption {
        pid: Pid,
        clock: Ticks,
        level: Level,
    },
    Departure {
        pid: Pid,
        clock: Ticks,
        turnaround: Ticks,
        level: Level,
    },
}

impl SchedEvent {
    pub fn pid(&self) -> Pid {
        match *self {
            Self::Arrival { pid, .. }
            | Self::Dispatch { pid, .. }
            | Self::Preemption { pid, .. }
            | Self::Departure { pid, .. } => pid,
        }
    }

    pub fn clock(&self) -> Ticks {
        match *self {
            Self::Arrival { clock, .. }
            | Self::Dispatch { clock, .. }
            | Self::Preemption { clock, .. }
            | Self::Departure { clock, .. } => clock,
        }
    }
}

/// Subscriber for the per-tick event stream.
pub trait EventSink {
    fn on_event(&mut self, event: &SchedEvent);
}

impl<F: FnMut(&SchedEvent)> EventSink for F {
    fn on_event(&mut self, event: &SchedEvent) {
        self(event)
    }
}
