//! Plain-text rendering of the event stream and the final statistics.

use std::{
    fmt,
    io::{self, Write},
};

use crate::core::{EventSink, SchedEvent, Stats};

const NONE: &str = "-";

/// Fixed-width event table. Queue levels are printed one-based.
pub struct EventTable<W: Write> {
    out: W,
}

impl<W: Write> EventTable<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.row(
            "Event",
            "Sys Time",
            "PID",
            "CPU Time Needed",
            "Total Time in Sys",
            "LLQ",
        )?;
        self.row(
            "-----",
            "--------",
            "---",
            "---------------",
            "-----------------",
            "---",
        )
    }

    pub fn write_event(&mut self, event: &SchedEvent) -> io::Result<()> {
        let clock = event.clock().to_string();
        let pid = event.pid().to_string();
        match *event {
            SchedEvent::Arrival { required, .. } => {
                self.row("ARRIVAL", &clock, &pid, &required.to_string(), NONE, NONE)
            }
            SchedEvent::Dispatch { level, .. } => {
                self.row("DISPATCH", &clock, &pid, NONE, NONE, &(level + 1).to_string())
            }
            SchedEvent::Preemption { level, .. } => {
                self.row("PREEMPT", &clock, &pid, NONE, NONE, &(level + 1).to_string())
            }
            SchedEvent::Departure {
                turnaround, level, ..
            } => self.row(
                "DEPARTURE",
                &clock,
                &pid,
                NONE,
                &turnaround.to_string(),
                &(level + 1).to_string(),
            ),
        }
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn row(
        &mut self,
        event: &str,
        clock: &str,
        pid: &str,
        needed: &str,
        in_system: &str,
        level: &str,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "{event:>9}   {clock:>8}   {pid:>3}   {needed:>15}   {in_system:>17}   {level:>3}"
        )
    }
}

// Write failures on a subscribed table are dropped; use write_event directly
// where they matter.
impl<W: Write> EventSink for EventTable<W> {
    fn on_event(&mut self, event: &SchedEvent) {
        let _ = self.write_event(event);
    }
}

struct Avg(Option<f64>);

impl fmt::Display for Avg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.2}"),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of jobs -- {}", self.total_jobs)?;
        writeln!(f, "Total time of all jobs in system -- {}", self.total_time_in_system)?;
        writeln!(f, "Average response time -- {}", Avg(self.avg_response_proxy))?;
        writeln!(f, "Average turnaround time -- {}", Avg(self.avg_turnaround))?;
        writeln!(f, "Average waiting time -- {}", Avg(self.avg_waiting))?;
        writeln!(f, "Average throughput for system -- {}", Avg(self.throughput))?;
        write!(f, "Total CPU idle time -- {}", self.idle_ticks)
    }
}

pub fn write_stats(mut out: impl Write, stats: &Stats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{stats}")
}
