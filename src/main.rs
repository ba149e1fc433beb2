use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use mlfq_sim::{
    AdmissionPolicy, MlfqConfig, SchedEvent, Sim, Stats,
    core::Ticks,
    sim::{EventTable, bernoulli_jobs, parse_jobs, write_stats},
};

/// Multi-level feedback queue scheduling simulator.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Job list: one `arrival pid required` triple per line.
    #[arg(required_unless_present = "random")]
    input: Option<PathBuf>,

    /// Also write the report to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON scheduler configuration; missing keys keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admit every job due on a tick instead of one per tick.
    #[arg(long)]
    drain_arrivals: bool,

    /// Emit JSON lines (one per event, then the statistics) instead of a table.
    #[arg(long)]
    json: bool,

    /// Generate a random workload over this many ticks instead of reading a file.
    #[arg(long, value_name = "TICKS", conflicts_with = "input")]
    random: Option<Ticks>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_ticks: Ticks,

    #[arg(long, default_value_t = 6)]
    long_ticks: Ticks,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_json::from_reader::<_, MlfqConfig>(BufReader::new(file))
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MlfqConfig::default(),
    };
    if args.drain_arrivals {
        config = config.with_admission(AdmissionPolicy::DrainAll);
    }

    let jobs = match args.random {
        Some(ticks) => bernoulli_jobs(
            ticks,
            args.p_arrival,
            args.p_short,
            args.short_ticks,
            args.long_ticks,
            args.seed,
        ),
        None => {
            let path = args.input.as_ref().context("no job list given")?;
            let file = File::open(path)
                .with_context(|| format!("failed to open job list {}", path.display()))?;
            parse_jobs(BufReader::new(file))
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
    };

    let mut sim = Sim::new(jobs, config).context("rejected job list")?;

    let mut outputs: Vec<Box<dyn Write>> = vec![Box::new(io::stdout().lock())];
    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        outputs.push(Box::new(BufWriter::new(file)));
    }

    let mut report = Report::new(outputs, args.json);
    report.header()?;
    while !sim.all_jobs_completed() {
        for event in sim.step()? {
            report.event(event)?;
        }
    }
    let stats = sim.run()?;
    report.stats(&stats)?;

    if let Some(path) = &args.output {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}

// Mirrors every line to stdout and the optional report file.
struct Report {
    tables: Vec<EventTable<Box<dyn Write>>>,
    json: bool,
}

impl Report {
    fn new(outputs: Vec<Box<dyn Write>>, json: bool) -> Self {
        Self {
            tables: outputs.into_iter().map(EventTable::new).collect(),
            json,
        }
    }

    fn header(&mut self) -> Result<()> {
        if !self.json {
            for table in &mut self.tables {
                table.write_header()?;
            }
        }
        Ok(())
    }

    fn event(&mut self, event: &SchedEvent) -> Result<()> {
        for table in &mut self.tables {
            if self.json {
                let out = table.get_mut();
                serde_json::to_writer(&mut *out, event)?;
                writeln!(out)?;
            } else {
                table.write_event(event)?;
            }
        }
        Ok(())
    }

    fn stats(self, stats: &Stats) -> Result<()> {
        for table in self.tables {
            let mut out = table.into_inner();
            if self.json {
                serde_json::to_writer(&mut out, stats)?;
                writeln!(out)?;
            } else {
                write_stats(&mut out, stats)?;
            }
            out.flush()?;
        }
        Ok(())
    }
}
