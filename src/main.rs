use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use sallenkey::calculator::Calculator;
use sallenkey::config::{DesignFile, SpecFile, SweepConfig};
use sallenkey::design::Topology;
use sallenkey::output::{OutputFormat, create_formatter};
use sallenkey::units::{Capacitance, Frequency, Resistance};

#[derive(Parser, Debug)]
#[command(name = "sallenkey")]
#[command(about = "Sallen-Key active filter design calculator", long_about = None)]
struct Args {
    /// Filter topology (may also come from --config)
    #[arg(value_enum)]
    topology: Option<Topology>,

    /// Centre frequency (band-pass, band-reject) or cutoff frequency (e.g. "1kHz")
    #[arg(long)]
    fo: Option<Frequency>,

    /// Bandwidth (e.g. "200Hz")
    #[arg(long)]
    bw: Option<Frequency>,

    /// Lower cutoff frequency
    #[arg(long)]
    f1: Option<Frequency>,

    /// Upper cutoff frequency
    #[arg(long)]
    f2: Option<Frequency>,

    /// Gain in dB
    #[arg(long, allow_hyphen_values = true)]
    gain_db: Option<f64>,

    /// Quality factor (low-pass only; Butterworth when omitted)
    #[arg(long)]
    q: Option<f64>,

    /// Reference capacitance (e.g. "10nF")
    #[arg(long)]
    c: Option<Capacitance>,

    /// Reference resistance (e.g. "10k")
    #[arg(long)]
    r: Option<Resistance>,

    /// Gain-setting resistor Ra
    #[arg(long)]
    ra: Option<Resistance>,

    /// Feedback resistor Rf
    #[arg(long)]
    rf: Option<Resistance>,

    /// TOML design file; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Decades swept below the characteristic frequency
    #[arg(long)]
    decades_below: Option<f64>,

    /// Decades swept above the characteristic frequency
    #[arg(long)]
    decades_above: Option<f64>,

    /// Ratio between consecutive sweep frequencies
    #[arg(long)]
    step_ratio: Option<f64>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Values given on the command line, in the shape of a design file's `[spec]`
    fn spec_overrides(&self) -> SpecFile {
        SpecFile {
            fo: self.fo,
            bw: self.bw,
            f1: self.f1,
            f2: self.f2,
            gain_db: self.gain_db,
            q: self.q,
            c: self.c,
            r: self.r,
            ra: self.ra,
            rf: self.rf,
        }
    }

    fn overlay_sweep(&self, sweep: &mut SweepConfig) {
        if let Some(decades) = self.decades_below {
            sweep.decades_below = decades;
        }
        if let Some(decades) = self.decades_above {
            sweep.decades_above = decades;
        }
        if let Some(ratio) = self.step_ratio {
            sweep.step_ratio = ratio;
        }
    }
}

fn load_design_file(path: &Path) -> anyhow::Result<DesignFile> {
    let content = fs::read_to_string(path).context("Failed to read design file")?;
    DesignFile::from_toml(&content).context("Failed to parse design file")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut design = match &args.config {
        Some(path) => {
            let file = load_design_file(path)?;
            log::info!("Loaded design from {}", path.display());
            file
        }
        None => DesignFile::default(),
    };

    let topology = args
        .topology
        .or(design.topology)
        .context("No topology given (pass one or set `topology` in the design file)")?;

    args.overlay_sweep(&mut design.sweep);
    let (spec, modes) = design.resolve(&args.spec_overrides())?;
    log::debug!("Calculation modes: {:?}", modes);

    let mut calculator = Calculator::new(design.sweep);
    let calculation = calculator.calculate(topology, &spec, &modes)?;

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(calculation));

    Ok(())
}
