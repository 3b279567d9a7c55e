//! RLC Lab - series RLC circuit simulator
//!
//! # Usage
//!
//! ```bash
//! rlc-lab transient --r 10 --l 1m --c 1u --waveform square --frequency 200 > vc.f32
//! ffmpeg -i input.wav -f f32le -ac 1 -ar 44100 - | rlc-lab transient --stdin --sample-rate 44100 --probe vl --normalize | ffmpeg -f f32le -ac 1 -ar 44100 -i - output.wav
//! rlc-lab bode --r 50 --l 10m --c 1u
//! rlc-lab snap r 14k
//! ```

use clap::{Args, Parser, Subcommand};
use rlc_lab::{
    audio,
    error::{Result, RlcError},
    simulation::{DEFAULT_SWEEP_INTERVALS, DEFAULT_SWEEP_P_MAX, DEFAULT_SWEEP_P_MIN},
    solver::{FrequencySweep, InductorVoltage, SweepRange},
    sources::{InputSignal, Shape, Waveform},
    units::{format_value, parse_value},
    CircuitParameters, ComponentKind, Probe, Simulation, SimulationConfig, DEFAULT_DURATION,
    DEFAULT_SAMPLE_RATE,
};

/// Default sample rate assumed for audio read from stdin
const DEFAULT_AUDIO_SAMPLE_RATE: f64 = 44_100.0;

/// Series RLC circuit simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate in the time domain and write one signal to stdout
    Transient {
        #[command(flatten)]
        circuit: CircuitArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Signal to output: vin, i, vr, vl or vc
        #[arg(short, long, default_value = "vc")]
        probe: String,

        /// Scale the output to a playback-safe peak
        #[arg(long)]
        normalize: bool,

        /// Print the decimated display trace as CSV instead of raw PCM
        #[arg(long)]
        csv: bool,
    },

    /// Print the Bode magnitude and phase of every component as CSV
    Bode {
        #[command(flatten)]
        circuit: CircuitArgs,

        #[command(flatten)]
        sweep: SweepArgs,
    },

    /// Snap a value to the nearest standard value
    Snap {
        /// Component kind: r, l or c
        kind: String,

        /// Value in SI units, e.g. 14k or 4.6u
        #[arg(value_parser = parse_si)]
        value: f64,
    },

    /// Run the full simulation and print the report as JSON
    Report {
        #[command(flatten)]
        circuit: CircuitArgs,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        sweep: SweepArgs,
    },
}

#[derive(Args, Debug)]
struct CircuitArgs {
    /// Resistance in ohms (e.g. 50, 10k)
    #[arg(long, value_parser = parse_si)]
    r: f64,

    /// Inductance in henries (e.g. 10m)
    #[arg(long, value_parser = parse_si)]
    l: f64,

    /// Capacitance in farads (e.g. 1u)
    #[arg(long, value_parser = parse_si)]
    c: f64,

    /// Initial capacitor voltage
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    vc0: f64,

    /// Initial inductor current
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    i0: f64,

    /// Snap R, L and C to standard values first
    #[arg(long)]
    snap: bool,

    /// Report vL as v_in - vR - vC instead of L·di/dt
    #[arg(long)]
    kirchhoff: bool,
}

impl CircuitArgs {
    fn parameters(&self) -> Result<CircuitParameters> {
        let params =
            CircuitParameters::new(self.r, self.l, self.c).with_initial_state(self.vc0, self.i0);
        if self.snap {
            params.snapped()
        } else {
            Ok(params)
        }
    }

    fn inductor_voltage(&self) -> InductorVoltage {
        if self.kirchhoff {
            InductorVoltage::Kirchhoff
        } else {
            InductorVoltage::Derivative
        }
    }
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Read raw f32le mono audio from stdin instead of generating a waveform
    #[arg(long)]
    stdin: bool,

    /// Waveform shape: sine, square, triangle, sawtooth or step
    #[arg(short, long, default_value = "sine")]
    waveform: String,

    /// Waveform frequency in Hz
    #[arg(short, long, default_value = "1k", value_parser = parse_si)]
    frequency: f64,

    /// Peak amplitude in volts
    #[arg(short, long, default_value_t = 1.0)]
    amplitude: f64,

    /// DC offset in volts
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset: f64,

    /// Generated duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION)]
    duration: f64,

    /// Sample rate in Hz (default 50 kHz generated, 44.1 kHz from stdin)
    #[arg(short, long)]
    sample_rate: Option<f64>,
}

impl SourceArgs {
    fn signal(&self) -> Result<InputSignal> {
        if self.stdin {
            let sample_rate = self.sample_rate.unwrap_or(DEFAULT_AUDIO_SAMPLE_RATE);
            let samples = audio::read_stdin()?;
            InputSignal::from_audio(&samples, sample_rate)
        } else {
            let sample_rate = self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
            Waveform::new(Shape::parse(&self.waveform)?, self.frequency)
                .with_amplitude(self.amplitude)
                .with_offset(self.offset)
                .generate(self.duration, sample_rate)
        }
    }
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Lowest frequency as a power of ten
    #[arg(long, default_value_t = DEFAULT_SWEEP_P_MIN, allow_hyphen_values = true)]
    p_min: f64,

    /// Highest frequency as a power of ten
    #[arg(long, default_value_t = DEFAULT_SWEEP_P_MAX, allow_hyphen_values = true)]
    p_max: f64,

    /// Number of intervals (the sweep has one more point)
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVALS)]
    intervals: usize,
}

impl SweepArgs {
    fn range(&self) -> Result<SweepRange> {
        SweepRange::new(self.p_min, self.p_max, self.intervals)
    }
}

fn parse_si(s: &str) -> std::result::Result<f64, String> {
    parse_value(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Transient {
            circuit,
            source,
            probe,
            normalize,
            csv,
        } => {
            let probe = Probe::parse(&probe)?;
            let input = source.signal()?;
            let config = SimulationConfig::new().with_inductor_voltage(circuit.inductor_voltage());
            let simulation = Simulation::with_config(config);

            if csv {
                let report = simulation.run(&circuit.parameters()?, &input)?;
                let t = &report.trace;
                println!("time,vin,i,vR,vL,vC");
                for k in 0..t.len() {
                    println!(
                        "{:e},{:e},{:e},{:e},{:e},{:e}",
                        t.time[k], t.input[k], t.current[k], t.v_r[k], t.v_l[k], t.v_c[k]
                    );
                }
                return Ok(());
            }

            let result = simulation.transient(&circuit.parameters()?, &input)?;
            let signal = result.get(probe).unwrap_or(input.samples());
            let signal = if normalize {
                audio::normalize_peak(signal)
            } else {
                signal.to_vec()
            };
            audio::write_stdout(&signal)?;
        }

        Command::Bode { circuit, sweep } => {
            let range = sweep.range()?;
            let config = SimulationConfig::new()
                .with_magnitude_range(range)
                .with_phase_range(range);
            let (magnitude, _) = Simulation::with_config(config).bode(&circuit.parameters()?)?;
            print_bode(&magnitude);
        }

        Command::Snap { kind, value } => {
            let kind = ComponentKind::from_str(&kind).ok_or(RlcError::UnknownComponent { name: kind })?;
            let snapped = kind.snap(value)?;
            println!(
                "{} {} -> {}",
                kind,
                format_value(value, kind.unit()),
                format_value(snapped, kind.unit())
            );
        }

        Command::Report {
            circuit,
            source,
            sweep,
        } => {
            let range = sweep.range()?;
            let config = SimulationConfig::new()
                .with_magnitude_range(range)
                .with_phase_range(range)
                .with_inductor_voltage(circuit.inductor_voltage());
            let input = source.signal()?;
            let report = Simulation::with_config(config).run(&circuit.parameters()?, &input)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_bode(sweep: &FrequencySweep) {
    println!("log10_f,R_db,R_deg,L_db,L_deg,C_db,C_deg");
    for k in 0..sweep.len() {
        println!(
            "{},{:.6},{:.4},{:.6},{:.4},{:.6},{:.4}",
            sweep.log10_frequencies[k],
            sweep.resistor.magnitude_db[k],
            sweep.resistor.phase_deg[k],
            sweep.inductor.magnitude_db[k],
            sweep.inductor.phase_deg[k],
            sweep.capacitor.magnitude_db[k],
            sweep.capacitor.phase_deg[k],
        );
    }
}
