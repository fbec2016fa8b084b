mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rfe_core::{
    Component, Phase, ResonanceContext, ResonanceEngine, SeededNoise, UserActivity, Waveform,
    ZCurve, apply_resonance_to_component, benchmark_with_rng, phase_profile,
};

#[derive(Parser)]
#[command(name = "rfe", about = "Resonance field engine CLI")]
struct Cli {
    /// Engine config file (TOML); defaults to $RFE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed the noise waveform (and benchmark inputs) for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one resonance field and print it as JSON
    Field {
        /// Trauma intensity; non-numeric input is treated as 0.5
        #[arg(allow_hyphen_values = true)]
        trauma: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Apply a field onto a JSON state file and print the enriched copy
    Apply {
        /// JSON file holding the state tree
        data: PathBuf,

        /// Trauma intensity; non-numeric input is treated as 0.5
        #[arg(allow_hyphen_values = true)]
        trauma: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Sample fields evenly across trauma 0..=1, one JSON object per line
    Sweep {
        /// Number of samples
        #[arg(long, default_value_t = 11)]
        steps: usize,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Measure field construction throughput
    Bench {
        /// Number of random fields to build
        #[arg(long, default_value_t = 1000)]
        iterations: usize,
    },

    /// Show the phase profile table
    Phases,
}

#[derive(Args, Debug, Default)]
struct ContextArgs {
    /// Target component; unknown names route to `all`
    #[arg(long, default_value = "all")]
    component: String,

    /// Phase; unknown names use the neutral profile
    #[arg(long)]
    phase: Option<Phase>,

    #[arg(long)]
    waveform: Option<Waveform>,

    /// User activity (idle, browsing, checkout)
    #[arg(long)]
    activity: Option<UserActivity>,

    /// System stability in [0, 1]
    #[arg(long)]
    stability: Option<f64>,

    /// Milliseconds since the last phase transition
    #[arg(long)]
    since_transition_ms: Option<f64>,

    /// Phase shift in radians
    #[arg(long, allow_hyphen_values = true)]
    phase_shift: Option<f64>,

    /// Lower bound of the x/y output range
    #[arg(long, allow_hyphen_values = true)]
    range_min: Option<f64>,

    /// Upper bound of the x/y output range
    #[arg(long, allow_hyphen_values = true)]
    range_max: Option<f64>,

    /// Power-curve exponent overriding the phase z-curve
    #[arg(long)]
    z_exponent: Option<f64>,

    /// JSON context file; flags override its fields
    #[arg(long)]
    context: Option<PathBuf>,
}

impl ContextArgs {
    fn build(&self) -> Result<ResonanceContext> {
        let mut ctx = match &self.context {
            Some(path) => read_context(path)?,
            None => ResonanceContext::new(),
        };
        if let Some(phase) = self.phase {
            ctx.phase = Some(phase);
        }
        if let Some(waveform) = self.waveform {
            ctx.waveform = Some(waveform);
        }
        if let Some(activity) = self.activity {
            ctx.user_activity = activity;
        }
        if self.stability.is_some() {
            ctx.system_stability = self.stability;
        }
        if self.since_transition_ms.is_some() {
            ctx.time_since_phase_transition_ms = self.since_transition_ms;
        }
        if let Some(shift) = self.phase_shift {
            ctx.phase_shift = shift;
        }
        if self.range_min.is_some() || self.range_max.is_some() {
            let (lo, hi) = ctx.output_range();
            ctx.range = Some([self.range_min.unwrap_or(lo), self.range_max.unwrap_or(hi)]);
        }
        if let Some(exp) = self.z_exponent {
            ctx.custom_z_curve = Some(ZCurve::Power(exp));
        }
        Ok(ctx)
    }

    fn component(&self) -> Component {
        Component::parse_or_all(&self.component)
    }
}

fn read_context(path: &Path) -> Result<ResonanceContext> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read context {}", path.display()))?;
    ResonanceContext::from_json(&content)
        .with_context(|| format!("invalid context JSON in {}", path.display()))
}

/// Non-numeric text becomes NaN so the engine applies its neutral fallback.
fn parse_trauma(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn build_engine(cli: &Cli) -> Result<ResonanceEngine> {
    let config = config::load_config(cli.config.as_deref())?;
    let engine = ResonanceEngine::new(config).context("invalid engine config")?;
    Ok(match cli.seed {
        Some(seed) => engine.with_noise(SeededNoise::new(seed)),
        None => engine,
    })
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Field { trauma, context } => cmd_field(&cli, trauma, context),
        Commands::Apply {
            data,
            trauma,
            context,
        } => cmd_apply(&cli, data, trauma, context),
        Commands::Sweep { steps, context } => cmd_sweep(&cli, *steps, context),
        Commands::Bench { iterations } => cmd_bench(&cli, *iterations),
        Commands::Phases => cmd_phases(),
    }
}

fn cmd_field(cli: &Cli, trauma: &str, args: &ContextArgs) -> Result<()> {
    let engine = build_engine(cli)?;
    let ctx = args.build()?;
    let field = engine.field_for(parse_trauma(trauma), args.component(), &ctx);

    let json = serde_json::to_string_pretty(&field).context("failed to serialize field")?;
    println!("{json}");
    Ok(())
}

fn cmd_apply(cli: &Cli, data: &Path, trauma: &str, args: &ContextArgs) -> Result<()> {
    let engine = build_engine(cli)?;
    let ctx = args.build()?;
    let content = std::fs::read_to_string(data)
        .with_context(|| format!("failed to read {}", data.display()))?;
    let tree: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", data.display()))?;

    let field = engine.field_for(parse_trauma(trauma), args.component(), &ctx);
    let enriched = apply_resonance_to_component(&field, &tree);

    let json = serde_json::to_string_pretty(&enriched).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

fn cmd_sweep(cli: &Cli, steps: usize, args: &ContextArgs) -> Result<()> {
    let engine = build_engine(cli)?;
    let ctx = args.build()?;

    for field in engine.sweep(steps, args.component(), &ctx) {
        let line = field.to_json().context("failed to serialize field")?;
        println!("{line}");
    }
    Ok(())
}

fn cmd_bench(cli: &Cli, iterations: usize) -> Result<()> {
    let engine = build_engine(cli)?;
    let stats = match cli.seed {
        Some(seed) => benchmark_with_rng(&engine, iterations, &mut SmallRng::seed_from_u64(seed)),
        None => engine.benchmark_resonance_vectors(iterations),
    };

    println!("vectors:    {}", stats.total_vectors);
    println!("total:      {:.3}ms", stats.total_time);
    println!("average:    {:.6}ms", stats.average_vector_time);
    println!("min:        {:.6}ms", stats.min_vector_time);
    println!("max:        {:.6}ms", stats.max_vector_time);
    println!("throughput: {:.0} vectors/s", stats.vectors_per_second);
    Ok(())
}

fn cmd_phases() -> Result<()> {
    println!(
        "{:<14} {:>8} {:>8} {:>8}  z-curve",
        "phase", "x-radius", "y-radius", "rotation"
    );
    for phase in Phase::ALL {
        let profile = phase_profile(phase);
        println!(
            "{:<14} {:>8.2} {:>8.2} {:>8.4}  {}",
            phase.name(),
            profile.ellipse.x_radius,
            profile.ellipse.y_radius,
            profile.ellipse.rotation,
            profile.z_curve.descriptor()
        );
    }
    Ok(())
}
