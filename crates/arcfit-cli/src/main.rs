//! arcfit CLI — generate synthetic arcs and fit circles to point sets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use arcfit_core::{
    fit_circle, generate_arc, Circle, GenerateConfig, PointSet, SearchConfig, Tactic,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "arcfit")]
#[command(about = "Fit circles to noisy 2D arc samples using angle/radius scoring tactics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic arc point set.
    Generate(CliGenerateArgs),

    /// Fit a circle to a point set.
    Fit(CliFitArgs),

    /// Score a given circle under both tactics.
    Score(CliScoreArgs),
}

#[derive(Debug, Clone, Args)]
struct CliGenerateArgs {
    /// Path to write the generated points (JSON array of [x, y] pairs).
    #[arg(long)]
    out: PathBuf,

    /// Center x of the generating circle.
    #[arg(long, default_value = "0.0")]
    cx: f64,

    /// Center y of the generating circle.
    #[arg(long, default_value = "0.0")]
    cy: f64,

    /// Radius of the generating circle.
    #[arg(long, default_value = "10.0")]
    radius: f64,

    /// Number of points sampled along the arc.
    #[arg(long, default_value = "50")]
    n_points: usize,

    /// Fraction of the full circle covered by the arc, in (0, 1].
    #[arg(long, default_value = "0.3")]
    arc_fraction: f64,

    /// Jitter amplitude as a fraction of the point spacing, in [0, 1].
    #[arg(long, default_value = "0.05")]
    jitter_ratio: f64,

    /// RNG seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Debug, Clone, Args)]
struct CliFitArgs {
    /// Path to the input point set (JSON array of [x, y] pairs).
    #[arg(long)]
    points: PathBuf,

    /// Path to write the fit result (JSON). Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Scoring tactic.
    #[arg(long, value_enum, default_value_t = TacticArg::Radius)]
    tactic: TacticArg,

    /// Initial perturbation step; derived from the point extent when omitted.
    #[arg(long)]
    initial_step: Option<f64>,

    /// Multiplicative step shrink applied when no perturbation improves.
    #[arg(long, default_value = "0.5")]
    shrink_factor: f64,

    /// Step size below which the search is considered converged.
    #[arg(long, default_value = "1e-7")]
    min_step: f64,

    /// Maximum number of search iterations.
    #[arg(long, default_value = "10000")]
    max_iters: usize,

    /// Wall-clock budget for the search, in milliseconds.
    #[arg(long)]
    time_budget_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
struct CliScoreArgs {
    /// Path to the input point set (JSON array of [x, y] pairs).
    #[arg(long)]
    points: PathBuf,

    /// Center x of the circle to score.
    #[arg(long)]
    cx: f64,

    /// Center y of the circle to score.
    #[arg(long)]
    cy: f64,

    /// Radius of the circle to score.
    #[arg(long)]
    radius: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TacticArg {
    Angle,
    Radius,
}

impl TacticArg {
    fn to_core(self) -> Tactic {
        match self {
            Self::Angle => Tactic::Angle,
            Self::Radius => Tactic::Radius,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Fit(args) => run_fit(&args),
        Commands::Score(args) => run_score(&args),
    }
}

fn read_points(path: &Path) -> CliResult<PointSet> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| -> CliError { format!("failed to read {}: {}", path.display(), e).into() })?;
    let raw: Vec<[f64; 2]> = serde_json::from_str(&data)
        .map_err(|e| -> CliError { format!("failed to parse {}: {}", path.display(), e).into() })?;
    Ok(PointSet::new(raw)?)
}

// ── generate ───────────────────────────────────────────────────────────

fn run_generate(args: &CliGenerateArgs) -> CliResult<()> {
    if args.arc_fraction <= 0.0 || args.arc_fraction > 1.0 {
        return Err("--arc-fraction must lie in (0, 1]".into());
    }
    if !(0.0..=1.0).contains(&args.jitter_ratio) {
        return Err("--jitter-ratio must lie in [0, 1]".into());
    }
    if args.radius <= 0.0 {
        return Err("--radius must be positive".into());
    }

    let config = GenerateConfig {
        center: [args.cx, args.cy],
        radius: args.radius,
        n_points: args.n_points,
        arc_fraction: args.arc_fraction,
        jitter_ratio: args.jitter_ratio,
        seed: args.seed,
    };
    let points = generate_arc(&config);

    let json = serde_json::to_string_pretty(&points)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!(
        "Generated {} points along {:.0}% of a circle at ({}, {}), r={}",
        points.len(),
        args.arc_fraction * 100.0,
        args.cx,
        args.cy,
        args.radius,
    );
    tracing::info!("Points written to {}", args.out.display());

    Ok(())
}

// ── fit ────────────────────────────────────────────────────────────────

fn run_fit(args: &CliFitArgs) -> CliResult<()> {
    let points = read_points(&args.points)?;
    tracing::info!("Loaded {} points from {}", points.len(), args.points.display());

    let config = SearchConfig {
        initial_step: args.initial_step,
        shrink_factor: args.shrink_factor,
        min_step: args.min_step,
        max_iters: args.max_iters,
        time_budget: args.time_budget_ms.map(Duration::from_millis),
    };
    let tactic = args.tactic.to_core();

    let result = fit_circle(&points, tactic, &config)?;

    tracing::info!(
        "Fit {:?} after {} iterations ({} evaluations): center ({:.4}, {:.4}), r={:.4}",
        result.status,
        result.iterations,
        result.evaluations,
        result.circle.cx,
        result.circle.cy,
        result.circle.r,
    );
    tracing::info!(
        "Score under {:?}: {:.6e} (initial {:.6e})",
        tactic,
        result.score,
        result.initial_score,
    );

    let json = serde_json::to_string_pretty(&result)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Result written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

// ── score ──────────────────────────────────────────────────────────────

fn run_score(args: &CliScoreArgs) -> CliResult<()> {
    if args.radius < 0.0 {
        return Err("--radius must be non-negative".into());
    }

    let points = read_points(&args.points)?;
    let circle = Circle::new(args.cx, args.cy, args.radius);

    println!(
        "Circle ({:.4}, {:.4}) r={:.4} against {} points:",
        circle.cx,
        circle.cy,
        circle.r,
        points.len()
    );
    println!("  angle score:   {:.6e}", Tactic::Angle.score(&circle, &points));
    println!("  radius score:  {:.6e}", Tactic::Radius.score(&circle, &points));

    Ok(())
}
