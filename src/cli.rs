use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graphsolve::utils::validate_range;
use graphsolve::{AdaptiveSampler, Expression, SamplerConfig, Solution, Solver, parse_expression};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Graphsolve - Evaluate, intersect and sample expressions of x
#[derive(Parser, Debug)]
#[command(name = "graphsolve")]
#[command(about = "Evaluate two expressions of x, find where they intersect and sample them")]
#[command(version)]
pub struct CliArgs {
    /// First expression, e.g. "x^2-4"
    #[arg(allow_hyphen_values = true)]
    pub expr1: String,

    /// Second expression to intersect with the first
    #[arg(allow_hyphen_values = true)]
    pub expr2: Option<String>,

    /// Evaluate the expressions at this value of x
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<f64>,

    /// Print adaptively sampled points as x,y rows
    #[arg(long)]
    pub sample: bool,

    /// Lower end of the sampled domain
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper end of the sampled domain
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Points in the initial sampling grid
    #[arg(long, default_value_t = 1000)]
    pub points: usize,

    /// Change in y between neighbouring points that triggers refinement
    #[arg(long, default_value_t = 1e-3)]
    pub tolerance: f64,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub expr1: String,
    pub expr2: Option<String>,
    pub at: Option<f64>,
    pub sample: bool,
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
    pub tolerance: f64,
    pub log_level: LogLevel,
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    config_from_args(CliArgs::parse())
}

fn config_from_args(args: CliArgs) -> Result<CliConfig> {
    validate_range(args.x_min, args.x_max).context("Invalid sampling range")?;

    Ok(CliConfig {
        expr1: args.expr1,
        expr2: args.expr2,
        at: args.at,
        sample: args.sample,
        x_min: args.x_min,
        x_max: args.x_max,
        points: args.points,
        tolerance: args.tolerance,
        log_level: args.log_level,
    })
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

fn parse_input(label: &str, text: &str) -> Result<Expression> {
    parse_expression(text).with_context(|| format!("Invalid expression {} '{}'", label, text))
}

fn format_evaluation(label: &str, expression: &Expression, x: f64) -> String {
    match expression.evaluate(x) {
        Ok(value) => format!("{}({}) = {}", label, x, value),
        Err(e) => format!("{}({}) is undefined: {}", label, x, e),
    }
}

fn format_solution(solution: &Solution) -> Vec<String> {
    if solution.identical {
        return vec!["identical".to_string()];
    }
    if solution.roots.is_empty() {
        return vec!["no intersection".to_string()];
    }
    solution.roots.iter().map(|root| format!("x = {}", root)).collect()
}

fn format_samples(label: &str, x: &[f64], y: &[f64]) -> Vec<String> {
    let mut rows = Vec::with_capacity(x.len() + 1);
    rows.push(format!("# {}", label));
    rows.extend(x.iter().zip(y).map(|(xi, yi)| format!("{},{}", xi, yi)));
    rows
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    let first = parse_input("f", &config.expr1)?;
    let second = config
        .expr2
        .as_deref()
        .map(|text| parse_input("g", text))
        .transpose()?;
    info!("Parsed f(x) = {}", first);

    if let Some(x) = config.at {
        println!("{}", format_evaluation("f", &first, x));
        if let Some(second) = &second {
            println!("{}", format_evaluation("g", second, x));
        }
    }

    let mut must_include = Vec::new();
    if let Some(second) = &second {
        let solver = Solver::default();
        let solution = solver
            .solve_trees(&first, second)
            .context("Cannot solve f(x) = g(x)")?;
        for line in format_solution(&solution) {
            println!("{}", line);
        }
        must_include = solution.roots;
    }

    if !config.sample {
        return Ok(());
    }

    if config.points == 0 {
        warn!("Sampling with an empty initial grid");
    }
    let sampler = AdaptiveSampler::new(SamplerConfig {
        tolerance: config.tolerance,
        ..SamplerConfig::default()
    });
    let sample_of = |expression: &Expression| {
        sampler.sample(
            expression.evaluator(),
            config.x_min,
            config.x_max,
            config.points,
            &must_include,
        )
    };

    let ((fx, fy), g_samples) = rayon::join(
        || sample_of(&first),
        || second.as_ref().map(|second| sample_of(second)),
    );
    for row in format_samples("f", &fx, &fy) {
        println!("{}", row);
    }
    if let Some((gx, gy)) = g_samples {
        for row in format_samples("g", &gx, &gy) {
            println!("{}", row);
        }
    }

    Ok(())
}
