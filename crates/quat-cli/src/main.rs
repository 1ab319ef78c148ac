use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use quat_core::Quaternion;
use serde::Serialize;

/// Default parse mode when `--strict` is not given: `strict` or `lenient`.
const PARSE_MODE_ENV: &str = "QUAT_PARSE_MODE";

#[derive(Parser)]
#[command(name = "quat", about = "Quaternion calculator")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Reject operands containing anything but numbers, i/j/k and '+'
    #[arg(long, global = true)]
    strict: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show components, canonical form, norm and hash
    Inspect {
        #[arg(allow_hyphen_values = true)]
        q: String,
    },

    /// Euclidean norm
    Norm {
        #[arg(allow_hyphen_values = true)]
        q: String,
    },

    /// Apply a single-operand operation
    Unary {
        op: UnaryOp,
        #[arg(allow_hyphen_values = true)]
        q: String,
    },

    /// Multiply every component by a real factor
    Scale {
        #[arg(allow_hyphen_values = true)]
        q: String,
        #[arg(allow_hyphen_values = true)]
        factor: f64,
    },

    /// Evaluate `<lhs> <op> <rhs>`
    Eval {
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        op: BinaryOp,
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnaryOp {
    Conjugate,
    Opposite,
    Inverse,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BinaryOp {
    Plus,
    Minus,
    /// Hamilton product lhs * rhs
    Times,
    /// lhs * rhs⁻¹
    DivRight,
    /// rhs⁻¹ * lhs
    DivLeft,
    Dot,
    Equals,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ParseMode {
    Strict,
    Lenient,
}

#[derive(Serialize)]
struct Inspection<'a> {
    input: &'a str,
    canonical: Quaternion,
    real: f64,
    i: f64,
    j: f64,
    k: f64,
    norm: f64,
    is_zero: bool,
    hash: u64,
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

    let mode = parse_mode(&cli)?;
    tracing::debug!("parse mode: {mode:?}");

    match &cli.command {
        Commands::Inspect { q } => cmd_inspect(&cli, mode, q),
        Commands::Norm { q } => {
            let q = parse_operand(q, mode)?;
            emit(cli.json, "norm", q.norm())
        }
        Commands::Unary { op, q } => cmd_unary(&cli, mode, *op, q),
        Commands::Scale { q, factor } => {
            let q = parse_operand(q, mode)?;
            emit(cli.json, "result", q.scale(*factor))
        }
        Commands::Eval { lhs, op, rhs } => cmd_eval(&cli, mode, lhs, *op, rhs),
    }
}

fn parse_mode(cli: &Cli) -> Result<ParseMode> {
    if cli.strict {
        return Ok(ParseMode::Strict);
    }
    match std::env::var(PARSE_MODE_ENV) {
        Err(_) => Ok(ParseMode::Lenient),
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "" | "lenient" => Ok(ParseMode::Lenient),
            "strict" => Ok(ParseMode::Strict),
            other => bail!("invalid {PARSE_MODE_ENV}={other:?} (expected \"strict\" or \"lenient\")"),
        },
    }
}

fn parse_operand(text: &str, mode: ParseMode) -> Result<Quaternion> {
    let q = match mode {
        ParseMode::Strict => text
            .parse::<Quaternion>()
            .with_context(|| format!("failed to parse quaternion {text:?}"))?,
        ParseMode::Lenient => {
            if text.parse::<Quaternion>().is_err() {
                tracing::warn!("lenient parse of {text:?} skipped unrecognized input");
            }
            Quaternion::value_of(text)
        }
    };
    tracing::debug!("parsed {text:?} as {q}");
    Ok(q)
}

fn emit<T: Serialize + Display>(json: bool, key: &str, value: T) -> Result<()> {
    if json {
        let mut map = serde_json::Map::new();
        map.insert(
            key.to_string(),
            serde_json::to_value(&value).context("failed to serialize result")?,
        );
        println!("{}", serde_json::Value::Object(map));
    } else {
        println!("{value}");
    }
    Ok(())
}

fn hash_of(q: &Quaternion) -> u64 {
    let mut hasher = DefaultHasher::new();
    q.hash(&mut hasher);
    hasher.finish()
}

fn cmd_inspect(cli: &Cli, mode: ParseMode, text: &str) -> Result<()> {
    let q = parse_operand(text, mode)?;
    let report = Inspection {
        input: text,
        canonical: q,
        real: q.real(),
        i: q.i(),
        j: q.j(),
        k: q.k(),
        norm: q.norm(),
        is_zero: q.is_zero(),
        hash: hash_of(&q),
    };

    if cli.json {
        let json = serde_json::to_string(&report).context("failed to serialize inspection")?;
        println!("{json}");
        return Ok(());
    }

    println!("canonical:  {}", report.canonical);
    println!(
        "components: r={}, i={}, j={}, k={}",
        report.real, report.i, report.j, report.k
    );
    println!("norm:       {}", report.norm);
    println!("is_zero:    {}", report.is_zero);
    println!("hash:       {:016x}", report.hash);
    Ok(())
}

fn cmd_unary(cli: &Cli, mode: ParseMode, op: UnaryOp, text: &str) -> Result<()> {
    let q = parse_operand(text, mode)?;
    let result = match op {
        UnaryOp::Conjugate => q.conjugate(),
        UnaryOp::Opposite => q.opposite(),
        UnaryOp::Inverse => q
            .inverse()
            .with_context(|| format!("cannot invert {q}"))?,
    };
    tracing::debug!("{op:?}({q}) = {result}");
    emit(cli.json, "result", result)
}

fn cmd_eval(cli: &Cli, mode: ParseMode, lhs: &str, op: BinaryOp, rhs: &str) -> Result<()> {
    let a = parse_operand(lhs, mode)?;
    let b = parse_operand(rhs, mode)?;

    let result = match op {
        BinaryOp::Plus => a.plus(b),
        BinaryOp::Minus => a.minus(b),
        BinaryOp::Times => a.times(b),
        BinaryOp::DivRight => a
            .divide_by_right(b)
            .with_context(|| format!("cannot divide {a} by {b} on the right"))?,
        BinaryOp::DivLeft => a
            .divide_by_left(b)
            .with_context(|| format!("cannot divide {a} by {b} on the left"))?,
        BinaryOp::Dot => a.dot_mult(b),
        BinaryOp::Equals => return emit(cli.json, "equals", a == b),
    };
    tracing::debug!("{a} {op:?} {b} = {result}");
    emit(cli.json, "result", result)
}
