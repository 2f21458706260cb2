//! wherekit: render WHERE clauses from the command line
//!
//! # Usage
//!
//! ```bash
//! # Render a shorthand expression
//! wherekit "(nombre = 'a' OR nombre = 'b') AND total >= 100"
//!
//! # Pick a dialect
//! wherekit "integer:codigo > 7" --dialect mysql
//!
//! # Render a JSON condition document
//! wherekit --file conditions.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use tracing_subscriber::EnvFilter;
use wherekit::prelude::*;

#[derive(Parser)]
#[command(name = "wherekit")]
#[command(version)]
#[command(about = "Render portable, escaped SQL WHERE clauses", long_about = None)]
#[command(after_help = "EXAMPLES:
    wherekit \"nombre = 'test' AND total > 100\"
    wherekit \"fecha BETWEEN '2020-01-01' AND '2020-01-31'\" --dialect sqlite
    wherekit \"col1|col2 LIKE abc\" --format json
    wherekit --file conditions.json --dialect mysql")]
struct Cli {
    /// Shorthand condition expression
    expr: Option<String>,

    /// Read conditions from a JSON document instead
    #[arg(short, long, conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// SQL dialect (postgres, mysql, sqlite)
    #[arg(short, long, env = "WHEREKIT_DIALECT")]
    dialect: Option<Dialect>,

    /// Output format
    #[arg(long, value_enum, default_value = "sql")]
    format: OutputFormat,

    /// Config file (defaults to ./wherekit.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and show its node tree
    Explain {
        /// The expression to explain
        expr: String,
    },
    /// Show the operator reference
    Operators,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "wherekit=debug" } else { "wherekit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }
    let dialect = cli.dialect.unwrap_or(config.dialect);
    let escaper = dialect.escaper();
    tracing::debug!(%dialect, "using dialect");

    match &cli.command {
        Some(Commands::Explain { expr }) => explain(expr, escaper.as_ref()),
        Some(Commands::Operators) => {
            show_operators();
            Ok(())
        }
        None => {
            let nodes = if let Some(path) = &cli.file {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                wherekit::ast::document::from_json(&content)?
            } else if let Some(expr) = &cli.expr {
                if cli.verbose {
                    eprintln!("{} {}", "Input:".dimmed(), expr.yellow());
                }
                wherekit::parse(expr)?
            } else {
                println!("{}", "wherekit: portable WHERE clauses".cyan().bold());
                println!();
                println!("Usage: wherekit <EXPR> [OPTIONS]");
                println!();
                println!("Try: wherekit --help");
                return Ok(());
            };

            render(&nodes, escaper.as_ref(), &cli.format)
        }
    }
}

fn render(nodes: &[Where], escaper: &dyn Escaper, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Sql => {
            let sql = join_all(nodes, escaper)?;
            if sql.is_empty() {
                println!("{}", "(no condition)".dimmed());
            } else {
                println!("{}", sql);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(nodes)?);
        }
    }
    Ok(())
}

fn explain(expr: &str, escaper: &dyn Escaper) -> anyhow::Result<()> {
    println!("{}", "Condition Explanation".cyan().bold());
    println!();
    println!("{} {}", "Input:".dimmed(), expr.yellow());
    println!();

    let nodes = wherekit::parse(expr)?;

    println!("{}", "Nodes:".green().bold());
    for (i, node) in nodes.iter().enumerate() {
        print_node(node, i == 0, 1);
    }

    println!();
    println!("{} ({})", "Generated SQL:".green().bold(), escaper.name());
    println!("  {}", join_all(&nodes, escaper)?.white());
    Ok(())
}

fn print_node(node: &Where, first: bool, depth: usize) {
    let indent = "  ".repeat(depth);
    let joiner = if first {
        "    ".to_string()
    } else {
        format!("{:4}", node.joiner().to_string())
    };

    match node.kind() {
        WhereKind::Group(inner) => {
            println!("{}{} {}", indent, joiner.cyan(), "( group".white());
            for (i, child) in inner.iter().enumerate() {
                print_node(child, i == 0, depth + 2);
            }
            println!("{}     {}", indent, ")".white());
        }
        WhereKind::Condition(cond) => {
            let columns: Vec<String> = cond.columns().iter().map(|c| c.to_string()).collect();
            let operand = match cond.operand() {
                Operand::None => String::new(),
                Operand::Scalar(v) => v.to_string(),
                Operand::Range(low, high) => format!("{} .. {}", low, high),
                Operand::List(values) => {
                    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                    format!("[{}]", items.join(", "))
                }
                Operand::Subquery(q) => format!("<subquery> {}", q),
            };
            println!(
                "{}{} {} {} {}",
                indent,
                joiner.cyan(),
                columns.join(" | ").white(),
                cond.operator().to_string().magenta(),
                operand.yellow()
            );
        }
    }
}

fn show_operators() {
    println!("{}", "wherekit Operator Reference".cyan().bold());
    println!();

    let rows = [
        ("=  !=  <  >  <=  >=", "Comparison", "a = 'x'"),
        ("BETWEEN a AND b", "Inclusive range", "a BETWEEN 1 AND 9"),
        ("IN (x, y)", "List membership", "a IN ('x', 'y')"),
        ("IN (SELECT ...)", "Subquery membership", "a IN (SELECT ...)"),
        ("LIKE p", "Case-insensitive match", "LOWER(a) LIKE LOWER('%p%')"),
        ("IS [NOT] NULL", "Null check", "a IS NULL"),
        ("a|b", "Multi-column (OR)", "(a = 1 OR b = 1)"),
        ("integer:a", "Cast column", "CAST(a AS INTEGER)"),
        ("field:b", "Column reference value", "a < b"),
        ("( ... )", "Sub-group", "(a = 1 OR a = 2)"),
    ];

    println!(
        "{:22} {:24} {}",
        "Syntax".white().bold(),
        "Meaning".white().bold(),
        "SQL".white().bold()
    );
    println!("{}", "─".repeat(80).dimmed());

    for (syntax, meaning, sql) in rows {
        println!("{:22} {:24} {}", syntax.cyan().bold(), meaning.yellow(), sql.dimmed());
    }
}
