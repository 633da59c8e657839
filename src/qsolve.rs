use std::{ path::PathBuf, process::ExitCode };
use anyhow::Context;
use clap::{ Parser, Subcommand };
use serde::Serialize;
use serde_json::Value;
use qsolvers::{
    config::EngineConfig,
    logging,
    registry::{ Outcome, Registry },
    schema::{ defaults, RawParams },
    solvers::SolverId,
};

/// Exit status when a request is rejected by the validator.
const EXIT_REJECTED: u8 = 2;

/// Solve textbook quantum-mechanics problems and print the results as JSON.
#[derive(Parser, Debug)]
#[command(name = "qsolve", version, about)]
struct Cli {
    /// Engine settings (TOML); built-in defaults are used if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log events as JSON lines on stderr
    #[arg(long, global = true)]
    json_log: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all solvers.
    List,
    /// Show the parameter schema of a solver.
    Params { solver: String },
    /// List the example presets of a solver.
    Examples { solver: String },
    /// Print a single example preset.
    Example { solver: String, example: String },
    /// Validate parameters and solve.
    Solve {
        solver: String,

        /// Start from this example preset instead of the schema defaults
        #[arg(short, long)]
        example: Option<String>,

        /// Set a parameter, e.g. `--set V0=4.5`; may be repeated
        #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, Value)>,

        /// Do not fill unset parameters from the schema defaults
        #[arg(long)]
        strict: bool,

        /// Include the plot directive in the output
        #[arg(long)]
        plot: bool,
    },
}

// values are read as JSON where possible (`3`, `2.5`, `true`) and kept as
// strings otherwise, so that the validator can report the type mismatch
fn parse_assignment(s: &str) -> Result<(String, Value), String> {
    let (name, value) = s.split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    let value = value.trim();
    let parsed = serde_json::from_str(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), parsed))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_log);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)?,
        None => EngineConfig::default(),
    };
    let registry = Registry::new(config);

    match cli.command {
        Command::List => {
            print_json(&registry.solvers())?;
        },
        Command::Params { solver } => {
            let id = registry.resolve(&solver)?;
            print_json(&registry.parameters(id))?;
        },
        Command::Examples { solver } => {
            let id = registry.resolve(&solver)?;
            print_json(&registry.examples(id))?;
        },
        Command::Example { solver, example } => {
            let id = registry.resolve(&solver)?;
            print_json(&registry.example(id, &example)?)?;
        },
        Command::Solve { solver, example, set, strict, plot } => {
            let id: SolverId = registry.resolve(&solver)?;
            let mut raw: RawParams
                = if strict { RawParams::new() } else { defaults(&registry.parameters(id)) };
            if let Some(example) = example {
                let preset = registry.example(id, &example)
                    .with_context(|| format!("cannot start from example '{example}'"))?;
                raw.extend(preset.parameters);
            }
            raw.extend(set);

            let outcome = registry.solve_with(id, &raw, plot);
            print_json(&outcome)?;
            if let Outcome::Rejected { violations } = &outcome {
                eprintln!("{id}: {violations}");
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_parse_as_json_or_string() {
        assert_eq!(parse_assignment("V0=4.5").unwrap(), ("V0".to_string(), Value::from(4.5)));
        assert_eq!(parse_assignment("max_n = 3").unwrap().1, Value::from(3));
        assert_eq!(parse_assignment("spin=true").unwrap().1, Value::from(true));
        assert_eq!(parse_assignment("a=wide").unwrap().1, Value::from("wide"));
        assert!(parse_assignment("V0").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
