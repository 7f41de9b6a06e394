//! Command-line arguments of the `run_popde` binary.

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use crate::error::Result;
use crate::options::SolverOptions;

/// Evolve a population on a benchmark function with the DE adapter.
#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None)]
pub struct Args {
    /// Test function to minimise (see --list-functions).
    #[arg(short, long, default_value = "sphere")]
    pub function: String,

    /// Number of decision variables.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub dim: u64,

    /// Population size.
    #[arg(short, long, default_value_t = 20)]
    pub size: usize,

    /// Number of calls to evolve.
    #[arg(short, long, default_value_t = 10)]
    pub generations: usize,

    /// Seed of the initial population.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Solver option as key=value; the value is read as JSON, else as a string.
    #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
    pub option: Vec<(String, Value)>,

    /// JSON file with solver options; --option entries override it.
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Translate the function by this vector, e.g. --translate 1,-2.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub translate: Vec<f64>,

    /// Print the available test functions and exit.
    #[arg(long)]
    pub list_functions: bool,
}

impl Args {
    /// Options from the file, if any, overridden by each `--option`.
    pub fn solver_options(&self) -> Result<SolverOptions> {
        let mut opts = match &self.options {
            Some(path) => SolverOptions::from_json_file(path)?,
            None => SolverOptions::new(),
        };
        for (key, value) in &self.option {
            opts.insert(key.clone(), value.clone());
        }
        Ok(opts)
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, raw) = s.split_once('=').ok_or_else(|| format!("expected key=value, got {s}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in {s}"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parse_defaults() {
        let args = Args::parse_from(["run_popde"]);
        assert_eq!(args.function, "sphere");
        assert_eq!(args.dim, 2);
        assert_eq!(args.size, 20);
        assert!(args.translate.is_empty());
        assert!(args.solver_options().unwrap().is_empty());
    }

    #[test]
    fn option_values_are_json_or_strings() {
        let args = Args::parse_from([
            "run_popde",
            "--option",
            "maxiter=50",
            "-o",
            "strategy=rand1bin",
            "-o",
            "mutation=[0.4,0.9]",
        ]);
        let opts = args.solver_options().unwrap();
        assert_eq!(opts.get("maxiter"), Some(&json!(50)));
        assert_eq!(opts.get("strategy"), Some(&json!("rand1bin")));
        assert_eq!(opts.get("mutation"), Some(&json!([0.4, 0.9])));
    }

    #[test]
    fn malformed_option_rejected() {
        assert!(Args::try_parse_from(["run_popde", "-o", "maxiter"]).is_err());
        assert!(Args::try_parse_from(["run_popde", "-o", "=3"]).is_err());
        assert!(Args::try_parse_from(["run_popde", "--dim", "0"]).is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxiter": 10, "seed": 3}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let args = Args::parse_from(["run_popde", "--options", &path, "-o", "seed=9"]);
        let opts = args.solver_options().unwrap();
        assert_eq!(opts.get("maxiter"), Some(&json!(10)));
        assert_eq!(opts.get("seed"), Some(&json!(9)));
    }

    #[test]
    fn negative_translation() {
        let args = Args::parse_from(["run_popde", "--translate", "-1.5,2"]);
        assert_eq!(args.translate, vec![-1.5, 2.0]);
    }
}
