use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::debug;
use toon_loader::decode::primitive::parse_primitive;
use toon_loader::{Options, TierColumns, ToonLoader, Value};

#[derive(Parser, Debug)]
#[command(
    name = "toon-loader",
    about = "Dump and query TOON pricing tables as JSON",
    version
)]
struct Args {
    /// Reject malformed lines and array length mismatches
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    /// Indentation unit in spaces
    #[arg(long, global = true, default_value_t = 2)]
    indent: usize,

    /// Print JSON on one line instead of pretty-printing
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole document, or one top-level table
    Dump {
        file: PathBuf,
        table: Option<String>,
    },
    /// Map a table's key column to its value column
    Dict {
        file: PathBuf,
        table: String,
        key_field: String,
        value_field: String,
    },
    /// Look up the tier whose quantity range contains QUANTITY
    Tier {
        file: PathBuf,
        table: String,
        quantity: f64,
        #[arg(long, default_value = "qty_min")]
        min_field: String,
        #[arg(long, default_value = "qty_max")]
        max_field: String,
        #[arg(long, default_value = "price")]
        value_field: String,
    },
    /// Print the first row matching every FIELD=VALUE condition
    Find {
        file: PathBuf,
        table: String,
        #[arg(value_name = "FIELD=VALUE", required = true)]
        conditions: Vec<String>,
    },
}

fn parse_condition(raw: &str) -> Result<(String, Value)> {
    let Some((field, value)) = raw.split_once('=') else {
        bail!("condition must look like FIELD=VALUE, got `{}`", raw);
    };
    Ok((field.trim().to_string(), parse_primitive(value)))
}

fn print(value: &Value, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    debug!("{:?}", args);

    let mut loader = ToonLoader::with_options(Options {
        indent: args.indent,
        strict: args.strict,
        cache: true,
    });

    let out = match &args.command {
        Command::Dump { file, table } => match table {
            Some(name) => Value::Array(
                loader
                    .load_table(file, name)
                    .with_context(|| format!("loading {}", file.display()))?,
            ),
            None => {
                let doc = loader
                    .load(file)
                    .with_context(|| format!("loading {}", file.display()))?;
                Value::clone(&doc)
            }
        },
        Command::Dict {
            file,
            table,
            key_field,
            value_field,
        } => Value::Object(
            loader
                .get_table_as_dict(file, table, key_field, value_field)
                .with_context(|| format!("loading {}", file.display()))?,
        ),
        Command::Tier {
            file,
            table,
            quantity,
            min_field,
            max_field,
            value_field,
        } => {
            let columns = TierColumns {
                min_field: min_field.as_str(),
                max_field: max_field.as_str(),
                value_field: value_field.as_str(),
            };
            loader
                .get_tier_value(file, table, *quantity, &columns)
                .with_context(|| format!("loading {}", file.display()))?
                .unwrap_or(Value::Null)
        }
        Command::Find {
            file,
            table,
            conditions,
        } => {
            let parsed = conditions
                .iter()
                .map(|c| parse_condition(c))
                .collect::<Result<Vec<_>>>()?;
            let borrowed: Vec<(&str, Value)> = parsed
                .iter()
                .map(|(f, v)| (f.as_str(), v.clone()))
                .collect();
            loader
                .find_row(file, table, &borrowed)
                .with_context(|| format!("loading {}", file.display()))?
                .map_or(Value::Null, Value::Object)
        }
    };

    print(&out, args.compact)
}
