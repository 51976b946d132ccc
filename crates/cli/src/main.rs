use anyhow::bail;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ooid::{date_and_depth_from_ooid, Ooid, MAX_DEPTH, MIN_DEPTH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ooid")]
#[command(about = "Generate and inspect opaque object identifiers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fresh OOIDs
    New {
        /// Creation date to encode, YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Storage depth to encode, 1-4 (default: 2)
        #[arg(long)]
        depth: Option<u32>,
        /// Number of identifiers to generate
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Emit JSON instead of bare tokens
        #[arg(long)]
        json: bool,
    },
    /// Derive an OOID from a UUID you already hold
    FromUuid {
        /// UUID in canonical hyphenated form
        uuid: String,
        /// Creation date to encode, YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Storage depth to encode, 1-4 (default: 2)
        #[arg(long)]
        depth: Option<u32>,
        /// Emit JSON instead of a bare token
        #[arg(long)]
        json: bool,
    },
    /// Decode the date and depth stored in an OOID
    Inspect {
        /// The identifier to decode
        ooid: String,
        /// Emit JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ooid=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::New {
            date,
            depth,
            count,
            json,
        }) => {
            check_depth(depth)?;
            for _ in 0..count {
                let id = Ooid::new(date, depth);
                if json {
                    println!("{}", inspect_json(id.as_str()));
                } else {
                    println!("{}", id);
                }
            }
        }
        Some(Commands::FromUuid {
            uuid,
            date,
            depth,
            json,
        }) => {
            check_depth(depth)?;
            let id = Ooid::from_uuid_str(&uuid, date, depth);
            if !Ooid::is_canonical(id.as_str()) {
                tracing::warn!("input '{}' did not produce a canonical identifier", uuid);
            }
            if json {
                println!("{}", inspect_json(id.as_str()));
            } else {
                println!("{}", id);
            }
        }
        Some(Commands::Inspect { ooid, json }) => {
            if json {
                println!("{}", inspect_json(&ooid));
            } else {
                match date_and_depth_from_ooid(&ooid) {
                    Some((date, depth)) => {
                        println!("Date: {}, Depth: {}", date.format("%Y-%m-%d"), depth)
                    }
                    None => println!("Date: unknown, Depth: unknown"),
                }
            }
        }
        None => {
            println!("Use 'ooid --help' for commands");
        }
    }

    Ok(())
}

/// Rejects an out-of-range depth before it can reach the encoder's assertion.
fn check_depth(depth: Option<u32>) -> anyhow::Result<()> {
    if let Some(depth) = depth {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            bail!(
                "storage depth must be between {} and {}, got {}",
                MIN_DEPTH,
                MAX_DEPTH,
                depth
            );
        }
    }
    Ok(())
}

fn inspect_json(ooid: &str) -> serde_json::Value {
    match date_and_depth_from_ooid(ooid) {
        Some((date, depth)) => serde_json::json!({
            "ooid": ooid,
            "date": date.to_rfc3339(),
            "depth": depth,
        }),
        None => serde_json::json!({
            "ooid": ooid,
            "date": null,
            "depth": null,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_depth_accepts_valid_range() {
        assert!(check_depth(None).is_ok());
        for depth in MIN_DEPTH..=MAX_DEPTH {
            assert!(check_depth(Some(depth)).is_ok());
        }
    }

    #[test]
    fn test_check_depth_rejects_out_of_range() {
        assert!(check_depth(Some(0)).is_err());
        assert!(check_depth(Some(5)).is_err());
    }

    #[test]
    fn test_inspect_json_known_token() {
        let value = inspect_json("abcdef1234567890abcdef1232120504");

        assert_eq!(value["ooid"], "abcdef1234567890abcdef1232120504");
        assert_eq!(value["date"], "2012-05-04T00:00:00+00:00");
        assert_eq!(value["depth"], 2);
    }

    #[test]
    fn test_inspect_json_undecodable_token() {
        let value = inspect_json("not-an-ooid-at-all");

        assert_eq!(value["ooid"], "not-an-ooid-at-all");
        assert!(value["date"].is_null());
        assert!(value["depth"].is_null());
    }
}
