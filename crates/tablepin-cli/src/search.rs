//! The `search` subcommand: query → aggregator → rendered result tree.

use clap::Args;

use tablepin_client::PinStoreClient;
use tablepin_core::{format_distance, Coordinates};
use tablepin_search::{SearchAggregator, SearchResultEntry, SearchResultGroup};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query matched against business and menu-item fields.
    pub query: String,

    /// Session latitude, for distance annotation.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Session longitude, for distance annotation.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

pub async fn run(client: &PinStoreClient, args: SearchArgs) -> anyhow::Result<()> {
    if args.query.trim().is_empty() {
        println!("type something to search for");
        return Ok(());
    }

    let origin = match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let aggregator = SearchAggregator::new(client);
    match aggregator.search(&args.query, origin).await {
        Ok(groups) => {
            print!("{}", render_groups(&groups));
            Ok(())
        }
        Err(e) => {
            // Failures are user-visible and terminal for this search, not
            // for the process.
            println!("search failed: {e}");
            println!("no results");
            Ok(())
        }
    }
}

/// Renders groups in server order: business line, then one indented line
/// per entry.
pub fn render_groups(groups: &[SearchResultGroup]) -> String {
    if groups.is_empty() {
        return "no results\n".to_string();
    }

    let mut out = String::new();
    for group in groups {
        out.push_str(&group.business_name);
        if let Some(km) = group.distance_km {
            out.push_str(&format!(" ({})", format_distance(km)));
        }
        out.push('\n');

        for entry in &group.entries {
            match entry {
                SearchResultEntry::MenuMatch {
                    source,
                    item_name,
                    item_price,
                    item_description,
                } => {
                    out.push_str(&format!("  [{source}] {item_name} {item_price}"));
                    if let Some(description) = item_description {
                        out.push_str(&format!(" ({description})"));
                    }
                    out.push('\n');
                }
                SearchResultEntry::BusinessDetails {
                    description,
                    cuisine,
                } => {
                    let mut parts = Vec::new();
                    if let Some(description) = description {
                        parts.push(description.clone());
                    }
                    if !cuisine.is_empty() {
                        parts.push(cuisine.join(", "));
                    }
                    if parts.is_empty() {
                        parts.push("matched".to_string());
                    }
                    out.push_str(&format!("  {}\n", parts.join(" | ")));
                }
            }
        }
    }
    out
}
