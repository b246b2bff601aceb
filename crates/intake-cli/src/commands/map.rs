//! Map command - recommend SINs for NAICS codes.

use clap::Args;
use console::style;

use intake_core::map_codes_detailed;

/// Arguments for the map command.
#[derive(Args)]
pub struct MapArgs {
    /// NAICS codes, separately or comma separated
    #[arg(required = true, value_delimiter = ',')]
    codes: Vec<String>,

    /// Print the mapping as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: MapArgs) -> anyhow::Result<()> {
    let codes: Vec<&str> = args
        .codes
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();

    let mapping = map_codes_detailed(&codes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    if mapping.recommended.is_empty() {
        println!("{} No SINs recommended", style("ℹ").blue());
    } else {
        println!("Recommended SINs:");
        for sin in &mapping.recommended {
            println!("  {} {}", style("✓").green(), sin);
        }
    }

    if !mapping.unmapped.is_empty() {
        println!(
            "{} Unmapped NAICS codes: {}",
            style("!").yellow(),
            mapping.unmapped.join(", ")
        );
    }

    Ok(())
}
