//! `fitting-room catalog`: list what can be picked on the select screen.

use clap::Args;
use color_eyre::eyre::Result;
use colored::Colorize;
use fr_core::catalog::Catalog;
use fr_protocol::catalog_models::OutfitItem;
use fr_protocol::wizard_models::Gender;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Only list one catalog variant.
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CatalogArgs, root: &Path) -> Result<()> {
    let config = super::load_with_overrides(root, None).await?;
    let catalog = &config.catalog;

    if args.json {
        let genders: Vec<_> = catalog
            .genders()
            .iter()
            .filter(|c| args.gender.is_none_or(|g| g == c.gender))
            .collect();
        let value = serde_json::json!({
            "genders": genders,
            "backgrounds": catalog.backgrounds(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", format_catalog(catalog, args.gender));
    Ok(())
}

fn format_items(out: &mut String, heading: &str, items: &[OutfitItem]) {
    let _ = writeln!(out, "  {}", heading.bold());
    for item in items {
        if item.full_outfit {
            let _ = writeln!(out, "    - {} {}", item.name, "(full outfit)".dimmed());
        } else {
            let _ = writeln!(out, "    - {}", item.name);
        }
    }
}

/// Human-readable listing, one section per gender then the backgrounds.
pub fn format_catalog(catalog: &Catalog, only: Option<Gender>) -> String {
    let mut out = String::new();

    for entry in catalog.genders() {
        if only.is_some_and(|g| g != entry.gender) {
            continue;
        }
        let _ = writeln!(out, "{}", entry.gender.to_string().to_uppercase().cyan().bold());
        format_items(&mut out, "Tops", &entry.tops);
        format_items(&mut out, "Bottoms", &entry.bottoms);
        out.push('\n');
    }

    let _ = writeln!(out, "{}", "BACKGROUNDS".cyan().bold());
    for background in catalog.backgrounds() {
        if background.description.is_empty() {
            let _ = writeln!(out, "  - {}", background.name);
        } else {
            let _ = writeln!(
                out,
                "  - {} {}",
                background.name,
                format!("({})", background.description).dimmed()
            );
        }
    }
    out
}
