use anyhow::{Context, Result, bail};

use dex_terminal::assets::DirAssets;
use dex_terminal::config::AppConfig;
use dex_terminal::dataset::Dex;
use dex_terminal::format::record_view;
use dex_terminal::search::filter_names;
use dex_terminal::stat_scale::{BarScale, tier_label};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = AppConfig::from_env().with_args(&args);
    let dex = Dex::load(&config.data_path)
        .with_context(|| format!("load dex from {}", config.data_path.display()))?;

    if let Some(query) = parse_search_arg(&args) {
        for name in filter_names(&query, &dex.names()) {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(name) = positional_name(&args) else {
        bail!("usage: dex_lookup <name> [--data <path>] | --search <query>");
    };
    let record = dex.lookup(&name)?;
    let assets = DirAssets::new(config.asset_dir.clone());
    let view = record_view(record, &assets, &BarScale::DEFAULT);

    println!("{}", view.name.replace('\n', " / "));
    println!("#{:03}", view.portrait_id);
    match &view.secondary {
        Some(secondary) => println!("Type: {} / {}", view.primary.name, secondary.name),
        None => println!("Type: {}", view.primary.name),
    }
    println!();
    println!("{}", view.entry);
    println!();
    println!("Height: {}", view.height);
    println!("Weight: {}", view.weight);
    println!("Catch Rate: {}", view.catch_rate);
    for stat in &view.stats {
        println!(
            "{:<5}{:>4}  width {:>3}  {}",
            stat.label,
            stat.value,
            stat.width,
            tier_label(stat.tier)
        );
    }

    Ok(())
}

fn parse_search_arg(args: &[String]) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(query) = arg.strip_prefix("--search=") {
            return Some(query.to_string());
        }
        if arg == "--search" {
            return Some(args.get(idx + 1).cloned().unwrap_or_default());
        }
    }
    None
}

/// First argument that is neither a flag nor a flag's value.
fn positional_name(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--data" || arg == "--search" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        return Some(arg.clone());
    }
    None
}
