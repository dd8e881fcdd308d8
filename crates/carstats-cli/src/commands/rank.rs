//! Rank command - top metric values with ties grouped.

use std::path::PathBuf;

use carstats::{Category, Field, RankFilter};
use colored::Colorize;

/// Ranking flags collected from the command line.
pub struct RankOptions {
    pub metric: Field,
    pub driveline: Option<String>,
    pub transmission: Option<String>,
    pub filter: Vec<String>,
    pub limit: usize,
    pub multiplier: f64,
}

impl RankOptions {
    fn rank_filter(&self) -> Result<RankFilter, Box<dyn std::error::Error>> {
        build_rank_filter(
            self.driveline.as_deref(),
            self.transmission.as_deref(),
            &self.filter,
        )
    }
}

/// Combine the dedicated flags and `CATEGORY=VALUE` pairs into one filter.
///
/// The dedicated flags win over a pair naming the same category.
pub(crate) fn build_rank_filter(
    driveline: Option<&str>,
    transmission: Option<&str>,
    pairs: &[String],
) -> Result<RankFilter, Box<dyn std::error::Error>> {
    let mut parsed = Vec::with_capacity(pairs.len());
    for raw in pairs {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter '{}': expected CATEGORY=VALUE", raw))?;
        parsed.push((name.trim(), value.trim()));
    }

    let mut filter = RankFilter::from_pairs(parsed)?;
    if let Some(driveline) = driveline {
        filter.set(Category::Driveline, driveline);
    }
    if let Some(transmission) = transmission {
        filter.set(Category::Transmission, transmission);
    }
    Ok(filter)
}

pub fn run(
    file: PathBuf,
    options: RankOptions,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = options.rank_filter()?;

    let (stats, dataset) = super::load(&file, options.multiplier)?;
    let stats = stats
        .with_rank_metric(options.metric)
        .with_rank_filter(filter.clone())
        .with_rank_limit(options.limit);
    let cleaned = stats.initialize(&dataset.records);
    let groups = stats.ranking(&cleaned.records);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Top".cyan().bold(),
        options.metric.title().cyan().bold()
    );
    if !filter.is_empty() {
        let constraints: Vec<String> = filter
            .predicates()
            .map(|(category, value)| format!("{}={}", category, value))
            .collect();
        println!("  where {}", constraints.join(", ").white());
    }
    println!();

    if groups.is_empty() {
        println!("{}", "No matching records".yellow());
        return Ok(());
    }

    for group in &groups {
        let label = if group.is_tie() {
            format!("#{} ({} tied)", group.rank, group.len()).yellow().bold()
        } else {
            format!("#{}", group.rank).bold()
        };
        println!("{:16} {}", label, group.value.to_string().green());
        for member in &group.members {
            println!("    {}", member.id());
        }
    }

    Ok(())
}
