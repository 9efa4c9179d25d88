use crate::assets::{Asset, AssetResolver};
use crate::dataset::Creature;
use crate::stat_scale::{BarScale, StatTier, stat_tier};

pub const NO_CATCH_DATA: &str = "No known data";
pub const STAT_LABELS: [&str; 6] = ["HP:", "ATK:", "DEF:", "SPA:", "SPD:", "SPE:"];
const ENTRY_SENTENCES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: f64,
    pub width: u16,
    pub tier: StatTier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeBadge {
    pub name: String,
    pub asset: Option<Asset>,
}

/// Everything the screen shows for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    pub name: String,
    pub entry: String,
    pub height: String,
    pub weight: String,
    pub catch_rate: String,
    pub catch_known: bool,
    pub portrait_id: u32,
    pub portrait: Option<Asset>,
    pub primary: TypeBadge,
    pub secondary: Option<TypeBadge>,
    pub stats: Vec<StatLine>,
}

pub fn record_view(record: &Creature, assets: &dyn AssetResolver, scale: &BarScale) -> RecordView {
    let badge = |name: &str| TypeBadge {
        name: name.to_string(),
        asset: assets.badge(name),
    };
    RecordView {
        name: display_name(&record.name),
        entry: truncate_entry(&record.entry),
        height: format_height(record.height_m),
        weight: format_weight(record.weight_kg),
        catch_rate: format_catch_rate(record.catch_rate),
        catch_known: record.catch_rate.is_some(),
        portrait_id: record.id,
        portrait: assets.portrait(record.id),
        primary: badge(&record.primary_type),
        secondary: record.secondary_type.as_deref().map(badge),
        stats: stat_lines(record, scale),
    }
}

pub fn stat_lines(record: &Creature, scale: &BarScale) -> Vec<StatLine> {
    STAT_LABELS
        .into_iter()
        .zip(record.stats.values())
        .map(|(label, value)| StatLine {
            label,
            value,
            width: scale.scale(value),
            tier: stat_tier(value),
        })
        .collect()
}

/// Form names like "Charizard - Mega Charizard X" go on separate lines.
pub fn display_name(name: &str) -> String {
    name.split(" - ").collect::<Vec<_>>().join("\n")
}

/// Keeps the first four ". "-separated sentences and makes sure the result
/// ends in "." or "!".
pub fn truncate_entry(entry: &str) -> String {
    let mut out = entry
        .split(". ")
        .take(ENTRY_SENTENCES)
        .collect::<Vec<_>>()
        .join(". ");
    if !out.is_empty() && !out.ends_with('.') && !out.ends_with('!') {
        out.push('.');
    }
    out
}

pub fn format_height(height_m: f64) -> String {
    format!("{height_m} m")
}

pub fn format_weight(weight_kg: f64) -> String {
    format!("{weight_kg} kg")
}

pub fn format_catch_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate}%"),
        None => NO_CATCH_DATA.to_string(),
    }
}
