use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};

use crate::error::DexError;

/// Source sentinel for "no secondary type".
pub const NO_TYPE: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBlock {
    pub hp: f64,
    pub attack: f64,
    pub defence: f64,
    pub sp_attack: f64,
    pub sp_defence: f64,
    pub speed: f64,
}

impl StatBlock {
    /// Stats in display order: HP, ATK, DEF, SPA, SPD, SPE.
    pub fn values(&self) -> [f64; 6] {
        [
            self.hp,
            self.attack,
            self.defence,
            self.sp_attack,
            self.sp_defence,
            self.speed,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub entry: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub catch_rate: Option<f64>,
    pub stats: StatBlock,
    pub primary_type: String,
    pub secondary_type: Option<String>,
}

/// Read-only table of creatures, keyed by name, in source order.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    records: Vec<Creature>,
    by_name: HashMap<String, usize>,
}

impl Dex {
    pub fn from_records(records: Vec<Creature>) -> Result<Self, DexError> {
        let mut by_name = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_name.insert(record.name.clone(), idx).is_some() {
                return Err(DexError::DuplicateName(record.name.clone()));
            }
        }
        Ok(Self { records, by_name })
    }

    /// Loads the table from disk; `.json` files are read as JSON, anything else as CSV.
    pub fn load(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read dex json {}", path.display()))?;
            Self::from_json_str(&raw).with_context(|| format!("parse dex json {}", path.display()))
        } else {
            let file = fs::File::open(path)
                .with_context(|| format!("open dex csv {}", path.display()))?;
            Self::from_csv_reader(file).with_context(|| format!("parse dex csv {}", path.display()))
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();
        for (pos, row) in rdr.deserialize::<CsvRow>().enumerate() {
            // csv reports 1-based lines including the header.
            let line = pos + 2;
            let row = row.with_context(|| format!("csv row {line}"))?;
            records.push(row.into_creature(pos).with_context(|| format!("csv row {line}"))?);
        }
        Ok(Self::from_records(records)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let rows: Vec<JsonRow> = serde_json::from_str(raw).context("decode dex records")?;
        let records = rows.into_iter().map(JsonRow::into_creature).collect();
        Ok(Self::from_records(records)?)
    }

    pub fn get(&self, name: &str) -> Option<&Creature> {
        self.by_name.get(name).map(|idx| &self.records[*idx])
    }

    pub fn lookup(&self, name: &str) -> Result<&Creature, DexError> {
        self.get(name)
            .ok_or_else(|| DexError::NotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    // Unnamed dataframe index column.
    #[serde(rename = "", default)]
    index: Option<u32>,
    name: String,
    #[serde(default)]
    pokedex_entry: String,
    height: f64,
    weight: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    catch_rate: Option<f64>,
    hp: f64,
    attack: f64,
    defence: f64,
    sp_attack: f64,
    sp_defence: f64,
    speed: f64,
    type1: String,
    #[serde(default)]
    type2: String,
}

impl CsvRow {
    fn into_creature(self, pos: usize) -> Result<Creature> {
        let index = match self.index {
            Some(index) => index,
            None => u32::try_from(pos).map_err(|_| anyhow!("row position {pos} exceeds u32"))?,
        };
        let id = index
            .checked_add(1)
            .ok_or_else(|| anyhow!("index {index} has no room for a 1-based id"))?;
        Ok(Creature {
            id,
            name: self.name,
            entry: self.pokedex_entry,
            height_m: self.height,
            weight_kg: self.weight,
            catch_rate: self.catch_rate,
            stats: StatBlock {
                hp: self.hp,
                attack: self.attack,
                defence: self.defence,
                sp_attack: self.sp_attack,
                sp_defence: self.sp_defence,
                speed: self.speed,
            },
            primary_type: self.type1,
            secondary_type: secondary_type(&self.type2),
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    id: u32,
    name: String,
    #[serde(default)]
    pokedex_entry: String,
    height: f64,
    weight: f64,
    #[serde(default)]
    catch_rate: Option<f64>,
    hp: f64,
    attack: f64,
    defence: f64,
    sp_attack: f64,
    sp_defence: f64,
    speed: f64,
    type1: String,
    #[serde(default)]
    type2: Option<String>,
}

impl JsonRow {
    fn into_creature(self) -> Creature {
        Creature {
            id: self.id,
            name: self.name,
            entry: self.pokedex_entry,
            height_m: self.height,
            weight_kg: self.weight,
            catch_rate: self.catch_rate.filter(|v| v.is_finite()),
            stats: StatBlock {
                hp: self.hp,
                attack: self.attack,
                defence: self.defence,
                sp_attack: self.sp_attack,
                sp_defence: self.sp_defence,
                speed: self.speed,
            },
            primary_type: self.type1,
            secondary_type: self.type2.as_deref().and_then(secondary_type),
        }
    }
}

fn secondary_type(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_TYPE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Empty, `NaN` and `N/A` cells all mean "no data".
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()).filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = ",name,pokedex_entry,height,weight,catch_rate,hp,attack,defence,sp_attack,sp_defence,speed,type1,type2\n\
0,Bulbasaur,A strange seed. It grows.,0.7,6.9,11.9,45,49,49,65,65,45,grass,poison\n\
1,Ivysaur,Bud on back.,1.0,13.0,,60,62,63,80,80,60,grass,poison\n\
2,Arceus - Origin,Shaped the world.,3.2,320.0,N/A,120,120,120,120,120,120,normal,none\n";

    #[test]
    fn csv_rows_map_index_to_id_and_sentinels_to_none() {
        let dex = Dex::from_csv_reader(CSV.as_bytes()).expect("csv should parse");
        assert_eq!(dex.len(), 3);
        let bulba = dex.get("Bulbasaur").expect("present");
        assert_eq!(bulba.id, 1);
        assert_eq!(bulba.catch_rate, Some(11.9));
        assert_eq!(bulba.secondary_type.as_deref(), Some("poison"));

        assert_eq!(dex.get("Ivysaur").and_then(|c| c.catch_rate), None);

        let arceus = dex.get("Arceus - Origin").expect("present");
        assert_eq!(arceus.id, 3);
        assert_eq!(arceus.catch_rate, None);
        assert_eq!(arceus.secondary_type, None);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let raw = ",name,pokedex_entry,height,weight,catch_rate,hp,attack,defence,sp_attack,sp_defence,speed,type1,type2\n\
0,Mew,x,0.4,4.0,5.9,100,100,100,100,100,100,psychic,none\n\
1,Mew,y,0.4,4.0,5.9,100,100,100,100,100,100,psychic,none\n";
        let err = Dex::from_csv_reader(raw.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DexError>(),
            Some(DexError::DuplicateName(name)) if name == "Mew"
        ));
    }

    #[test]
    fn missing_index_column_falls_back_to_row_position() {
        let raw = "name,height,weight,hp,attack,defence,sp_attack,sp_defence,speed,type1\n\
Pidgey,0.3,1.8,40,45,40,35,35,56,normal\n\
Rattata,0.3,3.5,30,56,35,25,35,72,normal\n";
        let dex = Dex::from_csv_reader(raw.as_bytes()).expect("csv should parse");
        assert_eq!(dex.get("Rattata").map(|c| c.id), Some(2));
        assert_eq!(dex.get("Pidgey").map(|c| c.entry.as_str()), Some(""));
    }

    #[test]
    fn index_at_u32_max_is_a_load_error() {
        let raw = ",name,height,weight,hp,attack,defence,sp_attack,sp_defence,speed,type1\n\
4294967295,Missingno,1.0,10.0,33,136,0,6,6,29,normal\n";
        let err = Dex::from_csv_reader(raw.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("csv row 2"), "{msg}");
        assert!(msg.contains("4294967295"), "{msg}");
    }
}
