//! Seed import of players from a CSV export
//!
//! Expects a header row. Column names follow the spreadsheet the roster is
//! usually kept in (`Nome`, `Squadra`, `Ruolo`, ...); the English column
//! names of the `players` table are accepted as well.

use crate::core::PlayerService;
use crate::core::coerce::{coerce_bool, parse_optional_f64, parse_optional_i64};
use crate::core::player::PlayerInput;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Nome", alias = "name")]
    name: String,
    #[serde(rename = "Squadra", alias = "team", default)]
    team: String,
    #[serde(rename = "Ruolo", alias = "role", default)]
    role: String,
    #[serde(rename = "Ruolo_Dettaglio", alias = "role_detail", default)]
    role_detail: String,
    #[serde(rename = "Fuori_lista", alias = "out_of_list", default)]
    out_of_list: String,
    #[serde(rename = "Tiratore_CP", alias = "set_piece_taker", default)]
    set_piece_taker: String,
    #[serde(rename = "Media_Voto", alias = "average_rating", default)]
    average_rating: String,
    #[serde(rename = "FantaMedia", alias = "fantasy_average", default)]
    fantasy_average: String,
    #[serde(
        rename = "FantaMedia_Prevista",
        alias = "projected_fantasy_average",
        default
    )]
    projected_fantasy_average: String,
    #[serde(rename = "Titolarita", alias = "starting_likelihood", default)]
    starting_likelihood: String,
    #[serde(rename = "Prezzo", alias = "price", default)]
    price: String,
    #[serde(rename = "Obiettivo", alias = "target", default)]
    target: String,
    #[serde(rename = "Nota", alias = "note", default)]
    note: String,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CsvRow {
    fn into_input(self, line: u64) -> Result<PlayerInput> {
        let float = |raw: &str, column: &str| {
            parse_optional_f64(raw)
                .map_err(|e| anyhow!("Line {}: invalid {} '{}': {}", line, column, raw, e))
        };
        let int = |raw: &str, column: &str| {
            parse_optional_i64(raw).map_err(|e| anyhow!("Line {}: invalid {}: {}", line, column, e))
        };

        Ok(PlayerInput {
            average_rating: float(&self.average_rating, "average rating")?,
            fantasy_average: float(&self.fantasy_average, "fantasy average")?,
            projected_fantasy_average: float(
                &self.projected_fantasy_average,
                "projected fantasy average",
            )?,
            starting_likelihood: int(&self.starting_likelihood, "starting likelihood")?,
            price: int(&self.price, "price")?,
            out_of_list: coerce_bool(&self.out_of_list),
            set_piece_taker: coerce_bool(&self.set_piece_taker),
            target: coerce_bool(&self.target),
            name: self.name.trim().to_string(),
            team: non_blank(self.team),
            role: non_blank(self.role),
            role_detail: non_blank(self.role_detail),
            note: self.note,
        })
    }
}

/// Parse players from any CSV source
pub fn read_players<R: Read>(source: R) -> Result<Vec<PlayerInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let mut players = Vec::new();
    for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index as u64 + 2;
        let row = record.with_context(|| format!("Line {}: malformed row", line))?;
        players.push(row.into_input(line)?);
    }

    Ok(players)
}

/// Parse players from a CSV file
pub fn read_players_file(path: &Path) -> Result<Vec<PlayerInput>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_players(file)
}

/// Replace the stored roster with the contents of a CSV file
pub async fn import_file(service: &dyn PlayerService, path: &Path) -> Result<usize> {
    let players = read_players_file(path)?;
    let imported = service.replace_all(players).await?;
    tracing::info!(path = %path.display(), imported, "imported players from CSV");
    Ok(imported)
}

/// Load the seed file into an empty roster
///
/// Does nothing when players are already stored. A configured file that does
/// not exist is reported and skipped. Returns the number of imported players,
/// if an import ran.
pub async fn seed_if_empty(
    service: &dyn PlayerService,
    csv_path: Option<&Path>,
) -> Result<Option<usize>> {
    let existing = service.count().await?;
    if existing > 0 {
        tracing::info!(players = existing, "existing roster found, skipping seed import");
        return Ok(None);
    }

    let Some(path) = csv_path else {
        tracing::info!("no seed file configured, starting with an empty roster");
        return Ok(None);
    };

    if !path.exists() {
        tracing::warn!(path = %path.display(), "seed file not found, the roster is empty");
        return Ok(None);
    }

    import_file(service, path).await.map(Some)
}
