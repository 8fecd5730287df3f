//! Team pool: eligible teams in ranking order, and CSV import.

use crate::models::{BracketError, Team};
use serde::Deserialize;
use std::cmp::Ordering;
use std::io::Read;

/// Keep eligible teams only, best ranking first. Unranked teams go last; ties break by name.
pub fn resolve_team_pool(teams: Vec<Team>) -> Vec<Team> {
    let mut pool: Vec<Team> = teams.into_iter().filter(|t| t.eligible).collect();
    pool.sort_by(|a, b| {
        let by_rank = match (a.ranking, b.ranking) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_rank.then_with(|| a.name.cmp(&b.name))
    });
    pool
}

#[derive(Deserialize)]
struct TeamRow {
    name: String,
    #[serde(default)]
    ranking: Option<u32>,
    #[serde(default)]
    eligible: Option<bool>,
}

/// Read teams from CSV with a `name,ranking,eligible` header.
/// Empty `ranking` means unranked; empty `eligible` means eligible.
pub fn read_teams_csv<R: Read>(reader: R) -> Result<Vec<Team>, BracketError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut teams = Vec::new();
    for row in rdr.deserialize::<TeamRow>() {
        let row = row.map_err(|e| BracketError::TeamImport(e.to_string()))?;
        if row.name.is_empty() {
            return Err(BracketError::TeamImport("team name is empty".to_string()));
        }
        let mut team = Team::new(row.name);
        team.ranking = row.ranking;
        team.eligible = row.eligible.unwrap_or(true);
        teams.push(team);
    }
    log::debug!("Imported {} team(s) from CSV", teams.len());
    Ok(teams)
}
