use std::collections::BTreeSet;
use serde::Serialize;
use crate::data_loader::*;
use crate::team_stats::*;

// Every team that appears on either side, sorted
pub fn unique_teams(records: &[MatchRecord]) -> Vec<String> {
    let mut teams = BTreeSet::new();
    for m in records {
        teams.insert(m.home_team.as_str());
        teams.insert(m.away_team.as_str());
    }

    teams.into_iter().map(str::to_owned).collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub score: Score,
    pub side: Side,
    pub outcome: Outcome,
}

// The last `window` matches under the perspective, most recent first.
// Assumes the records are in chronological order, as the parser keeps them.
pub fn recent_form(team_name: &str, records: &[MatchRecord], perspective: Perspective, window: usize) -> Vec<FormEntry> {
    let played: Vec<&MatchRecord> = records.iter()
        .filter(|m| perspective.includes(m, team_name))
        .collect();

    let start = played.len().saturating_sub(window);

    played[start..].iter().rev()
        .filter_map(|m| {
            let side = m.side_of(team_name)?;
            Some(FormEntry {
                date: m.date.clone(),
                home_team: m.home_team.clone(),
                away_team: m.away_team.clone(),
                score: m.full_time,
                side,
                outcome: Outcome::for_side(m.result, side),
            })
        })
        .collect()
}

// "WDLWW" style string, most recent first
pub fn form_string(form: &[FormEntry]) -> String {
    form.iter().map(|f| f.outcome.letter()).collect()
}
