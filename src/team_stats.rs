use serde::{Deserialize, Serialize};
use crate::data_loader::*;
use crate::util::*;

// Which of a team's matches count: home games, away games or both
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Perspective {
    Home,
    Away,
    #[default]
    All,
}

impl Perspective {
    // Record filter only. Which columns count as "for" is resolved per record from MatchRecord::side_of
    pub fn includes(&self, m: &MatchRecord, team: &str) -> bool {
        match self {
            Perspective::Home => m.home_team == team,
            Perspective::Away => m.away_team == team,
            Perspective::All => m.is_in_game(team),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Perspective::Home => "Home",
            Perspective::Away => "Away",
            Perspective::All => "All",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    // Strict three-way split: draw first, then win if the winner is our side, loss otherwise
    pub fn for_side(result: FullTimeResult, side: Side) -> Self {
        match result.winner() {
            None => Outcome::Draw,
            Some(winner) if winner == side => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }
}

// Summary for one team under one perspective. The perspective is part of the identity:
// home and away statistics for the same team never compare equal.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub team_name: String,
    pub perspective: Perspective,

    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,

    pub goals_for: u32,
    pub goals_against: u32,

    pub avg_shots: f64,
    pub avg_shots_on_target: f64,
    pub avg_corners: f64,
    pub avg_fouls: f64,
    pub avg_yellow_cards: f64,
    pub avg_red_cards: f64,

    pub clean_sheets: u32,
}

impl TeamStatistics {
    pub fn new(team_name: &str, perspective: Perspective) -> Self {
        Self {
            team_name: team_name.to_owned(),
            perspective,

            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,

            goals_for: 0,
            goals_against: 0,

            avg_shots: 0.0,
            avg_shots_on_target: 0.0,
            avg_corners: 0.0,
            avg_fouls: 0.0,
            avg_yellow_cards: 0.0,
            avg_red_cards: 0.0,

            clean_sheets: 0,
        }
    }

    pub fn goals_for_per_match(&self) -> f64 {
        per_match(self.goals_for, self.matches_played)
    }

    pub fn goals_against_per_match(&self) -> f64 {
        per_match(self.goals_against, self.matches_played)
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.matches_played)
    }
}

// Pure and total: an unknown team or an empty record set gives an all-zero summary
pub fn compute_team_statistics(team_name: &str, records: &[MatchRecord], perspective: Perspective) -> TeamStatistics {
    let mut stats = TeamStatistics::new(team_name, perspective);
    let mut totals = SideEvents::default();

    for m in records {
        if !perspective.includes(m, team_name) { continue; }

        // Columns are picked from the team's role in this match, independent of the filter above
        let Some(side) = m.side_of(team_name) else { continue; };

        let goals_for = m.full_time.of(side);
        let goals_against = m.full_time.of(side.opponent());

        stats.matches_played += 1;
        stats.goals_for = stats.goals_for.saturating_add(goals_for);
        stats.goals_against = stats.goals_against.saturating_add(goals_against);

        match Outcome::for_side(m.result, side) {
            Outcome::Win => stats.wins += 1,
            Outcome::Draw => stats.draws += 1,
            Outcome::Loss => stats.losses += 1,
        }

        if goals_against == 0 { stats.clean_sheets += 1; }

        add_events(&mut totals, m.events(side));
    }

    stats.points = stats.wins * 3 + stats.draws;

    let played = stats.matches_played;
    stats.avg_shots           = per_match(totals.shots, played);
    stats.avg_shots_on_target = per_match(totals.shots_on_target, played);
    stats.avg_corners         = per_match(totals.corners, played);
    stats.avg_fouls           = per_match(totals.fouls, played);
    stats.avg_yellow_cards    = per_match(totals.yellow_cards, played);
    stats.avg_red_cards       = per_match(totals.red_cards, played);

    stats
}

fn add_events(totals: &mut SideEvents, ev: &SideEvents) {
    totals.shots           = totals.shots.saturating_add(ev.shots);
    totals.shots_on_target = totals.shots_on_target.saturating_add(ev.shots_on_target);
    totals.fouls           = totals.fouls.saturating_add(ev.fouls);
    totals.corners         = totals.corners.saturating_add(ev.corners);
    totals.yellow_cards    = totals.yellow_cards.saturating_add(ev.yellow_cards);
    totals.red_cards       = totals.red_cards.saturating_add(ev.red_cards);
}
