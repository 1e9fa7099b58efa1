use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;
use crate::error::StatsError;

// Parses raw match text into records. Never fails: rows that can't be used are dropped,
// bad numbers become 0 and unknown result codes become draws.
// Record order is the row order of the input, which callers rely on for "most recent" views.
//
// Known limitation: no quoted fields, so a cell containing the delimiter shifts every column after it.
pub fn parse_matches(raw_text: &str) -> Vec<MatchRecord> {
    // Spreadsheet "CSV UTF-8" exports start with a byte-order mark
    let raw_text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);

    let lines = numbered_lines(raw_text);
    if lines.len() < 2 { return Vec::new(); }

    // Delimiter is decided once, from the header line. Header and rows are split the same way
    let delimiter = if lines[0].1.contains(';') { ';' } else { ',' };
    let headers: Vec<&str> = lines[0].1.split(delimiter).map(str::trim).collect();
    let columns = ColumnMap::from_headers(&headers);

    debug!("Header has {} cells, delimiter '{}', {} of {} known columns mapped",
        headers.len(),
        delimiter,
        columns.mapped_count(),
        Column::ALL.len(),
    );

    let mut matches = Vec::new();
    for &(line, text) in &lines[1..] {
        let row = csv::StringRecord::from(text.split(delimiter).collect::<Vec<_>>());

        // No partial records
        if row.len() < headers.len() {
            debug!("Skipping line {line}: {} of {} cells", row.len(), headers.len());
            continue;
        }

        match MatchRecord::from_row(&row, &columns) {
            Some(m) => matches.push(m),
            None => debug!("Skipping line {line}: missing team name"),
        }
    }

    debug!("Parsed {} of {} data lines", matches.len(), lines.len() - 1);

    matches
}

// Non-empty lines with their 1-based line number in the input, blank lines included in the count
pub fn numbered_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(idx, l)| (idx + 1, l))
        .collect()
}

// Reads a whole file and parses it. Only the file read can fail.
pub fn load_matches<P: AsRef<Path>>(file_path: P) -> Result<Vec<MatchRecord>, StatsError> {
    let data = fs::read_to_string(file_path.as_ref())?;
    let matches = parse_matches(&data);

    debug!("Loaded {} matches from {}", matches.len(), file_path.as_ref().display());

    Ok(matches)
}

// Leading-integer scan: "3.5" => 3, " 12abc" => 12. Anything without leading digits,
// negative values and overflow all fall back to 0.
pub fn parse_count(cell: &str) -> u32 {
    let cell = cell.trim_start();
    let cell = cell.strip_prefix('+').unwrap_or(cell);

    let digits_end = cell.find(|c: char| !c.is_ascii_digit()).unwrap_or(cell.len());
    cell[..digits_end].parse().unwrap_or(0)
}

// The fixed column catalog, in the usual football-data order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date, HomeTeam, AwayTeam,
    FullTimeHomeGoals, FullTimeAwayGoals, FullTimeResult,
    HalfTimeHomeGoals, HalfTimeAwayGoals, HalfTimeResult,
    HomeShots, AwayShots,
    HomeShotsOnTarget, AwayShotsOnTarget,
    HomeFouls, AwayFouls,
    HomeCorners, AwayCorners,
    HomeYellowCards, AwayYellowCards,
    HomeRedCards, AwayRedCards,
}

impl Column {
    pub const ALL: [Column; 21] = [
        Column::Date, Column::HomeTeam, Column::AwayTeam,
        Column::FullTimeHomeGoals, Column::FullTimeAwayGoals, Column::FullTimeResult,
        Column::HalfTimeHomeGoals, Column::HalfTimeAwayGoals, Column::HalfTimeResult,
        Column::HomeShots, Column::AwayShots,
        Column::HomeShotsOnTarget, Column::AwayShotsOnTarget,
        Column::HomeFouls, Column::AwayFouls,
        Column::HomeCorners, Column::AwayCorners,
        Column::HomeYellowCards, Column::AwayYellowCards,
        Column::HomeRedCards, Column::AwayRedCards,
    ];

    pub fn header_name(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::HomeTeam => "HomeTeam",
            Column::AwayTeam => "AwayTeam",
            Column::FullTimeHomeGoals => "FTHG",
            Column::FullTimeAwayGoals => "FTAG",
            Column::FullTimeResult => "FTR",
            Column::HalfTimeHomeGoals => "HTHG",
            Column::HalfTimeAwayGoals => "HTAG",
            Column::HalfTimeResult => "HTR",
            Column::HomeShots => "HS",
            Column::AwayShots => "AS",
            Column::HomeShotsOnTarget => "HST",
            Column::AwayShotsOnTarget => "AST",
            Column::HomeFouls => "HF",
            Column::AwayFouls => "AF",
            Column::HomeCorners => "HC",
            Column::AwayCorners => "AC",
            Column::HomeYellowCards => "HY",
            Column::AwayYellowCards => "AY",
            Column::HomeRedCards => "HR",
            Column::AwayRedCards => "AR",
        }
    }
}

// Header position for each catalog column. Exact, case-sensitive names.
// Duplicate headers: the first occurrence wins.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: [Option<usize>; 21],
}

impl ColumnMap {
    pub fn from_headers(headers: &[&str]) -> Self {
        let mut positions = [None; 21];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = headers.iter().position(|h| *h == column.header_name());
        }

        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column as usize]
    }

    pub fn mapped_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

// Unknown codes are normalised to a draw rather than surfaced
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullTimeResult {
    #[serde(rename = "H")]
    HomeWin,
    #[default]
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "A")]
    AwayWin,
}

impl FullTimeResult {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "H" => FullTimeResult::HomeWin,
            "A" => FullTimeResult::AwayWin,
            _ => FullTimeResult::Draw,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            FullTimeResult::HomeWin => Some(Side::Home),
            FullTimeResult::Draw => None,
            FullTimeResult::AwayWin => Some(Side::Away),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

// Per-side match events. Each side is tracked independently
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SideEvents {
    pub shots: u32,
    pub shots_on_target: u32,
    pub fouls: u32,
    pub corners: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub date: String,
    pub home_team: String,
    pub away_team: String,

    pub full_time: Score,
    pub result: FullTimeResult,
    pub half_time: Score,
    pub half_time_result: String,   // Free-form, "D" when absent

    pub home: SideEvents,
    pub away: SideEvents,
}

impl MatchRecord {
    // Builds a record from one row. None if either team name is missing.
    pub fn from_row(row: &csv::StringRecord, columns: &ColumnMap) -> Option<Self> {
        let text = |c: Column| columns.position(c).and_then(|idx| row.get(idx)).map(str::trim).unwrap_or("");
        let count = |c: Column| parse_count(text(c));

        let home_team = text(Column::HomeTeam);
        let away_team = text(Column::AwayTeam);
        if home_team.is_empty() || away_team.is_empty() { return None; }

        let half_time_result = match text(Column::HalfTimeResult) {
            "" => "D",
            htr => htr,
        };

        Some(Self {
            date: text(Column::Date).to_owned(),
            home_team: home_team.to_owned(),
            away_team: away_team.to_owned(),

            full_time: Score {
                home: count(Column::FullTimeHomeGoals),
                away: count(Column::FullTimeAwayGoals),
            },
            result: FullTimeResult::from_code(text(Column::FullTimeResult)),
            half_time: Score {
                home: count(Column::HalfTimeHomeGoals),
                away: count(Column::HalfTimeAwayGoals),
            },
            half_time_result: half_time_result.to_owned(),

            home: SideEvents {
                shots: count(Column::HomeShots),
                shots_on_target: count(Column::HomeShotsOnTarget),
                fouls: count(Column::HomeFouls),
                corners: count(Column::HomeCorners),
                yellow_cards: count(Column::HomeYellowCards),
                red_cards: count(Column::HomeRedCards),
            },
            away: SideEvents {
                shots: count(Column::AwayShots),
                shots_on_target: count(Column::AwayShotsOnTarget),
                fouls: count(Column::AwayFouls),
                corners: count(Column::AwayCorners),
                yellow_cards: count(Column::AwayYellowCards),
                red_cards: count(Column::AwayRedCards),
            },
        })
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn events(&self, side: Side) -> &SideEvents {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    // Which side the team played in this particular match
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team { return Some(Side::Home); }
        if self.away_team == team { return Some(Side::Away); }
        None
    }

    pub fn is_in_game(&self, team: &str) -> bool {
        self.side_of(team).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str = "Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,HTHG,HTAG,HTR,HS,AS,HST,AST,HF,AF,HC,AC,HY,AY,HR,AR";

    #[test]
    fn parses_every_catalog_column() {
        let text = format!("{FULL_HEADER}\n12/08/2023,Arsenal,Forest,2,1,H,2,0,H,15,6,7,2,12,9,8,3,2,1,0,1");
        let matches = parse_matches(&text);

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.date, "12/08/2023");
        assert_eq!(m.home_team, "Arsenal");
        assert_eq!(m.away_team, "Forest");
        assert_eq!(m.full_time, Score { home: 2, away: 1 });
        assert_eq!(m.result, FullTimeResult::HomeWin);
        assert_eq!(m.half_time, Score { home: 2, away: 0 });
        assert_eq!(m.half_time_result, "H");
        assert_eq!(m.home, SideEvents { shots: 15, shots_on_target: 7, fouls: 12, corners: 8, yellow_cards: 2, red_cards: 0 });
        assert_eq!(m.away, SideEvents { shots: 6, shots_on_target: 2, fouls: 9, corners: 3, yellow_cards: 1, red_cards: 1 });
    }

    #[test]
    fn fewer_than_two_lines_is_empty() {
        assert!(parse_matches("").is_empty());
        assert!(parse_matches(FULL_HEADER).is_empty());
        assert!(parse_matches("\n\n  \r\n").is_empty());
    }

    #[test]
    fn handles_crlf_and_blank_lines() {
        let text = "HomeTeam,AwayTeam,FTHG,FTAG,FTR\r\n\r\nAlpha,Beta,1,0,H\r\n   \r\nBeta,Alpha,3,3,D\r\n";
        let matches = parse_matches(text);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].full_time, Score { home: 3, away: 3 });
    }

    #[test]
    fn short_rows_are_skipped() {
        let text = "HomeTeam,AwayTeam,FTHG,FTAG,FTR\nAlpha,Beta,1\nGamma,Delta,0,2,A";
        let matches = parse_matches(text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].home_team, "Gamma");
    }

    #[test]
    fn missing_columns_default() {
        let matches = parse_matches("HomeTeam,AwayTeam\nAlpha,Beta");

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.date, "");
        assert_eq!(m.result, FullTimeResult::Draw);
        assert_eq!(m.half_time_result, "D");
        assert_eq!(m.full_time, Score::default());
        assert_eq!(m.home, SideEvents::default());
    }

    #[test]
    fn unknown_result_code_is_a_draw() {
        assert_eq!(FullTimeResult::from_code("X"), FullTimeResult::Draw);
        assert_eq!(FullTimeResult::from_code("h"), FullTimeResult::Draw);
        assert_eq!(FullTimeResult::from_code(""), FullTimeResult::Draw);
        assert_eq!(FullTimeResult::from_code(" A "), FullTimeResult::AwayWin);
    }

    #[test]
    fn count_parsing_is_lenient() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count("  12"), 12);
        assert_eq!(parse_count("3.5"), 3);
        assert_eq!(parse_count("12abc"), 12);
        assert_eq!(parse_count("+4"), 4);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-2"), 0);
        assert_eq!(parse_count("99999999999999"), 0);
    }

    #[test]
    fn duplicate_headers_use_first_occurrence() {
        let matches = parse_matches("HomeTeam,AwayTeam,FTHG,FTHG\nAlpha,Beta,4,9");
        assert_eq!(matches[0].full_time.home, 4);
    }

    #[test]
    fn header_names_are_case_sensitive_and_trimmed() {
        let matches = parse_matches(" HomeTeam , AwayTeam ,fthg\nAlpha,Beta,5");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].full_time.home, 0);
    }

    #[test]
    fn semicolon_only_detected_on_header() {
        // Comma header, so the semicolons in the row are just text
        let matches = parse_matches("HomeTeam,AwayTeam,FTHG\nAlpha;x,Beta,1");
        assert_eq!(matches[0].home_team, "Alpha;x");

        let matches = parse_matches("HomeTeam;AwayTeam;FTHG\nAlpha;Beta;1");
        assert_eq!(matches[0].home_team, "Alpha");
        assert_eq!(matches[0].full_time.home, 1);
    }

    #[test]
    fn record_sides() {
        let m = &parse_matches("HomeTeam,AwayTeam,HS,AS\nAlpha,Beta,10,4")[0];

        assert_eq!(m.side_of("Alpha"), Some(Side::Home));
        assert_eq!(m.side_of("Beta"), Some(Side::Away));
        assert_eq!(m.side_of("Gamma"), None);
        assert_eq!(m.events(Side::Away).shots, 4);
        assert_eq!(m.team(Side::Home.opponent()), "Beta");
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let matches = parse_matches("\u{feff}HomeTeam,AwayTeam,FTHG,FTAG,FTR\nAlpha,Beta,2,1,H\nBeta,Alpha,0,0,D");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].home_team, "Alpha");
        assert_eq!(matches[0].full_time, Score { home: 2, away: 1 });
    }

    #[test]
    fn bare_carriage_return_does_not_split_a_row() {
        let matches = parse_matches("HomeTeam,AwayTeam,FTHG,FTAG,FTR\nAlpha,Beta,2,1,H\rX,Y,1,1,D");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].home_team, "Alpha");
        assert_eq!(matches[0].away_team, "Beta");
        assert!(matches.iter().all(|m| m.home_team != "X"));
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let lines = numbered_lines("HomeTeam,AwayTeam\n\n  \nAlpha,Beta\r\n\r\nGamma,Delta");

        assert_eq!(lines, vec![(1, "HomeTeam,AwayTeam"), (4, "Alpha,Beta"), (6, "Gamma,Delta")]);
    }

    #[test]
    fn load_matches_reports_missing_file() {
        let result = load_matches("/definitely/not/here.csv");
        assert!(matches!(result, Err(StatsError::Io(_))));
    }
}
