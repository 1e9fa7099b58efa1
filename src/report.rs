use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::analysis_context::AnalysisContext;
use crate::data_loader::MatchRecord;
use crate::error::StatsError;
use crate::form::*;
use crate::team_stats::*;

// Everything shown for one pairing: the home side judged on its home games,
// the away side on its away games (by default, see AnalysisContext)
#[derive(Debug, Clone)]
pub struct Matchup {
    pub home: TeamStatistics,
    pub away: TeamStatistics,
    pub home_form: Vec<FormEntry>,
    pub away_form: Vec<FormEntry>,
}

impl Matchup {
    pub fn compute(records: &[MatchRecord], home_team: &str, away_team: &str, ctx: &AnalysisContext) -> Self {
        Self {
            home: compute_team_statistics(home_team, records, ctx.home_perspective),
            away: compute_team_statistics(away_team, records, ctx.away_perspective),
            home_form: recent_form(home_team, records, ctx.home_perspective, ctx.recent_form_window),
            away_form: recent_form(away_team, records, ctx.away_perspective, ctx.recent_form_window),
        }
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.home.team_name, self.away.team_name)
    }
}

// Metric name, home value, away value
pub fn comparison_rows(home: &TeamStatistics, away: &TeamStatistics) -> Vec<[String; 3]> {
    fn row<T: ToString>(metric: &str, home: T, away: T) -> [String; 3] {
        [metric.to_string(), home.to_string(), away.to_string()]
    }

    vec![
        row("Matches played", home.matches_played, away.matches_played),
        row("Points", home.points, away.points),
        row("Wins", home.wins, away.wins),
        row("Draws", home.draws, away.draws),
        row("Losses", home.losses, away.losses),
        row("Goals for (total)", home.goals_for, away.goals_for),
        row("Goals against (total)", home.goals_against, away.goals_against),
        row("Goals per match", format!("{:.2}", home.goals_for_per_match()), format!("{:.2}", away.goals_for_per_match())),
        row("Shots per match", home.avg_shots, away.avg_shots),
        row("Shots on target per match", home.avg_shots_on_target, away.avg_shots_on_target),
        row("Corners per match", home.avg_corners, away.avg_corners),
        row("Fouls per match", home.avg_fouls, away.avg_fouls),
        row("Yellow cards per match", home.avg_yellow_cards, away.avg_yellow_cards),
        row("Red cards per match", home.avg_red_cards, away.avg_red_cards),
        row("Clean sheets", home.clean_sheets, away.clean_sheets),
    ]
}

fn column_title(stats: &TeamStatistics) -> String {
    format!("{} ({})", stats.team_name, stats.perspective.label())
}

pub fn output_report(matchup: &Matchup) {
    println!("{0:26} | {1:>24} | {2:>24}", "Metric", column_title(&matchup.home), column_title(&matchup.away));
    println!("{}", "-".repeat(80));

    for [metric, home, away] in comparison_rows(&matchup.home, &matchup.away) {
        println!("{0:26} | {1:>24} | {2:>24}", metric, home, away);
    }

    println!();
    print_form(&matchup.home, &matchup.home_form);
    print_form(&matchup.away, &matchup.away_form);
}

fn print_form(stats: &TeamStatistics, form: &[FormEntry]) {
    if form.is_empty() { return; }

    println!("Last {} ({}) for {}: {}", form.len(), stats.perspective.label(), stats.team_name, form_string(form));
    for f in form {
        println!("  {0:>10} | {1:>20} {2:2} - {3:<2} {4:20} | {5}",
            f.date,
            f.home_team,
            f.score.home,
            f.score.away,
            f.away_team,
            f.outcome.letter(),
        );
    }
}

// Spreadsheet-friendly comparison table
pub fn write_comparison_sheet<W: Write>(writer: W, home: &TeamStatistics, away: &TeamStatistics) -> Result<(), StatsError> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["Metric".to_string(), column_title(home), column_title(away)])?;
    for row in comparison_rows(home, away) {
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn save_comparison_sheet<P: AsRef<Path>>(file_path: P, home: &TeamStatistics, away: &TeamStatistics) -> Result<(), StatsError> {
    write_comparison_sheet(File::create(file_path)?, home, away)
}

const SHEET_COLUMN_WIDTH: f64 = 25.0;

// Single "Comparison" worksheet. Numeric cells are written as numbers
pub fn comparison_workbook(home: &TeamStatistics, away: &TeamStatistics) -> Result<Workbook, StatsError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Comparison")?;
    for col in 0..3 {
        sheet.set_column_width(col, SHEET_COLUMN_WIDTH)?;
    }

    sheet.write_string_with_format(0, 0, "Metric", &bold)?;
    sheet.write_string_with_format(0, 1, column_title(home), &bold)?;
    sheet.write_string_with_format(0, 2, column_title(away), &bold)?;

    for (idx, row) in comparison_rows(home, away).iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &row[0])?;

        for col in 1..3 {
            match row[col].parse::<f64>() {
                Ok(n) => sheet.write_number(r, col as u16, n)?,
                Err(_) => sheet.write_string(r, col as u16, &row[col])?,
            };
        }
    }

    Ok(workbook)
}

pub fn comparison_xlsx(home: &TeamStatistics, away: &TeamStatistics) -> Result<Vec<u8>, StatsError> {
    Ok(comparison_workbook(home, away)?.save_to_buffer()?)
}

pub fn save_comparison_xlsx<P: AsRef<Path>>(file_path: P, home: &TeamStatistics, away: &TeamStatistics) -> Result<(), StatsError> {
    comparison_workbook(home, away)?.save(file_path.as_ref())?;
    Ok(())
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> StatsError {
    StatsError::Pdf(format!("{e:?}"))
}

// One A4 page: title, pairing, timestamp, then the comparison table
pub fn matchup_pdf(home: &TeamStatistics, away: &TeamStatistics, generated_at: DateTime<Utc>) -> Result<Vec<u8>, StatsError> {
    const COLUMNS_X: [f32; 3] = [14.0, 90.0, 150.0];
    const ROW_HEIGHT: f32 = 8.0;

    let (doc, page, layer) = PdfDocument::new("Match Analysis Report", Mm(210.0), Mm(297.0), "Report");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
    let canvas = doc.get_page(page).get_layer(layer);

    canvas.use_text("Match Analysis Report", 18.0, Mm(14.0), Mm(275.0), &bold);
    canvas.use_text(format!("{} vs {}", column_title(home), column_title(away)), 14.0, Mm(14.0), Mm(265.0), &regular);
    canvas.use_text(format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC")), 10.0, Mm(14.0), Mm(257.0), &regular);

    let mut y = 245.0;
    let header = ["Metric".to_string(), home.team_name.clone(), away.team_name.clone()];
    for (text, x) in header.iter().zip(COLUMNS_X) {
        canvas.use_text(text.as_str(), 11.0, Mm(x), Mm(y), &bold);
    }

    for row in comparison_rows(home, away) {
        y -= ROW_HEIGHT;
        for (text, x) in row.iter().zip(COLUMNS_X) {
            canvas.use_text(text.as_str(), 10.0, Mm(x), Mm(y), &regular);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

pub fn save_matchup_pdf<P: AsRef<Path>>(file_path: P, home: &TeamStatistics, away: &TeamStatistics) -> Result<(), StatsError> {
    let bytes = matchup_pdf(home, away, Utc::now())?;
    let mut file = File::create(file_path)?;
    file.write_all(&bytes)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchupExport<'a> {
    generated_at: String,
    matchup: String,
    home_stats: &'a TeamStatistics,
    away_stats: &'a TeamStatistics,
}

pub fn matchup_json(home: &TeamStatistics, away: &TeamStatistics, generated_at: DateTime<Utc>) -> Result<String, StatsError> {
    let export = MatchupExport {
        generated_at: generated_at.to_rfc3339(),
        matchup: format!("{} vs {}", home.team_name, away.team_name),
        home_stats: home,
        away_stats: away,
    };

    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn save_matchup_json<P: AsRef<Path>>(file_path: P, home: &TeamStatistics, away: &TeamStatistics) -> Result<(), StatsError> {
    let json = matchup_json(home, away, Utc::now())?;
    let mut file = File::create(file_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

// Default file name (without extension) for exports of this pairing
pub fn export_file_stem(home: &TeamStatistics, away: &TeamStatistics) -> String {
    format!("analysis_{}_vs_{}", home.team_name, away.team_name)
        .replace(|c: char| c.is_whitespace() || c == '/' || c == '\\', "_")
}

// A directory target gets the default file name for the pairing, anything else is used as given
pub fn export_path(target: &Path, home: &TeamStatistics, away: &TeamStatistics, extension: &str) -> PathBuf {
    if target.is_dir() {
        target.join(format!("{}.{extension}", export_file_stem(home, away)))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::data_loader::parse_matches;

    const DATA: &str = "\
Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,HC,AC
1,Alpha,Beta,2,1,H,5,3
2,Beta,Alpha,0,0,D,4,6
3,Beta,Gamma,1,2,A,2,2";

    fn matchup() -> Matchup {
        Matchup::compute(&parse_matches(DATA), "Alpha", "Beta", &AnalysisContext::default())
    }

    #[test]
    fn matchup_uses_configured_perspectives() {
        let m = matchup();

        assert_eq!(m.home.perspective, Perspective::Home);
        assert_eq!(m.home.matches_played, 1);
        assert_eq!(m.away.perspective, Perspective::Away);
        assert_eq!(m.away.matches_played, 1);
        assert_eq!(m.away.losses, 1);
        assert_eq!(form_string(&m.home_form), "W");
        assert_eq!(m.title(), "Alpha vs Beta");
    }

    #[test]
    fn sheet_has_header_and_metrics() {
        let m = matchup();
        let mut out = Vec::new();
        write_comparison_sheet(&mut out, &m.home, &m.away).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Metric,Alpha (Home),Beta (Away)");
        assert_eq!(lines[1], "Matches played,1,1");
        assert!(lines.contains(&"Goals per match,2.00,1.00"));
        assert!(lines.contains(&"Corners per match,5,3"));
        assert_eq!(lines.len(), 1 + comparison_rows(&m.home, &m.away).len());
    }

    #[test]
    fn sheet_with_no_matches_has_zero_rates() {
        let home = TeamStatistics::new("Alpha", Perspective::Home);
        let away = TeamStatistics::new("Beta", Perspective::Away);
        let rows = comparison_rows(&home, &away);

        let goals = rows.iter().find(|r| r[0] == "Goals per match").unwrap();
        assert_eq!(goals[1], "0.00");
    }

    #[test]
    fn json_export_shape() {
        let m = matchup();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = matchup_json(&m.home, &m.away, at).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matchup"], "Alpha vs Beta");
        assert_eq!(value["generatedAt"], "2024-03-01T12:00:00+00:00");
        assert_eq!(value["homeStats"]["teamName"], "Alpha");
        assert_eq!(value["homeStats"]["perspective"], "HOME");
        assert_eq!(value["homeStats"]["goalsFor"], 2);
        assert_eq!(value["awayStats"]["avgCorners"], 3.0);
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let m = matchup();
        let bytes = comparison_xlsx(&m.home, &m.away).unwrap();

        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn pdf_report_is_a_pdf() {
        let m = matchup();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let bytes = matchup_pdf(&m.home, &m.away, at).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn binary_exports_survive_zero_matches() {
        let home = TeamStatistics::new("Alpha", Perspective::Home);
        let away = TeamStatistics::new("Beta", Perspective::Away);
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert!(comparison_xlsx(&home, &away).is_ok());
        assert!(matchup_pdf(&home, &away, at).is_ok());
    }

    #[test]
    fn directory_target_gets_default_name() {
        let home = TeamStatistics::new("Man United", Perspective::Home);
        let away = TeamStatistics::new("Wolves", Perspective::Away);
        let dir = std::env::temp_dir();

        assert_eq!(export_path(&dir, &home, &away, "json"), dir.join("analysis_Man_United_vs_Wolves.json"));

        let file = dir.join("not_a_directory_7f3a.xlsx");
        assert_eq!(export_path(&file, &home, &away, "xlsx"), file);
    }

    #[test]
    fn file_stem_is_path_safe() {
        let home = TeamStatistics::new("Man United", Perspective::Home);
        let away = TeamStatistics::new("Forest/Notts", Perspective::Away);

        assert_eq!(export_file_stem(&home, &away), "analysis_Man_United_vs_Forest_Notts");
    }
}
