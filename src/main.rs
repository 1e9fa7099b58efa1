use clap::Parser;
use color_eyre::eyre::eyre;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use matchup_stats::*;
use matchup_stats::report::*;

#[derive(Parser)]
#[command(name = "matchup_stats")]
#[command(about = "Compare two football teams from a CSV of past matches", long_about = None)]
struct Cli {
    /// Match CSV (comma or semicolon separated)
    csv: PathBuf,

    /// Home side, judged on its home matches
    #[arg(long)]
    home: Option<String>,

    /// Away side, judged on its away matches
    #[arg(long)]
    away: Option<String>,

    /// Number of recent matches to show per team
    #[arg(long)]
    form: Option<usize>,

    /// Write the comparison as JSON (file or directory)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the comparison as a spreadsheet-friendly CSV (file or directory)
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Write the comparison as an Excel workbook (file or directory)
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Write the comparison as a PDF report (file or directory)
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// JSON file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every team in the file and exit
    #[arg(long, default_value = "false")]
    list_teams: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("info")
    ).init();

    let cli = Cli::parse();

    let mut ctx = match &cli.config {
        Some(path) => AnalysisContext::from_json_file(path)?,
        None => AnalysisContext::default(),
    };
    if let Some(window) = cli.form {
        ctx.recent_form_window = window;
    }

    let matches = load_matches(&cli.csv)?;
    if matches.is_empty() {
        return Err(StatsError::NoMatches { path: cli.csv.display().to_string() }.into());
    }

    let teams = unique_teams(&matches);
    info!("{} matches, {} teams loaded from {}", matches.len(), teams.len(), cli.csv.display());

    if cli.list_teams {
        for t in &teams {
            println!("{t}");
        }
        return Ok(());
    }

    let (Some(home_team), Some(away_team)) = (&cli.home, &cli.away) else {
        return Err(eyre!("pass both --home and --away, or --list-teams to see the options"));
    };

    for team in [home_team, away_team] {
        if !teams.contains(team) {
            return Err(StatsError::UnknownTeam { team: team.clone() }.into());
        }
    }

    let matchup = Matchup::compute(&matches, home_team, away_team, &ctx);
    output_report(&matchup);

    // No prediction service is wired in, so this is always the local estimate
    let prediction = predict_matchup(None, &matchup.home, &matchup.away, ctx.fallback_confidence);
    println!();
    println!("Predicted winner: {} ({}% confidence)", prediction.winner, prediction.confidence_score);
    println!("{}", prediction.reasoning);

    let (home, away) = (&matchup.home, &matchup.away);

    if let Some(target) = &cli.json {
        let path = export_path(target, home, away, "json");
        save_matchup_json(&path, home, away)?;
        info!("Wrote {}", path.display());
    }

    if let Some(target) = &cli.sheet {
        let path = export_path(target, home, away, "csv");
        save_comparison_sheet(&path, home, away)?;
        info!("Wrote {}", path.display());
    }

    if let Some(target) = &cli.xlsx {
        let path = export_path(target, home, away, "xlsx");
        save_comparison_xlsx(&path, home, away)?;
        info!("Wrote {}", path.display());
    }

    if let Some(target) = &cli.pdf {
        let path = export_path(target, home, away, "pdf");
        save_matchup_pdf(&path, home, away)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
