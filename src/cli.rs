// src/cli.rs
//
// Command-line front end: one subcommand per page. Tables go to
// `<out>/<subdir>/<stem>.<csv|tsv>` or, with `--stdout`, to standard output.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::{Domain, ExportFormat, ExportOptions, Region, ScrapeOptions};
use crate::core::net::HttpFetcher;
use crate::csv::write_dataset;
use crate::data::DataSet;
use crate::file::{self, ensure_directory, Target};
use crate::progress::{LogProgress, Progress};
use crate::specs::{self, player_stats::Span, Club, Player};

/// Scrape football statistics tables from transfermarkt.
#[derive(Parser, Debug)]
#[command(name = "tm_scrape", version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Site to read: de, com or co.uk
    #[arg(long, default_value = "de", global = true)]
    pub domain: Domain,

    /// Output directory
    #[arg(short, long, default_value = ".", global = true)]
    pub out: PathBuf,

    /// Output format: csv or tsv
    #[arg(long, default_value = "csv", global = true)]
    pub format: ExportFormat,

    /// Leave out the header line
    #[arg(long, global = true)]
    pub no_headers: bool,

    /// Print the table instead of writing a file
    #[arg(long, global = true)]
    pub stdout: bool,

    /// Base pause between requests of multi-page scrapes, in milliseconds
    #[arg(long, default_value_t = crate::config::consts::REQUEST_PAUSE_MS, global = true)]
    pub delay_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ClubArgs {
    /// Club URL name, e.g. borussia-dortmund
    #[arg(long)]
    pub club: String,
    /// Club id, e.g. 16
    #[arg(long)]
    pub id: u32,
}

impl ClubArgs {
    fn club(&self) -> Club { Club::new(&self.club, self.id) }
}

#[derive(Args, Debug, Clone)]
pub struct PlayerArgs {
    /// Player id, e.g. 28003
    #[arg(long)]
    pub player: u32,
    /// Player URL name, e.g. lionel-messi
    #[arg(long)]
    pub slug: Option<String>,
}

impl PlayerArgs {
    fn player(&self) -> Player {
        let p = Player::new(self.player);
        match &self.slug {
            Some(s) => p.with_slug(s),
            None => p,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// All competitions of a region
    Competitions {
        #[arg(long, default_value = "europa")]
        region: Region,
    },
    /// Clubs of a league
    Clubs {
        /// League code, e.g. GB1
        #[arg(long)]
        league: String,
        /// League URL name, e.g. premier-league
        #[arg(long)]
        league_name: Option<String>,
        #[arg(long)]
        season: Option<u16>,
    },
    /// Club colours
    Colors(ClubArgs),
    /// Club crest as PNG
    Emblem {
        #[arg(long)]
        id: u32,
    },
    /// Historic league placements; per gameweek with --gameweeks
    Placements {
        #[command(flatten)]
        club: ClubArgs,
        #[arg(long)]
        gameweeks: bool,
        #[arg(long, default_value_t = crate::config::consts::MAX_GAMEWEEKS)]
        max_gameweeks: u32,
    },
    /// Squad roster of one season
    Roster {
        #[command(flatten)]
        club: ClubArgs,
        #[arg(long)]
        season: u16,
    },
    /// Squad performance of one season
    Performance {
        #[command(flatten)]
        club: ClubArgs,
        #[arg(long)]
        season: u16,
        /// Only this competition, e.g. L1
        #[arg(long)]
        league: Option<String>,
    },
    /// Roster and performance of one season
    ClubData {
        #[command(flatten)]
        club: ClubArgs,
        #[arg(long)]
        season: u16,
        #[arg(long)]
        league: Option<String>,
    },
    /// Market value history of a player
    MarketValue(PlayerArgs),
    /// Transfer history of a player
    Transfers(PlayerArgs),
    /// Injury history of a player
    Injuries(PlayerArgs),
    /// League table; after one gameweek with --gameweek
    Table {
        #[arg(long)]
        league: String,
        #[arg(long)]
        season: u16,
        #[arg(long)]
        gameweek: Option<u32>,
    },
    /// All league games from a schedule URL
    LeagueGames {
        #[arg(long)]
        url: String,
        #[arg(long)]
        year: Option<u16>,
    },
    /// All cup games from a cup URL
    CupGames {
        #[arg(long)]
        url: String,
        #[arg(long)]
        year: Option<u16>,
    },
    /// Current season schedule of a club
    Schedule {
        #[arg(long)]
        team: u32,
    },
    /// Detailed performance of a player
    PlayerPerformance(PlayerArgs),
    /// Games per position of a player
    Positions {
        #[command(flatten)]
        player: PlayerArgs,
        #[arg(long, default_value = "curr")]
        span: Span,
        #[arg(long)]
        detailed: bool,
    },
    /// National team appearances of a player
    NationalTeam(PlayerArgs),
}

impl Cli {
    fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            domain: self.domain,
            delay: Duration::from_millis(self.delay_ms),
            ..ScrapeOptions::default()
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.format,
            out_dir: self.out.clone(),
            include_headers: !self.no_headers,
        }
    }

    fn emit(&self, ds: &DataSet, target: Target) -> Result<()> {
        let export = self.export_options();
        if self.stdout {
            let stdout = io::stdout();
            write_dataset(stdout.lock(), ds, export.include_headers, export.format.delim())?;
        } else {
            let path = file::save_dataset(ds, &export, &target)?;
            println!("{}", path.display());
        }
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.quiet);

    let fetcher = HttpFetcher::new().wrap_err("could not build HTTP client")?;
    let opts = cli.scrape_options();
    let domain = cli.domain;
    let mut progress = LogProgress::default();
    let progress: Option<&mut dyn Progress> = Some(&mut progress);

    match &cli.command {
        Command::Competitions { region } => {
            let ds = specs::competitions::fetch(&fetcher, &opts, *region, progress)?;
            cli.emit(&ds, Target::new("", &format!("competitions_{region}")))?;
        }
        Command::Clubs { league, league_name, season } => {
            let ds = specs::clubs::fetch_league_clubs(&fetcher, domain, league, league_name.as_deref(), *season)?;
            cli.emit(&ds, Target::new("", &format!("clubs_{league}")))?;
        }
        Command::Colors(c) => {
            for color in specs::clubs::fetch_colors(&fetcher, domain, &c.club())? {
                println!("{color}");
            }
        }
        Command::Emblem { id } => {
            let bytes = specs::clubs::fetch_emblem(&fetcher, *id)?;
            ensure_directory(&cli.out)?;
            let path = cli.out.join(format!("{id}.png"));
            std::fs::write(&path, bytes).wrap_err_with(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
        Command::Placements { club, gameweeks, max_gameweeks } => {
            let c = club.club();
            if *gameweeks {
                let opts = ScrapeOptions { max_gameweeks: *max_gameweeks, ..opts.clone() };
                let ds = specs::placements::fetch_gameweek_placements(&fetcher, &opts, &c, progress)?;
                cli.emit(&ds, Target::gameweek_placements(&c.slug))?;
            } else {
                let ds = specs::placements::fetch_league_placements(&fetcher, domain, &c)?;
                cli.emit(&ds, Target::league_placements(&c.slug))?;
            }
        }
        Command::Roster { club, season } => {
            let c = club.club();
            let ds = specs::squad::fetch_roster(&fetcher, domain, &c, *season)?;
            cli.emit(&ds, Target::roster(&c.slug, *season))?;
        }
        Command::Performance { club, season, league } => {
            let c = club.club();
            let ds = specs::squad::fetch_performance(&fetcher, domain, &c, *season, league.as_deref())?;
            cli.emit(&ds, Target::performance(&c.slug, *season))?;
        }
        Command::ClubData { club, season, league } => {
            let c = club.club();
            let (roster, perf) = specs::squad::fetch_club_data(&fetcher, domain, &c, *season, league.as_deref())?;
            cli.emit(&roster, Target::roster(&c.slug, *season))?;
            cli.emit(&perf, Target::performance(&c.slug, *season))?;
        }
        Command::MarketValue(p) => {
            let ds = specs::market_value::fetch_history(&fetcher, domain, &p.player())?;
            cli.emit(&ds, Target::new("", &format!("market_value_{}", p.player)))?;
        }
        Command::Transfers(p) => {
            let ds = specs::transfers::fetch_history(&fetcher, domain, &p.player())?;
            cli.emit(&ds, Target::new("", &format!("transfers_{}", p.player)))?;
        }
        Command::Injuries(p) => {
            let ds = specs::injuries::fetch_history(&fetcher, domain, &p.player())?;
            cli.emit(&ds, Target::new("", &format!("injuries_{}", p.player)))?;
        }
        Command::Table { league, season, gameweek } => {
            let (ds, stem) = match gameweek {
                Some(gw) => (
                    specs::league_table::fetch_gameweek_table(&fetcher, domain, league, *season, *gw)?,
                    format!("table_{league}_{season}_{gw}"),
                ),
                None => (
                    specs::league_table::fetch_table(&fetcher, domain, league, *season)?,
                    format!("table_{league}_{season}"),
                ),
            };
            cli.emit(&ds, Target::new("", &stem))?;
        }
        Command::LeagueGames { url, year } => {
            let ds = specs::fixtures::fetch_league_games(&fetcher, url, *year)?;
            cli.emit(&ds, Target::new("", "league_games"))?;
        }
        Command::CupGames { url, year } => {
            let ds = specs::fixtures::fetch_cup_games(&fetcher, url, *year)?;
            cli.emit(&ds, Target::new("", "cup_games"))?;
        }
        Command::Schedule { team } => {
            let ds = specs::fixtures::fetch_team_schedule(&fetcher, domain, *team)?;
            cli.emit(&ds, Target::new("", &format!("schedule_{team}")))?;
        }
        Command::PlayerPerformance(p) => {
            let ds = specs::player_stats::fetch_performance(&fetcher, domain, &p.player())?;
            cli.emit(&ds, Target::new("", &format!("performance_{}", p.player)))?;
        }
        Command::Positions { player, span, detailed } => {
            let ds = specs::player_stats::fetch_games_by_position(
                &fetcher, &opts, &player.player(), *span, *detailed, progress,
            )?;
            cli.emit(&ds, Target::new("", &format!("positions_{}", player.player)))?;
        }
        Command::NationalTeam(p) => {
            let ds = specs::national_team::fetch_history(&fetcher, &opts, &p.player(), progress)?;
            cli.emit(&ds, Target::new("", &format!("national_team_{}", p.player)))?;
        }
    }

    // piped output
    io::stdout().flush()?;
    Ok(())
}
