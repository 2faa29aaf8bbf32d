//! `netmgr` command-line entry point.

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use netmgr::{
    checkin::{
        classifier::classify_with_scope,
        source::{read_tokens, CheckinSource},
    },
    config::Config,
    engine::{sorted::sorted_members, tally::TallyReporter, traits::fold},
    notify::{policy::Dispatcher, spool::SpoolNotifier},
    roster::Roster,
    runtime::pipeline::{spawn_file_pipeline, PipelineConfig},
    timesheet::net_time_sheet,
    types::{next_month_start, MonthPrefix},
};

/// Net check-in counting, time-sheets and duty announcements.
#[derive(Parser, Debug)]
#[command(name = "netmgr")]
#[command(version)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["count", "sort", "time_sheet", "send_emails", "send_hospital_signups", "send_net_signups"])
))]
struct Args {
    /// Count check-ins per section and in total
    #[arg(long)]
    count: bool,

    /// Print confirmed members sorted by callsign
    #[arg(long)]
    sort: bool,

    /// Calculate the time sheet for --month-prefix
    #[arg(long)]
    time_sheet: bool,

    /// Send whatever announcements are due today
    #[arg(long)]
    send_emails: bool,

    /// Send the hospital net signup announcement for --month-prefix
    #[arg(long)]
    send_hospital_signups: bool,

    /// Send the net-control signup call for next month
    #[arg(long)]
    send_net_signups: bool,

    /// Month prefix, `YYYY` or `YYYY-MM`
    #[arg(long, default_value = "")]
    month_prefix: String,

    /// Net log to count or sort
    #[arg(long, default_value = "net_log.txt")]
    net_log: PathBuf,

    /// Directory of logs for --time-sheet
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, alias = "debug-level", default_value = "info", env = "NETMGR_LOG_LEVEL")]
    log_level: String,

    /// Config file; defaults to ~/.net-manager/net-manager.conf
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run --count through the concurrent reader/classifier pipeline
    #[arg(long)]
    pipelined: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level: tracing::Level = args
        .log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("failed to parse log level: {}", args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .from_env_lossy(),
        )
        .init();

    let month_prefix = if args.time_sheet || args.send_hospital_signups {
        Some(MonthPrefix::parse(&args.month_prefix)?)
    } else {
        None
    };

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::discover()?,
    };
    let roster_path = config.resolve(&config.roster_file);
    let roster = Roster::load(&roster_path)
        .with_context(|| format!("failed to read call signs from {}", roster_path.display()))?;
    let scope = config.duplicate_scope;

    if args.count {
        info!(log = %args.net_log.display(), pipelined = args.pipelined, "counting check-ins");
        let report = if args.pipelined {
            let pipeline_config = PipelineConfig {
                scope,
                ..PipelineConfig::default()
            };
            spawn_file_pipeline(Arc::new(roster), &args.net_log, pipeline_config)?
                .fold(TallyReporter::default())
                .await?
        } else {
            let mut source = CheckinSource::open(&args.net_log)?;
            let report = fold(
                TallyReporter::default(),
                classify_with_scope(&roster, source.by_ref(), scope),
            );
            source.finish()?;
            report
        };
        print!("{}", report.text);
    } else if args.sort {
        let tokens = read_tokens(&args.net_log)
            .with_context(|| format!("failed to read net log {}", args.net_log.display()))?;
        for callsign in sorted_members(&roster, &tokens) {
            println!("{callsign}");
        }
    } else if args.time_sheet {
        let Some(prefix) = month_prefix else {
            bail!("month prefix is required");
        };
        let sheet = net_time_sheet(&roster, &args.log_dir, &prefix, scope)?;
        print!("{}", sheet.render());
        println!("Hours: {}", sheet.total_hours);
    } else {
        let outbox = config.resolve(&config.outbox_directory);
        let mut notifier = SpoolNotifier::open(&outbox)?;
        let mut dispatcher = Dispatcher::new(&config, &roster, &mut notifier);
        let today = Local::now().date_naive();

        if args.send_emails {
            info!(%today, "checking if emails should be sent");
            let summary = dispatcher.dispatch(today)?;
            if !summary.failed.is_empty() {
                for (action, err) in &summary.failed {
                    eprintln!("{action:?} failed: {err}");
                }
                bail!("{} announcement(s) failed", summary.failed.len());
            }
        } else if args.send_hospital_signups {
            let Some(prefix) = month_prefix else {
                bail!("month prefix is required");
            };
            dispatcher.send_hospital_announcement(&prefix)?;
        } else if args.send_net_signups {
            let net_control = dispatcher.load_netcontrol()?;
            let cities = dispatcher.load_cities()?;
            let schedule = dispatcher.call_for_signups(next_month_start(today), &net_control, &cities)?;
            print!("{}", schedule.render_table());
            println!("Month full: {}", schedule.complete);
        }
    }

    Ok(())
}
