#![deny(clippy::all, clippy::cargo)]
#![warn(clippy::nursery, clippy::pedantic)]
#![allow(clippy::cargo_common_metadata)]

use std::sync::Arc;

use aggregator::{StatsAggregator, StatsCache};
use clap::Parser;
use config::{AppConfig, FromEnv, StatsConfig};
use domain::links::{
    recruiting_message, steam_profile_url, whatsapp_url, WhatsAppTarget, DEFAULT_CONTACT_MESSAGE,
};
use domain::models::{ManualRankUpdate, PlayerId, TeamRoster};
use domain::repositories::{LiveRankRepository, PlayerStatsFileRepository, TeamRosterRepository};
use domain::types::{Clock, SystemClock};
use infra_http_repository_impl::HttpClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{apply_roster_edit, Cli, Command, RosterCommand};
use crate::sentry_config::SENTRY_CONFIG;

mod cli;
mod sentry_config;

fn stats_aggregator(
    stats_config: &StatsConfig,
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
) -> anyhow::Result<
    StatsAggregator<impl PlayerStatsFileRepository + Sync, impl LiveRankRepository + Sync>,
> {
    use infra_http_repository_impl::{config, FaceitRepository};

    let stats_source = stats_file_repository(client, clock)?;
    let live_source = FaceitRepository::try_new(client.clone(), config::Faceit::from_env()?)?;
    let cache = StatsCache::new(
        clock.clone(),
        chrono::Duration::from_std(stats_config.cache_ttl())?,
    );

    Ok(
        StatsAggregator::new(stats_source, live_source, cache, clock.clone())
            .with_fetch_timeout(stats_config.fetch_timeout()),
    )
}

fn stats_file_repository(
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
) -> anyhow::Result<impl PlayerStatsFileRepository + Sync> {
    use infra_http_repository_impl::{config, HttpStatsFileRepository};

    HttpStatsFileRepository::try_new(client.clone(), config::StatsFile::from_env()?, clock.clone())
}

fn roster_repository(
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
) -> anyhow::Result<Option<impl TeamRosterRepository + Sync>> {
    use infra_http_repository_impl::{config, HttpTeamRosterRepository};

    let config = config::Roster::from_env()?;
    if config.roster_url.is_none() {
        return Ok(None);
    }
    Ok(Some(HttpTeamRosterRepository::try_new(
        client.clone(),
        config,
        clock.clone(),
    )?))
}

async fn load_roster(repository: Option<&(impl TeamRosterRepository + Sync)>) -> TeamRoster {
    let Some(repository) = repository else {
        tracing::warn!("ROSTER_URL is not set, using an empty roster");
        return TeamRoster::fallback();
    };
    match repository.fetch_roster().await {
        Ok(roster) => roster,
        Err(error) => {
            tracing::warn!(%error, "could not fetch roster, using an empty one");
            TeamRoster::fallback()
        }
    }
}

fn log_roster(roster: &TeamRoster) {
    tracing::info!(
        members = roster.members.len(),
        open_positions = roster.open_positions.len(),
        max_members = roster.team_settings.max_members,
        "roster loaded"
    );
    for member in &roster.members {
        let profile = (!member.contact.steam.is_empty())
            .then(|| steam_profile_url(&member.contact.steam));
        let contact = (!member.contact.whatsapp.is_empty()).then(|| {
            whatsapp_url(
                &member.contact.whatsapp,
                DEFAULT_CONTACT_MESSAGE,
                WhatsAppTarget::Web,
            )
        });
        tracing::info!(
            member = %member.nickname,
            role = %member.role,
            profile = profile.as_deref().unwrap_or("-"),
            contact = contact.as_deref().unwrap_or("-"),
            "roster member"
        );
    }
    for position in &roster.open_positions {
        tracing::info!(
            position = %position.id,
            role = %position.role,
            message = %recruiting_message(&position.role),
            "open position"
        );
    }
}

async fn print_stats(
    stats_config: &StatsConfig,
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let player_ids = stats_config
        .player_ids
        .iter()
        .map(|id| PlayerId::from_string(id))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let aggregator = stats_aggregator(stats_config, client, clock)?;
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    for player_id in &player_ids {
        let record = aggregator
            .get_stats_with_cancellation(player_id, &cancel)
            .await;
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

/// Prints the updated stats file; committing it is left to the operator.
async fn update_ranks(
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
    player_id: &str,
    update: ManualRankUpdate,
) -> anyhow::Result<()> {
    let player_id = PlayerId::from_string(player_id)?;
    let mut stats_file = stats_file_repository(client, clock)?
        .fetch_stats_file()
        .await?;

    stats_file.apply_manual_update(&player_id, update, clock.now())?;
    tracing::info!(%player_id, "ranks updated, commit the printed stats file");
    println!("{}", stats_file.to_pretty_json()?);
    Ok(())
}

async fn edit_roster(
    client: &HttpClient,
    clock: &Arc<dyn Clock>,
    edit: RosterCommand,
) -> anyhow::Result<()> {
    let repository = roster_repository(client, clock)?;
    let mut roster = load_roster(repository.as_ref()).await;

    if apply_roster_edit(&mut roster, edit, clock.now())? {
        tracing::info!("roster edited, commit the printed roster document");
        println!("{}", roster.to_pretty_json()?);
    } else {
        log_roster(&roster);
    }
    Ok(())
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling pending lookups");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // setup sentry
    // only send sentry events when it's not running locally
    let _sentry_guard = match &SENTRY_CONFIG.sentry_dsn {
        Some(dsn) if !SENTRY_CONFIG.is_local() => {
            let guard = sentry::init((
                dsn.as_str(),
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    traces_sample_rate: 0.1,
                    environment: Some(SENTRY_CONFIG.environment_name.clone().into()),
                    ..Default::default()
                },
            ));
            sentry::configure_scope(|scope| scope.set_level(Some(sentry::Level::Warning)));
            Some(guard)
        }
        _ => None,
    };

    // initialize tracing
    // see https://github.com/tokio-rs/axum/blob/79a0a54bc9f0f585c974b5e6793541baff980662/examples/tracing-aka-logging/src/main.rs
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry::integrations::tracing::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let client = infra_http_repository_impl::build_client(config.stats_config.fetch_timeout())?;

    match cli.command.unwrap_or(Command::Stats) {
        Command::Stats => print_stats(&config.stats_config, &client, &clock).await?,
        Command::UpdateRanks {
            player_id,
            premier_rank,
            gc_rank,
        } => {
            let update = ManualRankUpdate {
                premier_rank,
                gc_rank,
            };
            update_ranks(&client, &clock, &player_id, update).await?;
        }
        Command::Roster { edit } => edit_roster(&client, &clock, edit).await?,
    }

    Ok(())
}
