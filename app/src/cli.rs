use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use domain::models::{generate_member_id, OpenPosition, TeamMember, TeamRoster};

#[derive(Parser, Debug)]
#[command(name = "seulobato-stats", about = "Stats and roster data of the SeuLobato site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the aggregated stats of every configured player, one JSON line each. (default)
    Stats,
    /// Record Premier and GamersClub ranks by hand and print the stats file to commit.
    UpdateRanks {
        player_id: String,
        #[arg(long)]
        premier_rank: String,
        #[arg(long)]
        gc_rank: Option<String>,
    },
    /// Show or edit the team roster. Edits print the roster document to commit.
    Roster {
        #[command(subcommand)]
        edit: RosterCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    /// Log every member with profile and contact links, and every open position.
    Show,
    /// Add a member, or change the one with the given id.
    UpsertMember {
        /// Generated from the nickname when absent.
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        nickname: String,
        #[arg(long)]
        role: Option<String>,
        /// SteamID64.
        #[arg(long)]
        steam: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
    },
    RemoveMember { id: String },
    /// Add an open position, or replace the one with the given id.
    OpenPosition {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "requirement")]
        requirements: Vec<String>,
        #[arg(long, default_value_t = 1)]
        priority: u32,
    },
    ClosePosition { id: String },
}

/// Applies one edit to `roster`. Returns `false` for [`RosterCommand::Show`], which edits nothing.
pub fn apply_roster_edit(
    roster: &mut TeamRoster,
    edit: RosterCommand,
    now: DateTime<Utc>,
) -> anyhow::Result<bool> {
    match edit {
        RosterCommand::Show => return Ok(false),
        RosterCommand::UpsertMember {
            id,
            nickname,
            role,
            steam,
            whatsapp,
        } => {
            let id = id.unwrap_or_else(|| generate_member_id(&nickname, now));
            let mut member = roster.member(&id).cloned().unwrap_or_else(|| TeamMember {
                id,
                status: "active".to_owned(),
                ..TeamMember::default()
            });
            member.nickname = nickname;
            if let Some(role) = role {
                member.role = role;
            }
            if let Some(steam) = steam {
                member.contact.steam = steam;
            }
            if let Some(whatsapp) = whatsapp {
                member.contact.whatsapp = whatsapp;
            }
            roster.upsert_member(member, now);
        }
        RosterCommand::RemoveMember { id } => {
            anyhow::ensure!(roster.remove_member(&id, now), "no member with id {id}");
        }
        RosterCommand::OpenPosition {
            id,
            role,
            description,
            requirements,
            priority,
        } => {
            let id = id.unwrap_or_else(|| generate_member_id(&role, now));
            roster.upsert_position(
                OpenPosition {
                    id,
                    role,
                    description,
                    requirements,
                    priority,
                    status: "open".to_owned(),
                    ..OpenPosition::default()
                },
                now,
            );
        }
        RosterCommand::ClosePosition { id } => {
            anyhow::ensure!(roster.remove_position(&id, now), "no open position with id {id}");
        }
    }
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-02-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn roster_command(args: &[&str]) -> RosterCommand {
        let cli = Cli::try_parse_from(
            ["seulobato-stats", "roster"]
                .into_iter()
                .chain(args.iter().copied()),
        )
        .unwrap();
        match cli.command {
            Some(Command::Roster { edit }) => edit,
            other => panic!("expected a roster command, got {other:?}"),
        }
    }

    #[test]
    fn stats_is_the_default_command() {
        assert!(Cli::try_parse_from(["seulobato-stats"])
            .unwrap()
            .command
            .is_none());
    }

    #[test]
    fn update_ranks_requires_premier_rank() {
        assert!(Cli::try_parse_from(["seulobato-stats", "update-ranks", "lobato"]).is_err());

        let cli = Cli::try_parse_from([
            "seulobato-stats",
            "update-ranks",
            "lobato",
            "--premier-rank",
            "18.000",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::UpdateRanks { gc_rank: None, .. })
        ));
    }

    #[test]
    fn new_member_gets_generated_id() {
        let mut roster = TeamRoster::fallback();
        let edit = roster_command(&["upsert-member", "--nickname", "Seu Lobato", "--role", "AWP"]);

        assert!(apply_roster_edit(&mut roster, edit, now()).unwrap());

        let id = generate_member_id("Seu Lobato", now());
        let member = roster.member(&id).unwrap();
        assert_eq!(member.role, "AWP");
        assert_eq!(member.status, "active");
        assert_eq!(roster.team_settings.current_members, 1);
    }

    #[test]
    fn editing_member_keeps_unchanged_fields() {
        let mut roster = TeamRoster::fallback();
        let add = roster_command(&[
            "upsert-member",
            "--id",
            "lobato",
            "--nickname",
            "Lobato",
            "--role",
            "IGL",
            "--whatsapp",
            "5515981229370",
        ]);
        apply_roster_edit(&mut roster, add, now()).unwrap();

        let rename = roster_command(&["upsert-member", "--id", "lobato", "--nickname", "SeuLobato"]);
        apply_roster_edit(&mut roster, rename, now()).unwrap();

        let member = roster.member("lobato").unwrap();
        assert_eq!(member.nickname, "SeuLobato");
        assert_eq!(member.role, "IGL");
        assert_eq!(member.contact.whatsapp, "5515981229370");
        assert_eq!(roster.members.len(), 1);
    }

    #[test]
    fn positions_open_and_close() {
        let mut roster = TeamRoster::fallback();
        let open = roster_command(&[
            "open-position",
            "--id",
            "entry",
            "--role",
            "Entry Fragger",
            "--requirement",
            "Premier 15k+",
            "--requirement",
            "Microfone",
        ]);
        apply_roster_edit(&mut roster, open, now()).unwrap();

        let position = roster.position("entry").unwrap();
        assert_eq!(position.requirements, ["Premier 15k+", "Microfone"]);
        assert_eq!(position.status, "open");

        let close = roster_command(&["close-position", "entry"]);
        apply_roster_edit(&mut roster, close, now()).unwrap();
        assert!(roster.open_positions.is_empty());

        let close_again = roster_command(&["close-position", "entry"]);
        assert!(apply_roster_edit(&mut roster, close_again, now()).is_err());
    }

    #[test]
    fn show_edits_nothing() {
        let mut roster = TeamRoster::fallback();

        assert!(!apply_roster_edit(&mut roster, RosterCommand::Show, now()).unwrap());
        assert_eq!(roster, TeamRoster::fallback());
    }
}
