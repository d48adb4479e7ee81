use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::statistics::render_timestamp;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberStats {
    pub availability: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberContact {
    /// SteamID64 of the member's profile.
    pub steam: String,
    pub whatsapp: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub id: String,
    pub nickname: String,
    pub real_name: String,
    pub role: String,
    pub role_description: String,
    pub description: String,
    pub image: String,
    pub stats: MemberStats,
    pub contact: MemberContact,
    pub status: String,
    pub join_date: String,
    pub last_update: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenPosition {
    pub id: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub priority: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSettings {
    pub max_members: u32,
    pub current_members: u32,
    pub recruitment_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            max_members: 5,
            current_members: 0,
            recruitment_active: true,
            last_update: None,
        }
    }
}

/// The team-roster document (`team-members.json`).
///
/// Edits happen in memory only. Saving means serializing with
/// [`TeamRoster::to_pretty_json`] and committing the text by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamRoster {
    pub members: Vec<TeamMember>,
    pub open_positions: Vec<OpenPosition>,
    pub team_settings: TeamSettings,
}

/// Derives a member id from a nickname, e.g. `"Seu Lobato!"` -> `"seu-lobato--1735732800000"`.
///
/// Ids published by the site replace every UTF-16 code unit outside `[a-z0-9]`, so a
/// character outside the basic multilingual plane becomes two dashes.
pub fn generate_member_id(nickname: &str, now: DateTime<Utc>) -> String {
    let slug: String = nickname
        .to_lowercase()
        .chars()
        .flat_map(|c| {
            let kept = c.is_ascii_lowercase() || c.is_ascii_digit();
            let (c, units) = if kept { (c, 1) } else { ('-', c.len_utf16()) };
            std::iter::repeat(c).take(units)
        })
        .collect();
    format!("{slug}-{}", now.timestamp_millis())
}

impl TeamRoster {
    /// Roster used when the roster document cannot be fetched.
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn from_json_str(str: &str) -> serde_json::Result<Self> {
        serde_json::from_str(str)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn position(&self, id: &str) -> Option<&OpenPosition> {
        self.open_positions.iter().find(|position| position.id == id)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.team_settings.current_members =
            u32::try_from(self.members.len()).unwrap_or(u32::MAX);
        self.team_settings.last_update = Some(render_timestamp(now));
    }

    /// Replaces the member with the same id (keeping its join date) or appends a new one.
    pub fn upsert_member(&mut self, mut member: TeamMember, now: DateTime<Utc>) {
        let timestamp = render_timestamp(now);
        member.last_update = timestamp.clone();

        if let Some(existing) = self.members.iter_mut().find(|m| m.id == member.id) {
            member.join_date = std::mem::take(&mut existing.join_date);
            *existing = member;
        } else {
            member.join_date = timestamp;
            self.members.push(member);
        }
        self.touch(now);
    }

    pub fn remove_member(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        let removed = self.members.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }

    pub fn upsert_position(&mut self, position: OpenPosition, now: DateTime<Utc>) {
        if let Some(existing) = self
            .open_positions
            .iter_mut()
            .find(|p| p.id == position.id)
        {
            *existing = position;
        } else {
            self.open_positions.push(position);
        }
        self.touch(now);
    }

    pub fn remove_position(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let before = self.open_positions.len();
        self.open_positions.retain(|position| position.id != id);
        let removed = self.open_positions.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn lobato() -> TeamMember {
        TeamMember {
            id: "lobato".to_owned(),
            nickname: "Lobato".to_owned(),
            role: "AWPer".to_owned(),
            contact: MemberContact {
                steam: "76561199403242930".to_owned(),
                ..MemberContact::default()
            },
            status: "active".to_owned(),
            ..TeamMember::default()
        }
    }

    #[test]
    fn reads_roster_document() {
        let roster = TeamRoster::from_json_str(
            r#"{
                "members": [{ "id": "lobato", "nickname": "Lobato", "realName": "Thyago Lobato", "joinDate": "2025-01-01" }],
                "openPositions": [{ "id": "igl", "role": "IGL", "requirements": ["Liderança natural"], "priority": 2, "status": "open" }],
                "teamSettings": { "maxMembers": 5, "currentMembers": 1, "recruitmentActive": true }
            }"#,
        )
        .unwrap();

        assert_eq!(roster.member("lobato").unwrap().real_name, "Thyago Lobato");
        assert_eq!(roster.position("igl").unwrap().priority, 2);
        assert_eq!(roster.team_settings.current_members, 1);
    }

    #[test]
    fn adding_a_member_stamps_join_date_and_count() {
        let mut roster = TeamRoster::fallback();
        roster.upsert_member(lobato(), at("2025-01-01T00:00:00Z"));

        let member = roster.member("lobato").unwrap();
        assert_eq!(member.join_date, "2025-01-01T00:00:00.000Z");
        assert_eq!(roster.team_settings.current_members, 1);
        assert_eq!(
            roster.team_settings.last_update.as_deref(),
            Some("2025-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn editing_a_member_keeps_join_date() {
        let mut roster = TeamRoster::fallback();
        roster.upsert_member(lobato(), at("2025-01-01T00:00:00Z"));

        let edited = TeamMember {
            role: "Entry Fragger".to_owned(),
            ..lobato()
        };
        roster.upsert_member(edited, at("2025-02-01T00:00:00Z"));

        assert_eq!(roster.members.len(), 1);
        let member = roster.member("lobato").unwrap();
        assert_eq!(member.role, "Entry Fragger");
        assert_eq!(member.join_date, "2025-01-01T00:00:00.000Z");
        assert_eq!(member.last_update, "2025-02-01T00:00:00.000Z");
    }

    #[test]
    fn removing_members_and_positions() {
        let mut roster = TeamRoster::fallback();
        roster.upsert_member(lobato(), at("2025-01-01T00:00:00Z"));
        roster.upsert_position(
            OpenPosition {
                id: "support".to_owned(),
                role: "Support".to_owned(),
                priority: 3,
                status: "open".to_owned(),
                ..OpenPosition::default()
            },
            at("2025-01-02T00:00:00Z"),
        );

        assert!(!roster.remove_member("ghost", at("2025-01-03T00:00:00Z")));
        assert!(roster.remove_member("lobato", at("2025-01-03T00:00:00Z")));
        assert!(roster.remove_position("support", at("2025-01-03T00:00:00Z")));
        assert_eq!(roster.team_settings.current_members, 0);
        assert!(roster.open_positions.is_empty());

        let saved = roster.to_pretty_json().unwrap();
        assert!(saved.contains("\"openPositions\": []"));
    }

    #[test]
    fn member_ids_are_slugged_nicknames() {
        let now = at("2025-01-01T12:00:00Z");
        assert_eq!(
            generate_member_id("Seu Lobato!", now),
            format!("seu-lobato--{}", now.timestamp_millis())
        );
        assert_eq!(
            generate_member_id("Lobo🐺é", now),
            format!("lobo----{}", now.timestamp_millis())
        );
    }
}
