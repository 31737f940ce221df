use thiserror::Error;

use crate::document::{self, PbpDocument, Period, TeamRecord};
use crate::table::{PlayRow, PlayType, TeamColumns, TeamPair};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("document is missing {0}")]
    MalformedDocument(&'static str),
    #[error("malformed team roster: {0}")]
    MalformedTeams(String),
}

/// Runs the whole pipeline over one game document: flatten every period in
/// document order, join the home/away team attributes, then filter and derive.
/// Structural failures abort with no partial table.
pub fn normalize(document: &PbpDocument) -> Result<Vec<PlayRow>, NormalizeError> {
    let playbyplay = document
        .data
        .as_ref()
        .and_then(|data| data.playbyplay.as_ref())
        .ok_or(NormalizeError::MalformedDocument("data.playbyplay"))?;

    let pair = team_pair(&playbyplay.teams)?;

    let mut rows = Vec::new();
    for period in &playbyplay.periods {
        rows.extend(flatten_period(period));
    }
    join_team_attributes(&mut rows, &pair);
    Ok(filter_and_derive(rows))
}

/// Expands one period into rows, one per play, each carrying its stat block's
/// scalars and the period context. A stat block without plays contributes
/// nothing.
pub fn flatten_period(period: &Period) -> Vec<PlayRow> {
    let mut rows = Vec::new();
    for block in &period.playbyplay_stats {
        let team_id = document::id_string(block.team_id.as_ref());
        for play in &block.plays {
            rows.push(PlayRow {
                row_type: block.row_type.clone(),
                team_id: team_id.clone(),
                team_clock: block.clock.clone(),
                period_number: period.period_number,
                period_display: period.period_display.clone(),
                play_type_tag: play.type_tag.clone(),
                play_text: play.play_text.clone(),
                play_drive: play.drive_text.clone(),
                home_score: document::score_value(play.home_score.as_ref()),
                visitor_score: document::score_value(play.visitor_score.as_ref()),
                play_clock: play.clock.clone(),
                teams: TeamPair::default(),
                play_type: PlayType::Unknown,
                down: None,
                yards_to_go: None,
                possessing_team: None,
            });
        }
    }
    rows
}

/// Resolves the roster into home and away attribute slots. The roster must
/// hold exactly two entries with exactly one claiming the home side; anything
/// else is a hard error, never a guess.
pub fn team_pair(teams: &[TeamRecord]) -> Result<TeamPair, NormalizeError> {
    if teams.len() != 2 {
        return Err(NormalizeError::MalformedTeams(format!(
            "expected 2 roster entries, found {}",
            teams.len()
        )));
    }
    let home_count = teams
        .iter()
        .filter(|team| team.is_home == Some(true))
        .count();
    if home_count != 1 {
        return Err(NormalizeError::MalformedTeams(format!(
            "expected exactly one home team, found {home_count}"
        )));
    }
    let (home, away) = if teams[0].is_home == Some(true) {
        (&teams[0], &teams[1])
    } else {
        (&teams[1], &teams[0])
    };
    let mut pair = TeamPair {
        home: team_columns(home),
        away: team_columns(away),
    };
    pair.back_fill();
    Ok(pair)
}

fn team_columns(record: &TeamRecord) -> TeamColumns {
    TeamColumns {
        team_id: document::id_string(record.team_id.as_ref()),
        name_short: non_empty(record.name_short.as_deref()),
        name_full: non_empty(record.name_full.as_deref()),
        six_char_abbr: non_empty(record.six_char_abbr.as_deref()),
        color: non_empty(record.color.as_deref()),
        record: non_empty(record.record.as_deref()),
    }
}

/// Attaches both team slots to every row. The slots are always present,
/// populated or empty; which side a row belongs to is resolved later by id.
pub fn join_team_attributes(rows: &mut [PlayRow], pair: &TeamPair) {
    for row in rows {
        row.teams = pair.clone();
    }
}

/// Classifies, filters, and derives in one ordered pass. Output rows are a
/// subset of the input rows with order preserved.
pub fn filter_and_derive(rows: Vec<PlayRow>) -> Vec<PlayRow> {
    let mut out = Vec::with_capacity(rows.len());
    for mut row in rows {
        // Classification is row-local and must not depend on filtering.
        row.play_type = classify_play(row.play_text.as_deref());

        if row.home_score.is_none() || row.visitor_score.is_none() {
            continue;
        }
        if row
            .team_clock
            .as_deref()
            .is_none_or(|clock| clock.trim().is_empty())
        {
            continue;
        }
        if row
            .play_text
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains("drive start"))
        {
            continue;
        }

        row.down = extract_down(row.play_drive.as_deref());
        row.yards_to_go = extract_yards_to_go(row.play_drive.as_deref());
        row.possessing_team = possessing_team(&row);
        out.push(row);
    }
    out
}

/// Case-insensitive substring classification of the play text; first rule
/// wins. Missing text is the only way to get `Unknown`.
pub fn classify_play(text: Option<&str>) -> PlayType {
    let Some(text) = text else {
        return PlayType::Unknown;
    };
    let text = text.to_lowercase();
    if text.contains("kickoff") {
        PlayType::Kickoff
    } else if text.contains("punt") {
        PlayType::Punt
    } else if text.contains("field goal attempt") {
        PlayType::FieldGoalAttempt
    } else if text.contains("pass complete")
        || text.contains("pass incomplete")
        || text.contains("sacked")
    {
        PlayType::Pass
    } else if text.contains("rush") || text.contains("run") {
        PlayType::Rush
    } else if text.contains("penalty") {
        PlayType::Penalty
    } else {
        PlayType::Other
    }
}

/// Down from a drive string like `"1 and 10 at 25"`. One uniform
/// parse-or-absent rule: missing, blank, or non-integer input yields `None`,
/// never zero and never an error.
pub fn extract_down(drive: Option<&str>) -> Option<i64> {
    let drive = non_blank(drive)?;
    let first = drive.split(" and ").next()?;
    first.trim().parse::<i64>().ok()
}

/// Yards-to-go from the same drive string: the segment after `" and "`,
/// truncated at `" at "`. Absent under the same conditions as the down.
pub fn extract_yards_to_go(drive: Option<&str>) -> Option<i64> {
    let drive = non_blank(drive)?;
    let second = drive.split(" and ").nth(1)?;
    let yards = second.split(" at ").next()?;
    yards.trim().parse::<i64>().ok()
}

fn possessing_team(row: &PlayRow) -> Option<String> {
    let team_id = row.team_id.as_deref()?;
    if row.teams.home.team_id.as_deref() == Some(team_id) {
        row.teams.home.name_short.clone()
    } else if row.teams.away.team_id.as_deref() == Some(team_id) {
        row.teams.away.name_short.clone()
    } else {
        // A play can belong to neither roster id, e.g. an officials' entry.
        None
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    let value = value?;
    if value.trim().is_empty() { None } else { Some(value) }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster_entry(id: i64, is_home: bool, name: &str) -> TeamRecord {
        TeamRecord {
            team_id: Some(json!(id)),
            is_home: Some(is_home),
            name_short: Some(name.to_string()),
            name_full: None,
            six_char_abbr: None,
            color: None,
            record: None,
        }
    }

    #[test]
    fn classify_first_rule_wins() {
        assert_eq!(classify_play(Some("Kickoff 65 yards")), PlayType::Kickoff);
        assert_eq!(
            classify_play(Some("punt blocked, penalty declined")),
            PlayType::Punt
        );
        assert_eq!(
            classify_play(Some("38 yard Field Goal Attempt is good")),
            PlayType::FieldGoalAttempt
        );
        assert_eq!(classify_play(Some("pass complete to X")), PlayType::Pass);
        assert_eq!(classify_play(Some("pass incomplete")), PlayType::Pass);
        assert_eq!(classify_play(Some("QB sacked for -7")), PlayType::Pass);
        assert_eq!(classify_play(Some("rush up the middle")), PlayType::Rush);
        assert_eq!(classify_play(Some("QB keeper run left")), PlayType::Rush);
        assert_eq!(classify_play(Some("PENALTY false start")), PlayType::Penalty);
        assert_eq!(classify_play(Some("timeout")), PlayType::Other);
        assert_eq!(classify_play(None), PlayType::Unknown);
    }

    #[test]
    fn down_and_yards_parse_or_absent() {
        assert_eq!(extract_down(Some("1 and 10 at 25")), Some(1));
        assert_eq!(extract_yards_to_go(Some("1 and 10 at 25")), Some(10));

        // Non-integer first segment loses the down but keeps the yards.
        assert_eq!(extract_down(Some("Goal and 5 at 10")), None);
        assert_eq!(extract_yards_to_go(Some("Goal and 5 at 10")), Some(5));

        assert_eq!(extract_down(Some("")), None);
        assert_eq!(extract_yards_to_go(Some("")), None);
        assert_eq!(extract_down(Some("   ")), None);
        assert_eq!(extract_down(None), None);
        assert_eq!(extract_yards_to_go(None), None);

        // No " and " separator means no second segment.
        assert_eq!(extract_down(Some("3rd down")), None);
        assert_eq!(extract_yards_to_go(Some("3rd down")), None);
    }

    #[test]
    fn team_pair_rejects_bad_rosters() {
        let err = team_pair(&[roster_entry(1, true, "A")]).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedTeams(_)));

        let err = team_pair(&[roster_entry(1, true, "A"), roster_entry(2, true, "B")]).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedTeams(_)));

        let err =
            team_pair(&[roster_entry(1, false, "A"), roster_entry(2, false, "B")]).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedTeams(_)));
    }

    #[test]
    fn team_pair_sides_follow_is_home_not_roster_order() {
        let pair = team_pair(&[roster_entry(2, false, "B"), roster_entry(1, true, "A")])
            .expect("valid roster");
        assert_eq!(pair.home.team_id.as_deref(), Some("1"));
        assert_eq!(pair.home.name_short.as_deref(), Some("A"));
        assert_eq!(pair.away.team_id.as_deref(), Some("2"));
        assert_eq!(pair.away.name_short.as_deref(), Some("B"));
    }

    #[test]
    fn team_pair_normalizes_mixed_id_types() {
        let mut away = roster_entry(0, false, "B");
        away.team_id = Some(json!(" 102 "));
        let pair = team_pair(&[roster_entry(101, true, "A"), away]).expect("valid roster");
        assert_eq!(pair.home.team_id.as_deref(), Some("101"));
        assert_eq!(pair.away.team_id.as_deref(), Some("102"));
    }

    #[test]
    fn back_fill_is_idempotent() {
        let mut pair = TeamPair {
            home: TeamColumns {
                team_id: Some("1".to_string()),
                name_short: Some("A".to_string()),
                color: Some("#cc0000".to_string()),
                ..TeamColumns::default()
            },
            away: TeamColumns {
                team_id: Some("2".to_string()),
                name_short: Some("B".to_string()),
                record: Some("1-0".to_string()),
                ..TeamColumns::default()
            },
        };
        pair.back_fill();
        assert_eq!(pair.away.color.as_deref(), Some("#cc0000"));
        assert_eq!(pair.home.record.as_deref(), Some("1-0"));
        // Populated pairs are untouched.
        assert_eq!(pair.away.name_short.as_deref(), Some("B"));

        let once = pair.clone();
        pair.back_fill();
        assert_eq!(pair, once);
    }

    fn bare_row() -> PlayRow {
        PlayRow {
            row_type: Some("PlayByPlayStats".to_string()),
            team_id: Some("1".to_string()),
            team_clock: Some("15:00".to_string()),
            period_number: Some(1),
            period_display: Some("1st".to_string()),
            play_type_tag: None,
            play_text: Some("rush up the middle".to_string()),
            play_drive: Some("1 and 10 at 25".to_string()),
            home_score: Some(0),
            visitor_score: Some(0),
            play_clock: Some("14:21".to_string()),
            teams: TeamPair::default(),
            play_type: PlayType::Unknown,
            down: None,
            yards_to_go: None,
            possessing_team: None,
        }
    }

    #[test]
    fn filter_drops_missing_scores_blank_clocks_and_drive_starts() {
        let mut missing_score = bare_row();
        missing_score.home_score = None;
        let mut blank_clock = bare_row();
        blank_clock.team_clock = Some("   ".to_string());
        let mut no_clock = bare_row();
        no_clock.team_clock = None;
        let mut drive_start = bare_row();
        drive_start.play_text = Some("Drive Start at NCSU 25".to_string());
        let mut drive_start_mixed = bare_row();
        drive_start_mixed.play_text = Some("1st and 10 drive start continues".to_string());
        let mut no_text = bare_row();
        no_text.play_text = None;
        let mut kickoff = bare_row();
        kickoff.play_text = Some("Kickoff".to_string());

        let out = filter_and_derive(vec![
            bare_row(),
            missing_score,
            blank_clock,
            no_clock,
            drive_start,
            drive_start_mixed,
            no_text,
            kickoff,
        ]);
        let texts = out
            .iter()
            .map(|row| row.play_text.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                Some("rush up the middle".to_string()),
                None,
                Some("Kickoff".to_string()),
            ]
        );
        // Rows with missing text survive the drive-start filter as unknown.
        assert_eq!(out[1].play_type, PlayType::Unknown);
        assert_eq!(out[2].play_type, PlayType::Kickoff);
    }

    #[test]
    fn derivation_fills_down_yards_and_possessing_team() {
        let pair = team_pair(&[roster_entry(101, true, "NCSU"), roster_entry(102, false, "TAR")])
            .expect("valid roster");
        let mut row = bare_row();
        row.team_id = Some("101".to_string());
        let mut rows = vec![row];
        join_team_attributes(&mut rows, &pair);

        let out = filter_and_derive(rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].down, Some(1));
        assert_eq!(out[0].yards_to_go, Some(10));
        assert_eq!(out[0].possessing_team.as_deref(), Some("NCSU"));
    }

    #[test]
    fn possessing_team_absent_for_unrostered_id() {
        let pair = team_pair(&[roster_entry(101, true, "NCSU"), roster_entry(102, false, "TAR")])
            .expect("valid roster");
        let mut row = bare_row();
        row.team_id = Some("999".to_string());
        let mut rows = vec![row];
        join_team_attributes(&mut rows, &pair);

        let out = filter_and_derive(rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].possessing_team, None);
    }
}
