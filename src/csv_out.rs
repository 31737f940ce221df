use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::table::{PlayRow, TeamColumns};

/// Column order of the output table. The team-scoped attributes appear once
/// per side, home slots before away slots.
pub const HEADERS: [&str; 27] = [
    "rowType",
    "teamId",
    "team.clock",
    "periodNumber",
    "periodDisplay",
    "play.type",
    "play.text",
    "play.drive",
    "homeScore",
    "visitorScore",
    "play.clock",
    "play_type",
    "down",
    "yards_to_go",
    "possessing_team",
    "teamId_home",
    "nameShort_home",
    "nameFull_home",
    "sixCharAbbr_home",
    "color_home",
    "record_home",
    "teamId_away",
    "nameShort_away",
    "nameFull_away",
    "sixCharAbbr_away",
    "color_away",
    "record_away",
];

pub fn write_csv(path: &Path, rows: &[PlayRow]) -> Result<()> {
    let writer =
        Writer::from_path(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_table(writer, rows)
}

pub fn write_table<W: Write>(mut writer: Writer<W>, rows: &[PlayRow]) -> Result<()> {
    writer.write_record(HEADERS).context("write csv header")?;
    for row in rows {
        writer
            .write_record(record_fields(row))
            .context("write csv row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}

fn record_fields(row: &PlayRow) -> Vec<String> {
    let mut fields = vec![
        text(&row.row_type),
        text(&row.team_id),
        text(&row.team_clock),
        int(row.period_number),
        text(&row.period_display),
        text(&row.play_type_tag),
        text(&row.play_text),
        text(&row.play_drive),
        int(row.home_score),
        int(row.visitor_score),
        text(&row.play_clock),
        row.play_type.as_str().to_string(),
        int(row.down),
        int(row.yards_to_go),
        text(&row.possessing_team),
    ];
    fields.extend(team_fields(&row.teams.home));
    fields.extend(team_fields(&row.teams.away));
    fields
}

fn team_fields(columns: &TeamColumns) -> Vec<String> {
    vec![
        text(&columns.team_id),
        text(&columns.name_short),
        text(&columns.name_full),
        text(&columns.six_char_abbr),
        text(&columns.color),
        text(&columns.record),
    ]
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
