use serde::Deserialize;
use serde_json::Value;

/// Raw play-by-play body from the NCAA gamecenter endpoint.
///
/// Only the structural paths the pipeline reads are declared; everything else
/// in the payload is ignored. Leaf fields stay optional so a missing value
/// degrades to an empty cell instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PbpDocument {
    #[serde(default)]
    pub data: Option<DocumentData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub playbyplay: Option<PlayByPlay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayByPlay {
    #[serde(default)]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Period {
    #[serde(rename = "periodNumber")]
    pub period_number: Option<i64>,
    #[serde(rename = "periodDisplay")]
    pub period_display: Option<String>,
    #[serde(rename = "playbyplayStats", default)]
    pub playbyplay_stats: Vec<StatBlock>,
}

/// Per-team, per-period grouping of plays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "__typename")]
    pub row_type: Option<String>,
    #[serde(rename = "teamId")]
    pub team_id: Option<Value>,
    pub clock: Option<String>,
    #[serde(default)]
    pub plays: Vec<Play>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Play {
    #[serde(rename = "__typename")]
    pub type_tag: Option<String>,
    #[serde(rename = "playText")]
    pub play_text: Option<String>,
    #[serde(rename = "driveText")]
    pub drive_text: Option<String>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<Value>,
    #[serde(rename = "visitorScore")]
    pub visitor_score: Option<Value>,
    pub clock: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "teamId")]
    pub team_id: Option<Value>,
    #[serde(rename = "isHome")]
    pub is_home: Option<bool>,
    #[serde(rename = "nameShort")]
    pub name_short: Option<String>,
    #[serde(rename = "nameFull")]
    pub name_full: Option<String>,
    #[serde(rename = "sixCharAbbr")]
    pub six_char_abbr: Option<String>,
    pub color: Option<String>,
    pub record: Option<String>,
}

/// Trimmed string form of an identifier. Ids arrive as numbers or strings
/// depending on the endpoint; both compare equal after this normalization.
pub fn id_string(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Scores arrive as numbers or strings; a blank string counts as missing.
pub fn score_value(raw: Option<&Value>) -> Option<i64> {
    match raw? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
