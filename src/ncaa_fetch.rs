use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::document::{self, PbpDocument};
use crate::http_client::http_client;

const NCAA_STATS_URL: &str = "https://sdataprod.ncaa.com/";
const NCAA_WEB_BASE: &str = "https://www.ncaa.com";

const CONTESTS_QUERY: &str = "GetContests_web";
const CONTESTS_EXTENSIONS: &str = r#"{"persistedQuery":{"version":1,"sha256Hash":"7287cda610a9326931931080cb3a604828febe6fe3c9016a7e4a36db99efdb7c"}}"#;

const PBP_QUERY: &str = "NCAA_GetGamecenterPbpFootballById_web";
const PBP_EXTENSIONS: &str = r#"{"persistedQuery":{"version":1,"sha256Hash":"47928f2cabc7a164f0de0ed535a623bdf5a852cce7c30d6a6972a38609ba46a2"}}"#;

// FCS football on the stats endpoint.
const SPORT_CODE: &str = "MFB";
const DIVISION: u32 = 12;

/// One scheduled contest: its id and the full ncaa.com gamecenter URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRef {
    pub game_id: String,
    pub url: String,
}

/// Lists the week's games via the persisted contests query.
pub fn fetch_contests(season: i32, week: u32) -> Result<Vec<GameRef>> {
    let client = http_client()?;
    let variables = format!(
        r#"{{"sportCode":"{SPORT_CODE}","division":{DIVISION},"seasonYear":{season},"month":null,"contestDate":null,"week":{week}}}"#
    );
    let resp = client
        .get(NCAA_STATS_URL)
        .query(&[
            ("meta", CONTESTS_QUERY),
            ("queryName", CONTESTS_QUERY),
            ("extensions", CONTESTS_EXTENSIONS),
            ("variables", variables.as_str()),
        ])
        .send()
        .context("contest list request failed")?;
    let body = read_success_body(resp)?;
    parse_contests_json(&body)
}

/// Fetches one game's play-by-play document by contest id.
pub fn fetch_play_by_play(contest_id: &str) -> Result<PbpDocument> {
    let client = http_client()?;
    let variables = format!(r#"{{"contestId":"{contest_id}","staticTestEnv":null}}"#);
    let resp = client
        .get(NCAA_STATS_URL)
        .query(&[
            ("meta", PBP_QUERY),
            ("extensions", PBP_EXTENSIONS),
            ("variables", variables.as_str()),
        ])
        .send()
        .context("play-by-play request failed")?;
    let body = read_success_body(resp)?;
    parse_pbp_json(&body)
}

fn read_success_body(resp: reqwest::blocking::Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status}: {body}"));
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct ContestsResponse {
    #[serde(default)]
    data: Option<ContestsData>,
}

#[derive(Debug, Deserialize)]
struct ContestsData {
    #[serde(default)]
    contests: Vec<Contest>,
}

#[derive(Debug, Deserialize)]
struct Contest {
    #[serde(rename = "contestId")]
    contest_id: Option<Value>,
    url: Option<String>,
}

pub fn parse_contests_json(raw: &str) -> Result<Vec<GameRef>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let response =
        serde_json::from_str::<ContestsResponse>(trimmed).context("invalid contests json")?;
    let contests = response
        .data
        .map(|data| data.contests)
        .unwrap_or_default();

    let mut games = Vec::with_capacity(contests.len());
    for contest in contests {
        let Some(game_id) = document::id_string(contest.contest_id.as_ref()) else {
            continue;
        };
        let Some(relative) = contest.url else {
            continue;
        };
        games.push(GameRef {
            game_id,
            url: format!("{NCAA_WEB_BASE}{relative}"),
        });
    }
    Ok(games)
}

pub fn parse_pbp_json(raw: &str) -> Result<PbpDocument> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PbpDocument::default());
    }
    serde_json::from_str(trimmed).context("invalid play-by-play json")
}
