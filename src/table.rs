/// Normalized play-type buckets derived from the play text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayType {
    Kickoff,
    Punt,
    FieldGoalAttempt,
    Pass,
    Rush,
    Penalty,
    Other,
    Unknown,
}

impl PlayType {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayType::Kickoff => "kickoff",
            PlayType::Punt => "punt",
            PlayType::FieldGoalAttempt => "field goal attempt",
            PlayType::Pass => "pass",
            PlayType::Rush => "rush",
            PlayType::Penalty => "penalty",
            PlayType::Other => "other",
            PlayType::Unknown => "unknown",
        }
    }
}

/// One slot (home or away) of the team-scoped attributes joined onto every
/// play row. The attribute set is enumerated here rather than inferred from a
/// `_home`/`_away` column-name convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamColumns {
    pub team_id: Option<String>,
    pub name_short: Option<String>,
    pub name_full: Option<String>,
    pub six_char_abbr: Option<String>,
    pub color: Option<String>,
    pub record: Option<String>,
}

/// Home and away attribute slots, resolved once per document from the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPair {
    pub home: TeamColumns,
    pub away: TeamColumns,
}

impl TeamPair {
    /// Copies each attribute across to the empty slot of its home/away pair.
    /// Idempotent: a second pass finds nothing left to fill.
    pub fn back_fill(&mut self) {
        fn fill(a: &mut Option<String>, b: &mut Option<String>) {
            if a.is_none() && b.is_some() {
                *a = b.clone();
            } else if b.is_none() && a.is_some() {
                *b = a.clone();
            }
        }
        fill(&mut self.home.team_id, &mut self.away.team_id);
        fill(&mut self.home.name_short, &mut self.away.name_short);
        fill(&mut self.home.name_full, &mut self.away.name_full);
        fill(&mut self.home.six_char_abbr, &mut self.away.six_char_abbr);
        fill(&mut self.home.color, &mut self.away.color);
        fill(&mut self.home.record, &mut self.away.record);
    }
}

/// One flattened, joined, derived play record. Created by the period
/// flattener, enriched by the team join, finalized by the derivation stage;
/// not mutated after the pipeline returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRow {
    pub row_type: Option<String>,
    pub team_id: Option<String>,
    pub team_clock: Option<String>,
    pub period_number: Option<i64>,
    pub period_display: Option<String>,
    pub play_type_tag: Option<String>,
    pub play_text: Option<String>,
    pub play_drive: Option<String>,
    pub home_score: Option<i64>,
    pub visitor_score: Option<i64>,
    pub play_clock: Option<String>,
    pub teams: TeamPair,
    pub play_type: PlayType,
    pub down: Option<i64>,
    pub yards_to_go: Option<i64>,
    pub possessing_team: Option<String>,
}
