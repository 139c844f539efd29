use serde::Deserialize;

/// Body of `GET /competitions/{id}/scorers`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorersResponse {
    #[serde(default)]
    pub scorers: Vec<Scorer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorer {
    pub player: ScorerPlayer,
    pub team: ScorerTeam,
    #[serde(default)]
    pub goals: Option<u32>,
    #[serde(default)]
    pub played_matches: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorerPlayer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScorerTeam {
    pub name: String,
}
