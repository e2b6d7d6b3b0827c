use serde::{Deserialize, Serialize};

use crate::SummonerId;

/// `/lol-summoner/v1/current-summoner`
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub summoner_id: SummonerId,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

impl PartialEq for Summoner {
    fn eq(&self, other: &Self) -> bool {
        self.summoner_id == other.summoner_id
    }
}
