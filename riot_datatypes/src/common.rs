use serde::{Deserialize, Serialize};

pub type SummonerId = i64;
pub type ChampionId = i64;
pub type CellId = i64;
pub type ActionId = i64;
pub type SkinId = i64;
pub type SpellId = u64;
pub type TradeId = i64;

#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
}

impl PartialEq for Champion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
