use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type WordId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordPrompt {
    pub id: WordId,
    pub text: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordBatch {
    pub words: Vec<WordPrompt>,
}

/// Word category a game can be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub code: String,
    pub name: String,
}
