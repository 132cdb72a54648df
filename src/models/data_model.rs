// src/models/data_model.rs
// the JSON-based layout data model

use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;

use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub tiles: Vec<TileSpec>,
}

// One tile entry as written in the layout file. String fields are kept
// raw here and parsed into domain types when the tile is built, so a
// malformed id or direction still yields a tile (just one that cannot
// relay, or one running in the default direction).
#[derive(Debug, Serialize, Deserialize)]
pub struct TileSpec {
    pub id: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub autospawn: bool,
    #[serde(default = "TileSpec::default_kind")]
    pub kind: String,
}

impl Layout {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let layout: Layout = serde_json::from_str(&content)?;
        Ok(layout)
    }
}

impl TileSpec {
    fn default_kind() -> String {
        "belt".to_string()
    }

    pub fn is_belt(&self) -> bool {
        !self.kind.eq_ignore_ascii_case("platform")
    }
}
