//! # Recipe Schema
//!
//! The shape every generated recipe must have before it is shown to the user.
//! Recipes are produced by the AI completion service as free-form text; the
//! recipe parser extracts and validates them against this schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard a recipe is to cook. Capitalized on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const VALUES: [&'static str; 3] = ["Easy", "Medium", "Hard"];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A validated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    /// Human-readable duration as written by the model, e.g. "25 minutes".
    pub cooking_time: String,
    pub difficulty: Difficulty,
    /// Any JSON number is accepted; models occasionally answer `2.5`.
    pub servings: f64,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}
