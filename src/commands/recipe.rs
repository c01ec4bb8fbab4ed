// This file implements `el-hornito recipe`, which parses a saved model
// response and prints the recipe it contains.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use el_hornito::libs::recipe_parser::parse_recipe_for_display;
use el_hornito::libs::utilities::path_helpers::expand_path;
use el_hornito::schemas::recipe::Recipe;
use std::fs;

pub fn run(file: String) -> Result<()> {
    let path = expand_path(&file).map_err(|e| anyhow!(e))?;
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match parse_recipe_for_display(&text) {
        Ok(recipe) => {
            print!("{}", render(&recipe));
            Ok(())
        }
        Err(message) => bail!(message),
    }
}

fn render(recipe: &Recipe) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", recipe.title.bold()));
    out.push_str(&format!("{}\n\n", recipe.description));
    out.push_str(&format!(
        "{} {}  {} {}  {} {}\n\n",
        "Time:".dimmed(),
        recipe.cooking_time,
        "Difficulty:".dimmed(),
        recipe.difficulty,
        "Serves:".dimmed(),
        recipe.servings
    ));

    out.push_str(&format!("{}\n", "Ingredients".underline()));
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  - {ingredient}\n"));
    }

    out.push_str(&format!("\n{}\n", "Instructions".underline()));
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("  {}. {instruction}\n", step + 1));
    }

    if let Some(tips) = recipe.tips.as_ref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("\n{}\n", "Tips".underline()));
        for tip in tips {
            out.push_str(&format!("  * {tip}\n"));
        }
    }
    out
}
