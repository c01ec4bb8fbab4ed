//! # Recipe Response Parsing
//!
//! Turns the free-form text returned by the AI completion service into a
//! validated [`Recipe`]:
//!
//! 1. Locate the JSON object. The body of a fenced code block is searched
//!    first; otherwise the first balanced `{...}` substring of the whole text
//!    is used. Brace matching ignores braces inside JSON string literals.
//! 2. Parse it.
//! 3. Validate it against the recipe schema, collecting every violation.
//!
//! Users only ever see [`RECIPE_FAILURE_MESSAGE`]; the detailed cause is logged.

use crate::log_warn;
use crate::schemas::recipe::{Difficulty, Recipe};
use serde_json::Value;
use thiserror::Error;

/// The only failure text shown to users.
pub const RECIPE_FAILURE_MESSAGE: &str = "Failed to generate a valid recipe. Please try again.";

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("no JSON object found in model response")]
    NoJsonFound,
    #[error("model response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("recipe failed validation: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

impl RecipeError {
    pub fn user_message(&self) -> &'static str {
        RECIPE_FAILURE_MESSAGE
    }
}

/// Extracts, parses and validates a recipe from raw model output.
pub fn parse_recipe_response(text: &str) -> Result<Recipe, RecipeError> {
    let json = extract_json_object(text).ok_or(RecipeError::NoJsonFound)?;
    let value: Value = serde_json::from_str(json)?;

    let errors = validate_recipe(&value);
    if !errors.is_empty() {
        return Err(RecipeError::Invalid(errors));
    }

    Ok(serde_json::from_value(value)?)
}

/// Like [`parse_recipe_response`], but logs the cause and hands back only
/// the fixed user-facing message.
pub fn parse_recipe_for_display(text: &str) -> Result<Recipe, &'static str> {
    parse_recipe_response(text).map_err(|e| {
        log_warn!("[Recipe] {}", e);
        e.user_message()
    })
}

/// Finds the JSON object in `text`, preferring a fenced code block.
pub fn extract_json_object(text: &str) -> Option<&str> {
    if let Some(fenced) = fenced_block(text) {
        if let Some(object) = first_balanced_object(fenced) {
            return Some(object);
        }
    }
    first_balanced_object(text)
}

/// Body of the first ```` ``` ```` fenced block, with any language tag skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string ("json", "JSON", ...) up to the end of the line.
    let body_start = after_fence.find('\n').map(|i| i + 1)?;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// The first `{...}` substring whose braces balance, ignoring braces inside strings.
///
/// A `{` that never closes is skipped and the scan restarts at the next one.
fn first_balanced_object(text: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = text[from..].find('{') {
        let start = from + found;
        if let Some(end) = balanced_end(&text[start..]) {
            return Some(&text[start..start + end]);
        }
        from = start + 1;
    }
    None
}

/// Byte length of the balanced object opening at the start of `text`, if it closes.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Checks `value` against the recipe schema and returns every violation.
pub fn validate_recipe(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if !value.is_object() {
        errors.push("recipe must be a JSON object".to_string());
        return errors;
    }

    for field in ["title", "description", "cookingTime"] {
        if !value.get(field).is_some_and(Value::is_string) {
            errors.push(format!("{field} must be a string"));
        }
    }

    let difficulty_ok = value
        .get("difficulty")
        .and_then(Value::as_str)
        .is_some_and(|d| Difficulty::VALUES.contains(&d));
    if !difficulty_ok {
        errors.push(format!(
            "difficulty must be one of: {}",
            Difficulty::VALUES.join(", ")
        ));
    }

    if !value.get("servings").is_some_and(Value::is_number) {
        errors.push("servings must be a number".to_string());
    }

    for field in ["ingredients", "instructions"] {
        if !is_string_array(value.get(field)) {
            errors.push(format!("{field} must be an array of strings"));
        }
    }

    match value.get("tips") {
        None | Some(Value::Null) => {}
        tips if is_string_array(tips) => {}
        _ => errors.push("tips must be an array of strings".to_string()),
    }

    errors
}

fn is_string_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().all(Value::is_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE_JSON: &str = r#"{
        "title": "Huevos Rancheros",
        "description": "Eggs on tortillas with a {smoky} salsa",
        "cookingTime": "20 minutes",
        "difficulty": "Easy",
        "servings": 2,
        "ingredients": ["4 eggs", "4 corn tortillas", "1 cup salsa"],
        "instructions": ["Warm the tortillas.", "Fry the eggs.", "Top with salsa."],
        "tips": ["Use day-old tortillas."]
    }"#;

    #[test]
    fn parses_json_surrounded_by_prose() {
        let text = format!("Here is your recipe!\n{RECIPE_JSON}\nEnjoy {{and}} good luck.");
        let recipe = parse_recipe_response(&text).unwrap();
        assert_eq!(recipe.title, "Huevos Rancheros");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.tips.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_object() {
        let object = extract_json_object(RECIPE_JSON).unwrap();
        assert!(object.ends_with('}'));
        assert!(object.contains("\"tips\""));
    }

    #[test]
    fn unclosed_brace_in_prose_is_skipped() {
        let text = format!("I spotted {{eggs and milk.\n{RECIPE_JSON}\n");
        let object = extract_json_object(&text).unwrap();
        assert!(!object.contains("eggs and milk"));
        let recipe = parse_recipe_response(&text).unwrap();
        assert_eq!(recipe.title, "Huevos Rancheros");
    }

    #[test]
    fn fenced_block_is_preferred() {
        let text = format!("Ingredients I saw: {{eggs}}\n```json\n{RECIPE_JSON}\n```\n");
        let recipe = parse_recipe_response(&text).unwrap();
        assert_eq!(recipe.servings, 2.0);
    }

    #[test]
    fn tips_are_optional() {
        let text = r#"{"title":"Toast","description":"Bread, hot","cookingTime":"3 minutes",
            "difficulty":"Easy","servings":1,"ingredients":["bread"],"instructions":["Toast it."]}"#;
        let recipe = parse_recipe_response(text).unwrap();
        assert!(recipe.tips.is_none());
    }

    #[test]
    fn missing_object_and_bad_json_are_distinguished() {
        assert!(matches!(parse_recipe_response("I could not see the fridge."), Err(RecipeError::NoJsonFound)));
        assert!(matches!(parse_recipe_response("{ title: nope }"), Err(RecipeError::Parse(_))));
        assert!(matches!(parse_recipe_response("{\"title\": \"cut off"), Err(RecipeError::NoJsonFound)));
    }

    #[test]
    fn schema_violations_are_collected() {
        let text = r#"{"title":"Soup","difficulty":"Extreme","servings":"four","ingredients":[1],"instructions":[]}"#;
        match parse_recipe_response(text) {
            Err(RecipeError::Invalid(errors)) => {
                assert!(errors.contains(&"description must be a string".to_string()));
                assert!(errors.contains(&"cookingTime must be a string".to_string()));
                assert!(errors.iter().any(|e| e.starts_with("difficulty")));
                assert!(errors.contains(&"servings must be a number".to_string()));
                assert!(errors.contains(&"ingredients must be an array of strings".to_string()));
                assert_eq!(errors.len(), 5, "{errors:?}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn users_only_see_the_fixed_message() {
        assert_eq!(parse_recipe_for_display("nothing here"), Err(RECIPE_FAILURE_MESSAGE));
        assert_eq!(
            parse_recipe_for_display("{\"title\": 1}").unwrap_err(),
            "Failed to generate a valid recipe. Please try again."
        );
    }
}
