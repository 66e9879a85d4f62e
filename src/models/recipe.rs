use serde::{Deserialize, Deserializer, Serialize};

/// Canonical form of an ingredient token: trimmed and lower-cased.
///
/// Returns `None` when nothing is left after trimming, so callers can drop
/// blank entries in the same pass.
pub fn normalize_ingredient(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// A recipe row as read from the store.
///
/// The store owns these; this service only reads them. Rows in the wild are
/// not always well-shaped, so the ambiguity is resolved here, at the
/// deserialization boundary: a bare-string `ingredients` value becomes a
/// one-element list, non-string array elements are dropped, and absent
/// `title`/`instructions` stay `None` until presentation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Recipe {
    /// Display title, falling back to "Untitled" for rows without one.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<serde_json::Value>),
        // anything else (a number, an object) carries no usable ingredients
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Other(_)) => Vec::new(),
        Some(Raw::One(single)) => vec![single],
        Some(Raw::Many(values)) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    })
}

/// One ranked recommendation, derived from a [`Recipe`] and the request's
/// detected-ingredient set. Built fresh per request and serialized straight
/// into the response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredRecipe {
    pub id: i64,
    pub title: String,
    /// Fraction of detected ingredients this recipe uses, in [0, 1].
    pub score: f64,
    /// Detected ingredients the recipe calls for, sorted.
    pub matched: Vec<String>,
    /// Recipe ingredients not in the detected set, sorted.
    pub missing: Vec<String>,
    pub instructions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(normalize_ingredient("  Apple "), Some("apple".to_string()));
        assert_eq!(normalize_ingredient("SPINACH"), Some("spinach".to_string()));
        assert_eq!(normalize_ingredient("   "), None);
        assert_eq!(normalize_ingredient(""), None);
    }

    #[test]
    fn test_deserialize_full_row() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 7, "title": "Salad", "ingredients": ["spinach", "feta"], "instructions": "Toss."}"#,
        )
        .unwrap();

        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.display_title(), "Salad");
        assert_eq!(recipe.ingredients, vec!["spinach", "feta"]);
        assert_eq!(recipe.instructions.as_deref(), Some("Toss."));
    }

    #[test]
    fn test_bare_string_ingredients_become_one_element_list() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 1, "ingredients": "tomato"}"#).unwrap();
        assert_eq!(recipe.ingredients, vec!["tomato"]);

        let listed: Recipe =
            serde_json::from_str(r#"{"id": 1, "ingredients": ["tomato"]}"#).unwrap();
        assert_eq!(recipe.ingredients, listed.ingredients);
    }

    #[test]
    fn test_non_string_ingredient_elements_are_dropped() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 2, "ingredients": ["carrot", 42, null, {"oops": true}, "leek"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.ingredients, vec!["carrot", "leek"]);
    }

    #[test]
    fn test_unusable_ingredients_value_coerces_to_empty() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 5, "ingredients": 42}"#).unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_absent_fields_default() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(recipe.display_title(), "Untitled");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.instructions, None);

        let nulled: Recipe = serde_json::from_str(
            r#"{"id": 4, "title": null, "ingredients": null, "instructions": null}"#,
        )
        .unwrap();
        assert_eq!(nulled.display_title(), "Untitled");
        assert!(nulled.ingredients.is_empty());
    }
}
