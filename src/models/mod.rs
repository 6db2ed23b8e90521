//! Data models for the drinks menu.
//!
//! A drink is a titled recipe: an ordered list of ingredients, each with a
//! name, a display color and a positive number of parts. Two response
//! projections exist: `short()` hides ingredient names from non-privileged
//! viewers, `long()` exposes the full recipe.

use serde::{Deserialize, Serialize};

/// One ingredient of a drink recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (hidden in the short projection).
    pub name: String,

    /// Display color for rendering the drink graphic.
    pub color: String,

    /// Number of parts of this ingredient, at least 1.
    pub parts: u32,
}

/// A drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    /// Row id assigned by the store.
    pub id: i64,

    /// Unique drink title.
    pub title: String,

    /// Ordered recipe.
    pub recipe: Vec<Ingredient>,
}

/// Short projection of an ingredient: color and parts only.
#[derive(Debug, Clone, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Short projection of a drink, for unauthenticated menu listings.
#[derive(Debug, Clone, Serialize)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Long projection of a drink, including ingredient names.
#[derive(Debug, Clone, Serialize)]
pub struct LongDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// Short form: omits ingredient names.
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|r| ShortIngredient {
                    color: r.color.clone(),
                    parts: r.parts,
                })
                .collect(),
        }
    }

    /// Long form: the full recipe.
    pub fn long(&self) -> LongDrink {
        LongDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

/// Request body for POST /drinks.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl CreateDrinkRequest {
    /// Validate the request: non-empty title, non-empty recipe, every
    /// ingredient with at least one part.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty");
        }
        validate_recipe(&self.recipe)
    }
}

/// Request body for PATCH /drinks/:id. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

impl UpdateDrinkRequest {
    /// Validate whichever fields are present.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title must not be empty");
            }
        }
        if let Some(recipe) = &self.recipe {
            validate_recipe(recipe)?;
        }
        Ok(())
    }
}

fn validate_recipe(recipe: &[Ingredient]) -> Result<(), &'static str> {
    if recipe.is_empty() {
        return Err("recipe must contain at least one ingredient");
    }
    if recipe.iter().any(|r| r.parts == 0) {
        return Err("every ingredient needs at least one part");
    }
    Ok(())
}

/// Success envelope for list/create/update responses.
#[derive(Debug, Clone, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

/// Success envelope for DELETE /drinks/:id.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn mocha() -> Drink {
        Drink {
            id: 1,
            title: "mocha".to_string(),
            recipe: vec![
                Ingredient {
                    name: "coffee".to_string(),
                    color: "brown".to_string(),
                    parts: 2,
                },
                Ingredient {
                    name: "chocolate".to_string(),
                    color: "darkbrown".to_string(),
                    parts: 1,
                },
            ],
        }
    }

    #[test]
    fn test_short_projection_never_contains_names() {
        let json = serde_json::to_value(mocha().short()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "mocha");
        let recipe = json["recipe"].as_array().unwrap();
        assert_eq!(recipe.len(), 2);
        for part in recipe {
            assert!(part.get("name").is_none(), "short() must omit name");
            assert!(part.get("color").is_some());
            assert!(part.get("parts").is_some());
        }
    }

    #[test]
    fn test_long_projection_contains_full_recipe() {
        let json = serde_json::to_value(mocha().long()).unwrap();

        let recipe = json["recipe"].as_array().unwrap();
        assert_eq!(recipe.first().unwrap()["name"], "coffee");
        assert_eq!(recipe.first().unwrap()["color"], "brown");
        assert_eq!(recipe.first().unwrap()["parts"], 2);
        assert_eq!(recipe.get(1).unwrap()["name"], "chocolate");
    }

    #[test]
    fn test_short_preserves_ingredient_order() {
        let short = mocha().short();
        let colors: Vec<&str> = short.recipe.iter().map(|r| r.color.as_str()).collect();
        assert_eq!(colors, vec!["brown", "darkbrown"]);
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateDrinkRequest {
            title: "water".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let request = CreateDrinkRequest {
            title: "   ".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_empty_recipe() {
        let request = CreateDrinkRequest {
            title: "air".to_string(),
            recipe: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_zero_parts() {
        let request = CreateDrinkRequest {
            title: "water".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 0,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_ingredient_rejects_negative_parts() {
        // parts is unsigned, so negative JSON input must fail to parse
        let result: Result<Ingredient, _> =
            serde_json::from_str(r#"{"name":"water","color":"blue","parts":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let request: UpdateDrinkRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.recipe.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_validates_present_fields() {
        let request = UpdateDrinkRequest {
            title: Some("".to_string()),
            recipe: None,
        };
        assert!(request.validate().is_err());

        let request = UpdateDrinkRequest {
            title: None,
            recipe: Some(vec![]),
        };
        assert!(request.validate().is_err());
    }
}
