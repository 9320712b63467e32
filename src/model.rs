use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The API numbers ingredient/measure columns 1 through 20
pub const MAX_INGREDIENTS: usize = 20;

/// Every endpoint answers `{"meals": [...]}` or `{"meals": null}`
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }

    pub fn into_first(self) -> Option<T> {
        self.meals.and_then(|meals| meals.into_iter().next())
    }
}

/// A card-sized recipe as returned by the filter endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "strCategory")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "strArea")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    /// Free text such as "1 cup" or "to taste"; empty when the API has none
    pub measure: String,
}

/// A full recipe from the lookup and random endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMeal")]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub thumbnail: Option<String>,
    pub instructions: Option<String>,
    ingredients: Vec<Ingredient>,
}

/// Wire shape of a detail record: named columns plus the numbered
/// `strIngredientN`/`strMeasureN` pairs collected from the remainder.
#[derive(Deserialize)]
struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl From<RawMeal> for MealDetail {
    fn from(raw: RawMeal) -> Self {
        let column = |key: String| -> Option<String> {
            raw.rest
                .get(&key)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
        };

        let ingredients = (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let name = column(format!("strIngredient{n}")).filter(|s| !s.is_empty())?;
                let measure = column(format!("strMeasure{n}")).unwrap_or_default();
                Some(Ingredient { name, measure })
            })
            .collect();

        MealDetail {
            id: raw.id,
            name: raw.name,
            category: non_blank(raw.category),
            area: non_blank(raw.area),
            thumbnail: non_blank(raw.thumbnail),
            instructions: raw.instructions,
            ingredients,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl MealDetail {
    /// Ingredient/measure pairs in column order, skipping blank ingredients
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn summary(&self) -> MealSummary {
        MealSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }

    /// Instructions broken into display steps.
    ///
    /// Splits on line breaks and on sentence ends followed by an uppercase
    /// letter, strips leading step numbers, and drops empty pieces.
    pub fn instruction_steps(&self) -> Vec<String> {
        split_steps(self.instructions.as_deref().unwrap_or(""))
    }
}

pub fn split_steps(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .map(strip_step_number)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            '\n' => {
                pieces.push(&text[start..pos]);
                start = pos + c.len_utf8();
                i += 1;
            }
            '.' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    j += 1;
                }
                if j > i + 1 && j < chars.len() && chars[j].1.is_ascii_uppercase() {
                    // The period and the whitespace run belong to the separator
                    pieces.push(&text[start..pos]);
                    start = chars[j].0;
                    i = j;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn strip_step_number(step: &str) -> &str {
    let trimmed = step.trim_start();
    if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return step;
    }
    trimmed
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(|c: char| c == ')' || c == '.' || c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_json() -> &'static str {
        r#"{
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strInstructions": "Preheat oven to 350F.\r\nCombine soy sauce. Stir well.",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "water",
            "strMeasure2": "1/2 cup ",
            "strIngredient3": "",
            "strMeasure3": "",
            "strIngredient4": "brown sugar",
            "strMeasure4": null,
            "strIngredient5": null,
            "strMeasure5": null,
            "strSource": null
        }"#
    }

    #[test]
    fn test_detail_collects_ingredients() {
        let meal: MealDetail = serde_json::from_str(detail_json()).unwrap();
        assert_eq!(meal.id, "52772");
        assert_eq!(meal.category.as_deref(), Some("Chicken"));

        let names: Vec<&str> = meal.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["soy sauce", "water", "brown sugar"]);
        assert_eq!(meal.ingredients()[1].measure, "1/2 cup");
        assert_eq!(meal.ingredients()[2].measure, "");
    }

    #[test]
    fn test_detail_without_ingredient_columns() {
        let meal: MealDetail =
            serde_json::from_str(r#"{"idMeal": "1", "strMeal": "Toast"}"#).unwrap();
        assert!(meal.ingredients().is_empty());
        assert!(meal.instruction_steps().is_empty());
        assert!(meal.area.is_none());
    }

    #[test]
    fn test_envelope_null_meals() {
        let envelope: MealsEnvelope<MealSummary> =
            serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(envelope.into_vec().is_empty());

        let envelope: MealsEnvelope<MealDetail> = serde_json::from_str(r#"{}"#).unwrap();
        assert!(envelope.into_first().is_none());
    }

    #[test]
    fn test_summary_projection() {
        let meal: MealDetail = serde_json::from_str(detail_json()).unwrap();
        let summary = meal.summary();
        assert_eq!(summary.id, "52772");
        assert_eq!(summary.name, "Teriyaki Chicken Casserole");
        assert!(summary.thumbnail.is_some());
    }

    #[test]
    fn test_steps_split_on_lines_and_sentences() {
        let steps = split_steps("Preheat oven to 350F.\r\nCombine soy sauce. Stir well.");
        assert_eq!(
            steps,
            vec!["Preheat oven to 350F", "Combine soy sauce", "Stir well."]
        );
    }

    #[test]
    fn test_steps_keep_lowercase_continuation() {
        let steps = split_steps("Add 2 tbsp. of butter. then stir");
        assert_eq!(steps, vec!["Add 2 tbsp. of butter. then stir"]);
    }

    #[test]
    fn test_steps_strip_numbering() {
        let steps = split_steps("1. Boil water\n2) Add pasta\n\n  3 - Drain\nSTEP 4 Serve");
        assert_eq!(steps, vec!["Boil water", "Add pasta", "Drain", "STEP 4 Serve"]);
    }
}
