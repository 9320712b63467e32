use crate::model::{Area, Category, MealSummary};

/// Anything with a display name the list filters can match against
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Area {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MealSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// Case-insensitive substring filter over an already fetched list.
///
/// An empty query keeps every entry. Order is preserved.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .map(|name| Category {
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_filter_categories() {
        let cats = categories(&["Beef", "Chicken", "Vegan"]);
        let names: Vec<&str> = filter_by_name(&cats, "ch")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chicken"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let cats = categories(&["Beef", "Chicken", "Vegan"]);
        assert_eq!(filter_by_name(&cats, "VEG").len(), 1);
        assert_eq!(filter_by_name(&cats, "e").len(), 3);
    }

    #[test]
    fn test_filter_no_match() {
        let cats = categories(&["Beef", "Chicken", "Vegan"]);
        assert!(filter_by_name(&cats, "lamb").is_empty());
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let areas = vec![
            Area {
                name: "Italian".to_string(),
            },
            Area {
                name: "Thai".to_string(),
            },
        ];
        assert_eq!(filter_by_name(&areas, "").len(), 2);
    }

    #[test]
    fn test_filter_plain_strings() {
        let names = vec!["Beef", "Chicken", "Vegan"];
        assert_eq!(filter_by_name(&names, "an"), vec![&"Vegan"]);
    }
}
