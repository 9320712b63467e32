mod mealdb;

pub use mealdb::MealDbClient;

use crate::error::BrowserError;
use crate::model::{Area, Category, MealDetail, MealSummary};
use async_trait::async_trait;
use log::warn;

/// Read-only access to a recipe catalogue.
///
/// The `try_` operations report failures. The plain operations fold any
/// failure into the empty/`None` default after logging it, which is what the
/// views use when "unavailable" and "no results" need not be told apart.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Get the source name (e.g., "themealdb")
    fn source_name(&self) -> &str;

    async fn try_by_ingredient(&self, term: &str) -> Result<Vec<MealSummary>, BrowserError>;

    async fn try_by_category(&self, category: &str) -> Result<Vec<MealSummary>, BrowserError>;

    async fn try_by_area(&self, area: &str) -> Result<Vec<MealSummary>, BrowserError>;

    async fn try_categories(&self) -> Result<Vec<Category>, BrowserError>;

    async fn try_areas(&self) -> Result<Vec<Area>, BrowserError>;

    /// `Ok(None)` when the id is unknown
    async fn try_lookup(&self, id: &str) -> Result<Option<MealDetail>, BrowserError>;

    async fn try_random(&self) -> Result<Option<MealDetail>, BrowserError>;

    async fn by_ingredient(&self, term: &str) -> Vec<MealSummary> {
        or_default(self.source_name(), "by_ingredient", self.try_by_ingredient(term).await)
    }

    async fn by_category(&self, category: &str) -> Vec<MealSummary> {
        or_default(self.source_name(), "by_category", self.try_by_category(category).await)
    }

    async fn by_area(&self, area: &str) -> Vec<MealSummary> {
        or_default(self.source_name(), "by_area", self.try_by_area(area).await)
    }

    async fn categories(&self) -> Vec<Category> {
        or_default(self.source_name(), "categories", self.try_categories().await)
    }

    async fn areas(&self) -> Vec<Area> {
        or_default(self.source_name(), "areas", self.try_areas().await)
    }

    async fn lookup(&self, id: &str) -> Option<MealDetail> {
        or_default(self.source_name(), "lookup", self.try_lookup(id).await)
    }

    async fn random(&self) -> Option<MealDetail> {
        or_default(self.source_name(), "random", self.try_random().await)
    }
}

fn or_default<T: Default>(source: &str, operation: &str, result: Result<T, BrowserError>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} {} failed, showing nothing: {}", source, operation, e);
        T::default()
    })
}
