//! Query engine
//!
//! Derives a filtered, searched and sorted view of the collection for read
//! requests. Never mutates the store and never fails.

use serde::{Deserialize, Serialize};

use crate::models::Recipe;

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Descending by creation time
    #[default]
    Newest,
    /// Ascending by creation time
    Oldest,
    /// Descending by mean rating, unrated recipes count as 0
    Rating,
}

impl SortOrder {
    /// Lenient parse for query-string values; anything unknown is `Newest`
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "oldest" => SortOrder::Oldest,
            "rating" => SortOrder::Rating,
            _ => SortOrder::Newest,
        }
    }
}

/// A read request against the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Category filter in effect, if any
    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Lowercased search needle in effect, if any
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Run the query over `recipes`, returning matching copies in order
    pub fn apply<'a, I>(&self, recipes: I) -> Vec<Recipe>
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let category = self.category_filter();
        let needle = self.search_needle();

        let mut results: Vec<Recipe> = recipes
            .into_iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
            .cloned()
            .collect();

        sort_recipes(&mut results, self.sort);
        results
    }
}

/// Case-insensitive substring match on title, description or any tag
///
/// `needle` must already be lowercase.
pub fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Stable sort in place
pub fn sort_recipes(recipes: &mut [Recipe], order: SortOrder) {
    match order {
        SortOrder::Newest => recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => recipes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Rating => {
            recipes.sort_by(|a, b| b.average_rating().total_cmp(&a.average_rating()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::recipe;
    use chrono::{Duration, Utc};

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    /// A (T-2, avg 0 via no ratings), B (T-1, avg 5), C (T, unrated)
    fn scenario() -> Vec<Recipe> {
        let t = Utc::now();
        let a = recipe("A", "u1", t - Duration::days(2));
        let mut b = recipe("B", "u1", t - Duration::days(1));
        b.upsert_rating("x", 5);
        let c = recipe("C", "u1", t);
        vec![a, b, c]
    }

    #[test]
    fn test_sort_param_parsing() {
        assert_eq!(SortOrder::from_param("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::from_param("RATING"), SortOrder::Rating);
        assert_eq!(SortOrder::from_param("newest"), SortOrder::Newest);
        assert_eq!(SortOrder::from_param("popular"), SortOrder::Newest);
        assert_eq!(SortOrder::from_param(""), SortOrder::Newest);
    }

    #[test]
    fn test_scenario_rating_sort_is_stable() {
        let recipes = scenario();
        let results = RecipeQuery::new().sort(SortOrder::Rating).apply(&recipes);
        // A and C tie at 0 and keep their input order
        assert_eq!(titles(&results), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_scenario_newest_and_oldest() {
        let recipes = scenario();
        let newest = RecipeQuery::new().apply(&recipes);
        assert_eq!(titles(&newest), vec!["C", "B", "A"]);

        let oldest = RecipeQuery::new().sort(SortOrder::Oldest).apply(&recipes);
        assert_eq!(titles(&oldest), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_category_without_matches_is_empty() {
        let recipes = scenario();
        let results = RecipeQuery::new().category("Dessert").apply(&recipes);
        assert!(results.is_empty());
    }

    #[test]
    fn test_all_category_and_empty_strings_do_not_filter() {
        let recipes = scenario();
        assert_eq!(RecipeQuery::new().category("All").apply(&recipes).len(), 3);
        assert_eq!(RecipeQuery::new().category("").apply(&recipes).len(), 3);
        assert_eq!(RecipeQuery::new().search("").apply(&recipes).len(), 3);
    }

    #[test]
    fn test_category_is_exact_match() {
        let mut recipes = scenario();
        recipes[1].category = "Dessert".to_string();
        let results = RecipeQuery::new().category("Dessert").apply(&recipes);
        assert_eq!(titles(&results), vec!["B"]);
        assert!(RecipeQuery::new().category("dessert").apply(&recipes).is_empty());
    }

    #[test]
    fn test_search_matches_title_description_and_tags() {
        let t = Utc::now();
        let mut by_title = recipe("Lemon Tart", "u1", t);
        by_title.description = "Sharp and sweet pastry".to_string();
        let mut by_description = recipe("Chicken", "u1", t - Duration::hours(1));
        by_description.description = "Roasted with LEMON and thyme".to_string();
        let mut by_tag = recipe("Fish", "u1", t - Duration::hours(2));
        by_tag.tags = vec!["Citrus".to_string(), "Lemony".to_string()];
        let miss = recipe("Bread", "u1", t - Duration::hours(3));

        let recipes = vec![by_title, by_description, by_tag, miss];
        let results = RecipeQuery::new().search("lemon").apply(&recipes);
        assert_eq!(titles(&results), vec!["Lemon Tart", "Chicken", "Fish"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let t = Utc::now();
        let mut soup = recipe("Tomato Soup", "u1", t);
        soup.category = "Soup".to_string();
        let mut salad = recipe("Tomato Salad", "u1", t);
        salad.category = "Vegan".to_string();

        let recipes = vec![soup, salad];
        let results = RecipeQuery::new()
            .category("Vegan")
            .search("tomato")
            .apply(&recipes);
        assert_eq!(titles(&results), vec!["Tomato Salad"]);
    }

    #[test]
    fn test_rating_sort_non_increasing() {
        let t = Utc::now();
        let mut recipes = Vec::new();
        for (i, values) in [vec![3, 4], vec![], vec![5], vec![1, 2, 3], vec![4, 4]]
            .into_iter()
            .enumerate()
        {
            let mut r = recipe(&format!("R{i}"), "u1", t);
            for (j, v) in values.into_iter().enumerate() {
                r.upsert_rating(&format!("user{j}"), v);
            }
            recipes.push(r);
        }

        let results = RecipeQuery::new().sort(SortOrder::Rating).apply(&recipes);
        for pair in results.windows(2) {
            assert!(pair[0].average_rating() >= pair[1].average_rating());
        }
        assert_eq!(results.last().unwrap().title, "R1");
    }
}
