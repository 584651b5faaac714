//! Sample recipes for demos and local development

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Comment, Difficulty, Rating, Recipe};
use crate::store::RecipeCollection;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn rating(user_id: &str, value: u8) -> Rating {
    Rating {
        user_id: user_id.to_string(),
        value,
    }
}

/// Three sample recipes, created two days ago, one day ago and at `now`
pub fn demo_recipes(now: DateTime<Utc>) -> Vec<Recipe> {
    let two_days_ago = now - Duration::days(2);
    let yesterday = now - Duration::days(1);

    vec![
        Recipe {
            id: Uuid::nil(),
            title: "Classic Spaghetti Carbonara".to_string(),
            description: "A creamy, classic Italian pasta dish made with eggs, cheese, pancetta, and pepper. Ready in just 30 minutes!".to_string(),
            image_url: "https://picsum.photos/seed/carbonara/800/600".to_string(),
            ingredients: strings(&[
                "200g spaghetti",
                "100g pancetta",
                "2 large eggs",
                "50g Pecorino cheese",
                "Salt and black pepper",
            ]),
            instructions: strings(&[
                "Cook spaghetti according to package directions.",
                "While pasta cooks, fry pancetta until crisp.",
                "In a bowl, whisk eggs and cheese.",
                "Drain pasta, reserving some pasta water. Quickly mix in egg mixture, pancetta, and a splash of pasta water.",
                "Season with lots of black pepper and serve immediately.",
            ]),
            category: "Dinner".to_string(),
            prep_time: Some(10),
            cook_time: Some(20),
            servings: Some(4),
            difficulty: Some(Difficulty::Medium),
            author_id: "user-2".to_string(),
            author_name: "Maria Rossi".to_string(),
            created_at: two_days_ago,
            updated_at: two_days_ago,
            comments: vec![Comment {
                id: Uuid::new_v4(),
                author_id: "user-1".to_string(),
                author_name: "Alex Cook".to_string(),
                text: "This was delicious!".to_string(),
                created_at: now,
            }],
            ratings: vec![rating("user-1", 5), rating("user-3", 4)],
            tags: strings(&["Italian", "Pasta", "Quick"]),
        },
        Recipe {
            id: Uuid::nil(),
            title: "Fudgy Chocolate Brownies".to_string(),
            description: "The ultimate fudgy brownies with a crinkly top. Intensely chocolatey and incredibly moist.".to_string(),
            image_url: "https://picsum.photos/seed/brownies/800/600".to_string(),
            ingredients: strings(&[
                "1/2 cup butter, melted",
                "1 cup sugar",
                "2 eggs",
                "1 tsp vanilla extract",
                "1/3 cup cocoa powder",
                "1/2 cup flour",
                "1/4 tsp salt",
                "1/4 tsp baking powder",
            ]),
            instructions: strings(&[
                "Preheat oven to 350°F (175°C).",
                "Mix melted butter, sugar, eggs, and vanilla.",
                "In a separate bowl, sift together cocoa, flour, salt, and baking powder.",
                "Gradually add dry ingredients to wet ingredients.",
                "Pour into a greased 8-inch square pan.",
                "Bake for 20-25 minutes. Let cool completely before cutting.",
            ]),
            category: "Dessert".to_string(),
            prep_time: None,
            cook_time: Some(25),
            servings: None,
            difficulty: Some(Difficulty::Easy),
            author_id: "user-1".to_string(),
            author_name: "Alex Cook".to_string(),
            created_at: yesterday,
            updated_at: yesterday,
            comments: Vec::new(),
            ratings: vec![rating("user-2", 5)],
            tags: strings(&["Chocolate", "Baking"]),
        },
        Recipe {
            id: Uuid::nil(),
            title: "Vegan Lentil Soup".to_string(),
            description: "A hearty and nutritious vegan lentil soup that is packed with flavor and plant-based protein.".to_string(),
            image_url: "https://picsum.photos/seed/lentilsoup/800/600".to_string(),
            ingredients: strings(&[
                "1 tbsp olive oil",
                "1 onion, chopped",
                "2 carrots, chopped",
                "2 celery stalks, chopped",
                "2 cloves garlic, minced",
                "1 cup brown or green lentils, rinsed",
                "4 cups vegetable broth",
                "1 (14.5 ounce) can diced tomatoes",
                "1 tsp dried thyme",
                "Salt and pepper to taste",
            ]),
            instructions: strings(&[
                "Heat olive oil in a large pot over medium heat.",
                "Add onion, carrots, and celery and cook until softened.",
                "Stir in garlic and cook for 1 minute more.",
                "Add lentils, vegetable broth, tomatoes, and thyme.",
                "Bring to a boil, then reduce heat and simmer for 40-50 minutes, or until lentils are tender.",
                "Season with salt and pepper before serving.",
            ]),
            category: "Vegan".to_string(),
            prep_time: Some(15),
            cook_time: Some(50),
            servings: Some(6),
            difficulty: None,
            author_id: "user-3".to_string(),
            author_name: "Sam Vegan".to_string(),
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
            ratings: vec![rating("user-1", 4), rating("user-2", 4)],
            tags: strings(&["Soup", "Healthy"]),
        },
    ]
}

/// Collection pre-populated with `demo_recipes`
pub fn demo_collection(now: DateTime<Utc>) -> RecipeCollection {
    RecipeCollection::from_recipes(demo_recipes(now))
}
