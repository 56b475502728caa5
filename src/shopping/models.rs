use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    /// Amount as printed on the shopping list, e.g. "300".
    pub quantity: String,
    pub unit: String,
    #[serde(default)]
    pub is_checked: bool,
    pub category: String,
}

impl ShoppingItem {
    pub fn new(name: &str, quantity: &str, unit: &str, category: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            is_checked: false,
            category: category.to_string(),
        }
    }
}

/// Items grouped by store category ("by category" view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingCategory {
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

/// Items grouped by the meal they belong to ("by meal" view). This is an
/// independent copy of the items, not a projection of the category view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealShoppingGroup {
    pub meal_name: String,
    pub servings: u32,
    pub items: Vec<ShoppingItem>,
}
