use std::sync::RwLock;

use uuid::Uuid;

use super::models::{MealShoppingGroup, ShoppingCategory, ShoppingItem};

/// The shopping list in its two alternate groupings. The by-category and
/// by-meal collections hold separate item copies; checking an item in one
/// view never touches the other.
pub struct ShoppingBoard {
    by_category: RwLock<Vec<ShoppingCategory>>,
    by_meal: RwLock<Vec<MealShoppingGroup>>,
}

impl ShoppingBoard {
    pub fn new() -> Self {
        Self {
            by_category: RwLock::new(Vec::new()),
            by_meal: RwLock::new(Vec::new()),
        }
    }

    /// Sample list shown on first launch.
    pub fn seed_sample_data(&self) {
        let categories = vec![
            ShoppingCategory {
                name: "Pieczywo".into(),
                items: vec![ShoppingItem::new(
                    "Chleb żytni na zakwasie",
                    "300",
                    "g",
                    "Pieczywo",
                )],
            },
            ShoppingCategory {
                name: "Nabiał".into(),
                items: vec![
                    ShoppingItem::new(
                        "Zott Protein napój mleczny czekoladowy",
                        "500",
                        "g",
                        "Nabiał",
                    ),
                    ShoppingItem::new("Jaja kurze całe", "448", "g", "Nabiał"),
                ],
            },
            ShoppingCategory {
                name: "Owoce i warzywa".into(),
                items: vec![
                    ShoppingItem::new("Ogórki, kiszone", "300", "g", "Owoce i warzywa"),
                    ShoppingItem::new("Rukola", "120", "g", "Owoce i warzywa"),
                    ShoppingItem::new("Czosnek", "40", "g", "Owoce i warzywa"),
                ],
            },
            ShoppingCategory {
                name: "Orzechy i nasiona".into(),
                items: vec![ShoppingItem::new(
                    "Masło orzechowe",
                    "70",
                    "g",
                    "Orzechy i nasiona",
                )],
            },
        ];

        let meals = vec![
            MealShoppingGroup {
                meal_name: "Omlet - na słodko a'la sernik".into(),
                servings: 2,
                items: vec![
                    ShoppingItem::new("Jaja kurze całe", "112", "g", "Nabiał"),
                    ShoppingItem::new("Masło orzechowe", "40", "g", "Orzechy"),
                ],
            },
            MealShoppingGroup {
                meal_name: "Owsianka - nocna czekoladowa ze śliwkami".into(),
                servings: 2,
                items: vec![ShoppingItem::new("Masło orzechowe", "30", "g", "Orzechy")],
            },
            MealShoppingGroup {
                meal_name: "Grzanki - z mozzarellą, fasolką".into(),
                servings: 2,
                items: vec![ShoppingItem::new(
                    "Chleb żytni na zakwasie",
                    "120",
                    "g",
                    "Pieczywo",
                )],
            },
            MealShoppingGroup {
                meal_name: "Bułka - z twarożkiem i serem".into(),
                servings: 2,
                items: vec![ShoppingItem::new(
                    "Dynia, pestki, łuskane",
                    "10",
                    "g",
                    "Orzechy",
                )],
            },
        ];

        *self.by_category.write().expect("shopping lock poisoned") = categories;
        *self.by_meal.write().expect("shopping lock poisoned") = meals;
    }

    pub fn categories(&self) -> Vec<ShoppingCategory> {
        self.by_category
            .read()
            .expect("shopping lock poisoned")
            .clone()
    }

    pub fn meal_groups(&self) -> Vec<MealShoppingGroup> {
        self.by_meal.read().expect("shopping lock poisoned").clone()
    }

    /// Flips the checked flag of an item in the by-category view. Silently
    /// does nothing when the category (first match by name) or the item is
    /// not there.
    pub fn toggle_item_in_category(&self, category_name: &str, item_id: Uuid) {
        let mut categories = self.by_category.write().expect("shopping lock poisoned");
        if let Some(category) = categories.iter_mut().find(|c| c.name == category_name) {
            if let Some(item) = category.items.iter_mut().find(|i| i.id == item_id) {
                item.is_checked = !item.is_checked;
            }
        }
    }

    /// Same as `toggle_item_in_category`, on the by-meal view.
    pub fn toggle_item_in_meal(&self, meal_name: &str, item_id: Uuid) {
        let mut groups = self.by_meal.write().expect("shopping lock poisoned");
        if let Some(group) = groups.iter_mut().find(|g| g.meal_name == meal_name) {
            if let Some(item) = group.items.iter_mut().find(|i| i.id == item_id) {
                item.is_checked = !item.is_checked;
            }
        }
    }

    /// Appends imported items to the by-category view. Toggles resolve a
    /// category by first name match, so items land in an existing category
    /// of that name instead of a duplicate block.
    pub fn add_items(&self, category_name: &str, items: Vec<ShoppingItem>) {
        let mut categories = self.by_category.write().expect("shopping lock poisoned");
        if let Some(category) = categories.iter_mut().find(|c| c.name == category_name) {
            category.items.extend(items);
        } else {
            categories.push(ShoppingCategory {
                name: category_name.to_string(),
                items,
            });
        }
    }
}

impl Default for ShoppingBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ShoppingBoard {
        let board = ShoppingBoard::new();
        board.seed_sample_data();
        board
    }

    #[test]
    fn toggle_flips_only_the_addressed_item() {
        let board = seeded();
        let id = board.categories()[1].items[0].id;

        board.toggle_item_in_category("Nabiał", id);
        let categories = board.categories();
        assert!(categories[1].items[0].is_checked);
        assert!(!categories[1].items[1].is_checked);

        board.toggle_item_in_category("Nabiał", id);
        assert!(!board.categories()[1].items[0].is_checked);
    }

    #[test]
    fn category_toggle_never_leaks_into_meal_view() {
        let board = seeded();
        // "Jaja kurze całe" exists in both views with separate identities.
        let id = board.categories()[1].items[1].id;
        board.toggle_item_in_category("Nabiał", id);

        assert!(board
            .meal_groups()
            .iter()
            .flat_map(|g| g.items.iter())
            .all(|i| !i.is_checked));
    }

    #[test]
    fn meal_toggle_never_leaks_into_category_view() {
        let board = seeded();
        let id = board.meal_groups()[0].items[0].id;
        board.toggle_item_in_meal("Omlet - na słodko a'la sernik", id);

        assert!(board.meal_groups()[0].items[0].is_checked);
        assert!(board
            .categories()
            .iter()
            .flat_map(|c| c.items.iter())
            .all(|i| !i.is_checked));
    }

    #[test]
    fn added_items_merge_into_an_existing_category() {
        let board = ShoppingBoard::new();
        board.add_items(
            "Importowane",
            vec![ShoppingItem::new("Jaja kurze całe", "112", "g", "Importowane")],
        );
        board.add_items(
            "Importowane",
            vec![ShoppingItem::new("Mleko", "200", "ml", "Importowane")],
        );

        let categories = board.categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].items.len(), 2);

        // Items from the second batch stay reachable through the
        // first-match category lookup.
        let second_id = categories[0].items[1].id;
        board.toggle_item_in_category("Importowane", second_id);
        assert!(board.categories()[0].items[1].is_checked);
    }

    #[test]
    fn toggles_against_unknown_targets_are_no_ops() {
        let board = seeded();
        board.toggle_item_in_category("Mrożonki", Uuid::new_v4());
        board.toggle_item_in_category("Nabiał", Uuid::new_v4());
        board.toggle_item_in_meal("Nieznany", Uuid::new_v4());

        assert!(board
            .categories()
            .iter()
            .flat_map(|c| c.items.iter())
            .all(|i| !i.is_checked));
    }
}
