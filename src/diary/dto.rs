use serde::Serialize;
use time::Date;
use uuid::Uuid;

use super::models::{DailyMeals, Meal, MealSlot};

#[derive(Debug, Serialize)]
pub struct SlotMeal {
    pub slot: MealSlot,
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub eaten: bool,
}

impl SlotMeal {
    fn from_meal(slot: MealSlot, meal: &Meal) -> Self {
        Self {
            slot,
            id: meal.id,
            name: meal.name.clone(),
            calories: meal.calories,
            protein: meal.protein,
            fat: meal.fat,
            carbs: meal.carbs,
            eaten: meal.eaten,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: Date,
    pub meals: Vec<SlotMeal>,
}

impl From<DailyMeals> for DayResponse {
    fn from(day: DailyMeals) -> Self {
        let meals = day
            .slots
            .iter()
            .map(|(slot, meal)| SlotMeal::from_meal(*slot, meal))
            .collect();
        Self {
            date: day.date,
            meals,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncStatus {
    pub syncing: bool,
}
