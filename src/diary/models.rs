use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// One meal in the diary. Identity is fixed at creation; everything else is
/// editable from the diary screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default)]
    pub eaten: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<serde_bytes::ByteBuf>,
}

impl Meal {
    pub fn new(name: &str, calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            calories,
            protein,
            fat,
            carbs,
            eaten: false,
            image_data: None,
        }
    }
}

/// The four diary slots of a day. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    /// Polish display label, as printed in the diet plans we import.
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Śniadanie",
            MealSlot::Lunch => "Obiad",
            MealSlot::Dinner => "Kolacja",
            MealSlot::Snack => "Przekąska",
        }
    }
}

impl std::str::FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            other => Err(format!("unknown meal slot: {other}")),
        }
    }
}

/// All meals of one calendar day, at most one per slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMeals {
    pub date: Date,
    pub slots: BTreeMap<MealSlot, Meal>,
}

impl DailyMeals {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            slots: BTreeMap::new(),
        }
    }

    /// Occupied slots in fixed slot order (the map is keyed by `MealSlot`,
    /// whose ordering is the display order).
    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        self.slots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_is_breakfast_lunch_dinner_snack() {
        let mut day = DailyMeals::empty(time::macros::date!(2025 - 05 - 12));
        day.slots.insert(MealSlot::Snack, Meal::new("s", 1.0, 0.0, 0.0, 0.0));
        day.slots.insert(MealSlot::Breakfast, Meal::new("b", 2.0, 0.0, 0.0, 0.0));
        day.slots.insert(MealSlot::Dinner, Meal::new("d", 3.0, 0.0, 0.0, 0.0));
        day.slots.insert(MealSlot::Lunch, Meal::new("l", 4.0, 0.0, 0.0, 0.0));

        let names: Vec<&str> = day.meals().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "l", "d", "s"]);
    }

    #[test]
    fn slot_parses_from_path_segment() {
        assert_eq!("breakfast".parse::<MealSlot>(), Ok(MealSlot::Breakfast));
        assert!("brunch".parse::<MealSlot>().is_err());
    }

    #[test]
    fn meal_serializes_without_absent_image() {
        let json = serde_json::to_string(&Meal::new("Omlet", 590.0, 43.0, 22.0, 60.0))
            .expect("serialize meal");
        assert!(json.contains("\"name\":\"Omlet\""));
        assert!(!json.contains("image_data"));
    }
}
