use serde::Serialize;

use super::models::Meal;

/// Macro totals for one day, counting only meals marked eaten.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySummary {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Pure projection over the day's meals; recomputed on every read.
pub fn summarize<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> DailySummary {
    meals
        .into_iter()
        .filter(|m| m.eaten)
        .fold(DailySummary::default(), |mut acc, m| {
            acc.calories += m.calories;
            acc.protein += m.protein;
            acc.fat += m.fat;
            acc.carbs += m.carbs;
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary::models::Meal;

    fn meal(name: &str, calories: f64, eaten: bool) -> Meal {
        let mut m = Meal::new(name, calories, 10.0, 5.0, 20.0);
        m.eaten = eaten;
        m
    }

    #[test]
    fn sums_only_eaten_meals() {
        let meals = vec![
            meal("Omlet", 590.0, true),
            meal("Makaron", 580.0, true),
            meal("Tortilla", 613.0, false),
        ];
        let summary = summarize(&meals);
        assert_eq!(summary.calories, 1170.0);
        assert_eq!(summary.protein, 20.0);
    }

    #[test]
    fn empty_day_sums_to_zero() {
        let summary = summarize(std::iter::empty());
        assert_eq!(summary, DailySummary::default());
    }
}
