//! Line scanner for imported diet plans.
//!
//! The plans we receive are loosely formatted, so the grammar is line based:
//! - `DD.MM.YYYY` anywhere in a line switches the day the following meals
//!   belong to (until the next date line);
//! - a line containing a meal-slot keyword (Śniadanie, Obiad, Kolacja,
//!   Przekąska) starts a meal; the text after the keyword is the meal name,
//!   and `NNN kcal`, `B: NN`, `T: NN`, `W: NN` annotations on the same line
//!   are the macros (0 when absent);
//! - a line of the shape `<name> <amount> <unit>` with a known unit
//!   (g, ml, szt) is a shopping-list ingredient.

use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, Month};

use crate::diary::models::{Meal, MealSlot};
use crate::errors::AppError;
use crate::shopping::models::ShoppingItem;

/// Category assigned to ingredients coming from an imported plan.
pub const IMPORTED_CATEGORY: &str = "Importowane";

lazy_static! {
    static ref DATE_LINE: Regex = Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").expect("date regex");
    static ref KCAL: Regex = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*kcal").expect("kcal regex");
    static ref PROTEIN: Regex = Regex::new(r"B:\s*(\d+(?:[.,]\d+)?)").expect("protein regex");
    static ref FAT: Regex = Regex::new(r"T:\s*(\d+(?:[.,]\d+)?)").expect("fat regex");
    static ref CARBS: Regex = Regex::new(r"W:\s*(\d+(?:[.,]\d+)?)").expect("carbs regex");
    static ref INGREDIENT: Regex =
        Regex::new(r"^(?P<name>\p{L}[\p{L}\p{N} ,'\-]*?)\s+(?P<amount>\d+(?:[.,]\d+)?)\s*(?P<unit>g|ml|szt)\.?\s*$")
            .expect("ingredient regex");
}

#[derive(Debug)]
pub struct ParsedPlan {
    pub meals: Vec<(Date, MealSlot, Meal)>,
    pub items: Vec<ShoppingItem>,
}

/// Scans the extracted text. Meals with no date line in scope land on
/// `default_date`. Fails with `ParseFailure` when not a single meal or
/// ingredient could be constructed.
pub fn parse_plan(text: &str, default_date: Date) -> Result<ParsedPlan, AppError> {
    let mut current_date = default_date;
    let mut meals = Vec::new();
    let mut items = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(date) = parse_date_line(line) {
            current_date = date;
            continue;
        }

        if let Some((slot, meal)) = parse_meal_header(line) {
            meals.push((current_date, slot, meal));
            continue;
        }

        if let Some(item) = parse_ingredient_line(line) {
            items.push(item);
        }
    }

    if meals.is_empty() && items.is_empty() {
        return Err(AppError::ParseFailure(
            "the document contains no recognizable meals or ingredients".into(),
        ));
    }
    Ok(ParsedPlan { meals, items })
}

fn parse_date_line(line: &str) -> Option<Date> {
    let caps = DATE_LINE.captures(line)?;
    let day: u8 = caps[1].parse().ok()?;
    let month: u8 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

fn parse_meal_header(line: &str) -> Option<(MealSlot, Meal)> {
    let slot = MealSlot::ALL
        .into_iter()
        .find(|slot| line.contains(slot.label()))?;

    let after_keyword = line
        .split_once(slot.label())
        .map(|(_, rest)| rest)
        .unwrap_or("");
    // Name is the remainder up to any macro annotation, minus separators.
    let name = after_keyword
        .split(&['(', '–'][..])
        .next()
        .unwrap_or("")
        .trim_matches(&[':', '-', ' '][..])
        .trim();
    let name = if name.is_empty() { slot.label() } else { name };

    let mut meal = Meal::new(
        name,
        number_in(&KCAL, line),
        number_in(&PROTEIN, line),
        number_in(&FAT, line),
        number_in(&CARBS, line),
    );
    meal.eaten = false;
    Some((slot, meal))
}

fn parse_ingredient_line(line: &str) -> Option<ShoppingItem> {
    let caps = INGREDIENT.captures(line)?;
    Some(ShoppingItem::new(
        caps["name"].trim(),
        &caps["amount"].replace(',', "."),
        &caps["unit"],
        IMPORTED_CATEGORY,
    ))
}

fn number_in(re: &Regex, line: &str) -> f64 {
    re.captures(line)
        .and_then(|caps| caps[1].replace(',', ".").parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const PLAN: &str = r#"
Jadłospis — tydzień 20

Poniedziałek 12.05.2025
Śniadanie: Omlet - na słodko a'la sernik (590 kcal, B: 43, T: 22, W: 60)
Jaja kurze całe 112 g
Masło orzechowe 40 g
Obiad: Makaron z kurczakiem (580 kcal, B: 45, T: 16, W: 61)
Mleko 200 ml
Jajka 2 szt

Wtorek 13.05.2025
Kolacja: Tortilla z serkiem (613 kcal, B: 36, T: 35, W: 40)
"#;

    #[test]
    fn parses_meals_under_their_date_lines() {
        let plan = parse_plan(PLAN, date!(2025 - 01 - 01)).expect("plan parses");
        assert_eq!(plan.meals.len(), 3);

        let (date, slot, meal) = &plan.meals[0];
        assert_eq!(*date, date!(2025 - 05 - 12));
        assert_eq!(*slot, MealSlot::Breakfast);
        assert_eq!(meal.name, "Omlet - na słodko a'la sernik");
        assert_eq!(meal.calories, 590.0);
        assert_eq!(meal.protein, 43.0);
        assert!(!meal.eaten);

        let (date, slot, _) = &plan.meals[2];
        assert_eq!(*date, date!(2025 - 05 - 13));
        assert_eq!(*slot, MealSlot::Dinner);
    }

    #[test]
    fn parses_ingredients_with_all_known_units() {
        let plan = parse_plan(PLAN, date!(2025 - 01 - 01)).expect("plan parses");
        assert_eq!(plan.items.len(), 4);
        assert_eq!(plan.items[0].name, "Jaja kurze całe");
        assert_eq!(plan.items[0].quantity, "112");
        assert_eq!(plan.items[0].unit, "g");
        assert_eq!(plan.items[2].unit, "ml");
        assert_eq!(plan.items[3].unit, "szt");
        assert!(plan.items.iter().all(|i| i.category == IMPORTED_CATEGORY));
    }

    #[test]
    fn meals_without_a_date_line_use_the_default_date() {
        let plan = parse_plan(
            "Przekąska: Jogurt naturalny (150 kcal)",
            date!(2025 - 05 - 20),
        )
        .expect("plan parses");
        assert_eq!(plan.meals.len(), 1);
        assert_eq!(plan.meals[0].0, date!(2025 - 05 - 20));
        assert_eq!(plan.meals[0].1, MealSlot::Snack);
        assert_eq!(plan.meals[0].2.carbs, 0.0);
    }

    #[test]
    fn header_without_annotations_falls_back_to_zero_macros() {
        let plan = parse_plan("Obiad: Zupa pomidorowa", date!(2025 - 05 - 20)).expect("parses");
        let meal = &plan.meals[0].2;
        assert_eq!(meal.name, "Zupa pomidorowa");
        assert_eq!(meal.calories, 0.0);
    }

    #[test]
    fn text_without_any_records_is_a_parse_failure() {
        let err = parse_plan("Wstęp do jadłospisu\nDużo zdrowia!", date!(2025 - 05 - 20))
            .expect_err("nothing to parse");
        assert!(matches!(err, AppError::ParseFailure(_)));
    }

    #[test]
    fn prose_mentioning_grams_is_not_an_ingredient() {
        // "2000 g" sits mid-sentence, the line must not become an item.
        let err = parse_plan(
            "Pij wodę i jedz 2000 g warzyw tygodniowo bo tak",
            date!(2025 - 05 - 20),
        )
        .expect_err("no records");
        assert!(matches!(err, AppError::ParseFailure(_)));
    }
}
