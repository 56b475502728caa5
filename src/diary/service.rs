use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use time::{Date, OffsetDateTime};
use tokio::task::JoinHandle;
use tracing::info;

use super::models::{DailyMeals, Meal, MealSlot};
use super::summary::{summarize, DailySummary};

/// Date-indexed meal diary. Keys are calendar days; any timestamp coming in
/// from the outside is normalized to its day before touching the map.
pub struct MealLedger {
    days: RwLock<HashMap<Date, DailyMeals>>,
    syncing: Arc<AtomicBool>,
    pending_sync: Mutex<Option<JoinHandle<()>>>,
    sync_delay: Duration,
}

impl MealLedger {
    pub fn new(sync_delay: Duration) -> Self {
        Self {
            days: RwLock::new(HashMap::new()),
            syncing: Arc::new(AtomicBool::new(false)),
            pending_sync: Mutex::new(None),
            sync_delay,
        }
    }

    /// Sample plan shown on first launch, before any import happened.
    pub fn seed_sample_day(&self, date: Date) {
        let mut breakfast = Meal::new("Omlet - na słodko a'la sernik", 590.0, 43.0, 22.0, 60.0);
        breakfast.eaten = true;
        let mut lunch = Meal::new(
            "Makaron - z kurczakiem, pieczarkami i ajvarem",
            580.0,
            45.0,
            16.0,
            61.0,
        );
        lunch.eaten = true;
        let snack = Meal::new(
            "Tortilla - z serkiem śmietankowym i serem",
            613.0,
            36.0,
            35.0,
            40.0,
        );

        let mut day = DailyMeals::empty(date);
        day.slots.insert(MealSlot::Breakfast, breakfast);
        day.slots.insert(MealSlot::Lunch, lunch);
        day.slots.insert(MealSlot::Snack, snack);
        self.days
            .write()
            .expect("ledger lock poisoned")
            .insert(date, day);
    }

    pub fn meal(&self, when: OffsetDateTime, slot: MealSlot) -> Option<Meal> {
        self.meal_on(when.date(), slot)
    }

    pub fn meal_on(&self, date: Date, slot: MealSlot) -> Option<Meal> {
        self.days
            .read()
            .expect("ledger lock poisoned")
            .get(&date)
            .and_then(|day| day.slots.get(&slot))
            .cloned()
    }

    pub fn meals(&self, when: OffsetDateTime) -> Vec<Meal> {
        self.meals_on(when.date())
    }

    /// Snapshot of the whole day, empty when nothing is planned yet.
    pub fn day_on(&self, date: Date) -> DailyMeals {
        self.days
            .read()
            .expect("ledger lock poisoned")
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyMeals::empty(date))
    }

    /// Occupied slots for the date, in fixed slot order. At most four entries.
    pub fn meals_on(&self, date: Date) -> Vec<Meal> {
        self.days
            .read()
            .expect("ledger lock poisoned")
            .get(&date)
            .map(|day| day.meals().cloned().collect())
            .unwrap_or_default()
    }

    pub fn toggle_eaten(&self, when: OffsetDateTime, slot: MealSlot) {
        self.toggle_eaten_on(when.date(), slot);
    }

    /// Flips the eaten flag of the meal in `slot`. A day entry is created on
    /// demand; an empty slot is left alone.
    pub fn toggle_eaten_on(&self, date: Date, slot: MealSlot) {
        let mut days = self.days.write().expect("ledger lock poisoned");
        let day = days.entry(date).or_insert_with(|| DailyMeals::empty(date));
        if let Some(meal) = day.slots.get_mut(&slot) {
            meal.eaten = !meal.eaten;
        }
    }

    /// Inserts a meal, replacing whatever occupied the slot.
    pub fn put_meal(&self, date: Date, slot: MealSlot, meal: Meal) {
        let mut days = self.days.write().expect("ledger lock poisoned");
        let day = days.entry(date).or_insert_with(|| DailyMeals::empty(date));
        day.slots.insert(slot, meal);
    }

    pub fn summary_on(&self, date: Date) -> DailySummary {
        summarize(&self.meals_on(date))
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Simulated remote sync: raises the loading flag and clears it after the
    /// configured delay. Triggering again restarts the countdown instead of
    /// stacking a second completion.
    pub fn sync(&self) {
        let mut pending = self.pending_sync.lock().expect("sync lock poisoned");
        if let Some(task) = pending.take() {
            task.abort();
        }
        self.syncing.store(true, Ordering::SeqCst);
        info!(delay_ms = self.sync_delay.as_millis() as u64, "sync started");

        let syncing = Arc::clone(&self.syncing);
        let delay = self.sync_delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            syncing.store(false, Ordering::SeqCst);
            info!("sync finished");
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn ledger() -> Arc<MealLedger> {
        Arc::new(MealLedger::new(Duration::from_millis(2_000)))
    }

    #[test]
    fn lookups_ignore_time_of_day() {
        let ledger = ledger();
        let morning = datetime!(2025-05-12 06:30 UTC);
        let evening = datetime!(2025-05-12 23:59 UTC);
        ledger.seed_sample_day(morning.date());

        let a = ledger.meal(morning, MealSlot::Breakfast).expect("seeded");
        let b = ledger.meal(evening, MealSlot::Breakfast).expect("seeded");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn toggle_twice_restores_eaten_flag() {
        let ledger = ledger();
        let day = datetime!(2025-05-12 12:00 UTC);
        ledger.seed_sample_day(day.date());

        let before = ledger.meal(day, MealSlot::Snack).expect("seeded").eaten;
        ledger.toggle_eaten(day, MealSlot::Snack);
        assert_eq!(
            ledger.meal(day, MealSlot::Snack).expect("seeded").eaten,
            !before
        );
        ledger.toggle_eaten(day, MealSlot::Snack);
        assert_eq!(
            ledger.meal(day, MealSlot::Snack).expect("seeded").eaten,
            before
        );
    }

    #[test]
    fn toggling_an_empty_slot_is_a_no_op() {
        let ledger = ledger();
        let day = datetime!(2025-05-12 12:00 UTC);

        // No entry for the day yet; this must not panic and must not
        // materialize a meal.
        ledger.toggle_eaten(day, MealSlot::Dinner);
        ledger.toggle_eaten(day, MealSlot::Dinner);
        assert!(ledger.meal(day, MealSlot::Dinner).is_none());
        assert!(ledger.meals(day).is_empty());
    }

    #[test]
    fn meals_returns_slot_order_and_at_most_four() {
        let ledger = ledger();
        let date = datetime!(2025-05-12 12:00 UTC).date();
        for slot in MealSlot::ALL {
            ledger.put_meal(date, slot, Meal::new(slot.label(), 100.0, 0.0, 0.0, 0.0));
        }
        // Overwrite one slot; the count must stay at four.
        ledger.put_meal(date, MealSlot::Lunch, Meal::new("Obiad 2", 100.0, 0.0, 0.0, 0.0));

        let meals = ledger.meals_on(date);
        assert_eq!(meals.len(), 4);
        assert_eq!(meals[0].name, "Śniadanie");
        assert_eq!(meals[1].name, "Obiad 2");
        assert_eq!(meals[3].name, "Przekąska");
    }

    #[test]
    fn sample_day_summary_counts_eaten_only() {
        let ledger = ledger();
        let date = datetime!(2025-05-12 12:00 UTC).date();
        ledger.seed_sample_day(date);
        assert_eq!(ledger.summary_on(date).calories, 1170.0);
    }

    #[tokio::test(start_paused = true)]
    async fn sync_clears_loading_flag_after_delay() {
        let ledger = Arc::new(MealLedger::new(Duration::from_millis(50)));
        ledger.sync();
        assert!(ledger.is_syncing());

        tokio::time::sleep(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;
        assert!(!ledger.is_syncing());
    }

    #[tokio::test(start_paused = true)]
    async fn retriggered_sync_restarts_the_countdown() {
        let ledger = Arc::new(MealLedger::new(Duration::from_millis(50)));
        ledger.sync();
        tokio::time::sleep(Duration::from_millis(30)).await;
        ledger.sync();

        // 30ms after the second trigger the first completion would have fired;
        // it was cancelled, so we are still syncing.
        tokio::time::sleep(Duration::from_millis(30)).await;
        tokio::task::yield_now().await;
        assert!(ledger.is_syncing());

        tokio::time::sleep(Duration::from_millis(30)).await;
        tokio::task::yield_now().await;
        assert!(!ledger.is_syncing());
    }
}
