use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use time::Date;
use tracing::info;

use crate::diary::service::MealLedger;
use crate::errors::AppError;
use crate::shopping::service::ShoppingBoard;

use super::document::{extract_text, Document};
use super::parser::{parse_plan, IMPORTED_CATEGORY};

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub meals_imported: usize,
    pub items_imported: usize,
}

/// Runs a diet-plan import end to end: document text -> parsed records ->
/// ledger and shopping list. Nothing is written unless the whole pipeline
/// succeeded, so a failed import leaves the diary untouched.
pub struct DietImporter {
    ledger: Arc<MealLedger>,
    shopping: Arc<ShoppingBoard>,
    loading: AtomicBool,
}

impl DietImporter {
    pub fn new(ledger: Arc<MealLedger>, shopping: Arc<ShoppingBoard>) -> Self {
        Self {
            ledger,
            shopping,
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Imports the document; meals without an explicit date in the plan land
    /// on `default_date`. The loading flag is cleared on every exit path.
    pub fn import(&self, doc: &dyn Document, default_date: Date) -> Result<ImportReport, AppError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.run(doc, default_date);
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    fn run(&self, doc: &dyn Document, default_date: Date) -> Result<ImportReport, AppError> {
        let text = extract_text(doc)?;
        let plan = parse_plan(&text, default_date)?;

        let report = ImportReport {
            meals_imported: plan.meals.len(),
            items_imported: plan.items.len(),
        };
        for (date, slot, meal) in plan.meals {
            self.ledger.put_meal(date, slot, meal);
        }
        if !plan.items.is_empty() {
            self.shopping.add_items(IMPORTED_CATEGORY, plan.items);
        }

        info!(
            meals = report.meals_imported,
            items = report.items_imported,
            "diet plan imported"
        );
        Ok(report)
    }
}
