use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// A user-defined recipe, persisted as part of the dish collection blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomDish {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<serde_bytes::ByteBuf>,
}
