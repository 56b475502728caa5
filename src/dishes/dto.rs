use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{CustomDish, Ingredient};

#[derive(Debug, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<NewIngredient>,
    #[serde(default)]
    pub instructions: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default)]
    pub image_data: Option<serde_bytes::ByteBuf>,
}

impl From<CreateDishRequest> for CustomDish {
    fn from(req: CreateDishRequest) -> Self {
        CustomDish {
            id: Uuid::new_v4(),
            name: req.name,
            ingredients: req
                .ingredients
                .into_iter()
                .map(|i| Ingredient {
                    id: Uuid::new_v4(),
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                })
                .collect(),
            instructions: req.instructions,
            calories: req.calories,
            protein: req.protein,
            fat: req.fat,
            carbs: req.carbs,
            image_data: req.image_data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedDishResponse {
    pub id: Uuid,
}
