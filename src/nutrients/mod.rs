//! Static nutrient catalog and recommended concentration ranges.

mod recipe;

pub use recipe::{RangeStatus, RecipeEditor};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientCategory {
    Macro,
    Micro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nutrient {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub category: NutrientCategory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendedRange {
    pub nutrient_id: &'static str,
    pub crop: &'static str,
    pub stage: &'static str,
    pub min: f32,
    pub max: f32,
}

impl RecommendedRange {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A crop and growth stage that exist in the range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub crop: &'static str,
    pub stage: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown crop '{0}' (available: {1})")]
    UnknownCrop(String, String),
    #[error("unknown stage '{stage}' for {crop} (available: {available})")]
    UnknownStage {
        crop: &'static str,
        stage: String,
        available: String,
    },
}

const fn macro_nutrient(id: &'static str, name: &'static str) -> Nutrient {
    Nutrient {
        id,
        name,
        unit: "mg/L",
        category: NutrientCategory::Macro,
    }
}

const fn micro_nutrient(id: &'static str, name: &'static str) -> Nutrient {
    Nutrient {
        id,
        name,
        unit: "mg/L",
        category: NutrientCategory::Micro,
    }
}

const fn range(
    nutrient_id: &'static str,
    crop: &'static str,
    stage: &'static str,
    min: f32,
    max: f32,
) -> RecommendedRange {
    RecommendedRange {
        nutrient_id,
        crop,
        stage,
        min,
        max,
    }
}

pub static NUTRIENTS: &[Nutrient] = &[
    macro_nutrient("N", "Nitrogen"),
    macro_nutrient("P", "Phosphorus (P₂O₅)"),
    macro_nutrient("K", "Potassium"),
    macro_nutrient("Ca", "Calcium"),
    macro_nutrient("Mg", "Magnesium"),
    macro_nutrient("S", "Sulfur"),
    micro_nutrient("Fe", "Iron"),
    micro_nutrient("Mn", "Manganese"),
    micro_nutrient("Zn", "Zinc"),
    micro_nutrient("B", "Boron"),
    micro_nutrient("Cu", "Copper"),
    micro_nutrient("Mo", "Molybdenum"),
];

pub static RECOMMENDED_RANGES: &[RecommendedRange] = &[
    range("N", "Lettuce", "Vegetative", 100.0, 150.0),
    range("P", "Lettuce", "Vegetative", 30.0, 50.0),
    range("K", "Lettuce", "Vegetative", 100.0, 200.0),
    range("Ca", "Lettuce", "Vegetative", 120.0, 150.0),
    range("Mg", "Lettuce", "Vegetative", 40.0, 60.0),
    range("S", "Lettuce", "Vegetative", 50.0, 70.0),
    range("Fe", "Tomato", "Flowering", 2.0, 3.0),
    range("K", "Tomato", "Flowering", 150.0, 250.0),
];

pub fn nutrients() -> &'static [Nutrient] {
    NUTRIENTS
}

pub fn nutrient(id: &str) -> Option<&'static Nutrient> {
    NUTRIENTS.iter().find(|n| n.id == id)
}

/// Recommended ranges for an exact crop and stage. Empty when nothing matches.
pub fn ranges(crop: &str, stage: &str) -> Vec<&'static RecommendedRange> {
    RECOMMENDED_RANGES
        .iter()
        .filter(|r| r.crop == crop && r.stage == stage)
        .collect()
}

/// Distinct crops, in table order.
pub fn crops() -> Vec<&'static str> {
    distinct(RECOMMENDED_RANGES.iter().map(|r| r.crop))
}

/// Distinct stages recorded for `crop`, in table order.
pub fn stages(crop: &str) -> Vec<&'static str> {
    distinct(
        RECOMMENDED_RANGES
            .iter()
            .filter(|r| r.crop == crop)
            .map(|r| r.stage),
    )
}

/// Validate a user-supplied crop and stage (case-insensitive).
///
/// A missing stage resolves to the crop's first stage.
pub fn resolve(crop: &str, stage: Option<&str>) -> Result<Selection, CatalogError> {
    let crop = crops()
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(crop.trim()))
        .ok_or_else(|| CatalogError::UnknownCrop(crop.to_string(), crops().join(", ")))?;

    let available = stages(crop);
    let stage = match stage {
        Some(wanted) => available
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(wanted.trim()))
            .ok_or_else(|| CatalogError::UnknownStage {
                crop,
                stage: wanted.to_string(),
                available: available.join(", "),
            })?,
        // Every crop in the table has at least one stage.
        None => available[0],
    };

    Ok(Selection { crop, stage })
}

fn distinct(items: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
