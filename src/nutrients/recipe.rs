use std::collections::BTreeMap;

use super::{nutrients, ranges, Nutrient, RecommendedRange};

/// Slider bound for nutrients without a recommended range.
pub const DEFAULT_SLIDER_MAX: f32 = 300.0;

/// Snapshot of every nutrient value for one crop and stage.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientRecipe {
    pub crop: String,
    pub stage: String,
    pub values: BTreeMap<String, f32>,
}

/// Where a value sits relative to its recommended range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    Below,
    Within,
    Above,
    Unranged,
}

impl RangeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RangeStatus::Below => "low",
            RangeStatus::Within => "ok",
            RangeStatus::Above => "high",
            RangeStatus::Unranged => "",
        }
    }
}

/// One editable row: a catalog nutrient, its recommended range (if any) and
/// the current value.
#[derive(Debug, Clone)]
pub struct RecipeRow {
    pub nutrient: &'static Nutrient,
    pub range: Option<&'static RecommendedRange>,
    pub value: f32,
}

impl RecipeRow {
    /// Upper slider bound: the recommended maximum, or [`DEFAULT_SLIDER_MAX`].
    pub fn max(&self) -> f32 {
        self.range.map_or(DEFAULT_SLIDER_MAX, |r| r.max)
    }

    pub fn initial_value(&self) -> f32 {
        self.range.map_or(0.0, |r| r.min)
    }

    pub fn status(&self) -> RangeStatus {
        match self.range {
            None => RangeStatus::Unranged,
            Some(r) if r.contains(self.value) => RangeStatus::Within,
            Some(r) if self.value < r.min => RangeStatus::Below,
            Some(_) => RangeStatus::Above,
        }
    }
}

/// Per-nutrient slider state for a crop and stage.
#[derive(Debug, Clone)]
pub struct RecipeEditor {
    crop: String,
    stage: String,
    rows: Vec<RecipeRow>,
}

impl RecipeEditor {
    pub fn new(crop: &str, stage: &str) -> Self {
        let ranges = ranges(crop, stage);
        let rows = nutrients()
            .iter()
            .map(|nutrient| {
                let range = ranges.iter().copied().find(|r| r.nutrient_id == nutrient.id);
                let mut row = RecipeRow {
                    nutrient,
                    range,
                    value: 0.0,
                };
                row.value = row.initial_value();
                row
            })
            .collect();

        Self {
            crop: crop.to_string(),
            stage: stage.to_string(),
            rows,
        }
    }

    pub fn crop(&self) -> &str {
        &self.crop
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn rows(&self) -> &[RecipeRow] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&RecipeRow> {
        self.rows.iter().find(|r| r.nutrient.id == id)
    }

    pub fn status(&self, id: &str) -> Option<RangeStatus> {
        self.row(id).map(RecipeRow::status)
    }

    /// Set the value at `index`, clamped to the row's slider bounds.
    /// Returns the stored value, or `None` for an out-of-range index.
    pub fn set(&mut self, index: usize, value: f32) -> Option<f32> {
        let row = self.rows.get_mut(index)?;
        row.value = value.clamp(0.0, row.max());
        Some(row.value)
    }

    pub fn adjust(&mut self, index: usize, delta: f32) -> Option<f32> {
        let current = self.rows.get(index)?.value;
        self.set(index, current + delta)
    }

    /// Restore every row to its initial value.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.value = row.initial_value();
        }
    }

    pub fn recipe(&self) -> NutrientRecipe {
        NutrientRecipe {
            crop: self.crop.clone(),
            stage: self.stage.clone(),
            values: self
                .rows
                .iter()
                .map(|r| (r.nutrient.id.to_string(), r.value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(editor: &RecipeEditor, id: &str) -> usize {
        editor
            .rows()
            .iter()
            .position(|r| r.nutrient.id == id)
            .expect("nutrient in catalog")
    }

    #[test]
    fn new_editor_starts_at_recommended_minimum() {
        let editor = RecipeEditor::new("Lettuce", "Vegetative");
        assert_eq!(editor.rows().len(), 12);
        assert_eq!(editor.row("N").map(|r| r.value), Some(100.0));
        assert_eq!(editor.row("Ca").map(|r| r.value), Some(120.0));
        assert_eq!(editor.row("Fe").map(|r| r.value), Some(0.0));
    }

    #[test]
    fn slider_bound_falls_back_without_range() {
        let editor = RecipeEditor::new("Tomato", "Flowering");
        assert_eq!(editor.row("K").map(RecipeRow::max), Some(250.0));
        assert_eq!(editor.row("N").map(RecipeRow::max), Some(DEFAULT_SLIDER_MAX));
    }

    #[test]
    fn set_clamps_to_slider_bounds() {
        let mut editor = RecipeEditor::new("Lettuce", "Vegetative");
        let n = index_of(&editor, "N");
        assert_eq!(editor.set(n, 500.0), Some(150.0));
        assert_eq!(editor.set(n, -3.0), Some(0.0));
        assert_eq!(editor.set(99, 1.0), None);
    }

    #[test]
    fn status_tracks_recommended_range() {
        let mut editor = RecipeEditor::new("Lettuce", "Vegetative");
        let p = index_of(&editor, "P");
        assert_eq!(editor.status("P"), Some(RangeStatus::Within));
        editor.adjust(p, -5.0);
        assert_eq!(editor.status("P"), Some(RangeStatus::Below));
        assert_eq!(editor.status("Zn"), Some(RangeStatus::Unranged));
        assert_eq!(editor.status("Xx"), None);
    }

    #[test]
    fn status_reports_values_above_range() {
        let row = RecipeRow {
            nutrient: &crate::nutrients::NUTRIENTS[0],
            range: crate::nutrients::ranges("Lettuce", "Vegetative").first().copied(),
            value: 151.0,
        };
        assert_eq!(row.status(), RangeStatus::Above);
    }

    #[test]
    fn recipe_snapshot_holds_every_value() {
        let mut editor = RecipeEditor::new("Lettuce", "Vegetative");
        let k = index_of(&editor, "K");
        editor.adjust(k, 25.0);
        let recipe = editor.recipe();
        assert_eq!(recipe.crop, "Lettuce");
        assert_eq!(recipe.stage, "Vegetative");
        assert_eq!(recipe.values.len(), 12);
        assert_eq!(recipe.values.get("K"), Some(&125.0));

        editor.reset();
        assert_eq!(editor.recipe().values.get("K"), Some(&100.0));
    }

    #[test]
    fn unknown_selection_has_no_ranges() {
        let editor = RecipeEditor::new("Basil", "Seedling");
        assert!(editor.rows().iter().all(|r| r.range.is_none() && r.value == 0.0));
    }
}
