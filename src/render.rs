//! Mapping an analysis result onto the text shown in the results card.

use chrono::{DateTime, Local};

use crate::models::{AnalysisResult, Confidence};

/// Shown for any value the backend could not estimate
pub const MISSING_VALUE: &str = "—";

/// Shown when the backend did not name the dish
pub const FALLBACK_DISH_NAME: &str = "Неизвестное блюдо";

/// Joins the parts of the annotation line
pub const ANNOTATION_SEPARATOR: &str = " • ";

/// Ready-to-display strings for the results card
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub dish_name: String,
    pub calories: String,
    pub proteins: String,
    pub fats: String,
    pub carbs: String,
    /// Portion, confidence and notes; may be empty
    pub annotation: String,
    pub analyzed_at: Option<String>,
}

impl ResultView {
    pub fn new(result: &AnalysisResult, analyzed_at: Option<DateTime<Local>>) -> Self {
        let dish_name = result
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_DISH_NAME)
            .to_string();

        Self {
            dish_name,
            calories: format_value(result.calories),
            proteins: format_value(result.proteins),
            fats: format_value(result.fats),
            carbs: format_value(result.carbs),
            annotation: annotation(result),
            analyzed_at: analyzed_at.map(|at| at.format("%H:%M").to_string()),
        }
    }
}

/// Append `unit` to a rendered value, leaving the missing-value dash bare.
pub fn with_unit(value: &str, unit: &str) -> String {
    if value == MISSING_VALUE {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

/// Human-readable confidence; unrecognised levels render as nothing.
pub fn confidence_label(confidence: &Confidence) -> &'static str {
    match confidence {
        Confidence::High => "Высокая точность",
        Confidence::Medium => "Средняя точность",
        Confidence::Low => "Низкая точность",
        Confidence::Unknown(_) => "",
    }
}

fn annotation(result: &AnalysisResult) -> String {
    let weight = result
        .weight
        .map(|grams| format!("~{} г", format_number(grams)))
        .unwrap_or_default();
    let confidence = result
        .confidence
        .as_ref()
        .map(confidence_label)
        .unwrap_or_default();
    let notes = result.notes.as_deref().map(str::trim).unwrap_or_default();

    [weight.as_str(), confidence, notes]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(ANNOTATION_SEPARATOR)
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(format_number)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// At most one decimal, no trailing zeros: `180.0` -> `180`, `8.5` -> `8.5`.
fn format_number(value: f64) -> String {
    let text = format!("{:.1}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salad() -> AnalysisResult {
        serde_json::from_str(
            r#"{"product_name": "Salad", "calories": 180, "proteins": 5, "fats": 14, "carbs": 9}"#,
        )
        .unwrap()
    }

    #[test]
    fn renders_known_values() {
        let view = ResultView::new(&salad(), None);
        assert_eq!(view.dish_name, "Salad");
        assert_eq!(view.calories, "180");
        assert_eq!(view.proteins, "5");
        assert_eq!(view.annotation, "");
        assert_eq!(view.analyzed_at, None);
    }

    #[test]
    fn missing_values_render_as_dash() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"product_name": "Salad", "calories": 180}"#).unwrap();
        let view = ResultView::new(&result, None);
        assert_eq!(view.proteins, MISSING_VALUE);
        assert_eq!(view.fats, MISSING_VALUE);
        assert_eq!(view.carbs, MISSING_VALUE);
    }

    #[test]
    fn blank_name_uses_fallback() {
        let result = AnalysisResult {
            product_name: Some("  ".to_string()),
            ..AnalysisResult::default()
        };
        assert_eq!(ResultView::new(&result, None).dish_name, FALLBACK_DISH_NAME);
        assert_eq!(
            ResultView::new(&AnalysisResult::default(), None).dish_name,
            FALLBACK_DISH_NAME
        );
    }

    #[test]
    fn annotation_joins_present_parts_in_order() {
        let result = AnalysisResult {
            weight: Some(250.0),
            confidence: Some(Confidence::High),
            notes: Some("с майонезом".to_string()),
            ..salad()
        };
        assert_eq!(
            ResultView::new(&result, None).annotation,
            "~250 г • Высокая точность • с майонезом"
        );
    }

    #[test]
    fn unknown_confidence_contributes_nothing() {
        let result = AnalysisResult {
            confidence: Some(Confidence::Unknown("certain".to_string())),
            notes: Some("домашнее".to_string()),
            ..salad()
        };
        let view = ResultView::new(&result, None);
        assert_eq!(view.annotation, "домашнее");
        assert!(!view.annotation.contains("undefined"));
    }

    #[test]
    fn units_only_follow_known_values() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"calories": 180, "proteins": 5}"#).unwrap();
        let view = ResultView::new(&result, None);
        assert_eq!(with_unit(&view.calories, "ккал"), "180 ккал");
        assert_eq!(with_unit(&view.proteins, "г"), "5 г");
        assert_eq!(with_unit(&view.fats, "г"), MISSING_VALUE);
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(180.0), "180");
        assert_eq!(format_number(8.5), "8.5");
        assert_eq!(format_number(12.04), "12");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.01), "0");
    }
}
