pub mod choices;
pub mod coerce;

use std::collections::HashMap;

use serde::Serialize;

pub use coerce::{parse_float, parse_int, Coerced};

/// Every key of the prediction request body, in wire order.
pub const FIELD_NAMES: [&str; 11] = [
    "age",
    "study_hours",
    "class_attendance",
    "sleep_hours",
    "gender",
    "course",
    "internet_access",
    "sleep_quality",
    "study_method",
    "facility_rating",
    "exam_difficulty",
];

/// One submission's worth of student attributes, as sent to the prediction service.
///
/// Built fresh from the raw form values on every submit and dropped once the
/// request completes. Numeric fields never fail to build: unparseable input
/// becomes [`Coerced::Invalid`]. A categorical field missing from the form is
/// `None` and goes out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInput {
    pub age: Coerced<i64>,
    pub study_hours: Coerced<f64>,
    pub class_attendance: Coerced<f64>,
    pub sleep_hours: Coerced<f64>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub internet_access: Option<String>,
    pub sleep_quality: Option<String>,
    pub study_method: Option<String>,
    pub facility_rating: Option<String>,
    pub exam_difficulty: Option<String>,
}

impl FormInput {
    /// Extracts and coerces all eleven fields from the submitted form values.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let raw = |name: &str| fields.get(name).map(String::as_str);
        let text = |name: &str| fields.get(name).cloned();

        Self {
            age: raw("age").map_or(Coerced::Invalid, parse_int),
            study_hours: raw("study_hours").map_or(Coerced::Invalid, parse_float),
            class_attendance: raw("class_attendance").map_or(Coerced::Invalid, parse_float),
            sleep_hours: raw("sleep_hours").map_or(Coerced::Invalid, parse_float),
            gender: text("gender"),
            course: text("course"),
            internet_access: text("internet_access"),
            sleep_quality: text("sleep_quality"),
            study_method: text("study_method"),
            facility_rating: text("facility_rating"),
            exam_difficulty: text("exam_difficulty"),
        }
    }

    /// Numeric fields that fell back to the sentinel. Used for logging only.
    pub fn invalid_numeric_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if self.age.is_invalid() {
            invalid.push("age");
        }
        if self.study_hours.is_invalid() {
            invalid.push("study_hours");
        }
        if self.class_attendance.is_invalid() {
            invalid.push("class_attendance");
        }
        if self.sleep_hours.is_invalid() {
            invalid.push("sleep_hours");
        }
        invalid
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{json, Value};

    pub(crate) fn sample_fields() -> HashMap<String, String> {
        [
            ("age", "20"),
            ("study_hours", "4.5"),
            ("class_attendance", "85"),
            ("sleep_hours", "7"),
            ("gender", "female"),
            ("course", "b.tech"),
            ("internet_access", "yes"),
            ("sleep_quality", "good"),
            ("study_method", "self-study"),
            ("facility_rating", "medium"),
            ("exam_difficulty", "moderate"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_body_has_exactly_the_documented_keys() {
        let input = FormInput::from_fields(&sample_fields());
        let body = serde_json::to_value(&input).unwrap();
        let obj = body.as_object().unwrap();

        assert_eq!(obj.len(), FIELD_NAMES.len());
        for name in FIELD_NAMES {
            assert!(obj.contains_key(name), "missing key {name}");
        }
    }

    #[test]
    fn test_body_types_are_coerced() {
        let input = FormInput::from_fields(&sample_fields());
        let body = serde_json::to_value(&input).unwrap();

        assert!(body["age"].is_i64());
        assert_eq!(body["age"], json!(20));
        assert!(body["study_hours"].is_f64());
        assert_eq!(body["study_hours"], json!(4.5));
        assert_eq!(body["class_attendance"], json!(85.0));
        assert_eq!(body["sleep_hours"], json!(7.0));
        assert_eq!(body["course"], json!("b.tech"));
        assert_eq!(body["study_method"], json!("self-study"));
    }

    #[test]
    fn test_body_key_order_matches_wire_order() {
        let input = FormInput::from_fields(&sample_fields());
        let text = serde_json::to_string(&input).unwrap();
        let positions: Vec<usize> = FIELD_NAMES
            .iter()
            .map(|name| text.find(&format!("\"{name}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_non_numeric_input_passes_through_as_null() {
        let mut fields = sample_fields();
        fields.insert("age".into(), "twenty".into());
        fields.insert("sleep_hours".into(), "".into());

        let input = FormInput::from_fields(&fields);
        assert!(input.age.is_invalid());
        assert_eq!(input.invalid_numeric_fields(), vec!["age", "sleep_hours"]);

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["age"], Value::Null);
        assert_eq!(body["sleep_hours"], Value::Null);
        assert_eq!(body["study_hours"], json!(4.5));
    }

    #[test]
    fn test_missing_fields_become_null() {
        let input = FormInput::from_fields(&HashMap::new());
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body.as_object().unwrap().len(), FIELD_NAMES.len());
        assert!(body.as_object().unwrap().values().all(Value::is_null));
    }
}
