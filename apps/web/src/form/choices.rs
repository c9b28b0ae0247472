//! The field catalogue rendered into the prediction form.
//!
//! The option values are the ones the prediction service accepts. They only
//! populate the form controls; submitted values are forwarded unchecked.

/// A numeric `<input>`: the range hints mirror what the service accepts.
#[derive(Debug, Clone, Copy)]
pub struct NumericField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: &'static str,
    pub placeholder: &'static str,
}

/// A categorical `<select>` and its options.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

pub const NUMERIC_FIELDS: &[NumericField] = &[
    NumericField {
        name: "age",
        label: "Age",
        min: 16.0,
        max: 25.0,
        step: "1",
        placeholder: "e.g., 20",
    },
    NumericField {
        name: "study_hours",
        label: "Study Hours (per day)",
        min: 0.0,
        max: 16.0,
        step: "0.1",
        placeholder: "e.g., 4.5",
    },
    NumericField {
        name: "class_attendance",
        label: "Class Attendance (%)",
        min: 0.0,
        max: 100.0,
        step: "0.1",
        placeholder: "e.g., 85",
    },
    NumericField {
        name: "sleep_hours",
        label: "Sleep Hours (per day)",
        min: 0.0,
        max: 12.0,
        step: "0.1",
        placeholder: "e.g., 7",
    },
];

pub const CHOICE_FIELDS: &[ChoiceField] = &[
    ChoiceField {
        name: "gender",
        label: "Gender",
        options: &["male", "female", "other"],
    },
    ChoiceField {
        name: "course",
        label: "Course",
        options: &["diploma", "bca", "b.sc", "b.tech", "bba", "ba", "b.com"],
    },
    ChoiceField {
        name: "internet_access",
        label: "Internet Access",
        options: &["yes", "no"],
    },
    ChoiceField {
        name: "sleep_quality",
        label: "Sleep Quality",
        options: &["poor", "average", "good"],
    },
    ChoiceField {
        name: "study_method",
        label: "Study Method",
        options: &[
            "coaching",
            "online videos",
            "mixed",
            "self-study",
            "group study",
        ],
    },
    ChoiceField {
        name: "facility_rating",
        label: "Facility Rating",
        options: &["low", "medium", "high"],
    },
    ChoiceField {
        name: "exam_difficulty",
        label: "Exam Difficulty",
        options: &["easy", "moderate", "hard"],
    },
];
