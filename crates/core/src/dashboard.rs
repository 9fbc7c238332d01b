//! Dashboard aggregation.
//!
//! Pure reductions over collections the caller has already loaded. None of
//! these functions can fail; empty inputs produce zero counts and a `"0.0"`
//! average rather than NaN.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::complaint::{ComplaintProgress, ComplaintStatus};
use crate::fee::{FeeSummary, StudentFeeStatus};
use crate::mess::MealType;

/// Complaint counts and average resolution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSummary {
    pub total: i64,
    pub pending: i64,
    pub to_be_confirmed: i64,
    pub resolved: i64,
    pub rejected: i64,
    /// Mean hours from registration to resolution over resolved complaints,
    /// or `None` when nothing has been resolved yet.
    pub average_resolution_hours: Option<f64>,
}

impl ComplaintSummary {
    /// Complaints still needing attention from someone.
    pub fn open(&self) -> i64 {
        self.pending + self.to_be_confirmed
    }
}

pub fn summarize_complaints<'a>(
    complaints: impl IntoIterator<Item = &'a ComplaintProgress>,
) -> ComplaintSummary {
    let mut summary = ComplaintSummary::default();
    let mut hours_sum = 0.0;
    let mut hours_count = 0usize;

    for c in complaints {
        summary.total += 1;
        match c.status {
            ComplaintStatus::Pending => summary.pending += 1,
            ComplaintStatus::ToBeConfirmed => summary.to_be_confirmed += 1,
            ComplaintStatus::Resolved => summary.resolved += 1,
            ComplaintStatus::Rejected => summary.rejected += 1,
        }
        if let Some(h) = c.resolution_hours() {
            hours_sum += h;
            hours_count += 1;
        }
    }

    summary.average_resolution_hours = (hours_count > 0).then(|| hours_sum / hours_count as f64);
    summary
}

/// Render an average resolution time for display: hours below two days,
/// days above.
pub fn format_resolution_time(hours: Option<f64>) -> String {
    match hours {
        None => "N/A".to_string(),
        Some(h) if h < 48.0 => format!("{h:.1} hrs"),
        Some(h) => format!("{:.1} days", h / 24.0),
    }
}

/// Fee counts over a set of students. Each student contributes exactly one
/// status per fee type.
pub fn summarize_fees<'a>(students: impl IntoIterator<Item = &'a StudentFeeStatus>) -> FeeSummary {
    let mut summary = FeeSummary::default();
    for s in students {
        summary.total_students += 1;
        summary.hostel_fee.record(s.hostel_fee.status);
        summary.mess_fee.record(s.mess_fee.status);
    }
    summary
}

/// Mean of `sum / count` to one decimal place; `"0.0"` when `count` is zero.
pub fn format_average(sum: f64, count: usize) -> String {
    if count == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", sum / count as f64)
}

/// A single rating, as needed for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSample {
    pub meal: MealType,
    pub rating: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub total: i64,
    /// One-decimal average, e.g. `"4.2"`.
    pub average_rating: String,
    pub by_meal: BTreeMap<MealType, MealFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFeedback {
    pub count: i64,
    pub average_rating: String,
}

pub fn summarize_feedback(samples: impl IntoIterator<Item = RatingSample>) -> FeedbackSummary {
    let mut total = 0usize;
    let mut sum = 0.0;
    let mut per_meal: BTreeMap<MealType, (usize, f64)> = BTreeMap::new();

    for s in samples {
        total += 1;
        sum += f64::from(s.rating);
        let entry = per_meal.entry(s.meal).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += f64::from(s.rating);
    }

    FeedbackSummary {
        total: total as i64,
        average_rating: format_average(sum, total),
        by_meal: per_meal
            .into_iter()
            .map(|(meal, (count, meal_sum))| {
                (
                    meal,
                    MealFeedback {
                        count: count as i64,
                        average_rating: format_average(meal_sum, count),
                    },
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complaint::ComplaintAction;
    use crate::fee::{FeeStatus, FeeSubmission};
    use crate::types::Timestamp;
    use chrono::{Duration, TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap()
    }

    fn resolved_after(hours: i64) -> ComplaintProgress {
        ComplaintProgress::registered(t0())
            .apply(ComplaintAction::MarkResolved, t0())
            .unwrap()
            .apply(ComplaintAction::StudentConfirm, t0() + Duration::hours(hours))
            .unwrap()
    }

    #[test]
    fn empty_complaints_summary() {
        let s = summarize_complaints(&Vec::<ComplaintProgress>::new());
        assert_eq!(s, ComplaintSummary::default());
        assert_eq!(format_resolution_time(s.average_resolution_hours), "N/A");
    }

    #[test]
    fn complaint_counts_and_average() {
        let pending = ComplaintProgress::registered(t0());
        let rejected = pending.apply(ComplaintAction::Reject, t0()).unwrap();
        let waiting = pending.apply(ComplaintAction::MarkResolved, t0()).unwrap();
        let items = vec![
            pending,
            rejected,
            waiting,
            resolved_after(10),
            resolved_after(30),
        ];

        let s = summarize_complaints(&items);
        assert_eq!(s.total, 5);
        assert_eq!(s.pending, 1);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.to_be_confirmed, 1);
        assert_eq!(s.resolved, 2);
        assert_eq!(s.open(), 2);
        assert_eq!(s.average_resolution_hours, Some(20.0));
    }

    #[test]
    fn resolution_time_formatting() {
        assert_eq!(format_resolution_time(Some(5.3)), "5.3 hrs");
        assert_eq!(format_resolution_time(Some(72.0)), "3.0 days");
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(format_average(0.0, 0), "0.0");
        let s = summarize_feedback(Vec::new());
        assert_eq!(s.total, 0);
        assert_eq!(s.average_rating, "0.0");
        assert!(s.by_meal.is_empty());
    }

    #[test]
    fn feedback_average_per_meal() {
        let samples = vec![
            RatingSample { meal: MealType::Lunch, rating: 4 },
            RatingSample { meal: MealType::Lunch, rating: 5 },
            RatingSample { meal: MealType::Dinner, rating: 2 },
        ];
        let s = summarize_feedback(samples);
        assert_eq!(s.total, 3);
        assert_eq!(s.average_rating, "3.7");
        assert_eq!(s.by_meal[&MealType::Lunch].average_rating, "4.5");
        assert_eq!(s.by_meal[&MealType::Dinner].count, 1);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["byMeal"]["lunch"]["count"], 2);
    }

    #[test]
    fn fee_summary_counts_defaults() {
        let doc = "https://res.cloudinary.com/demo/raw/upload/v1/r.pdf";
        let a = StudentFeeStatus {
            hostel_fee: FeeSubmission::not_submitted().submit(doc, t0()).unwrap(),
            mess_fee: FeeSubmission::not_submitted(),
        };
        let b = StudentFeeStatus::default();
        let s = summarize_fees([&a, &b]);
        assert_eq!(s.total_students, 2);
        assert_eq!(s.hostel_fee.pending, 1);
        assert_eq!(s.hostel_fee.document_not_submitted, 1);
        assert_eq!(s.mess_fee.document_not_submitted, 2);
        assert_eq!(s.counts(crate::fee::FeeType::Mess).total(), 2);
        assert_eq!(a.hostel_fee.status, FeeStatus::Pending);
    }
}
