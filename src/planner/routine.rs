use chrono::NaiveDate;

use super::event::{Category, PlannerEvent};

/// The built-in day template: 14 fixed tasks covering the whole day from
/// `00:00` to `23:59` without overlap, stamped with the target date.
pub fn default_routine(date: NaiveDate) -> Vec<PlannerEvent> {
    const TEMPLATE: [(&str, &str, &str, &str, Category); 14] = [
        (
            "Sleep (deep cycle)",
            "00:00",
            "05:00",
            "Final stretch of restorative sleep.",
            Category::Health,
        ),
        (
            "Wake up + light protocol",
            "05:00",
            "05:15",
            "No screens. Hydrate and get sunlight exposure.",
            Category::Health,
        ),
        (
            "Mental hygiene",
            "05:15",
            "05:25",
            "Short meditation or deep breathing.",
            Category::Health,
        ),
        (
            "Performance training",
            "05:35",
            "06:30",
            "High-intensity exercise or mobility work.",
            Category::Health,
        ),
        (
            "Functional nutrition",
            "06:30",
            "07:00",
            "First meal, protein and good fats first.",
            Category::Health,
        ),
        (
            "Deep focus (MIT)",
            "08:00",
            "10:00",
            "Work the day's most important task without interruptions.",
            Category::Work,
        ),
        (
            "Finance check",
            "13:00",
            "13:10",
            "Quick review of expenses and goals.",
            Category::Personal,
        ),
        (
            "Fasting window opens",
            "14:00",
            "14:05",
            "16:8 protocol. Start of the no-calorie window.",
            Category::Health,
        ),
        (
            "Daily review",
            "19:00",
            "19:15",
            "What went well? What can improve tomorrow?",
            Category::Personal,
        ),
        (
            "Shutdown (disconnect)",
            "20:00",
            "21:00",
            "Blue-light cutoff. Prepare the sleep environment.",
            Category::Health,
        ),
        (
            "Evening supplements",
            "21:00",
            "21:15",
            "Magnesium and final liver support.",
            Category::Health,
        ),
        (
            "Health check & relax",
            "21:15",
            "21:30",
            "Symptom check and final wind-down.",
            Category::Health,
        ),
        (
            "Sleep hygiene / reading",
            "21:30",
            "22:00",
            "Light reading, breathing. Last step before bed.",
            Category::Health,
        ),
        (
            "Sleep (sacred hours)",
            "22:00",
            "23:59",
            "Restorative sleep. Start of the next cycle.",
            Category::Health,
        ),
    ];

    TEMPLATE
        .iter()
        .map(|(title, start, end, description, category)| {
            let mut event = PlannerEvent::new(
                (*title).to_string(),
                (*start).to_string(),
                (*end).to_string(),
                *category,
                date,
            );
            event.description = Some((*description).to_string());
            event
        })
        .collect()
}
