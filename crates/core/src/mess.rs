//! Mess menu and feedback rules.

use crate::error::CoreError;

/// Lowest accepted feedback rating.
pub const MIN_RATING: i16 = 1;

/// Highest accepted feedback rating.
pub const MAX_RATING: i16 = 5;

/// Maximum number of items on one meal of the menu.
pub const MAX_MENU_ITEMS: usize = 20;

/// Maximum length of a single menu item.
pub const MAX_MENU_ITEM_LEN: usize = 60;

text_enum! {
    pub enum MealType {
        Breakfast => "breakfast",
        Lunch => "lunch",
        Snacks => "snacks",
        Dinner => "dinner",
    }
}

text_enum! {
    pub enum DayOfWeek {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Trim menu items, drop blanks, and enforce count and length limits.
pub fn normalize_menu_items(items: &[String]) -> Result<Vec<String>, CoreError> {
    let cleaned: Vec<String> = items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        return Err(CoreError::Validation(
            "A meal must list at least one item".into(),
        ));
    }
    if cleaned.len() > MAX_MENU_ITEMS {
        return Err(CoreError::Validation(format!(
            "A meal may list at most {MAX_MENU_ITEMS} items"
        )));
    }
    if let Some(long) = cleaned.iter().find(|i| i.chars().count() > MAX_MENU_ITEM_LEN) {
        return Err(CoreError::Validation(format!(
            "Menu item '{long}' exceeds {MAX_MENU_ITEM_LEN} characters"
        )));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn menu_items_are_trimmed() {
        let items = vec!["  Poha ".to_string(), "".to_string(), "Tea".to_string()];
        assert_eq!(normalize_menu_items(&items).unwrap(), vec!["Poha", "Tea"]);
    }

    #[test]
    fn empty_menu_rejected() {
        assert!(normalize_menu_items(&["  ".to_string()]).is_err());
    }

    #[test]
    fn oversized_menu_rejected() {
        let many: Vec<String> = (0..=MAX_MENU_ITEMS).map(|i| format!("item {i}")).collect();
        assert!(normalize_menu_items(&many).is_err());
        let long = vec!["x".repeat(MAX_MENU_ITEM_LEN + 1)];
        assert!(normalize_menu_items(&long).is_err());
    }

    #[test]
    fn weekday_conversion() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::ALL.len(), 7);
    }
}
