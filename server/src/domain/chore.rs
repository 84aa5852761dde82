//! Chore Entity
//!
//! A (usually recurring) job built from tasks and the equipment it needs.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::equipment::NamedRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

impl Recurrence {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Recurrence::Daily),
            "W" => Some(Recurrence::Weekly),
            "M" => Some(Recurrence::Monthly),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Recurrence::Daily => "D",
            Recurrence::Weekly => "W",
            Recurrence::Monthly => "M",
        }
    }
}

pub const WEEKDAY_CODES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub is_recurring: bool,
    pub recurrence: Option<Recurrence>,
    pub recurrence_day_of_week: Option<String>,
    /// Comma-separated days, e.g. `5,15`
    pub recurrence_day_of_month: Option<String>,
    pub penalize_incomplete: bool,
    /// Percent of the points deducted when missed
    pub penalty_amount: u32,
    pub age_restricted: bool,
    pub minimum_age: Option<u32>,
    pub equipment: Vec<NamedRef>,
    pub tasks: Vec<NamedRef>,
    pub notes: Vec<String>,
}

impl Chore {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            points: 0,
            is_recurring: false,
            recurrence: None,
            recurrence_day_of_week: None,
            recurrence_day_of_month: None,
            penalize_incomplete: false,
            penalty_amount: 0,
            age_restricted: false,
            minimum_age: None,
            equipment: Vec::new(),
            tasks: Vec::new(),
            notes: Vec::new(),
        }
    }
}

impl Entity for Chore {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Clean a day-of-month list like ` 5, 15 ` into `5,15`.
pub fn normalize_days_of_month(raw: &str) -> Result<String, &'static str> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err("Day-of-month must be integers (1-31), optionally comma-separated.");
        }
        match part.parse::<u8>() {
            Ok(day) if (1..=31).contains(&day) => days.push(day.to_string()),
            _ => return Err("Day-of-month values must be between 1 and 31."),
        }
    }
    if days.is_empty() {
        return Err("Monthly recurrence requires a day-of-month (eg. 5 or 5,15).");
    }
    Ok(days.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_codes() {
        for r in [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly] {
            assert_eq!(Recurrence::from_code(r.code()), Some(r));
        }
        assert_eq!(Recurrence::from_code("Y"), None);
        assert_eq!(serde_json::to_string(&Recurrence::Weekly).unwrap(), "\"W\"");
    }

    #[test]
    fn test_days_of_month() {
        assert_eq!(normalize_days_of_month(" 5, 15 ,").unwrap(), "5,15");
        assert_eq!(normalize_days_of_month("05").unwrap(), "5");
        assert!(normalize_days_of_month("").is_err());
        assert!(normalize_days_of_month("0").is_err());
        assert!(normalize_days_of_month("32").is_err());
        assert!(normalize_days_of_month("1,x").is_err());
        assert!(normalize_days_of_month("-3").is_err());
    }
}
