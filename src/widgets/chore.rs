//! Chore Form Visibility
//!
//! Which optional chore inputs are shown for the current selections.

/// Recurrence cadence as submitted by the chore form (`D`, `W`, `M`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 3] = [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly];

    pub fn code(&self) -> &'static str {
        match self {
            Recurrence::Daily => "D",
            Recurrence::Weekly => "W",
            Recurrence::Monthly => "M",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreFormState {
    pub age_restricted: bool,
    pub minimum_age: String,
    pub is_recurring: bool,
    pub recurrence: Option<Recurrence>,
    pub penalize_incomplete: bool,
}

impl Default for ChoreFormState {
    fn default() -> Self {
        Self {
            age_restricted: false,
            minimum_age: String::new(),
            is_recurring: true,
            recurrence: None,
            penalize_incomplete: false,
        }
    }
}

impl ChoreFormState {
    /// Turning the restriction off also clears the age so it is not submitted
    pub fn set_age_restricted(&mut self, restricted: bool) {
        self.age_restricted = restricted;
        if !restricted {
            self.minimum_age.clear();
        }
    }

    pub fn minimum_age_visible(&self) -> bool {
        self.age_restricted
    }

    pub fn recurrence_block_visible(&self) -> bool {
        self.is_recurring
    }

    pub fn day_of_week_visible(&self) -> bool {
        self.recurrence != Some(Recurrence::Monthly)
    }

    pub fn day_of_month_visible(&self) -> bool {
        self.recurrence != Some(Recurrence::Weekly)
    }

    pub fn penalty_visible(&self) -> bool {
        self.penalize_incomplete
    }
}
