//! Expanded-day selection

use chrono::NaiveDate;

/// Which day of the daily overview, if any, is expanded to hourly detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoneSelected,
    Selected(NaiveDate),
}

impl Selection {
    /// Toggles `date`: selecting it, collapsing it if it is already selected,
    /// or switching to it from another selected date
    pub fn toggle(&mut self, date: NaiveDate) {
        *self = match *self {
            Selection::Selected(current) if current == date => Selection::NoneSelected,
            _ => Selection::Selected(date),
        };
    }

    /// Clears the selection, used whenever a new forecast replaces the old one
    pub fn reset(&mut self) {
        *self = Selection::NoneSelected;
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        match self {
            Selection::NoneSelected => None,
            Selection::Selected(date) => Some(*date),
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected() == Some(date)
    }
}
