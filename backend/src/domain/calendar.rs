//! Calendar domain logic for the appointments view (Citas).
//!
//! Builds the month grid the frontend renders: leading blank cells for the
//! weekday offset of the 1st, one cell per day with that day's appointments,
//! and trailing blank cells to complete the last week. The UI only decides
//! which day is selected.

use chrono::{Datelike, Local, NaiveDate};
use shared::{
    month_name, Appointment, CalendarDay, CalendarDayType, CalendarFocusDate, CalendarMonth,
    CurrentDateResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService {
    /// Current focus date for calendar navigation (month/year only).
    /// Kept in memory and not persisted.
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl CalendarService {
    pub fn new() -> Self {
        Self {
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Generate a calendar month view with the appointments of each day
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: u32,
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> DomainResult<CalendarMonth> {
        validate_period(month, year)?;

        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);
        debug!(
            "Generating calendar for {}/{}: {} days, first weekday {}",
            month, year, days_in_month, first_day
        );

        let mut appointments_by_day = self.group_appointments_by_day(month, year, appointments);

        let mut calendar_days = Vec::with_capacity(42);

        for _ in 0..first_day {
            calendar_days.push(padding_day(CalendarDayType::PaddingBefore));
        }

        for day in 1..=days_in_month {
            let mut day_appointments = appointments_by_day.remove(&day).unwrap_or_default();
            day_appointments.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));

            let is_today =
                today.year() as u32 == year && today.month() == month && today.day() == day;

            calendar_days.push(CalendarDay {
                day,
                date: Some(format!("{:04}-{:02}-{:02}", year, month, day)),
                appointments: day_appointments,
                day_type: CalendarDayType::MonthDay,
                is_today,
            });
        }

        while calendar_days.len() % 7 != 0 {
            calendar_days.push(padding_day(CalendarDayType::PaddingAfter));
        }

        debug!("Calendar cells created: {}", calendar_days.len());

        Ok(CalendarMonth {
            month,
            year,
            month_name: month_name(month).to_string(),
            days: calendar_days,
            first_day_of_week: first_day,
        })
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        NaiveDate::from_ymd_opt(year as i32, month, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// First and last ISO dates of a month, used to fetch its appointments
    pub fn month_date_range(&self, month: u32, year: u32) -> DomainResult<(String, String)> {
        validate_period(month, year)?;
        let last_day = self.days_in_month(month, year);
        Ok((
            format!("{:04}-{:02}-01", year, month),
            format!("{:04}-{:02}-{:02}", year, month, last_day),
        ))
    }

    /// Group appointments by day for a specific month and year
    fn group_appointments_by_day(
        &self,
        month: u32,
        year: u32,
        appointments: &[Appointment],
    ) -> HashMap<u32, Vec<Appointment>> {
        let mut by_day: HashMap<u32, Vec<Appointment>> = HashMap::new();

        for appointment in appointments {
            if let Some((a_year, a_month, a_day)) = self.parse_appointment_date(&appointment.date) {
                if a_month == month && a_year == year {
                    by_day.entry(a_day).or_default().push(appointment.clone());
                }
            }
        }

        by_day
    }

    /// Parse a YYYY-MM-DD date into (year, month, day)
    pub fn parse_appointment_date(&self, date_str: &str) -> Option<(u32, u32, u32)> {
        NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| (d.year() as u32, d.month(), d.day()))
    }

    /// Format a date for human-readable display, e.g. "14 de Junio de 2025"
    pub fn format_date_for_display(&self, date_str: &str) -> String {
        match self.parse_appointment_date(date_str) {
            Some((year, month, day)) => format!("{} de {} de {}", day, month_name(month), year),
            None => date_str.to_string(),
        }
    }

    /// Month before the given one; fails when it would leave the supported years
    pub fn previous_month(&self, current_month: u32, current_year: u32) -> DomainResult<(u32, u32)> {
        validate_period(current_month, current_year)?;
        let (month, year) = if current_month == 1 {
            (12, current_year.checked_sub(1))
        } else {
            (current_month - 1, Some(current_year))
        };
        checked_period(month, year)
    }

    /// Month after the given one; fails when it would leave the supported years
    pub fn next_month(&self, current_month: u32, current_year: u32) -> DomainResult<(u32, u32)> {
        validate_period(current_month, current_year)?;
        let (month, year) = if current_month == 12 {
            (1, current_year.checked_add(1))
        } else {
            (current_month + 1, Some(current_year))
        };
        checked_period(month, year)
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn get_current_date(&self) -> CurrentDateResponse {
        let today = self.today();
        let iso_date = today.format("%Y-%m-%d").to_string();

        CurrentDateResponse {
            month: today.month(),
            year: today.year() as u32,
            day: today.day(),
            formatted_date: self.format_date_for_display(&iso_date),
            iso_date,
        }
    }

    pub fn get_focus_date(&self) -> CalendarFocusDate {
        self.current_focus_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_focus_date(&self, month: u32, year: u32) -> DomainResult<CalendarFocusDate> {
        validate_period(month, year)?;

        let new_focus_date = CalendarFocusDate { month, year };
        *self
            .current_focus_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_focus_date.clone();

        Ok(new_focus_date)
    }

    /// Move the focus one month back; the focus is unchanged on error
    pub fn navigate_previous_month(&self) -> DomainResult<CalendarFocusDate> {
        let mut focus = self
            .current_focus_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (month, year) = self.previous_month(focus.month, focus.year)?;
        *focus = CalendarFocusDate { month, year };
        Ok(focus.clone())
    }

    /// Move the focus one month forward; the focus is unchanged on error
    pub fn navigate_next_month(&self) -> DomainResult<CalendarFocusDate> {
        let mut focus = self
            .current_focus_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (month, year) = self.next_month(focus.month, focus.year)?;
        *focus = CalendarFocusDate { month, year };
        Ok(focus.clone())
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

/// Years the calendar accepts, matching four-digit ISO dates
pub const MIN_YEAR: u32 = 1;
pub const MAX_YEAR: u32 = 9999;

fn validate_period(month: u32, year: u32) -> DomainResult<()> {
    validate_month(month)?;
    validate_year(year)
}

fn validate_year(year: u32) -> DomainResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DomainError::validation(format!(
            "Invalid year: {}. Must be between {} and {}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

fn checked_period(month: u32, year: Option<u32>) -> DomainResult<(u32, u32)> {
    let year = year.ok_or_else(|| DomainError::validation("Year out of range"))?;
    validate_year(year)?;
    Ok((month, year))
}

fn validate_month(month: u32) -> DomainResult<()> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::validation(format!(
            "Invalid month: {}. Must be between 1 and 12",
            month
        )));
    }
    Ok(())
}

fn padding_day(day_type: CalendarDayType) -> CalendarDay {
    CalendarDay {
        day: 0,
        date: None,
        appointments: Vec::new(),
        day_type,
        is_today: false,
    }
}
