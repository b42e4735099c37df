use yew::prelude::*;
use shared::CalendarMonth;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub current_month: u32,
    pub current_year: u32,
    pub calendar_data: Option<CalendarMonth>,
    pub loading: bool,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to_today: Callback<MouseEvent>,
    pub refresh_calendar: Callback<()>,
}

/// Years the backend calendar accepts
const MIN_YEAR: u32 = 1;
const MAX_YEAR: u32 = 9999;

/// Month before `month`/`year`; stays put at the first supported month
pub fn previous_month(month: u32, year: u32) -> (u32, u32) {
    match month {
        2..=12 => (month - 1, year),
        _ if year > MIN_YEAR => (12, year - 1),
        _ => (month, year),
    }
}

/// Month after `month`/`year`; stays put at the last supported month
pub fn next_month_of(month: u32, year: u32) -> (u32, u32) {
    match month {
        1..=11 => (month + 1, year),
        _ if year < MAX_YEAR => (1, year + 1),
        _ => (month, year),
    }
}

/// Visible month of the appointments calendar, starting at today's month and
/// then at the backend focus date. The grid is refetched whenever the month changes.
#[hook]
pub fn use_calendar(api_client: &ApiClient) -> UseCalendarResult {
    let (initial_year, initial_month, _) = date_utils::today();
    let current_month = use_state(move || initial_month);
    let current_year = use_state(move || initial_year);
    let calendar_data = use_state(|| Option::<CalendarMonth>::None);
    let loading = use_state(|| true);

    // Refresh calendar callback
    let refresh_calendar = {
        let api_client = api_client.clone();
        let calendar_data = calendar_data.clone();
        let loading = loading.clone();

        use_callback((*current_month, *current_year), move |_: (), (month, year)| {
            let api_client = api_client.clone();
            let calendar_data = calendar_data.clone();
            let loading = loading.clone();
            let (month, year) = (*month, *year);

            loading.set(true);
            spawn_local(async move {
                match api_client.get_calendar_month(month, year).await {
                    Ok(data) => calendar_data.set(Some(data)),
                    Err(e) => {
                        Logger::error_with_component("use_calendar", &format!("Failed to fetch calendar data: {}", e));
                        calendar_data.set(None);
                    }
                }
                loading.set(false);
            });
        })
    };

    // Navigation goes through the backend focus date; local arithmetic if it is unreachable
    let prev_month = {
        let api_client = api_client.clone();
        let current_month = current_month.clone();
        let current_year = current_year.clone();
        use_callback((*current_month, *current_year), move |_: MouseEvent, (month, year)| {
            let api_client = api_client.clone();
            let current_month = current_month.clone();
            let current_year = current_year.clone();
            let fallback = previous_month(*month, *year);
            spawn_local(async move {
                let (month, year) = match api_client.navigate_previous_month().await {
                    Ok(response) => (response.focus_date.month, response.focus_date.year),
                    Err(e) => {
                        Logger::warn_with_component("use_calendar", &format!("Focus navigation failed: {}", e));
                        fallback
                    }
                };
                current_month.set(month);
                current_year.set(year);
            });
        })
    };

    let next_month = {
        let api_client = api_client.clone();
        let current_month = current_month.clone();
        let current_year = current_year.clone();
        use_callback((*current_month, *current_year), move |_: MouseEvent, (month, year)| {
            let api_client = api_client.clone();
            let current_month = current_month.clone();
            let current_year = current_year.clone();
            let fallback = next_month_of(*month, *year);
            spawn_local(async move {
                let (month, year) = match api_client.navigate_next_month().await {
                    Ok(response) => (response.focus_date.month, response.focus_date.year),
                    Err(e) => {
                        Logger::warn_with_component("use_calendar", &format!("Focus navigation failed: {}", e));
                        fallback
                    }
                };
                current_month.set(month);
                current_year.set(year);
            });
        })
    };

    let go_to_today = {
        let api_client = api_client.clone();
        let current_month = current_month.clone();
        let current_year = current_year.clone();
        use_callback((), move |_: MouseEvent, _| {
            let api_client = api_client.clone();
            let current_month = current_month.clone();
            let current_year = current_year.clone();
            spawn_local(async move {
                let today = match api_client.get_current_date().await {
                    Ok(date) => (date.month, date.year),
                    Err(_) => {
                        let (year, month, _) = date_utils::today();
                        (month, year)
                    }
                };
                if let Err(e) = api_client.set_focus_date(today.0, today.1).await {
                    Logger::warn_with_component("use_calendar", &format!("Failed to store focus date: {}", e));
                }
                current_month.set(today.0);
                current_year.set(today.1);
            });
        })
    };

    // Resume from the focus date the backend remembers
    {
        let api_client = api_client.clone();
        let current_month = current_month.clone();
        let current_year = current_year.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(focus) = api_client.get_focus_date().await {
                    current_month.set(focus.month);
                    current_year.set(focus.year);
                }
            });
            || ()
        });
    }

    // Auto-refresh calendar when month/year changes
    use_effect_with((*current_month, *current_year), {
        let refresh_calendar = refresh_calendar.clone();
        move |_| {
            refresh_calendar.emit(());
            || ()
        }
    });

    let state = CalendarState {
        current_month: *current_month,
        current_year: *current_year,
        calendar_data: (*calendar_data).clone(),
        loading: *loading,
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
        go_to_today,
        refresh_calendar,
    };

    UseCalendarResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_steps_wrap_years() {
        assert_eq!(previous_month(1, 2025), (12, 2024));
        assert_eq!(previous_month(7, 2025), (6, 2025));
        assert_eq!(next_month_of(12, 2025), (1, 2026));
        assert_eq!(next_month_of(2, 2025), (3, 2025));
    }

    #[test]
    fn test_month_steps_stop_at_year_bounds() {
        assert_eq!(previous_month(1, 1), (1, 1));
        assert_eq!(previous_month(1, 0), (1, 0));
        assert_eq!(next_month_of(12, 9999), (12, 9999));
        assert_eq!(next_month_of(12, u32::MAX), (12, u32::MAX));
    }
}
