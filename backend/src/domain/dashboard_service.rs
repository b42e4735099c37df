use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::calendar::CalendarService;
use crate::domain::errors::DomainResult;
use crate::domain::history_service::total_revenue;
use crate::storage::{AppointmentStorage, RecordFilter, ServiceRecordStorage, ServiceStorage};
use shared::{AppointmentStatus, DashboardSummary, NoticeLevel, SystemNotice};

const UPCOMING_LIMIT: usize = 5;

/// Figures for the dashboard home (Inicio)
#[derive(Clone)]
pub struct DashboardService {
    appointments: Arc<dyn AppointmentStorage>,
    records: Arc<dyn ServiceRecordStorage>,
    services: Arc<dyn ServiceStorage>,
    calendar: CalendarService,
}

impl DashboardService {
    pub fn new(
        appointments: Arc<dyn AppointmentStorage>,
        records: Arc<dyn ServiceRecordStorage>,
        services: Arc<dyn ServiceStorage>,
        calendar: CalendarService,
    ) -> Self {
        Self {
            appointments,
            records,
            services,
            calendar,
        }
    }

    pub async fn summary(&self, today: NaiveDate) -> DomainResult<DashboardSummary> {
        info!("Building dashboard summary for {}", today);

        let today_iso = today.format("%Y-%m-%d").to_string();
        let (month_start, month_end) = self.month_bounds(today)?;

        let appointments_today = self
            .appointments
            .list_appointments(&RecordFilter::date_range(&today_iso, &today_iso))
            .await?
            .len() as u32;

        let monthly_revenue = total_revenue(
            &self
                .records
                .list_records(&RecordFilter::date_range(&month_start, &month_end))
                .await?,
        );

        let previous_month_revenue = match today
            .with_day(1)
            .and_then(|first| first.checked_sub_days(Days::new(1)))
        {
            Some(last_day_previous) => {
                let (start, end) = self.month_bounds(last_day_previous)?;
                total_revenue(
                    &self
                        .records
                        .list_records(&RecordFilter::date_range(&start, &end))
                        .await?,
                )
            }
            None => 0.0,
        };

        let all_appointments = self
            .appointments
            .list_appointments(&RecordFilter::default())
            .await?;

        // First appointment date per client; the list is ordered by date
        let mut first_seen: HashMap<&str, &str> = HashMap::new();
        for appointment in &all_appointments {
            let name = appointment.client_name.trim();
            if !name.is_empty() {
                first_seen.entry(name).or_insert(appointment.date.as_str());
            }
        }
        let new_clients_this_month = first_seen
            .values()
            .filter(|date| **date >= month_start.as_str() && **date <= month_end.as_str())
            .count() as u32;

        let upcoming: Vec<_> = all_appointments
            .iter()
            .filter(|a| a.date >= today_iso)
            .collect();
        let pending = upcoming
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count();
        let upcoming_appointments = upcoming
            .into_iter()
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect();

        let inactive_services = self
            .services
            .list_services(false)
            .await?
            .iter()
            .filter(|s| !s.active)
            .count();

        Ok(DashboardSummary {
            appointments_today,
            monthly_revenue,
            new_clients_this_month,
            revenue_growth_percent: growth_percent(monthly_revenue, previous_month_revenue),
            upcoming_appointments,
            notices: build_notices(pending, inactive_services),
        })
    }

    fn month_bounds(&self, date: NaiveDate) -> DomainResult<(String, String)> {
        self.calendar
            .month_date_range(date.month(), date.year() as u32)
    }
}

/// Percent change from `previous` to `current`; None when there is no baseline
pub fn growth_percent(current: f64, previous: f64) -> Option<f64> {
    if previous <= 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

fn build_notices(pending_appointments: usize, inactive_services: usize) -> Vec<SystemNotice> {
    let mut notices = Vec::new();

    if pending_appointments > 0 {
        notices.push(SystemNotice {
            level: NoticeLevel::Warning,
            message: format!(
                "Tienes {} cita(s) pendiente(s) de confirmar.",
                pending_appointments
            ),
        });
    }
    if inactive_services > 0 {
        notices.push(SystemNotice {
            level: NoticeLevel::Info,
            message: format!(
                "{} servicio(s) inactivo(s) en el catálogo.",
                inactive_services
            ),
        });
    }

    notices
}
