use yew::prelude::*;
use shared::{DashboardSummary, NoticeLevel};
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;
use crate::services::date_utils::{format_currency, format_display_date};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct DashboardHomeProps {
    pub user_name: String,
}

/// Growth badge text, e.g. "+12.5%" or "Sin datos" when there is no baseline
pub fn format_growth(growth: Option<f64>) -> String {
    match growth {
        Some(value) if value >= 0.0 => format!("+{:.1}%", value),
        Some(value) => format!("{:.1}%", value),
        None => "Sin datos".to_string(),
    }
}

#[function_component(DashboardHome)]
pub fn dashboard_home(props: &DashboardHomeProps) -> Html {
    let summary = use_state(|| Option::<DashboardSummary>::None);
    let loading = use_state(|| true);
    let api_client = use_memo((), |_| ApiClient::new());

    {
        let summary = summary.clone();
        let loading = loading.clone();
        let api_client = api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.get_dashboard_summary().await {
                    Ok(data) => summary.set(Some(data)),
                    Err(e) => {
                        Logger::error_with_component("DashboardHome", &format!("Failed to load summary: {}", e));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let data = (*summary).clone().unwrap_or_default();

    html! {
        <div class="dashboard-home">
            <div class="welcome-banner">
                <h2>{format!("Bienvenido de nuevo, {}", props.user_name)}</h2>
                <p>{"Este es el resumen de tu negocio."}</p>
            </div>

            {if *loading {
                html! { <div class="loading">{"Cargando resumen..."}</div> }
            } else { html! {} }}

            <div class="stats-grid">
                <div class="stat-card">
                    <div class="stat-label">{"Citas Hoy"}</div>
                    <div class="stat-value">{data.appointments_today}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-label">{"Ingresos Mes"}</div>
                    <div class="stat-value">{format_currency(data.monthly_revenue)}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-label">{"Clientes Nuevos"}</div>
                    <div class="stat-value">{data.new_clients_this_month}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-label">{"Crecimiento"}</div>
                    <div class={match data.revenue_growth_percent {
                        Some(v) if v < 0.0 => "stat-value negative",
                        _ => "stat-value positive",
                    }}>
                        {format_growth(data.revenue_growth_percent)}
                    </div>
                </div>
            </div>

            <div class="home-panels">
                <section class="panel">
                    <h3>{"Próximas Citas"}</h3>
                    {if data.upcoming_appointments.is_empty() {
                        html! { <p class="empty-state">{"No hay citas programadas."}</p> }
                    } else {
                        html! {
                            <ul class="upcoming-list">
                                {for data.upcoming_appointments.iter().map(|appointment| html! {
                                    <li class="upcoming-item">
                                        <div class="upcoming-client">{&appointment.client_name}</div>
                                        <div class="upcoming-service">{&appointment.service_name}</div>
                                        <div class="upcoming-when">
                                            {format!("{} · {}", format_display_date(&appointment.date), appointment.time)}
                                        </div>
                                        <span class={format!("status-badge {}", appointment.status.as_str())}>
                                            {appointment.status.label()}
                                        </span>
                                    </li>
                                })}
                            </ul>
                        }
                    }}
                </section>

                <section class="panel">
                    <h3>{"Avisos del Sistema"}</h3>
                    {if data.notices.is_empty() {
                        html! { <p class="empty-state">{"Todo en orden."}</p> }
                    } else {
                        html! {
                            <ul class="notice-list">
                                {for data.notices.iter().map(|notice| {
                                    let class = match notice.level {
                                        NoticeLevel::Warning => "notice warning",
                                        NoticeLevel::Info => "notice info",
                                    };
                                    html! { <li class={class}>{&notice.message}</li> }
                                })}
                            </ul>
                        }
                    }}
                </section>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_growth() {
        assert_eq!(format_growth(Some(12.345)), "+12.3%");
        assert_eq!(format_growth(Some(-4.0)), "-4.0%");
        assert_eq!(format_growth(Some(0.0)), "+0.0%");
        assert_eq!(format_growth(None), "Sin datos");
    }
}
