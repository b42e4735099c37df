use yew::prelude::*;
use shared::{month_name, BillingSummary, ServiceRecord};
use wasm_bindgen_futures::spawn_local;

use crate::hooks::use_calendar::{next_month_of, previous_month};
use crate::services::api::ApiClient;
use crate::services::date_utils::{self, format_currency, format_display_date};
use crate::services::logging::Logger;

const RECENT_RECORDS: usize = 10;

#[function_component(FacturacionView)]
pub fn facturacion_view() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let period = use_state(|| {
        let (year, month, _) = date_utils::today();
        (month, year)
    });
    let summary = use_state(|| Option::<BillingSummary>::None);
    let loading = use_state(|| true);
    let recent = use_state(Vec::<ServiceRecord>::new);

    {
        let summary = summary.clone();
        let loading = loading.clone();
        let api_client = api_client.clone();
        use_effect_with(*period, move |(month, year)| {
            let (month, year) = (*month, *year);
            loading.set(true);
            spawn_local(async move {
                match api_client.get_billing_summary(month, year).await {
                    Ok(data) => summary.set(Some(data)),
                    Err(e) => {
                        Logger::error_with_component("FacturacionView", &format!("Failed to load billing summary: {}", e));
                        summary.set(None);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    {
        let recent = recent.clone();
        let api_client = api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_history().await {
                    Ok(response) => recent.set(response.records.into_iter().take(RECENT_RECORDS).collect()),
                    Err(e) => Logger::warn_with_component("FacturacionView", &format!("Failed to load history: {}", e)),
                }
            });
            || ()
        });
    }

    let on_prev = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| {
            let (month, year) = *period;
            period.set(previous_month(month, year));
        })
    };

    let on_next = {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| {
            let (month, year) = *period;
            period.set(next_month_of(month, year));
        })
    };

    let (month, year) = *period;

    html! {
        <div class="facturacion-view">
            <div class="calendar-header">
                <button class="nav-button" onclick={on_prev} title="Mes anterior">{"‹"}</button>
                <h2>{format!("Facturación de {} {}", month_name(month), year)}</h2>
                <button class="nav-button" onclick={on_next} title="Mes siguiente">{"›"}</button>
            </div>

            {if *loading {
                html! { <div class="loading">{"Cargando facturación..."}</div> }
            } else {
                match (*summary).as_ref() {
                    Some(data) if !data.lines.is_empty() => html! {
                        <>
                            <div class="stats-grid">
                                <div class="stat-card">
                                    <div class="stat-label">{"Total del mes"}</div>
                                    <div class="stat-value">{format_currency(data.total)}</div>
                                </div>
                                <div class="stat-card">
                                    <div class="stat-label">{"Servicios realizados"}</div>
                                    <div class="stat-value">{data.record_count}</div>
                                </div>
                                <div class="stat-card">
                                    <div class="stat-label">{"Clientes facturados"}</div>
                                    <div class="stat-value">{data.lines.len()}</div>
                                </div>
                            </div>
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Cliente"}</th>
                                        <th>{"Servicios"}</th>
                                        <th>{"Total"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for data.lines.iter().map(|line| html! {
                                        <tr>
                                            <td>{&line.client_name}</td>
                                            <td>{line.service_count}</td>
                                            <td class="amount">{format_currency(line.total)}</td>
                                        </tr>
                                    })}
                                </tbody>
                            </table>
                        </>
                    },
                    Some(_) => html! { <div class="empty-state">{"No hay servicios facturables este mes."}</div> },
                    None => html! { <div class="empty-state">{"No se pudo cargar la facturación."}</div> },
                }
            }}

            <section class="panel">
                <h3>{"Servicios recientes"}</h3>
                {if recent.is_empty() {
                    html! { <p class="empty-state">{"Sin historial de servicios."}</p> }
                } else {
                    html! {
                        <ul class="history-list">
                            {for recent.iter().map(|record| html! {
                                <li class="history-item">
                                    <span class="history-date">{format!("{} {}", format_display_date(&record.date), record.time)}</span>
                                    <span class="history-client">{&record.client_name}</span>
                                    <span class="history-service">{&record.service_name}</span>
                                    <span class="amount">{format_currency(record.price)}</span>
                                </li>
                            })}
                        </ul>
                    }
                }}
            </section>
        </div>
    }
}
