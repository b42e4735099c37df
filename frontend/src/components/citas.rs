use yew::prelude::*;
use shared::{Appointment, AppointmentDraft, AppointmentStatus, CalendarDayType, DraftField, Service};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use crate::components::calendar::Calendar;
use crate::hooks::use_calendar::use_calendar;
use crate::services::api::ApiClient;
use crate::services::date_utils::{self, format_display_date};
use crate::services::logging::Logger;

/// Inline message for a draft with empty fields
pub fn missing_fields_message(missing: &[DraftField]) -> String {
    let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    format!("Completa los campos: {}.", labels.join(", "))
}

fn status_from_value(value: &str) -> AppointmentStatus {
    value.parse().unwrap_or_default()
}

#[function_component(CitasView)]
pub fn citas_view() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let calendar = use_calendar(&api_client);
    let selected_day = use_state(|| Option::<u32>::None);
    let draft = use_state(|| Option::<AppointmentDraft>::None);
    let form_error = use_state(|| Option::<String>::None);
    let form_success = use_state(|| Option::<String>::None);
    let saving = use_state(|| false);
    let services = use_state(Vec::<Service>::new);

    // Active services feed the service selector
    {
        let services = services.clone();
        let api_client = api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_services(true).await {
                    Ok(response) => services.set(response.services),
                    Err(e) => Logger::warn_with_component("CitasView", &format!("Failed to load services: {}", e)),
                }
            });
            || ()
        });
    }

    // Selection belongs to the visible month
    {
        let selected_day = selected_day.clone();
        let draft = draft.clone();
        use_effect_with((calendar.state.current_month, calendar.state.current_year), move |_| {
            selected_day.set(None);
            draft.set(None);
            || ()
        });
    }

    let on_select_day = {
        let selected_day = selected_day.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let (month, year) = (calendar.state.current_month, calendar.state.current_year);
        Callback::from(move |day: u32| {
            selected_day.set(Some(day));
            draft.set(Some(AppointmentDraft::for_day(year, month, day)));
            form_error.set(None);
            form_success.set(None);
        })
    };

    let on_select_appointment = {
        let selected_day = selected_day.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        Callback::from(move |appointment: Appointment| {
            let day = appointment
                .date
                .rsplit('-')
                .next()
                .and_then(|d| d.parse::<u32>().ok());
            selected_day.set(day);
            draft.set(Some(AppointmentDraft::from_appointment(&appointment)));
            form_error.set(None);
            form_success.set(None);
        })
    };

    // Applies an edit to the open draft
    let update_draft = {
        let draft = draft.clone();
        Callback::from(move |apply: Box<dyn Fn(&mut AppointmentDraft)>| {
            if let Some(current) = (*draft).as_ref() {
                let mut next = current.clone();
                apply(&mut next);
                draft.set(Some(next));
            }
        })
    };

    let on_time_change = {
        let update_draft = update_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            update_draft.emit(Box::new(move |d: &mut AppointmentDraft| d.time = value.clone()));
        })
    };

    let on_client_change = {
        let update_draft = update_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            update_draft.emit(Box::new(move |d: &mut AppointmentDraft| d.client_name = value.clone()));
        })
    };

    let on_service_change = {
        let update_draft = update_draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            update_draft.emit(Box::new(move |d: &mut AppointmentDraft| d.service_name = value.clone()));
        })
    };

    let on_status_change = {
        let update_draft = update_draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let status = status_from_value(&select.value());
            update_draft.emit(Box::new(move |d: &mut AppointmentDraft| d.status = status));
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let saving = saving.clone();
        let api_client = api_client.clone();
        let refresh_calendar = calendar.actions.refresh_calendar.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(current) = (*draft).clone() else {
                return;
            };
            if let Err(missing) = current.validate() {
                form_error.set(Some(missing_fields_message(&missing)));
                form_success.set(None);
                return;
            }

            let draft = draft.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let saving = saving.clone();
            let api_client = api_client.clone();
            let refresh_calendar = refresh_calendar.clone();

            saving.set(true);
            spawn_local(async move {
                let result = match current.id {
                    Some(id) => api_client.update_appointment(id, &current.to_update_request()).await,
                    None => api_client.create_appointment(&current.to_create_request()).await,
                };
                match result {
                    Ok(response) => {
                        Logger::info_with_component(
                            "CitasView",
                            &format!("Saved appointment {}", response.appointment.id),
                        );
                        form_error.set(None);
                        form_success.set(Some(response.success_message));
                        draft.set(Some(AppointmentDraft::from_appointment(&response.appointment)));
                        refresh_calendar.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("CitasView", &format!("Failed to save appointment: {}", e));
                        form_error.set(Some(e));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let api_client = api_client.clone();
        let refresh_calendar = calendar.actions.refresh_calendar.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*draft).clone() else {
                return;
            };
            let Some(id) = current.id else {
                return;
            };

            let draft = draft.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let api_client = api_client.clone();
            let refresh_calendar = refresh_calendar.clone();

            spawn_local(async move {
                match api_client.delete_appointment(id).await {
                    Ok(()) => {
                        Logger::info_with_component("CitasView", &format!("Deleted appointment {}", id));
                        form_error.set(None);
                        form_success.set(Some("Cita eliminada correctamente".to_string()));
                        draft.set(Some(AppointmentDraft {
                            id: None,
                            date: current.date.clone(),
                            ..AppointmentDraft::default()
                        }));
                        refresh_calendar.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("CitasView", &format!("Failed to delete appointment: {}", e));
                        form_error.set(Some(e));
                    }
                }
            });
        })
    };

    let on_new_for_day = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(current) = (*draft).as_ref() {
                draft.set(Some(AppointmentDraft {
                    date: current.date.clone(),
                    ..AppointmentDraft::default()
                }));
                form_error.set(None);
                form_success.set(None);
            }
        })
    };

    let state = &calendar.state;
    let day_appointments: Vec<Appointment> = match (state.calendar_data.as_ref(), *selected_day) {
        (Some(data), Some(day)) => data
            .days
            .iter()
            .find(|d| d.day_type == CalendarDayType::MonthDay && d.day == day)
            .map(|d| d.appointments.clone())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    html! {
        <div class="citas-view">
            <div class="calendar-header">
                <button class="nav-button" onclick={calendar.actions.prev_month.clone()} title="Mes anterior">{"‹"}</button>
                <h2>{format!("{} {}", shared::month_name(state.current_month), state.current_year)}</h2>
                <button class="nav-button" onclick={calendar.actions.next_month.clone()} title="Mes siguiente">{"›"}</button>
                <button class="btn-secondary" onclick={calendar.actions.go_to_today.clone()}>{"Hoy"}</button>
            </div>

            <div class="citas-body">
                <div class="calendar-section">
                    {if state.loading {
                        html! { <div class="loading">{"Cargando calendario..."}</div> }
                    } else if let Some(data) = state.calendar_data.clone() {
                        html! {
                            <Calendar
                                calendar_data={data}
                                selected_day={*selected_day}
                                on_select_day={on_select_day}
                                on_select_appointment={on_select_appointment.clone()}
                            />
                        }
                    } else {
                        html! { <div class="empty-state">{"No se pudo cargar el calendario."}</div> }
                    }}
                </div>

                {if let Some(current) = (*draft).clone() {
                    html! {
                        <aside class="day-panel">
                            <h3>{format_display_date(&current.date)}</h3>
                            {if current.date == date_utils::get_current_date() {
                                html! { <span class="today-badge">{"Hoy"}</span> }
                            } else { html! {} }}

                            <ul class="day-appointments-list">
                                {if day_appointments.is_empty() {
                                    html! { <li class="empty-state">{"Sin citas este día."}</li> }
                                } else {
                                    html! {
                                        {for day_appointments.iter().map(|appointment| {
                                            let on_select = on_select_appointment.clone();
                                            let selected = appointment.clone();
                                            let item_class = if current.id == Some(appointment.id) {
                                                "day-appointment active"
                                            } else {
                                                "day-appointment"
                                            };
                                            html! {
                                                <li class={item_class} onclick={Callback::from(move |_: MouseEvent| on_select.emit(selected.clone()))}>
                                                    <span class="appointment-time">{&appointment.time}</span>
                                                    <span class="appointment-client">{&appointment.client_name}</span>
                                                    <span class="appointment-service">{&appointment.service_name}</span>
                                                    <span class={format!("status-badge {}", appointment.status.as_str())}>
                                                        {appointment.status.label()}
                                                    </span>
                                                </li>
                                            }
                                        })}
                                    }
                                }}
                            </ul>

                            <form class="appointment-form" onsubmit={on_submit}>
                                <h4>{if current.is_edit() { "Editar cita" } else { "Nueva cita" }}</h4>

                                {if let Some(message) = (*form_error).as_ref() {
                                    html! { <div class="form-message error">{message}</div> }
                                } else { html! {} }}
                                {if let Some(message) = (*form_success).as_ref() {
                                    html! { <div class="form-message success">{message}</div> }
                                } else { html! {} }}

                                <div class="form-group">
                                    <label for="appointment-time">{DraftField::Time.label()}</label>
                                    <input
                                        type="time"
                                        id="appointment-time"
                                        value={current.time.clone()}
                                        oninput={on_time_change}
                                        disabled={*saving}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="appointment-client">{DraftField::ClientName.label()}</label>
                                    <input
                                        type="text"
                                        id="appointment-client"
                                        placeholder="Nombre del cliente"
                                        value={current.client_name.clone()}
                                        oninput={on_client_change}
                                        disabled={*saving}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="appointment-service">{DraftField::ServiceName.label()}</label>
                                    <select id="appointment-service" onchange={on_service_change} disabled={*saving}>
                                        <option value="" selected={current.service_name.is_empty()}>{"Selecciona un servicio"}</option>
                                        {for services.iter().map(|service| html! {
                                            <option
                                                value={service.name.clone()}
                                                selected={service.name == current.service_name}
                                            >
                                                {&service.name}
                                            </option>
                                        })}
                                        // Keep the current value selectable even if the service was deactivated
                                        {if !current.service_name.is_empty() && !services.iter().any(|s| s.name == current.service_name) {
                                            html! { <option value={current.service_name.clone()} selected={true}>{&current.service_name}</option> }
                                        } else { html! {} }}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <label for="appointment-status">{"Estado"}</label>
                                    <select id="appointment-status" onchange={on_status_change} disabled={*saving}>
                                        {for [AppointmentStatus::Pending, AppointmentStatus::Confirmed].iter().map(|status| html! {
                                            <option value={status.as_str()} selected={*status == current.status}>
                                                {status.label()}
                                            </option>
                                        })}
                                    </select>
                                </div>

                                <div class="form-actions">
                                    <button type="submit" class="btn-primary" disabled={*saving}>
                                        {if *saving { "Guardando..." } else if current.is_edit() { "Guardar cambios" } else { "Agendar cita" }}
                                    </button>
                                    {if current.is_edit() {
                                        html! {
                                            <>
                                                <button type="button" class="btn-secondary" onclick={on_new_for_day}>{"Nueva"}</button>
                                                <button type="button" class="btn-danger" onclick={on_delete}>{"Eliminar"}</button>
                                            </>
                                        }
                                    } else { html! {} }}
                                </div>
                            </form>
                        </aside>
                    }
                } else {
                    html! {
                        <aside class="day-panel empty">
                            <p class="empty-state">{"Selecciona un día para ver o agendar citas."}</p>
                        </aside>
                    }
                }}
            </div>
        </div>
    }
}
