use yew::prelude::*;
use shared::{Appointment, ClientContact, ClientSummary};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::services::api::ApiClient;
use crate::services::client_contacts;
use crate::services::date_utils::format_display_date;
use crate::services::logging::Logger;

/// Case-insensitive match on name, phone or address
pub fn matches_search(client: &ClientSummary, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [Some(&client.name), client.phone.as_ref(), client.address.as_ref()]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&query))
}

#[function_component(ClientesView)]
pub fn clientes_view() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let clients = use_state(Vec::<ClientSummary>::new);
    let loading = use_state(|| true);
    let search = use_state(String::new);
    let editing = use_state(|| Option::<String>::None);
    let phone = use_state(String::new);
    let address = use_state(String::new);
    let form_error = use_state(|| Option::<String>::None);
    let reload = use_state(|| 0u32);
    let client_appointments = use_state(Vec::<Appointment>::new);

    {
        let clients = clients.clone();
        let loading = loading.clone();
        let api_client = api_client.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match api_client.list_clients().await {
                    Ok(response) => {
                        let book = client_contacts::load_all();
                        clients.set(client_contacts::merge(response.clients, &book));
                    }
                    Err(e) => {
                        Logger::error_with_component("ClientesView", &format!("Failed to load clients: {}", e));
                        clients.set(Vec::new());
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Appointment history of the client being edited
    {
        let client_appointments = client_appointments.clone();
        let api_client = api_client.clone();
        use_effect_with((*editing).clone(), move |editing| {
            client_appointments.set(Vec::new());
            if let Some(name) = editing.clone() {
                spawn_local(async move {
                    match api_client.list_appointments(None, None, Some(&name)).await {
                        Ok(response) => client_appointments.set(response.appointments),
                        Err(e) => Logger::warn_with_component(
                            "ClientesView",
                            &format!("Failed to load appointments for {}: {}", name, e),
                        ),
                    }
                });
            }
            || ()
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_phone = {
        let phone = phone.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            phone.set(input.value());
        })
    };

    let on_address = {
        let address = address.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            address.set(input.value());
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            form_error.set(None);
        })
    };

    let on_save = {
        let editing = editing.clone();
        let phone = phone.clone();
        let address = address.clone();
        let form_error = form_error.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(name) = (*editing).clone() else {
                return;
            };
            let contact = ClientContact {
                phone: Some((*phone).clone()),
                address: Some((*address).clone()),
            };
            match client_contacts::save_contact(&name, contact) {
                Ok(()) => {
                    Logger::info_with_component("ClientesView", &format!("Saved contact for {}", name));
                    editing.set(None);
                    form_error.set(None);
                    reload.set(*reload + 1);
                }
                Err(e) => {
                    Logger::error_with_component("ClientesView", &e);
                    form_error.set(Some(e));
                }
            }
        })
    };

    let visible: Vec<ClientSummary> = clients
        .iter()
        .filter(|client| matches_search(client, &search))
        .cloned()
        .collect();

    html! {
        <div class="clientes-view">
            <div class="view-toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Buscar cliente..."
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <span class="result-count">{format!("{} cliente(s)", visible.len())}</span>
            </div>

            {if *loading {
                html! { <div class="loading">{"Cargando clientes..."}</div> }
            } else if visible.is_empty() {
                html! { <div class="empty-state">{"No hay clientes registrados."}</div> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Cliente"}</th>
                                <th>{"Citas"}</th>
                                <th>{"Última cita"}</th>
                                <th>{"Teléfono"}</th>
                                <th>{"Dirección"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for visible.iter().map(|client| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let phone = phone.clone();
                                    let address = address.clone();
                                    let form_error = form_error.clone();
                                    let client = client.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        phone.set(client.phone.clone().unwrap_or_default());
                                        address.set(client.address.clone().unwrap_or_default());
                                        form_error.set(None);
                                        editing.set(Some(client.name.clone()));
                                    })
                                };
                                html! {
                                    <tr>
                                        <td class="client-name">{&client.name}</td>
                                        <td>{client.appointment_count}</td>
                                        <td>{format_display_date(&client.last_appointment_date)}</td>
                                        <td>{client.phone.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{client.address.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td><button class="btn-link" onclick={on_edit}>{"Editar contacto"}</button></td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            }}

            {if let Some(name) = (*editing).clone() {
                html! {
                    <div class="modal-backdrop">
                        <form class="modal contact-editor" onsubmit={on_save}>
                            <h3>{format!("Contacto de {}", name)}</h3>
                            {if let Some(message) = (*form_error).as_ref() {
                                html! { <div class="form-message error">{message}</div> }
                            } else { html! {} }}
                            <div class="form-group">
                                <label for="contact-phone">{"Teléfono"}</label>
                                <input type="tel" id="contact-phone" value={(*phone).clone()} oninput={on_phone} />
                            </div>
                            <div class="form-group">
                                <label for="contact-address">{"Dirección"}</label>
                                <input type="text" id="contact-address" value={(*address).clone()} oninput={on_address} />
                            </div>
                            <h4>{"Citas del cliente"}</h4>
                            <ul class="client-appointments">
                                {if client_appointments.is_empty() {
                                    html! { <li class="empty-state">{"Sin citas registradas."}</li> }
                                } else {
                                    html! {
                                        {for client_appointments.iter().map(|appointment| html! {
                                            <li>
                                                {format!(
                                                    "{} {} · {} · {}",
                                                    format_display_date(&appointment.date),
                                                    appointment.time,
                                                    appointment.service_name,
                                                    appointment.status.label()
                                                )}
                                            </li>
                                        })}
                                    }
                                }}
                            </ul>
                            <div class="form-actions">
                                <button type="submit" class="btn-primary">{"Guardar"}</button>
                                <button type="button" class="btn-secondary" onclick={on_cancel}>{"Cancelar"}</button>
                            </div>
                        </form>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, phone: Option<&str>) -> ClientSummary {
        ClientSummary {
            name: name.to_string(),
            appointment_count: 2,
            last_appointment_date: "2025-06-10".to_string(),
            phone: phone.map(str::to_string),
            address: None,
        }
    }

    #[test]
    fn test_matches_search() {
        let acme = client("Acme Industrial", Some("555-0101"));
        assert!(matches_search(&acme, ""));
        assert!(matches_search(&acme, "  acme "));
        assert!(matches_search(&acme, "0101"));
        assert!(!matches_search(&acme, "torres"));
    }
}
