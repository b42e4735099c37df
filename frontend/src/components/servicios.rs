use yew::prelude::*;
use shared::{CreateServiceRequest, Service, UpdateServiceRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};

use crate::services::api::ApiClient;
use crate::services::date_utils::format_currency;
use crate::services::logging::Logger;

/// Raw text of the service form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration: String,
}

impl ServiceForm {
    pub fn from_service(service: &Service) -> Self {
        Self {
            id: Some(service.id),
            name: service.name.clone(),
            description: service.description.clone(),
            price: format!("{:.2}", service.price),
            duration: service.estimated_duration_minutes.to_string(),
        }
    }

    /// Checks the fields and builds the request body
    pub fn to_request(&self) -> Result<CreateServiceRequest, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("El nombre del servicio es obligatorio.".to_string());
        }
        let price = self
            .price
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| "Ingresa un precio válido.".to_string())?;
        let duration = self
            .duration
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| "Ingresa una duración en minutos mayor a cero.".to_string())?;

        Ok(CreateServiceRequest {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            estimated_duration_minutes: duration,
            active: None,
        })
    }
}

#[function_component(ServiciosView)]
pub fn servicios_view() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let services = use_state(Vec::<Service>::new);
    let loading = use_state(|| true);
    let form = use_state(|| Option::<ServiceForm>::None);
    let form_error = use_state(|| Option::<String>::None);
    let message = use_state(|| Option::<String>::None);
    let reload = use_state(|| 0u32);

    {
        let services = services.clone();
        let loading = loading.clone();
        let api_client = api_client.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match api_client.list_services(false).await {
                    Ok(response) => services.set(response.services),
                    Err(e) => {
                        Logger::error_with_component("ServiciosView", &format!("Failed to load services: {}", e));
                        services.set(Vec::new());
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let edit_form = {
        let form = form.clone();
        Callback::from(move |apply: Box<dyn Fn(&mut ServiceForm)>| {
            if let Some(current) = (*form).as_ref() {
                let mut next = current.clone();
                apply(&mut next);
                form.set(Some(next));
            }
        })
    };

    let text_input = |apply: fn(&mut ServiceForm, String)| {
        let edit_form = edit_form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            edit_form.emit(Box::new(move |f: &mut ServiceForm| apply(f, value.clone())));
        })
    };

    let on_name = text_input(|f, v| f.name = v);
    let on_price = text_input(|f, v| f.price = v);
    let on_duration = text_input(|f, v| f.duration = v);

    let on_description = {
        let edit_form = edit_form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let value = input.value();
            edit_form.emit(Box::new(move |f: &mut ServiceForm| f.description = value.clone()));
        })
    };

    let on_new = {
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(Some(ServiceForm::default()));
            form_error.set(None);
        })
    };

    let on_cancel = {
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(None);
            form_error.set(None);
        })
    };

    let on_submit = {
        let form = form.clone();
        let form_error = form_error.clone();
        let message = message.clone();
        let reload = reload.clone();
        let api_client = api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(current) = (*form).clone() else {
                return;
            };
            let request = match current.to_request() {
                Ok(request) => request,
                Err(e) => {
                    form_error.set(Some(e));
                    return;
                }
            };

            let form = form.clone();
            let form_error = form_error.clone();
            let message = message.clone();
            let reload = reload.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                let result = match current.id {
                    Some(id) => {
                        let update = UpdateServiceRequest {
                            name: Some(request.name),
                            description: Some(request.description),
                            price: Some(request.price),
                            estimated_duration_minutes: Some(request.estimated_duration_minutes),
                            active: None,
                        };
                        api_client.update_service(id, &update).await
                    }
                    None => api_client.create_service(&request).await,
                };
                match result {
                    Ok(response) => {
                        Logger::info_with_component("ServiciosView", &format!("Saved service {}", response.service.id));
                        message.set(Some(response.success_message));
                        form.set(None);
                        form_error.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(e) => {
                        Logger::error_with_component("ServiciosView", &format!("Failed to save service: {}", e));
                        form_error.set(Some(e));
                    }
                }
            });
        })
    };

    let service_rows = services.iter().map(|service| {
        let id = service.id;

        let on_edit = {
            let form = form.clone();
            let form_error = form_error.clone();
            let service = service.clone();
            Callback::from(move |_: MouseEvent| {
                form.set(Some(ServiceForm::from_service(&service)));
                form_error.set(None);
            })
        };

        let on_toggle = {
            let message = message.clone();
            let reload = reload.clone();
            let api_client = api_client.clone();
            Callback::from(move |_: MouseEvent| {
                let message = message.clone();
                let reload = reload.clone();
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client.toggle_service(id).await {
                        Ok(response) => {
                            message.set(Some(response.success_message));
                            reload.set(*reload + 1);
                        }
                        Err(e) => {
                            Logger::error_with_component("ServiciosView", &format!("Failed to toggle service {}: {}", id, e));
                            message.set(Some(e));
                        }
                    }
                });
            })
        };

        let on_delete = {
            let message = message.clone();
            let reload = reload.clone();
            let api_client = api_client.clone();
            Callback::from(move |_: MouseEvent| {
                let message = message.clone();
                let reload = reload.clone();
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client.delete_service(id).await {
                        Ok(()) => {
                            message.set(Some("Servicio eliminado correctamente".to_string()));
                            reload.set(*reload + 1);
                        }
                        Err(e) => {
                            Logger::error_with_component("ServiciosView", &format!("Failed to delete service {}: {}", id, e));
                            message.set(Some(e));
                        }
                    }
                });
            })
        };

        let row_class = if service.active { "service-row" } else { "service-row inactive" };

        html! {
            <tr class={row_class}>
                <td>
                    <div class="service-name">{&service.name}</div>
                    <div class="service-description">{&service.description}</div>
                </td>
                <td>{format_currency(service.price)}</td>
                <td>{format!("{} min", service.estimated_duration_minutes)}</td>
                <td>
                    <button class={if service.active { "status-toggle active" } else { "status-toggle" }} onclick={on_toggle}>
                        {if service.active { "Activo" } else { "Inactivo" }}
                    </button>
                </td>
                <td class="row-actions">
                    <button class="btn-link" onclick={on_edit}>{"Editar"}</button>
                    <button class="btn-link danger" onclick={on_delete}>{"Eliminar"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="servicios-view">
            <div class="view-toolbar">
                <h2>{"Catálogo de servicios"}</h2>
                <button class="btn-primary" onclick={on_new}>{"Nuevo servicio"}</button>
            </div>

            {if let Some(text) = (*message).as_ref() {
                html! { <div class="form-message info">{text}</div> }
            } else { html! {} }}

            {if *loading {
                html! { <div class="loading">{"Cargando servicios..."}</div> }
            } else if services.is_empty() {
                html! { <div class="empty-state">{"Aún no hay servicios en el catálogo."}</div> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Servicio"}</th>
                                <th>{"Precio"}</th>
                                <th>{"Duración"}</th>
                                <th>{"Estado"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{for service_rows}</tbody>
                    </table>
                }
            }}

            {if let Some(current) = (*form).clone() {
                html! {
                    <div class="modal-backdrop">
                        <form class="modal service-form" onsubmit={on_submit}>
                            <h3>{if current.id.is_some() { "Editar servicio" } else { "Nuevo servicio" }}</h3>
                            {if let Some(text) = (*form_error).as_ref() {
                                html! { <div class="form-message error">{text}</div> }
                            } else { html! {} }}
                            <div class="form-group">
                                <label for="service-name">{"Nombre"}</label>
                                <input type="text" id="service-name" value={current.name.clone()} oninput={on_name} />
                            </div>
                            <div class="form-group">
                                <label for="service-description">{"Descripción"}</label>
                                <textarea id="service-description" value={current.description.clone()} oninput={on_description} />
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="service-price">{"Precio"}</label>
                                    <input type="text" inputmode="decimal" id="service-price" placeholder="0.00" value={current.price.clone()} oninput={on_price} />
                                </div>
                                <div class="form-group">
                                    <label for="service-duration">{"Duración (min)"}</label>
                                    <input type="number" min="1" id="service-duration" value={current.duration.clone()} oninput={on_duration} />
                                </div>
                            </div>
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
