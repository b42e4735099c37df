use yew::prelude::*;
use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{self, Session};

#[derive(Properties, PartialEq)]
pub struct LoginViewProps {
    pub on_login: Callback<Session>,
}

#[function_component(LoginView)]
pub fn login_view(props: &LoginViewProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let is_loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let api_client = use_memo((), |_| ApiClient::new());

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        let api_client = api_client.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            if request.username.is_empty() || request.password.is_empty() {
                error.set(Some("Por favor ingresa usuario y contraseña.".to_string()));
                return;
            }

            let is_loading = is_loading.clone();
            let error = error.clone();
            let api_client = api_client.clone();
            let on_login = on_login.clone();

            is_loading.set(true);
            error.set(None);
            spawn_local(async move {
                match api_client.login(&request).await {
                    Ok(response) => {
                        let new_session = Session::from_profile(&response.user);
                        session::save(&new_session);
                        Logger::info_with_component(
                            "LoginView",
                            &format!("Login exitoso como {}", new_session.user_name),
                        );
                        on_login.emit(new_session);
                    }
                    Err(e) => {
                        Logger::warn_with_component("LoginView", &format!("Login failed: {}", e));
                        error.set(Some("Usuario o contraseña incorrectos.".to_string()));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="login-page">
            <section class="login-branding">
                <h1>{"Gestión Inteligente"}<br/><span>{"para tu Negocio"}</span></h1>
                <p>
                    {"Administra citas, clientes y servicios de mantenimiento con la eficiencia que FMSS te ofrece. Todo en un solo lugar."}
                </p>
            </section>

            <section class="login-form-panel">
                <h2>{"Bienvenido"}</h2>
                <p class="subtitle">{"Ingresa con tu usuario o correo"}</p>

                {if let Some(message) = (*error).as_ref() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="username">{"Usuario o correo"}</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            value={(*username).clone()}
                            oninput={on_username}
                            disabled={*is_loading}
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">{"Contraseña"}</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            value={(*password).clone()}
                            oninput={on_password}
                            disabled={*is_loading}
                        />
                    </div>
                    <button type="submit" class="btn-primary" disabled={*is_loading}>
                        {if *is_loading { "Ingresando..." } else { "Iniciar sesión" }}
                    </button>
                </form>
            </section>
        </div>
    }
}
