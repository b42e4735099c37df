use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::citas::CitasView;
use components::clientes::ClientesView;
use components::dashboard_home::DashboardHome;
use components::facturacion::FacturacionView;
use components::layout::{DashboardLayout, Page};
use components::login::LoginView;
use components::servicios::ServiciosView;
use services::api::ApiClient;
use services::logging::Logger;
use services::session::{self, Session};

#[function_component(App)]
fn app() -> Html {
    let session = use_state(session::load);
    let page = use_state(|| Page::Inicio);

    // Backend reachability check on startup
    use_effect_with((), |_| {
        wasm_bindgen_futures::spawn_local(async {
            match ApiClient::new().test_connection().await {
                Ok(status) => Logger::debug_with_component("App", &format!("Backend status: {}", status)),
                Err(e) => Logger::error_with_component("App", &format!("Backend unreachable: {}", e)),
            }
        });
        || ()
    });

    let on_login = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |new_session: Session| {
            page.set(Page::Inicio);
            session.set(Some(new_session));
        })
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            Logger::info_with_component("App", "Sesión cerrada");
            session::logout();
            session.set(None);
        })
    };

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let Some(current_session) = (*session).clone() else {
        return html! { <LoginView on_login={on_login} /> };
    };

    let content = match *page {
        Page::Inicio => html! { <DashboardHome user_name={current_session.user_name.clone()} /> },
        Page::Citas => html! { <CitasView /> },
        Page::Servicios => html! { <ServiciosView /> },
        Page::Clientes => html! { <ClientesView /> },
        Page::Facturacion => html! { <FacturacionView /> },
    };

    html! {
        <DashboardLayout
            page={*page}
            session={current_session}
            on_navigate={on_navigate}
            on_logout={on_logout}
        >
            {content}
        </DashboardLayout>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
