use yew::prelude::*;

use crate::services::session::Session;

/// Sections reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Inicio,
    Citas,
    Servicios,
    Clientes,
    Facturacion,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Inicio,
        Page::Citas,
        Page::Servicios,
        Page::Clientes,
        Page::Facturacion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Inicio => "Inicio",
            Page::Citas => "Citas",
            Page::Servicios => "Servicios",
            Page::Clientes => "Clientes",
            Page::Facturacion => "Facturación",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Inicio => "🏠",
            Page::Citas => "📅",
            Page::Servicios => "🛠️",
            Page::Clientes => "👥",
            Page::Facturacion => "🧾",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardLayoutProps {
    pub page: Page,
    pub session: Session,
    pub on_navigate: Callback<Page>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    let sidebar_open = use_state(|| true);

    let toggle_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: MouseEvent| {
            sidebar_open.set(!*sidebar_open);
        })
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let sidebar_class = if *sidebar_open { "sidebar open" } else { "sidebar collapsed" };

    html! {
        <div class="dashboard-layout">
            <aside class={sidebar_class}>
                <div class="sidebar-brand">
                    <span class="brand-logo">{"FMSS"}</span>
                    {if *sidebar_open {
                        html! { <span class="brand-subtitle">{"Mantenimiento"}</span> }
                    } else { html! {} }}
                </div>

                <nav class="sidebar-nav">
                    {for Page::ALL.iter().map(|page| {
                        let page = *page;
                        let on_navigate = props.on_navigate.clone();
                        let item_class = if page == props.page { "nav-item active" } else { "nav-item" };
                        html! {
                            <button
                                class={item_class}
                                title={page.label()}
                                onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(page))}
                            >
                                <span class="nav-icon">{page.icon()}</span>
                                {if *sidebar_open {
                                    html! { <span class="nav-label">{page.label()}</span> }
                                } else { html! {} }}
                            </button>
                        }
                    })}
                </nav>

                <button class="nav-item logout" onclick={on_logout}>
                    <span class="nav-icon">{"🚪"}</span>
                    {if *sidebar_open {
                        html! { <span class="nav-label">{"Cerrar sesión"}</span> }
                    } else { html! {} }}
                </button>
            </aside>

            <div class="dashboard-main">
                <header class="dashboard-header">
                    <button class="sidebar-toggle" onclick={toggle_sidebar} title="Mostrar u ocultar menú">
                        {"☰"}
                    </button>
                    <h1 class="page-title">{props.page.label()}</h1>
                    <div class="user-badge">
                        <div class="user-name">{&props.session.user_name}</div>
                        <div class="user-email">{&props.session.user_email}</div>
                    </div>
                </header>

                <main class="dashboard-content">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_labels_follow_sidebar_order() {
        let labels: Vec<&str> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Inicio", "Citas", "Servicios", "Clientes", "Facturación"]);
    }
}
