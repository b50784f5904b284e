use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod forms {
    pub mod rules;
    pub mod snapshot;
    pub mod validator;
    pub mod strength;
    pub mod feedback;
    pub mod submission;
    pub mod controller;
}
mod components {
    pub mod form_field;
    pub mod form_state;
}
mod pages {
    pub mod contact;
    pub mod signup;
}

use pages::{
    contact::Contact,
    signup::Signup,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/contact")]
    Contact,
    #[at("/signup")]
    Signup,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Signup} /> },
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <Contact /> }
        },
        Route::Signup => {
            info!("Rendering Signup page");
            html! { <Signup /> }
        },
        Route::NotFound => {
            gloo_console::warn!("Unknown route, showing not found page");
            html! {
                <div style="text-align: center; padding: 4rem;">
                    <h1>{"۴۰۴"}</h1>
                    <Link<Route> to={Route::Signup}>{"بازگشت / Back"}</Link<Route>>
                </div>
            }
        },
    }
}


#[function_component]
fn Nav() -> Html {
    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Signup} classes="nav-logo">
                    {"Easy Trading"}
                </Link<Route>>
                <div class="nav-right">
                    <Link<Route> to={Route::Signup} classes="nav-link">
                        {"ثبت‌نام / Sign up"}
                    </Link<Route>>
                    <Link<Route> to={Route::Contact} classes="nav-link">
                        {"تماس / Contact"}
                    </Link<Route>>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
