mod browser;
mod components;
mod config;
mod pages;
mod providers;
mod routes;

use yew::prelude::*;
use yew_router::prelude::*;

use providers::{SessionProvider, ToastProvider};
use routes::Route;

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <ToastProvider>
                <BrowserRouter>
                    <Switch<Route> render={routes::switch} />
                </BrowserRouter>
            </ToastProvider>
        </SessionProvider>
    }
}

fn main() {
    pahadi::log::setup().expect("Failed to setup logging");
    yew::Renderer::<App>::new().render();
}
