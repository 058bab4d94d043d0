use yew::prelude::*;
use yew_router::prelude::*;

use pahadi::async_callback;

use crate::providers::{Toast, use_session, use_toast};
use crate::routes::Route;

const NAV: [(Route, &str, &str); 4] = [
    (Route::Profiles, "🧭", "Discover"),
    (Route::Chat, "💬", "Messages"),
    (Route::Notifications, "🔔", "Alerts"),
    (Route::Profile, "👤", "Profile"),
];

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

/// Header navigation around every signed-in page.
#[function_component(MainLayout)]
pub fn main_layout(props: &MainLayoutProps) -> Html {
    let context = use_session();
    let toasts = use_toast();
    let navigator = use_navigator();
    let current = use_route::<Route>();
    let logging_out = use_state(|| false);

    let api = context.api.clone();
    let on_logout = async_callback!([api, toasts, navigator, logging_out] {
        logging_out.set(true);
        api.logout().await;
        logging_out.set(false);
        toasts.show(Toast::success("Logged out successfully"));
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    let nav_link = |route: &Route, icon: &str, label: &str| {
        let active = current.as_ref() == Some(route);
        html! {
            <Link<Route> to={route.clone()} classes={classes!(
                "flex", "flex-col", "items-center", "text-white", "transition-opacity",
                if active { "opacity-100" } else { "opacity-80 hover:opacity-100" }
            )}>
                <span class="text-2xl">{ icon.to_string() }</span>
                <span class="text-xs font-medium">{ label.to_string() }</span>
            </Link<Route>>
        }
    };

    html! {
        <div class="min-h-screen">
            <header class="flex justify-between items-center px-8 py-4 bg-gradient-to-r from-red-600 to-orange-600 text-white shadow">
                <div class="flex items-center space-x-3">
                    <div class="p-3 bg-white/20 rounded-xl text-2xl">{ "🏔️" }</div>
                    <div>
                        <h1 class="text-2xl font-bold tracking-wide font-serif">{ "PahadiMatch" }</h1>
                        <p class="text-xs text-white/90">{ "पहाड़ी दिलों का मिलन • Mountain Hearts Unite" }</p>
                    </div>
                </div>
                <nav class="flex items-center space-x-8">
                    { for NAV.iter().map(|(route, icon, label)| nav_link(route, icon, label)) }
                    <button
                        class="flex flex-col items-center text-white opacity-80 hover:opacity-100 disabled:opacity-50"
                        onclick={on_logout}
                        disabled={*logging_out}
                    >
                        <span class="text-2xl">{ "⎋" }</span>
                        <span class="text-xs font-medium">{ "Logout" }</span>
                    </button>
                </nav>
            </header>

            <main class="min-h-[calc(100vh-80px)] bg-gradient-to-br from-rose-50 via-pink-50 to-orange-50 p-6">
                { props.children.clone() }
            </main>
        </div>
    }
}
