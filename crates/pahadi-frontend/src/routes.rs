use yew::prelude::*;
use yew_router::prelude::*;

use pahadi::auth::Landing;
use pahadi::session::Session;

use crate::components::MainLayout;
use crate::pages::{
    ChatPage, CompleteProfilePage, LoginPage, NotificationsPage, ProfilePage, ProfilesPage,
    SignupPage,
};
use crate::providers::use_session;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/complete-profile")]
    CompleteProfile,
    #[at("/profiles")]
    Profiles,
    #[at("/chat")]
    Chat,
    #[at("/notifications")]
    Notifications,
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Home
                | Route::CompleteProfile
                | Route::Profiles
                | Route::Chat
                | Route::Notifications
                | Route::Profile
        )
    }

    /// Pages rendered inside the navigation shell.
    fn in_layout(&self) -> bool {
        matches!(
            self,
            Route::Profiles | Route::Chat | Route::Notifications | Route::Profile
        )
    }
}

impl From<Landing> for Route {
    fn from(landing: Landing) -> Self {
        match landing {
            Landing::Profiles => Route::Profiles,
            Landing::CompleteProfile => Route::CompleteProfile,
        }
    }
}

/// Where `route` should send the visitor instead of rendering, if anywhere.
pub fn guard(route: &Route, session: &Session) -> Option<Route> {
    if route.requires_auth() && !session.is_authenticated() {
        return Some(Route::Login);
    }
    match route {
        Route::Home => Some(Route::Profiles),
        _ => None,
    }
}

pub fn switch(route: Route) -> Html {
    html! { <GuardedRoute route={route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedRouteProps {
    route: Route,
}

#[function_component(GuardedRoute)]
fn guarded_route(props: &GuardedRouteProps) -> Html {
    let context = use_session();

    if let Some(target) = guard(&props.route, &context.session) {
        return html! { <Redirect<Route> to={target} /> };
    }

    let page = match props.route {
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::CompleteProfile => html! { <CompleteProfilePage /> },
        Route::Profiles => html! { <ProfilesPage /> },
        Route::Chat => html! { <ChatPage /> },
        Route::Notifications => html! { <NotificationsPage /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Home => html! {},
        Route::NotFound => html! {
            <div class="flex flex-col items-center justify-center min-h-screen space-y-4">
                <h1 class="text-3xl font-bold text-gray-900">{ "404 Not Found" }</h1>
                <Link<Route> to={Route::Home} classes="text-red-600 hover:underline">{ "Back to PahadiMatch" }</Link<Route>>
            </div>
        },
    };

    if props.route.in_layout() {
        html! { <MainLayout>{ page }</MainLayout> }
    } else {
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pahadi::data::User;
    use pahadi::session::AuthToken;

    fn signed_in() -> Session {
        Session::Authenticated {
            user: User::new("u1", "9876543210"),
            token: AuthToken::new("abc"),
        }
    }

    #[test]
    fn test_protected_routes_redirect_anonymous_to_login() {
        for route in [
            Route::Home,
            Route::CompleteProfile,
            Route::Profiles,
            Route::Chat,
            Route::Notifications,
            Route::Profile,
        ] {
            assert_eq!(guard(&route, &Session::Anonymous), Some(Route::Login), "{route:?}");
        }
    }

    #[test]
    fn test_public_routes_render_for_anyone() {
        for route in [Route::Login, Route::Signup, Route::NotFound] {
            assert_eq!(guard(&route, &Session::Anonymous), None);
            assert_eq!(guard(&route, &signed_in()), None);
        }
    }

    #[test]
    fn test_signed_in_routes_render() {
        assert_eq!(guard(&Route::Profiles, &signed_in()), None);
        assert_eq!(guard(&Route::Chat, &signed_in()), None);
        assert_eq!(guard(&Route::Home, &signed_in()), Some(Route::Profiles));
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Login.to_path(), "/login");
        assert_eq!(Route::from(Landing::CompleteProfile).to_path(), "/complete-profile");
    }
}
