use std::rc::Rc;

use yew::prelude::*;

use pahadi::services::Api;
use pahadi::session::Session;

use crate::providers::api;

/// The current session plus the API that reads and changes it.
///
/// `session` is a snapshot kept in sync with the store, so components re-render on
/// login, logout and profile completion.
#[derive(Clone)]
pub struct SessionContext {
    pub session: Session,
    pub api: Rc<Api>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && Rc::ptr_eq(&self.api, &other.api)
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let api = use_memo((), |_| api::create());
    let session = use_state(|| api.session().session());

    {
        let api = api.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            let subscription = api
                .session()
                .subscribe(move |next| session.set(next.clone()));
            move || drop(subscription)
        });
    }

    let context = SessionContext {
        session: (*session).clone(),
        api,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("use_session must be used within a SessionProvider")
}
