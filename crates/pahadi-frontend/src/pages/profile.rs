use yew::prelude::*;
use yew_router::prelude::*;

use pahadi::async_callback;
use pahadi::data::Profile;

use crate::components::{ProfileCard, Spinner};
use crate::providers::use_session;
use crate::routes::Route;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let context = use_session();
    let profile = use_state(|| None::<Profile>);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);

    let api = context.api.clone();
    let fetch_profile = async_callback!([api, profile, loading, error_msg] {
        loading.set(true);
        error_msg.set(None);

        match api.my_profile().await {
            Ok(fetched) => profile.set(Some(fetched)),
            Err(err) => error_msg.set(Some(format!("Failed to load your profile: {err}"))),
        }
        loading.set(false);
    });

    {
        let fetch_profile = fetch_profile.clone();
        use_effect_with((), move |_| fetch_profile.emit(()));
    }

    let user = context.session.user().cloned();

    html! {
        <div class="max-w-md mx-auto space-y-4">
            <h1 class="text-3xl font-bold bg-gradient-to-r from-red-600 to-orange-600 bg-clip-text text-transparent font-serif">
                { "मेरी प्रोफ़ाइल (My Profile)" }
            </h1>

            if let Some(user) = &user {
                <div class="bg-white rounded-xl border-2 border-red-100 p-4 flex justify-between items-center">
                    <div>
                        <p class="font-semibold text-gray-900">{ user.display_name() }</p>
                        <p class="text-sm text-gray-600">{ format!("+91 {}", user.phone) }</p>
                    </div>
                    if !user.profile_complete {
                        <Link<Route> to={Route::CompleteProfile} classes="px-3 py-1 text-sm bg-red-600 text-white rounded-md">
                            { "Complete profile" }
                        </Link<Route>>
                    }
                </div>
            }

            {
                if *loading {
                    html! { <Spinner label="Loading profile..." /> }
                } else if let Some(error) = error_msg.as_ref() {
                    html! {
                        <div class="bg-red-50 border border-red-200 rounded-lg p-6">
                            <p class="text-red-700 mb-4">{ error }</p>
                            <button
                                class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700"
                                onclick={fetch_profile.reform(|_: MouseEvent| ())}
                            >
                                { "Retry" }
                            </button>
                        </div>
                    }
                } else if let Some(profile) = profile.as_ref() {
                    html! { <ProfileCard profile={profile.clone()} /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
