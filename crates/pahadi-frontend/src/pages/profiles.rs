use yew::prelude::*;

use pahadi::data::ProfileList;
use pahadi::log::info;

use crate::components::{ProfileCard, Spinner};
use crate::providers::{Toast, use_session, use_toast};

/// Position in the discover deck after moving past the current profile.
fn advance(page: u32, index: usize, page_len: usize) -> (u32, usize) {
    if index + 1 < page_len {
        (page, index + 1)
    } else {
        (page + 1, 0)
    }
}

#[function_component(ProfilesPage)]
pub fn profiles_page() -> Html {
    let context = use_session();
    let toasts = use_toast();

    let page = use_state(|| 1u32);
    let index = use_state(|| 0usize);
    let list = use_state(|| None::<ProfileList>);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);

    use_effect_with((*page, *reload), {
        let api = context.api.clone();
        let list = list.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();

        move |(page, _): &(u32, u32)| {
            let page = *page;
            wasm_bindgen_futures::spawn_local(async move {
                loading.set(true);
                error_msg.set(None);

                match api.list_profiles(page).await {
                    Ok(fetched) => {
                        info!(page, count = fetched.profiles.len(), "Loaded profiles");
                        list.set(Some(fetched));
                    }
                    Err(err) => error_msg.set(Some(format!("Failed to load profiles: {err}"))),
                }
                loading.set(false);
            });
        }
    });

    let next_profile = {
        let page = page.clone();
        let index = index.clone();
        let list = list.clone();
        move || {
            let page_len = list.as_ref().map_or(0, |list| list.profiles.len());
            let (next_page, next_index) = advance(*page, *index, page_len);
            page.set(next_page);
            index.set(next_index);
        }
    };

    let current = list
        .as_ref()
        .and_then(|list| list.profiles.get(*index))
        .cloned();

    let on_like = {
        let toasts = toasts.clone();
        let next_profile = next_profile.clone();
        let name = current.as_ref().map(|p| p.display_name().to_string());
        Callback::from(move |_: MouseEvent| {
            if let Some(name) = &name {
                toasts.show(
                    Toast::success(format!("You've expressed interest in {name}"))
                        .titled("Interest Sent!"),
                );
            }
            next_profile();
        })
    };

    let on_skip = {
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            toasts.show(Toast::info("Profile skipped"));
            next_profile();
        })
    };

    let on_retry = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set(*reload + 1))
    };

    let on_start_over = {
        let page = page.clone();
        let index = index.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            page.set(1);
            index.set(0);
            reload.set(*reload + 1);
        })
    };

    let content = if *loading {
        html! { <Spinner label="Finding matches..." /> }
    } else if let Some(error) = error_msg.as_ref() {
        html! {
            <div class="flex flex-col items-center justify-center min-h-[60vh] space-y-4">
                <p class="text-gray-600">{ error }</p>
                <button class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700" onclick={on_retry}>
                    { "Try Again" }
                </button>
            </div>
        }
    } else if let Some(profile) = current {
        html! {
            <ProfileCard profile={profile}>
                <div class="flex justify-center space-x-6 pt-4">
                    <button
                        class="w-16 h-16 rounded-full border-2 border-gray-300 text-2xl text-gray-500 hover:bg-gray-100"
                        title="Skip"
                        onclick={on_skip}
                    >
                        { "✕" }
                    </button>
                    <button
                        class="w-16 h-16 rounded-full bg-gradient-to-r from-red-600 to-orange-600 text-2xl text-white hover:opacity-90"
                        title="Send interest"
                        onclick={on_like}
                    >
                        { "♥" }
                    </button>
                </div>
            </ProfileCard>
        }
    } else {
        html! {
            <div class="flex flex-col items-center justify-center min-h-[60vh] space-y-4">
                <p class="text-gray-600">{ "You've seen everyone for now. Check back soon!" }</p>
                <button class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700" onclick={on_start_over}>
                    { "Start Over" }
                </button>
            </div>
        }
    };

    html! {
        <div class="max-w-md mx-auto">
            <h1 class="text-3xl font-bold bg-gradient-to-r from-red-600 to-orange-600 bg-clip-text text-transparent mb-6 font-serif">
                { "खोजें (Discover)" }
            </h1>
            { content }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_within_page() {
        assert_eq!(advance(1, 0, 3), (1, 1));
        assert_eq!(advance(1, 1, 3), (1, 2));
    }

    #[test]
    fn test_advance_past_last_profile_loads_next_page() {
        assert_eq!(advance(1, 2, 3), (2, 0));
        assert_eq!(advance(4, 0, 0), (5, 0));
    }
}
