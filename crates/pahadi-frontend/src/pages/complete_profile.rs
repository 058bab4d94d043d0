use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use pahadi::async_callback;
use pahadi::data::{Gender, ProfileData, ProfileField};

use crate::providers::{Toast, use_session, use_toast};
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Text,
    Date,
    Gender,
    LongText,
}

struct WizardStep {
    title: &'static str,
    icon: &'static str,
    fields: &'static [(ProfileField, &'static str, Input)],
}

static STEPS: [WizardStep; 4] = [
    WizardStep {
        title: "Basic Info",
        icon: "👤",
        fields: &[
            (ProfileField::Name, "Full Name", Input::Text),
            (ProfileField::DateOfBirth, "Date of Birth", Input::Date),
            (ProfileField::Gender, "Gender", Input::Gender),
            (ProfileField::Height, "Height", Input::Text),
            (ProfileField::MaritalStatus, "Marital Status", Input::Text),
        ],
    },
    WizardStep {
        title: "Location & Background",
        icon: "📍",
        fields: &[
            (ProfileField::City, "City", Input::Text),
            (ProfileField::State, "State", Input::Text),
            (ProfileField::Country, "Country", Input::Text),
            (ProfileField::Religion, "Religion", Input::Text),
            (ProfileField::Caste, "Caste", Input::Text),
            (ProfileField::MotherTongue, "Mother Tongue", Input::Text),
        ],
    },
    WizardStep {
        title: "Education & Career",
        icon: "🎓",
        fields: &[
            (ProfileField::Education, "Highest Education", Input::Text),
            (ProfileField::Occupation, "Occupation", Input::Text),
            (ProfileField::AnnualIncome, "Annual Income", Input::Text),
            (ProfileField::EmployedIn, "Employed In", Input::Text),
        ],
    },
    WizardStep {
        title: "About & Preferences",
        icon: "❤️",
        fields: &[
            (ProfileField::Bio, "About Me", Input::LongText),
            (ProfileField::Interests, "Interests (comma separated)", Input::Text),
            (ProfileField::LookingFor, "Looking For", Input::LongText),
            (ProfileField::FamilyType, "Family Type", Input::Text),
            (ProfileField::FamilyValues, "Family Values", Input::Text),
        ],
    },
];

/// Four-step wizard collecting [`ProfileData`]; the last step saves it.
#[function_component(CompleteProfilePage)]
pub fn complete_profile_page() -> Html {
    let context = use_session();
    let toasts = use_toast();
    let navigator = use_navigator();

    let data = use_state(ProfileData::default);
    let current = use_state(|| 0usize);
    let saving = use_state(|| false);

    let api = context.api.clone();
    let save = async_callback!([api, toasts, navigator, data, saving] {
        saving.set(true);
        match api.save_profile(&data).await {
            Ok(()) => {
                saving.set(false);
                toasts.show(Toast::success("Your profile is ready. Start discovering matches!").titled("Profile Created"));
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Profiles);
                }
            }
            Err(err) => {
                saving.set(false);
                toasts.show(Toast::error(err.to_string()).titled("Could not save profile"));
            }
        }
    });

    let on_submit = {
        let current = current.clone();
        let save = save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *current + 1 < STEPS.len() {
                current.set(*current + 1);
            } else {
                save.emit(());
            }
        })
    };

    let on_back = {
        let current = current.clone();
        Callback::from(move |_: MouseEvent| current.set(current.saturating_sub(1)))
    };

    let set_field = |field: ProfileField| {
        let data = data.clone();
        Callback::from(move |value: String| {
            let mut next = (*data).clone();
            next.set(field, &value);
            data.set(next);
        })
    };

    let step = &STEPS[*current];
    let is_last = *current + 1 == STEPS.len();

    html! {
        <div class="min-h-screen bg-gradient-to-br from-rose-50 via-pink-50 to-orange-50 p-4 flex justify-center">
            <div class="w-full max-w-2xl">
                <div class="flex items-center justify-between mb-8">
                    {
                        for STEPS.iter().enumerate().map(|(index, wizard_step)| {
                            let state = if index < *current {
                                "bg-gradient-to-r from-rose-500 to-pink-500 text-white"
                            } else if index == *current {
                                "bg-red-600 text-white ring-4 ring-red-200"
                            } else {
                                "bg-gray-200 text-gray-500"
                            };
                            html! {
                                <div class="flex flex-col items-center flex-1">
                                    <div class={classes!("w-12", "h-12", "rounded-full", "flex", "items-center", "justify-center", state)}>
                                        { if index < *current { "✓" } else { wizard_step.icon } }
                                    </div>
                                    <span class="text-xs mt-2 font-medium text-gray-600">{ wizard_step.title }</span>
                                </div>
                            }
                        })
                    }
                </div>

                <form class="bg-white rounded-2xl shadow-xl border-2 border-red-100 p-8 space-y-4" onsubmit={on_submit}>
                    <h2 class="text-2xl font-bold text-gray-900 font-serif">{ step.title }</h2>
                    {
                        for step.fields.iter().map(|(field, label, input)| html! {
                            <FieldInput
                                label={*label}
                                input={*input}
                                value={(*data).get(*field)}
                                onchange={set_field(*field)}
                            />
                        })
                    }
                    <div class="flex justify-between pt-4">
                        <button
                            type="button"
                            class="px-6 py-2 border-2 border-red-200 text-red-700 rounded-lg disabled:opacity-40"
                            onclick={on_back}
                            disabled={*current == 0 || *saving}
                        >
                            { "Back" }
                        </button>
                        <button
                            type="submit"
                            class="px-6 py-2 bg-gradient-to-r from-red-600 to-orange-600 text-white font-semibold rounded-lg disabled:opacity-50"
                            disabled={*saving}
                        >
                            {
                                match (is_last, *saving) {
                                    (true, true) => "Saving...",
                                    (true, false) => "Complete Profile",
                                    (false, _) => "Next",
                                }
                            }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

// Values are committed on `change` so normalization never fights the cursor.
#[derive(Properties, PartialEq)]
struct FieldInputProps {
    label: &'static str,
    input: Input,
    value: String,
    onchange: Callback<String>,
}

#[function_component(FieldInput)]
fn field_input(props: &FieldInputProps) -> Html {
    let class = "w-full px-4 py-2 border-2 border-red-100 rounded-lg focus:outline-none focus:ring-2 focus:ring-red-500";

    let control = match props.input {
        Input::Text | Input::Date => {
            let onchange = props.onchange.clone();
            let onchange = Callback::from(move |e: Event| {
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    onchange.emit(input.value());
                }
            });
            let kind = if props.input == Input::Date { "date" } else { "text" };
            html! { <input type={kind} {class} value={props.value.clone()} {onchange} /> }
        }
        Input::LongText => {
            let onchange = props.onchange.clone();
            let onchange = Callback::from(move |e: Event| {
                if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                    onchange.emit(input.value());
                }
            });
            html! { <textarea rows="3" {class} value={props.value.clone()} {onchange} /> }
        }
        Input::Gender => {
            let onchange = props.onchange.clone();
            let onchange = Callback::from(move |e: Event| {
                if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                    onchange.emit(select.value());
                }
            });
            html! {
                <select {class} {onchange}>
                    <option value="" selected={props.value.is_empty()}>{ "Select" }</option>
                    {
                        for Gender::ALL.iter().map(|gender| html! {
                            <option value={gender.as_str()} selected={props.value == gender.as_str()}>
                                { gender.label() }
                            </option>
                        })
                    }
                </select>
            }
        }
    };

    html! {
        <label class="block">
            <span class="block text-gray-700 font-semibold mb-1">{ props.label }</span>
            { control }
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_asked_exactly_once() {
        let asked: Vec<ProfileField> = STEPS
            .iter()
            .flat_map(|step| step.fields.iter().map(|(field, _, _)| *field))
            .collect();

        assert_eq!(asked.len(), 20);
        for (i, field) in asked.iter().enumerate() {
            assert!(!asked[i + 1..].contains(field), "{field:?} asked twice");
        }
    }
}
