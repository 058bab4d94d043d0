use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use pahadi::async_callback;
use pahadi::auth::{Landing, OTP_DIGITS, PHONE_DIGITS};
use pahadi::log::info;

use crate::providers::{Toast, use_session, use_toast};
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Phone,
    Otp,
}

/// Keeps only ASCII digits, up to `max` of them.
fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

#[derive(Properties, PartialEq)]
pub struct OtpFormProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
    /// Shown under the form, e.g. "New here?" with a link to signup.
    pub switch_prompt: AttrValue,
    pub switch_label: AttrValue,
    pub switch_to: Route,
}

/// Phone number, then one-time password. A verified user lands on the profile wizard or
/// the discover page depending on whether their profile is complete.
#[function_component(OtpForm)]
pub fn otp_form(props: &OtpFormProps) -> Html {
    let context = use_session();
    let toasts = use_toast();
    let navigator = use_navigator();

    let phone = use_state(String::new);
    let otp = use_state(String::new);
    let step = use_state(|| Step::Phone);
    let loading = use_state(|| false);

    let on_phone_input = {
        let phone = phone.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                phone.set(digits(&input.value(), PHONE_DIGITS));
            }
        })
    };

    let on_otp_input = {
        let otp = otp.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                otp.set(digits(&input.value(), OTP_DIGITS));
            }
        })
    };

    let api = context.api.clone();
    let request_otp = async_callback!([api, toasts, phone, step, loading] {
        loading.set(true);
        match api.request_otp(&phone).await {
            Ok(response) => {
                let message = if response.message.is_empty() {
                    "OTP sent successfully to your phone".to_string()
                } else {
                    response.message
                };
                toasts.show(Toast::success(message).titled("OTP Sent"));
                step.set(Step::Otp);
            }
            Err(err) => toasts.show(Toast::error(err.to_string()).titled("Could not send OTP")),
        }
        loading.set(false);
    });

    let verify_otp = async_callback!([api, toasts, navigator, phone, otp, loading] {
        loading.set(true);
        match api.verify_otp(&phone, &otp).await {
            Ok(user) => {
                loading.set(false);
                info!(user = %user.id, "Signed in");
                toasts.show(Toast::success(format!("Welcome, {}!", user.display_name())));
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::from(Landing::for_user(&user)));
                }
            }
            Err(err) => {
                loading.set(false);
                toasts.show(Toast::error(err.to_string()).titled("Verification failed"));
            }
        }
    });

    let on_submit = {
        let step = step.clone();
        let request_otp = request_otp.clone();
        let verify_otp = verify_otp.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match *step {
                Step::Phone => request_otp.emit(()),
                Step::Otp => verify_otp.emit(()),
            }
        })
    };

    let on_change_number = {
        let step = step.clone();
        let otp = otp.clone();
        Callback::from(move |_: MouseEvent| {
            otp.set(String::new());
            step.set(Step::Phone);
        })
    };

    let input_class = "w-full px-4 py-3 border-2 border-red-100 rounded-lg focus:outline-none focus:ring-2 focus:ring-red-500";
    let button_class = "w-full py-3 bg-gradient-to-r from-red-600 to-orange-600 text-white font-semibold rounded-lg hover:opacity-90 disabled:opacity-50 cursor-pointer";

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-rose-50 via-pink-50 to-orange-50 p-4">
            <div class="w-full max-w-md bg-white rounded-2xl shadow-xl border-2 border-red-100 p-8">
                <div class="text-center mb-6">
                    <div class="text-4xl mb-2">{ "🏔️❤️" }</div>
                    <h1 class="text-3xl font-bold text-gray-900 font-serif">{ &props.title }</h1>
                    <p class="text-gray-600 mt-2">
                        {
                            match *step {
                                Step::Phone => props.subtitle.to_string(),
                                Step::Otp => format!("Enter the OTP sent to {}", *phone),
                            }
                        }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    {
                        match *step {
                            Step::Phone => html! {
                                <div>
                                    <label for="phone" class="block text-gray-700 font-semibold mb-1">{ "Phone Number" }</label>
                                    <div class="flex">
                                        <span class="px-3 py-3 bg-red-50 border-2 border-r-0 border-red-100 rounded-l-lg text-gray-600">{ "+91" }</span>
                                        <input
                                            id="phone"
                                            type="tel"
                                            inputmode="numeric"
                                            class={classes!(input_class, "rounded-l-none")}
                                            placeholder="10-digit mobile number"
                                            value={(*phone).clone()}
                                            oninput={on_phone_input}
                                        />
                                    </div>
                                </div>
                            },
                            Step::Otp => html! {
                                <div>
                                    <label for="otp" class="block text-gray-700 font-semibold mb-1">{ "One-Time Password" }</label>
                                    <input
                                        id="otp"
                                        type="text"
                                        inputmode="numeric"
                                        autocomplete="one-time-code"
                                        class={classes!(input_class, "tracking-widest", "text-center")}
                                        placeholder="6-digit OTP"
                                        value={(*otp).clone()}
                                        oninput={on_otp_input}
                                    />
                                </div>
                            },
                        }
                    }

                    <button type="submit" class={button_class} disabled={*loading}>
                        {
                            match (*loading, *step) {
                                (true, _) => "Please wait...",
                                (false, Step::Phone) => "Send OTP",
                                (false, Step::Otp) => "Verify & Continue",
                            }
                        }
                    </button>
                </form>

                if *step == Step::Otp {
                    <div class="flex justify-between mt-4 text-sm">
                        <button class="text-gray-600 hover:underline" onclick={on_change_number}>
                            { "Change number" }
                        </button>
                        <button
                            class="text-red-600 hover:underline disabled:opacity-50"
                            disabled={*loading}
                            onclick={request_otp.reform(|_: MouseEvent| ())}
                        >
                            { "Resend OTP" }
                        </button>
                    </div>
                }

                <p class="text-center text-gray-600 mt-6 text-sm">
                    { &props.switch_prompt }{ " " }
                    <Link<Route> to={props.switch_to.clone()} classes="text-red-600 font-semibold hover:underline">
                        { &props.switch_label }
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_filters_and_truncates() {
        assert_eq!(digits("98765 43210", PHONE_DIGITS), "9876543210");
        assert_eq!(digits("+91-98765432109", PHONE_DIGITS), "9198765432");
        assert_eq!(digits("12ab34", OTP_DIGITS), "1234");
        assert_eq!(digits("", OTP_DIGITS), "");
    }
}
