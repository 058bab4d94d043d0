use yew::prelude::*;

use crate::components::OtpForm;
use crate::routes::Route;

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    html! {
        <OtpForm
            title="Join PahadiMatch"
            subtitle="Enter your phone number to get started"
            switch_prompt="Already have an account?"
            switch_label="Log in"
            switch_to={Route::Login}
        />
    }
}
