use yew::prelude::*;

use crate::components::OtpForm;
use crate::routes::Route;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    html! {
        <OtpForm
            title="Welcome Back"
            subtitle="Enter your phone number to continue"
            switch_prompt="New to PahadiMatch?"
            switch_label="Create an account"
            switch_to={Route::Signup}
        />
    }
}
