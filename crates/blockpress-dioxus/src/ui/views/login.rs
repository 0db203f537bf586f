use crate::ui::Route;
use blockpress_api::{ApiClient, CurrentUser};
use dioxus::prelude::*;

/// Login/register form. Required fields are checked client-side before
/// any request goes out; backend validation messages are shown verbatim.
#[component]
pub fn Login() -> Element {
    let client = use_context::<ApiClient>();
    let mut route = use_context::<Signal<Route>>();
    let mut current_user = use_context::<Signal<Option<CurrentUser>>>();

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut registering = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);

    let submit = move |_| {
        let username_value = username.peek().trim().to_string();
        let email_value = email.peek().trim().to_string();
        let password_value = password.peek().clone();

        if username_value.is_empty() || password_value.is_empty() {
            error_message.set(Some("Username and password are required".to_string()));
            return;
        }
        if *registering.peek() && email_value.is_empty() {
            error_message.set(Some("Email is required to register".to_string()));
            return;
        }

        error_message.set(None);
        submitting.set(true);
        let client = client.clone();
        let register = *registering.peek();
        spawn(async move {
            let result = if register {
                client
                    .session()
                    .register(&username_value, &email_value, &password_value)
                    .await
            } else {
                client.session().login(&username_value, &password_value).await
            };
            match result {
                Ok(_) => match client.me().await {
                    Ok(user) => {
                        current_user.set(Some(user));
                        route.set(Route::Home);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                },
                Err(e) => error_message.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "login-form",
            h1 { if registering() { "Register" } else { "Log in" } }
            if let Some(message) = error_message() {
                p { class: "error", "{message}" }
            }
            input {
                r#type: "text",
                placeholder: "Username",
                value: "{username}",
                oninput: move |evt| username.set(evt.value()),
            }
            if registering() {
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            input {
                r#type: "password",
                placeholder: "Password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button {
                disabled: submitting(),
                onclick: submit,
                if registering() { "Create account" } else { "Log in" }
            }
            button {
                class: "link",
                onclick: move |_| {
                    registering.set(!registering());
                    error_message.set(None);
                },
                if registering() { "Have an account? Log in" } else { "New here? Register" }
            }
        }
    }
}
