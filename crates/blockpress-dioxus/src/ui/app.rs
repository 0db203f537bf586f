use blockpress_api::{ApiClient, ApiError, CurrentUser, Session};
use dioxus::prelude::*;

const APP_CSS: &str = include_str!("assets/app.css");

/// Where the app currently is. No URL routing on desktop; the route
/// lives in a signal provided through context and the header drives it.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Login,
    Drafts,
    Author { username: String },
    Post { slug: String },
    Editor { slug: Option<String> },
}

/// Shared reaction to an expired session, provided through context.
/// Views call it when a request comes back [`ApiError::Unauthorized`]:
/// the tokens are already cleared by then, and this clears the shown
/// user and routes to the login screen.
#[derive(Clone, Copy)]
pub struct ForceLogin(pub Callback<()>);

/// Whether an API failure means the session is gone and the user has to
/// log in again. The token store is already cleared below this layer;
/// this decides the visible half.
pub(crate) fn session_expired(error: &ApiError) -> bool {
    matches!(error, ApiError::Unauthorized)
}

#[component]
pub fn App(api_url: String) -> Element {
    let client = use_context_provider(|| ApiClient::new(Session::new(api_url)));
    let mut route = use_context_provider(|| Signal::new(Route::Home));
    let mut current_user = use_context_provider(|| Signal::new(None::<CurrentUser>));
    use_context_provider(|| {
        ForceLogin(Callback::new(move |_: ()| {
            current_user.set(None);
            route.set(Route::Login);
        }))
    });

    let logged_in = current_user.read().is_some();

    rsx! {
        style { {APP_CSS} }
        div {
            class: "app-container",
            header {
                class: "app-header",
                button { onclick: move |_| route.set(Route::Home), "Home" }
                if logged_in {
                    button { onclick: move |_| route.set(Route::Drafts), "Drafts" }
                    button {
                        onclick: move |_| route.set(Route::Editor { slug: None }),
                        "New Post"
                    }
                }
                div { class: "spacer" }
                if let Some(user) = current_user.read().as_ref() {
                    span { "{user.username}" }
                }
                if logged_in {
                    button {
                        onclick: {
                            let client = client.clone();
                            move |_| {
                                let client = client.clone();
                                spawn(async move {
                                    client.session().logout().await;
                                });
                                current_user.set(None);
                                route.set(Route::Home);
                            }
                        },
                        "Log out"
                    }
                } else {
                    button { onclick: move |_| route.set(Route::Login), "Log in" }
                }
            }
            main {
                class: "main-content",
                {
                    match route() {
                        Route::Home => rsx! { super::views::Home {} },
                        Route::Login => rsx! { super::views::Login {} },
                        Route::Drafts => rsx! { super::views::Drafts {} },
                        Route::Author { username } => rsx! { super::views::AuthorPosts { username } },
                        Route::Post { slug } => rsx! { super::views::PostView { slug } },
                        Route::Editor { slug } => rsx! { super::views::EditorView { slug } },
                    }
                }
            }
        }
    }
}
