//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast::{ToastHost, provide_toasts};
use crate::net::api::app_api;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, login::LoginPage, paper::PaperPage,
    reset_password::ResetPasswordPage, signup::SignupPage, upload::UploadPage, verify_email::VerifyEmailPage,
};
use crate::state::auth::provide_auth;
use crate::state::papers::provide_paper_queries;
use crate::util::route_guard::RouteGuard;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context, API client, paper query cache and toasts, then
/// resolves the session once on mount. Every route renders behind
/// [`RouteGuard`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = provide_auth();
    let api = app_api();
    provide_context(api.clone());
    provide_paper_queries(api.clone());
    provide_toasts();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        auth.refresh(&api).await;
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (auth, api);

    view! {
        <Stylesheet id="leptos" href="/pkg/desci-admin.css"/>
        <Title text="DeSci NG Admin"/>

        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                <Route path=StaticSegment("login") view=|| view! { <RouteGuard><LoginPage/></RouteGuard> }/>
                <Route path=StaticSegment("signup") view=|| view! { <RouteGuard><SignupPage/></RouteGuard> }/>
                <Route
                    path=StaticSegment("forgot-password")
                    view=|| view! { <RouteGuard><ForgotPasswordPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("reset-password")
                    view=|| view! { <RouteGuard><ResetPasswordPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("verify-email")
                    view=|| view! { <RouteGuard><VerifyEmailPage/></RouteGuard> }
                />
                <Route path=StaticSegment("") view=|| view! { <RouteGuard><DashboardPage/></RouteGuard> }/>
                <Route
                    path=(StaticSegment("papers"), ParamSegment("id"))
                    view=|| view! { <RouteGuard><PaperPage/></RouteGuard> }
                />
                <Route path=StaticSegment("upload-paper") view=|| view! { <RouteGuard><UploadPage/></RouteGuard> }/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
