//! Root component, HTML shell and route table

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::core::config::ClientConfig;
use crate::ui::auth::{RequireAuth, provide_auth_context};
use crate::ui::pages::{
    BillingPage, DashboardPage, DocsSearchPage, LoginPage, NotFoundPage, ProfilePage,
    RegisterPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/treasury-console.css"/>
        <Title text="Treasury Monitor"/>

        <Router>
            <AuthProvider>
                <Routes fallback=NotFoundPage>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=(StaticSegment("docs"), StaticSegment("search")) view=DocsSearchPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("billing")
                        view=|| view! { <RequireAuth><BillingPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <RequireAuth><ProfilePage/></RequireAuth> }
                    />
                </Routes>
            </AuthProvider>
        </Router>
    }
}

/// Session context for everything below it; needs the router for redirects
#[component]
fn AuthProvider(children: Children) -> impl IntoView {
    provide_auth_context(ClientConfig::default());
    children()
}
