//! Root application component and SSR shell.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::components::session_badge::SessionBadge;
use crate::components::session_provider::SessionProvider;
use crate::state::session::use_session;

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
/// Mounts the session provider around the dashboard shell; everything below
/// reads the session through context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/dashboard-ui.css"/>
        <Title text="Dashboard"/>

        <SessionProvider>
            <DashboardShell/>
        </SessionProvider>
    }
}

/// Dashboard chrome: toolbar with the session badge, and a body that waits
/// for the session before rendering content.
#[component]
fn DashboardShell() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="dashboard-shell">
            <header class="dashboard-shell__header toolbar">
                <span class="toolbar__title">"Dashboard"</span>
                <span class="toolbar__spacer"></span>
                <SessionBadge/>
            </header>
            <main class="dashboard-shell__body">
                <Show
                    when=move || !session.loading()
                    fallback=|| view! { <p class="dashboard-shell__loading">"Loading session..."</p> }
                >
                    <p class="dashboard-shell__ready">"Session established."</p>
                </Show>
            </main>
        </div>
    }
}
