use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::models::Role;
use crate::ui::auth::AuthProvider;
use crate::ui::pages::{
    DashboardPage, EmployeeLoginPage, EmployeePortalPage, EmployeesPage, LeavePage, LoginPage,
    NotFoundPage, RegisterPage,
};
use crate::ui::{NotificationsContainer, ProtectedRoute, provide_notifications};

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

const STAFF: [Role; 2] = [Role::Admin, Role::Hr];

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_notifications();

    view! {
        <Title text="HRCompass"/>
        <NotificationsContainer/>

        <Router>
            <AuthProvider>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=LoginPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/employee/login") view=EmployeeLoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route
                        path=path!("/dashboard")
                        view=|| view! { <ProtectedRoute roles=STAFF.to_vec()><DashboardPage/></ProtectedRoute> }
                    />
                    <Route
                        path=path!("/employees")
                        view=|| view! { <ProtectedRoute roles=STAFF.to_vec()><EmployeesPage/></ProtectedRoute> }
                    />
                    <Route
                        path=path!("/leave")
                        view=|| view! { <ProtectedRoute roles=STAFF.to_vec()><LeavePage/></ProtectedRoute> }
                    />
                    <Route
                        path=path!("/employee/portal")
                        view=|| view! { <ProtectedRoute employee_only=true><EmployeePortalPage/></ProtectedRoute> }
                    />
                </Routes>
            </AuthProvider>
        </Router>
    }
}
