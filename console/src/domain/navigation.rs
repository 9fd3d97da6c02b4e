//! Console routes, role shells, and route access rules.
//!
//! Every screen belongs to an [`Area`]. Protected areas require a signed-in
//! session with a matching role; anything else is redirected.

use std::fmt;

use thiserror::Error;

use super::Role;

/// A screen the console can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public landing page.
    Landing,
    /// Sign-in screen.
    Login,
    /// Admin metrics dashboard.
    AdminDashboard,
    /// Admin user table.
    AdminUsers,
    /// Admin mechanic table.
    AdminMechanics,
    /// Admin service table.
    AdminServices,
    /// Admin service-request table.
    AdminServiceRequests,
    /// Admin feedback table.
    AdminFeedback,
    /// Mechanic dashboard.
    MechanicDashboard,
    /// Customer dashboard.
    UserDashboard,
}

/// Group of routes sharing a shell and an access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Open to everyone.
    Public,
    /// Admins and super-admins.
    Admin,
    /// Mechanics.
    Mechanic,
    /// Customers.
    User,
}

/// Error returned for paths the console does not serve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches '{path}'")]
pub struct UnknownRoute {
    /// Path as supplied.
    pub path: String,
}

impl Route {
    /// Every route, in sidebar order.
    pub const ALL: [Self; 10] = [
        Self::Landing,
        Self::Login,
        Self::AdminDashboard,
        Self::AdminUsers,
        Self::AdminMechanics,
        Self::AdminServices,
        Self::AdminServiceRequests,
        Self::AdminFeedback,
        Self::MechanicDashboard,
        Self::UserDashboard,
    ];

    /// URL-style path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/auth/login",
            Self::AdminDashboard => "/admin",
            Self::AdminUsers => "/admin/user",
            Self::AdminMechanics => "/admin/mechanic",
            Self::AdminServices => "/admin/service",
            Self::AdminServiceRequests => "/admin/service-request",
            Self::AdminFeedback => "/admin/feedback",
            Self::MechanicDashboard => "/mechanic",
            Self::UserDashboard => "/user",
        }
    }

    /// Area the route belongs to.
    #[must_use]
    pub const fn area(self) -> Area {
        match self {
            Self::Landing | Self::Login => Area::Public,
            Self::AdminDashboard
            | Self::AdminUsers
            | Self::AdminMechanics
            | Self::AdminServices
            | Self::AdminServiceRequests
            | Self::AdminFeedback => Area::Admin,
            Self::MechanicDashboard => Area::Mechanic,
            Self::UserDashboard => Area::User,
        }
    }

    /// Resolve a path, ignoring a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownRoute`] when no route has that path.
    pub fn parse(path: &str) -> Result<Self, UnknownRoute> {
        let trimmed = path.trim();
        let normalised = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalised)
            .ok_or_else(|| UnknownRoute {
                path: path.to_owned(),
            })
    }

    /// Where a role lands after signing in.
    ///
    /// # Examples
    ///
    /// ```
    /// use crm_console::domain::{Role, Route};
    ///
    /// assert_eq!(Route::landing_for(&Role::Mechanic), Route::MechanicDashboard);
    /// assert_eq!(Route::landing_for(&Role::SuperAdmin), Route::Landing);
    /// ```
    #[must_use]
    pub const fn landing_for(role: &Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Mechanic => Self::MechanicDashboard,
            Role::User => Self::UserDashboard,
            Role::SuperAdmin | Role::Unrecognised(_) => Self::Landing,
        }
    }

    /// Where a sign-in lands given the role exactly as the backend sent it.
    ///
    /// Only the exact lowercase names of the three dashboards redirect; a
    /// missing, blank, or differently cased role lands on [`Route::Landing`].
    #[must_use]
    pub fn landing_for_reported(role: Option<&str>) -> Self {
        match role {
            Some("admin") => Self::AdminDashboard,
            Some("mechanic") => Self::MechanicDashboard,
            Some("user") => Self::UserDashboard,
            _ => Self::Landing,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Area {
    /// Whether a session with `role` may enter this area.
    #[must_use]
    pub const fn admits(self, role: &Role) -> bool {
        match self {
            Self::Public => true,
            Self::Admin => role.is_admin(),
            Self::Mechanic => matches!(role, Role::Mechanic),
            Self::User => matches!(role, Role::User),
        }
    }
}

/// Outcome of checking a route against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Render the requested route.
    Granted(Route),
    /// Render this route instead.
    Redirect(Route),
}

/// Decide whether `route` may be shown to a session holding `role`.
///
/// Anonymous visitors to protected routes go to the sign-in screen. Signed-in
/// users without the right role go to their own landing route.
#[must_use]
pub fn authorize(route: Route, role: Option<&Role>) -> RouteAccess {
    let area = route.area();
    match role {
        _ if area == Area::Public => RouteAccess::Granted(route),
        None => RouteAccess::Redirect(Route::Login),
        Some(role) if area.admits(role) => RouteAccess::Granted(route),
        Some(role) => RouteAccess::Redirect(Route::landing_for(role)),
    }
}

/// One sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Link text.
    pub label: &'static str,
    /// Target route.
    pub route: Route,
}

/// Layout framing a route: header title, sidebar, and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    /// Header title.
    pub title: &'static str,
    /// Sidebar links; empty for the public shell.
    pub nav: &'static [NavItem],
}

const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        route: Route::AdminDashboard,
    },
    NavItem {
        label: "Users",
        route: Route::AdminUsers,
    },
    NavItem {
        label: "Mechanics",
        route: Route::AdminMechanics,
    },
    NavItem {
        label: "Services",
        route: Route::AdminServices,
    },
    NavItem {
        label: "Service Requests",
        route: Route::AdminServiceRequests,
    },
    NavItem {
        label: "Feedback",
        route: Route::AdminFeedback,
    },
];

const MECHANIC_NAV: &[NavItem] = &[NavItem {
    label: "Dashboard",
    route: Route::MechanicDashboard,
}];

const USER_NAV: &[NavItem] = &[NavItem {
    label: "Dashboard",
    route: Route::UserDashboard,
}];

impl Area {
    /// Shell used by every route in the area.
    #[must_use]
    pub const fn shell(self) -> Shell {
        match self {
            Self::Public => Shell {
                title: "CRM",
                nav: &[],
            },
            Self::Admin => Shell {
                title: "Admin Dashboard",
                nav: ADMIN_NAV,
            },
            Self::Mechanic => Shell {
                title: "Mechanic Dashboard",
                nav: MECHANIC_NAV,
            },
            Self::User => Shell {
                title: "User Dashboard",
                nav: USER_NAV,
            },
        }
    }
}
