//! Command dispatch: route guards, table screens, and mutations.

use std::io::Write;
use std::sync::Arc;

use chrono::Datelike;
use list_view::{ListSpec, ListView, SortDirection};
use mockable::Clock;
use tracing::debug;

use super::args::{
    Command, CreateArgs, DeleteArgs, EditArgs, FeedbackCommand, IdArgs, LoginArgs,
    MechanicCommand, OpenArgs, RegisterArgs, ServiceCommand, ServiceRequestCommand, UserCommand,
};
use super::error::ConsoleError;
use super::render::{
    Notice, write_admin_dashboard, write_landing, write_login_prompt, write_mechanic_dashboard,
    write_notice, write_shell, write_user_dashboard,
};
use super::tables::{self, TableLayout};
use crate::domain::{
    AuthService, CrmService, Draft, FeedbackForm, MechanicForm, MechanicTransition,
    NewServiceRequest, RecordId, RegistrationInput, Route, RouteAccess, ServiceForm,
    ServiceRequestForm, SessionContext, UserForm, authorize, listings,
};

/// Everything a command needs: use-cases, the session, and display settings.
pub struct Console {
    crm: CrmService,
    auth: AuthService,
    session: SessionContext,
    clock: Arc<dyn Clock>,
    page_size: usize,
}

impl Console {
    /// Assemble a console over already-wired services.
    pub fn new(
        crm: CrmService,
        auth: AuthService,
        session: SessionContext,
        clock: Arc<dyn Clock>,
        page_size: usize,
    ) -> Self {
        Self {
            crm,
            auth,
            session,
            clock,
            page_size,
        }
    }

    /// Current session.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Run one command, writing screens and notices to `out`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConsoleError`] the caller reports as a failure notice.
    pub async fn run(&mut self, command: Command, out: &mut dyn Write) -> Result<(), ConsoleError> {
        match command {
            Command::Login(args) => self.login(args, out).await,
            Command::Register(args) => self.register(&args, out).await,
            Command::Logout => {
                self.session.logout()?;
                write_notice(out, &Notice::success("Logged out."))?;
                Ok(())
            }
            Command::Whoami => self.whoami(out),
            Command::Open(args) => self.open(&args, out).await,
            Command::Mechanic(command) => self.mechanic(command, out).await,
            Command::Service(command) => self.service(command, out).await,
            Command::ServiceRequest(command) => self.service_request(command, out).await,
            Command::Feedback(command) => self.feedback(command, out).await,
            Command::User(command) => self.user(command, out).await,
        }
    }

    async fn login(&mut self, args: LoginArgs, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let LoginArgs { email, password } = args;
        let landing = self
            .auth
            .sign_in(&mut self.session, &email, &password)
            .await?;
        write_notice(out, &Notice::success("Logged in successfully!"))?;
        write_notice(out, &Notice::info(format!("Continue at {landing}")))?;
        Ok(())
    }

    async fn register(&self, args: &RegisterArgs, out: &mut dyn Write) -> Result<(), ConsoleError> {
        self.auth
            .register(RegistrationInput {
                email: &args.email,
                first_name: &args.first_name,
                last_name: args.last_name.as_deref(),
                phone: args.phone.as_deref(),
                role: args.role.as_deref(),
                password: &args.password,
            })
            .await?;
        write_notice(
            out,
            &Notice::success("Account created! Sign in with crm login."),
        )?;
        Ok(())
    }

    fn whoami(&self, out: &mut dyn Write) -> Result<(), ConsoleError> {
        match self.session.user() {
            Some(user) => {
                writeln!(out, "{} <{}> ({})", user.name, user.email, user.role)?;
                writeln!(out, "Home: {}", Route::landing_for(&user.role))?;
            }
            None => writeln!(out, "Not signed in.")?,
        }
        Ok(())
    }

    /// Fail unless the session may see at least one of `routes`.
    fn guard(&self, routes: &[Route]) -> Result<(), ConsoleError> {
        let role = self.session.role();
        let mut fallback = None;
        for route in routes {
            match authorize(*route, role) {
                RouteAccess::Granted(_) => return Ok(()),
                RouteAccess::Redirect(target) => {
                    fallback.get_or_insert(target);
                }
            }
        }
        Err(ConsoleError::Forbidden {
            route: fallback.unwrap_or(Route::Login),
        })
    }

    async fn open(&self, args: &OpenArgs, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let requested = Route::parse(&args.route)?;
        let route = match authorize(requested, self.session.role()) {
            RouteAccess::Granted(route) => route,
            RouteAccess::Redirect(target) => {
                debug!(from = %requested, to = %target, "route redirected");
                write_notice(out, &Notice::info(format!("Redirected to {target}")))?;
                target
            }
        };

        let mut outlet = Vec::new();
        match route {
            Route::Landing => write_landing(&mut outlet)?,
            Route::Login => write_login_prompt(&mut outlet)?,
            Route::AdminDashboard => {
                let snapshot = self.crm.monitoring().await?;
                write_admin_dashboard(&mut outlet, &snapshot)?;
            }
            Route::AdminUsers => {
                let records = self.crm.users().await?;
                self.table(&mut outlet, args, listings::users, &tables::users(), &records)?;
            }
            Route::AdminMechanics => {
                let records = self.crm.mechanics().await?;
                self.table(&mut outlet, args, listings::mechanics, &tables::mechanics(), &records)?;
            }
            Route::AdminServices => {
                let records = self.crm.services().await?;
                self.table(&mut outlet, args, listings::services, &tables::services(), &records)?;
            }
            Route::AdminServiceRequests => {
                let records = self.crm.service_requests().await?;
                self.table(
                    &mut outlet,
                    args,
                    listings::service_requests,
                    &tables::service_requests(),
                    &records,
                )?;
            }
            Route::AdminFeedback => {
                let records = self.crm.feedback().await?;
                self.table(&mut outlet, args, listings::feedback, &tables::feedback(), &records)?;
            }
            Route::MechanicDashboard => write_mechanic_dashboard(&mut outlet)?,
            Route::UserDashboard => write_user_dashboard(&mut outlet)?,
        }

        let year = self.clock.local().year();
        write_shell(
            out,
            route,
            self.session.user(),
            year,
            &String::from_utf8_lossy(&outlet),
        )?;
        Ok(())
    }

    fn table<T>(
        &self,
        out: &mut dyn Write,
        args: &OpenArgs,
        spec: fn(usize) -> Result<ListSpec<T>, list_view::ListViewError>,
        layout: &TableLayout<T>,
        records: &[T],
    ) -> Result<(), ConsoleError> {
        let mut view = ListView::new(spec(self.page_size)?);
        if let Some(query) = &args.search {
            view.set_query(query.as_str());
        }
        if let Some(column) = &args.sort {
            let direction = if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            view.set_sort_direction(column, direction)?;
        }
        view.set_page(args.page.get().saturating_sub(1));
        tables::write_table(out, layout, &view, records)?;
        Ok(())
    }

    async fn mechanic(&self, command: MechanicCommand, out: &mut dyn Write) -> Result<(), ConsoleError> {
        self.guard(&[Route::AdminMechanics])?;
        let notice = match command {
            MechanicCommand::Approve(IdArgs { id }) => {
                self.transition(&id, MechanicTransition::Approve).await?
            }
            MechanicCommand::Reject(IdArgs { id }) => {
                self.transition(&id, MechanicTransition::Reject).await?
            }
            MechanicCommand::Suspend(IdArgs { id }) => {
                self.transition(&id, MechanicTransition::Suspend).await?
            }
            MechanicCommand::Create(CreateArgs { assignments }) => {
                let form: MechanicForm = drafted(MechanicForm::default(), &assignments)?;
                self.crm.create_mechanic(&form).await?;
                Notice::success("Mechanic created!")
            }
            MechanicCommand::Edit(EditArgs { id: raw, assignments }) => {
                let id = RecordId::parse(&raw);
                let records = self.crm.mechanics().await?;
                let record = find(&records, &id, "mechanic", |m| &m.id)?;
                let form = drafted(MechanicForm::from(record), &assignments)?;
                self.crm.update_mechanic(&id, &form).await?;
                Notice::success("Mechanic updated!")
            }
            MechanicCommand::Delete(args) => {
                let id = confirmed(&args, "mechanic")?;
                self.crm.delete_mechanic(&id).await?;
                Notice::success("Mechanic deleted!")
            }
        };
        write_notice(out, &notice)?;
        Ok(())
    }

    async fn transition(
        &self,
        raw: &str,
        transition: MechanicTransition,
    ) -> Result<Notice, ConsoleError> {
        let id = RecordId::parse(raw);
        self.crm.transition_mechanic(&id, transition).await?;
        Ok(Notice::success(format!(
            "Mechanic {}!",
            transition.past_tense()
        )))
    }

    async fn service(&self, command: ServiceCommand, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let notice = match command {
            ServiceCommand::Create(CreateArgs { assignments }) => {
                self.guard(&[Route::AdminServices, Route::MechanicDashboard])?;
                let form = drafted(ServiceForm::default(), &assignments)?;
                self.crm.create_service(&form).await?;
                Notice::success("Service created!")
            }
            ServiceCommand::Edit(EditArgs { id: raw, assignments }) => {
                self.guard(&[Route::AdminServices])?;
                let id = RecordId::parse(&raw);
                let records = self.crm.services().await?;
                let record = find(&records, &id, "service", |s| &s.id)?;
                let form = drafted(ServiceForm::from(record), &assignments)?;
                self.crm.update_service(&id, &form).await?;
                Notice::success("Service updated!")
            }
            ServiceCommand::Delete(args) => {
                self.guard(&[Route::AdminServices])?;
                let id = confirmed(&args, "service")?;
                self.crm.delete_service(&id).await?;
                Notice::success("Service deleted!")
            }
        };
        write_notice(out, &notice)?;
        Ok(())
    }

    async fn service_request(
        &self,
        command: ServiceRequestCommand,
        out: &mut dyn Write,
    ) -> Result<(), ConsoleError> {
        let notice = match command {
            ServiceRequestCommand::Create(CreateArgs { assignments }) => {
                self.guard(&[Route::AdminServiceRequests, Route::UserDashboard])?;
                let form = drafted(NewServiceRequest::default(), &assignments)?;
                self.crm.create_service_request(&form).await?;
                Notice::success("Service request created!")
            }
            ServiceRequestCommand::Edit(EditArgs { id: raw, assignments }) => {
                self.guard(&[Route::AdminServiceRequests])?;
                let id = RecordId::parse(&raw);
                let records = self.crm.service_requests().await?;
                let record = find(&records, &id, "service request", |r| &r.id)?;
                let form = drafted(ServiceRequestForm::from(record), &assignments)?;
                self.crm.update_service_request(&id, &form).await?;
                Notice::success("Service request updated!")
            }
            ServiceRequestCommand::Delete(args) => {
                self.guard(&[Route::AdminServiceRequests])?;
                let id = confirmed(&args, "service request")?;
                self.crm.delete_service_request(&id).await?;
                Notice::success("Service request deleted!")
            }
        };
        write_notice(out, &notice)?;
        Ok(())
    }

    async fn feedback(&self, command: FeedbackCommand, out: &mut dyn Write) -> Result<(), ConsoleError> {
        self.guard(&[Route::AdminFeedback])?;
        let notice = match command {
            FeedbackCommand::Edit(EditArgs { id: raw, assignments }) => {
                let id = RecordId::parse(&raw);
                let records = self.crm.feedback().await?;
                let record = find(&records, &id, "feedback", |f| &f.id)?;
                let form = drafted(FeedbackForm::from(record), &assignments)?;
                self.crm.update_feedback(&id, &form).await?;
                Notice::success("Feedback updated!")
            }
            FeedbackCommand::Delete(args) => {
                let id = confirmed(&args, "feedback")?;
                self.crm.delete_feedback(&id).await?;
                Notice::success("Feedback deleted!")
            }
        };
        write_notice(out, &notice)?;
        Ok(())
    }

    async fn user(&self, command: UserCommand, out: &mut dyn Write) -> Result<(), ConsoleError> {
        self.guard(&[Route::AdminUsers])?;
        let notice = match command {
            UserCommand::Edit(EditArgs { id: raw, assignments }) => {
                let id = RecordId::parse(&raw);
                let records = self.crm.users().await?;
                let record = find(&records, &id, "user", |u| &u.id)?;
                let form = drafted(UserForm::from(record), &assignments)?;
                self.crm.update_user(&id, &form).await?;
                Notice::success("User updated!")
            }
            UserCommand::Delete(args) => {
                let id = confirmed(&args, "user")?;
                self.crm.delete_user(&id).await?;
                Notice::success("User deleted!")
            }
        };
        write_notice(out, &notice)?;
        Ok(())
    }
}

/// Apply `assignments` to a seeded draft and validate it.
fn drafted<D: Draft>(mut draft: D, assignments: &[String]) -> Result<D, ConsoleError> {
    draft.apply_all(assignments)?;
    Ok(draft)
}

fn find<'r, T>(
    records: &'r [T],
    id: &RecordId,
    entity: &'static str,
    key: fn(&T) -> &RecordId,
) -> Result<&'r T, ConsoleError> {
    records
        .iter()
        .find(|record| key(record).matches(id))
        .ok_or_else(|| ConsoleError::NotFound {
            entity,
            id: id.clone(),
        })
}

fn confirmed(args: &DeleteArgs, entity: &'static str) -> Result<RecordId, ConsoleError> {
    if args.yes {
        Ok(RecordId::parse(&args.id))
    } else {
        Err(ConsoleError::ConfirmationRequired { entity })
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
