//! Login screen handler

use tracing::info;
use crate::services::AuthService;
use crate::state::{FieldSpec, FormSchema, FormState, SessionStore};
use crate::utils::errors::Result;
use super::{Mounted, Route, ScreenContext};

pub struct LoginScreen {
    form: FormState,
    auth: AuthService,
    ctx: ScreenContext,
    error: Option<String>,
}

impl LoginScreen {
    /// Signed-in users are sent home instead
    pub fn mount(ctx: &ScreenContext, session: &SessionStore) -> Mounted<Self> {
        if session.is_authenticated() {
            return Mounted::Redirect(Route::Home);
        }
        Mounted::Screen(Self {
            form: FormState::new(FormSchema::new(vec![
                FieldSpec::text("user_id", "User ID").required(),
                FieldSpec::text("password", "Password").required(),
            ])),
            auth: ctx.services.auth_service.clone(),
            ctx: ctx.clone(),
            error: None,
        })
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the entered credentials. On failure the screen stays on
    /// [`Route::Login`] with the error message kept for display.
    pub async fn submit(&mut self, session: &mut SessionStore) -> Result<Route> {
        self.error = None;
        if let Err(e) = self.form.begin_submit() {
            self.error = Some(e.user_message());
            return Ok(Route::Login);
        }

        let user_id = self.form.get("user_id").unwrap_or_default().to_string();
        let password = self.form.get("password").unwrap_or_default().to_string();

        match session.login(&self.auth, &user_id, &password).await {
            Ok(user) => {
                self.form.succeed()?;
                info!(user = %user.display_name(), "Signed in");
                self.ctx.notifier.success(format!("Welcome, {}", user.display_name()));
                Ok(Route::Home)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.ctx.notifier.error(&e);
                self.form.fail(&e)?;
                Ok(Route::Login)
            }
        }
    }
}
