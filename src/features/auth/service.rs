use crate::features::auth::dto::{HeaderUserDto, SessionHeaderDto};
use crate::features::auth::model::Session;
use crate::shared::constants::{APP_CITY, APP_NAME, LOGIN_LABEL};

/// Builds the header view of the caller's session.
/// Sign-out happens at the identity provider; we only hand out its URL.
pub struct SessionService {
    end_session_url: String,
}

impl SessionService {
    pub fn new(end_session_url: String) -> Self {
        Self { end_session_url }
    }

    pub fn header(&self, session: &Session) -> SessionHeaderDto {
        let user = session.user().map(|user| HeaderUserDto {
            id: user.sub.clone(),
            display_name: user.display_name().to_string(),
            email: user.email.clone(),
            avatar_initial: user.avatar_initial(),
        });

        SessionHeaderDto {
            app_name: APP_NAME.to_string(),
            city: APP_CITY.to_string(),
            authenticated: user.is_some(),
            sign_out_url: user.as_ref().map(|_| self.end_session_url.clone()),
            login_label: match user {
                Some(_) => None,
                None => Some(LOGIN_LABEL.to_string()),
            },
            user,
        }
    }
}
