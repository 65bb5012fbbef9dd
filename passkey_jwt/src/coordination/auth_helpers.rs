use crate::token::verify_token;
use crate::userdb::{User, UserStore};

use super::errors::CoordinationError;

/// Resolve a bearer token to the user it was issued for.
///
/// A valid signature over a since-deleted user still yields Unauthorized;
/// the token is only as good as the account behind it.
pub async fn user_from_token(token: &str) -> Result<User, CoordinationError> {
    let claims = verify_token(token).map_err(|_| CoordinationError::Unauthorized.log())?;

    UserStore::get_user(&claims.user_id)
        .await?
        .ok_or_else(|| CoordinationError::Unauthorized.log())
}
