pub mod booking;
pub mod notification;
pub mod payment;
pub mod property;
pub mod user;

use stayline_auth_types::identity::IdentityHeaders;
use stayline_domain::user::UserRole;

use crate::domain::types::Caller;
use crate::error::BookingServiceError;

/// Decode the gateway role header into a typed caller. Unknown role values
/// never pass a gate.
pub(crate) fn caller_from(identity: &IdentityHeaders) -> Result<Caller, BookingServiceError> {
    let role = UserRole::from_u8(identity.user_role).ok_or(BookingServiceError::Forbidden)?;
    Ok(Caller {
        id: identity.user_id,
        role,
    })
}
