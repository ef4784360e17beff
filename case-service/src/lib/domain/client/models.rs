use crate::domain::ids::ClientId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;

/// A client of the firm. Clients are shared by id but only reachable
/// through the accounts they are linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub national_id: NationalId,
    pub phone: Option<PhoneNumber>,
    pub address: String,
}

/// Client data captured when a case is opened for someone not yet on file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub national_id: NationalId,
    pub phone: Option<PhoneNumber>,
    pub address: String,
}
