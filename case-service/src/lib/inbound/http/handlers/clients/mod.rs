pub mod get_client;

use serde::Deserialize;
use serde::Serialize;

pub use get_client::get_client;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::models::NewClient;
use crate::domain::ids::ClientId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientData {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub national_id: String,
    pub phone: Option<String>,
    pub address: String,
}

impl From<&Client> for ClientData {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.as_str().to_string(),
            last_name: client.last_name.as_str().to_string(),
            email: client.email.as_str().to_string(),
            national_id: client.national_id.as_str().to_string(),
            phone: client.phone.as_ref().map(|p| p.as_str().to_string()),
            address: client.address.clone(),
        }
    }
}

/// Inline client body accepted when opening a case.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewClientRequest {
    first_name: String,
    last_name: String,
    email: String,
    national_id: String,
    phone: Option<String>,
    #[serde(default)]
    address: String,
}

impl NewClientRequest {
    pub fn try_into_client(self) -> Result<NewClient, ClientError> {
        Ok(NewClient {
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            email: EmailAddress::new(self.email)?,
            national_id: NationalId::new(self.national_id)?,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            address: self.address.trim().to_string(),
        })
    }
}
