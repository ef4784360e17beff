use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::service::ensure_active;
use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::ports::ClientRepository;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::Principal;

pub struct ClientService<CR>
where
    CR: ClientRepository,
{
    repository: Arc<CR>,
}

impl<CR> ClientService<CR>
where
    CR: ClientRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ClientServicePort for ClientService<CR>
where
    CR: ClientRepository,
{
    async fn get_client_by_national_id(
        &self,
        principal: &Principal,
        national_id: &NationalId,
    ) -> Result<Client, ClientError> {
        ensure_active(principal)?;

        self.repository
            .find_by_national_id(principal.account_id, national_id)
            .await?
            .ok_or_else(|| ClientError::NotFound(national_id.as_str().to_string()))
    }
}
