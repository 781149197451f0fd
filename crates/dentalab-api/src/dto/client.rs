use chrono::{DateTime, Utc};
use dentalab_core::domain::{Address, Client, ClientProfile, TenantOwned};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl From<ClientRequest> for ClientProfile {
    fn from(req: ClientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub laboratory_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            laboratory_id: client.laboratory_id(),
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}
