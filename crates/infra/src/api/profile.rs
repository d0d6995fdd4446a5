//! Admin profile endpoint

use std::sync::Arc;

use memberdesk_domain::constants::PROFILE_ME_PATH;
use memberdesk_domain::AdminProfile;
use tracing::instrument;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// Commands for the signed-in admin's profile
pub struct ProfileCommands {
    client: Arc<ApiClient>,
}

impl ProfileCommands {
    /// Commands sent through `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// The signed-in admin. The server's message is shown as a success.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<AdminProfile, ApiError> {
        self.client.send_data(ApiRequest::get(PROFILE_ME_PATH)).await
    }
}
