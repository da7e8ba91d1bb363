// Session endpoint
//
// The bearer credential itself is provisioned outside this client; the
// only auth surface here is resolving it to a user profile.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ApiUser;

impl ApiClient {
    /// Fetch the profile of the user the credential belongs to.
    ///
    /// `GET /api/auth/me`
    pub async fn current_user(&self) -> Result<ApiUser, Error> {
        let url = self.api_url("auth/me");
        self.get(url).await
    }
}
