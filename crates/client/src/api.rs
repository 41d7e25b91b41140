//! REST client for the Waymark server.
//!
//! Wraps every `/api` route using [`reqwest`]. The bearer token returned by
//! register or login is kept on the client and sent with later calls.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::models::{
    AuthSession, Id, Landmark, LandmarkChanges, LandmarkDeleted, LandmarkQuery, MeResponse,
    Message, NewLandmark, NewVisit, PlanDraft, User, Visit, VisitChanges, VisitPlan, VisitQuery,
};

/// HTTP client for one Waymark server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resume a session from a stored token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    // ---- auth ----

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ClientError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let session: AuthSession = self.send_json(Method::POST, "/auth/register", &body).await?;
        Ok(self.start_session(session))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let session: AuthSession = self.send_json(Method::POST, "/auth/login", &body).await?;
        Ok(self.start_session(session))
    }

    /// Clear the server cookie and forget the token. The token is dropped
    /// even if the server call fails.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self.send(self.request(Method::GET, "/auth/logout")).await;
        self.token = None;
        result.map(|_: Message| ())
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        let me: MeResponse = self.send(self.request(Method::GET, "/auth/me")).await?;
        Ok(me.user)
    }

    // ---- landmarks ----

    pub async fn list_landmarks(&self, query: &LandmarkQuery) -> Result<Vec<Landmark>, ClientError> {
        self.send(self.request(Method::GET, "/landmarks").query(query))
            .await
    }

    pub async fn get_landmark(&self, id: Id) -> Result<Landmark, ClientError> {
        self.send(self.request(Method::GET, &format!("/landmarks/{id}")))
            .await
    }

    pub async fn create_landmark(&self, landmark: &NewLandmark) -> Result<Landmark, ClientError> {
        self.send_json(Method::POST, "/landmarks", landmark).await
    }

    pub async fn update_landmark(
        &self,
        id: Id,
        changes: &LandmarkChanges,
    ) -> Result<Landmark, ClientError> {
        self.send_json(Method::PUT, &format!("/landmarks/{id}"), changes)
            .await
    }

    /// Delete a landmark. The server also deletes every plan that used it
    /// and reports how many.
    pub async fn delete_landmark(&self, id: Id) -> Result<LandmarkDeleted, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/landmarks/{id}")))
            .await
    }

    // ---- visits ----

    pub async fn list_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, ClientError> {
        self.send(self.request(Method::GET, "/visited").query(query))
            .await
    }

    pub async fn visits_for_landmark(&self, landmark_id: Id) -> Result<Vec<Visit>, ClientError> {
        self.send(self.request(Method::GET, &format!("/visited/landmark/{landmark_id}")))
            .await
    }

    pub async fn get_visit(&self, id: Id) -> Result<Visit, ClientError> {
        self.send(self.request(Method::GET, &format!("/visited/detail/{id}")))
            .await
    }

    pub async fn create_visit(&self, visit: &NewVisit) -> Result<Visit, ClientError> {
        self.send_json(Method::POST, "/visited", visit).await
    }

    pub async fn update_visit(&self, id: Id, changes: &VisitChanges) -> Result<Visit, ClientError> {
        self.send_json(Method::PUT, &format!("/visited/{id}"), changes)
            .await
    }

    pub async fn delete_visit(&self, id: Id) -> Result<(), ClientError> {
        let _: Message = self
            .send(self.request(Method::DELETE, &format!("/visited/{id}")))
            .await?;
        Ok(())
    }

    // ---- visit plans ----

    pub async fn list_plans(&self) -> Result<Vec<VisitPlan>, ClientError> {
        self.send(self.request(Method::GET, "/visitplans")).await
    }

    pub async fn get_plan(&self, id: Id) -> Result<VisitPlan, ClientError> {
        self.send(self.request(Method::GET, &format!("/visitplans/{id}")))
            .await
    }

    pub async fn create_plan(&self, plan: &PlanDraft) -> Result<VisitPlan, ClientError> {
        self.send_json(Method::POST, "/visitplans", plan).await
    }

    pub async fn update_plan(&self, id: Id, plan: &PlanDraft) -> Result<VisitPlan, ClientError> {
        self.send_json(Method::PUT, &format!("/visitplans/{id}"), plan)
            .await
    }

    pub async fn delete_plan(&self, id: Id) -> Result<(), ClientError> {
        let _: Message = self
            .send(self.request(Method::DELETE, &format!("/visitplans/{id}")))
            .await?;
        Ok(())
    }

    // ---- private helpers ----

    fn start_session(&mut self, session: AuthSession) -> User {
        tracing::debug!(user_id = session.user.id, "Signed in");
        self.token = Some(session.token);
        session.user
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let err = ClientError::from_body(status, &body);
            tracing::debug!(error = %err, "Request failed");
            return Err(err);
        }
        Ok(response.json::<T>().await?)
    }
}
