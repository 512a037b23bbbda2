use reqwest::Method;
use serde_json::json;

use crate::api::envelope::decode_item;
use crate::api::error::ApiError;
use crate::api::resource::ResourceApi;
use crate::domain::Service;

pub type ServiceApi = ResourceApi<Service>;

impl ResourceApi<Service> {
    /// `PATCH /services/{id}/status` with `{"isActive": bool}`.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<Service, ApiError> {
        let segments = ["services", id, "status"];
        let body = self
            .client()
            .send(Method::PATCH, &segments, Some(&json!({ "isActive": active })))
            .await?;
        decode_item(body).map_err(|message| self.decode_error(&segments, message))
    }
}
