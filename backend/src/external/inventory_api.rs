//! reqwest client for the inventory REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use shared::models::{Department, Movement, NewDepartment, NewProduct, RawProduct};
use shared::reconcile::{CreateMovementRequest, StockAddition, StockRemoval};

use super::{ApiResponse, InventoryApi};
use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};

/// Inventory API client
#[derive(Clone)]
pub struct InventoryApiClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

/// Collections arrive either bare or wrapped in `{"data": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

impl InventoryApiClient {
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/products/{id}` with the id as one percent-encoded path segment
    fn product_url(&self, id: &str) -> AppResult<Url> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(AppError::Validation {
                field: "id".to_string(),
                message: format!("Invalid product id: {:?}", id),
            });
        }
        let mut url = Url::parse(&self.url("/products"))
            .map_err(|e| AppError::Configuration(format!("Invalid upstream URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("Upstream URL cannot hold a path".to_string()))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> AppResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("{} request failed: {}", what, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(what.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable(format!(
                "{} error: {} - {}",
                what, status, body
            )));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
        response.json().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to parse {} response: {}", what, e))
        })
    }

    /// Write calls may answer with an empty body, which counts as success
    async fn acknowledgement(response: Response, what: &str) -> AppResult<ApiResponse> {
        let body = response.text().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to read {} response: {}", what, e))
        })?;
        if body.trim().is_empty() {
            return Ok(ApiResponse::ok());
        }
        serde_json::from_str(&body).map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl InventoryApi for InventoryApiClient {
    async fn list_products(&self) -> AppResult<Vec<RawProduct>> {
        let response = self.send(self.client.get(self.url("/products")), "Products").await?;
        let listing: Listing<RawProduct> = Self::decode(response, "products").await?;
        Ok(listing.into_vec())
    }

    async fn create_product(&self, product: &NewProduct) -> AppResult<RawProduct> {
        let request = self.client.post(self.url("/products")).json(product);
        let response = self.send(request, "Create product").await?;
        Self::decode(response, "create product").await
    }

    async fn delete_product(&self, id: &str) -> AppResult<()> {
        let request = self.client.delete(self.product_url(id)?);
        self.send(request, &format!("Product {}", id)).await?;
        Ok(())
    }

    async fn update_quantity(&self, id: &str, quantity: u64) -> AppResult<()> {
        let request = self
            .client
            .patch(self.product_url(id)?)
            .json(&json!({ "quantity": quantity }));
        self.send(request, &format!("Product {}", id)).await?;
        Ok(())
    }

    async fn add_quantities(&self, additions: &[StockAddition]) -> AppResult<ApiResponse> {
        let request = self.client.post(self.url("/products/add-quantity")).json(additions);
        let response = self.send(request, "Add quantity").await?;
        Self::acknowledgement(response, "add quantity").await
    }

    async fn remove_quantities(&self, removals: &[StockRemoval]) -> AppResult<ApiResponse> {
        let request = self.client.post(self.url("/products/remove-quantity")).json(removals);
        let response = self.send(request, "Remove quantity").await?;
        Self::acknowledgement(response, "remove quantity").await
    }

    async fn create_movement(&self, movement: &CreateMovementRequest) -> AppResult<ApiResponse> {
        let request = self.client.post(self.url("/movements")).json(movement);
        let response = self.send(request, "Create movement").await?;
        Self::acknowledgement(response, "create movement").await
    }

    async fn list_movements(&self) -> AppResult<Vec<Movement>> {
        let response = self.send(self.client.get(self.url("/movements")), "Movements").await?;
        let listing: Listing<Movement> = Self::decode(response, "movements").await?;
        Ok(listing.into_vec())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let response = self
            .send(self.client.get(self.url("/departments")), "Departments")
            .await?;
        let listing: Listing<Department> = Self::decode(response, "departments").await?;
        Ok(listing.into_vec())
    }

    async fn create_department(&self, department: &NewDepartment) -> AppResult<Department> {
        let request = self.client.post(self.url("/departments")).json(department);
        let response = self.send(request, "Create department").await?;
        Self::decode(response, "create department").await
    }

    async fn report_summary(&self) -> AppResult<Value> {
        let response = self
            .send(self.client.get(self.url("/reports/summary")), "Report summary")
            .await?;
        Self::decode(response, "report summary").await
    }
}
