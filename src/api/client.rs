// src/api/client.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    api::backend::DashboardBackend,
    common::error::AppError,
    models::{
        analytics::{DailyMetrics, TodayAnalytics},
        inventory::{Ingredient, IngredientUpdate, NewIngredient},
        orders::{Dish, NewOrder},
        report::ReportFile,
    },
    services::ReportService,
};

// Corpo de erro padrão do backend: { "error": "..." }
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: i64,
}

// Só verifica se o dia existe; o corpo é decodificado de novo a partir dos
// bytes para não perder a ordem das chaves.
#[derive(Debug, Deserialize)]
struct DayProbe {
    total_orders: Option<serde::de::IgnoredAny>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    // ---
    // Helpers de envio
    // ---

    // Envia e converte status fora de 2xx em AppError::HttpStatus
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("erro desconhecido").to_string());

        tracing::warn!("🔥 Backend respondeu {}: {}", status, message);
        Err(AppError::HttpStatus { status: status.as_u16(), message })
    }

    // O corpo é lido inteiro e decodificado aqui: erro de formato vira
    // MalformedPayload, nunca erro de rede.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, AppError> {
        self.send(self.request(method, path).json(body)).await
    }
}

#[async_trait]
impl DashboardBackend for ApiClient {
    async fn health(&self) -> Result<(), AppError> {
        self.send(self.request(Method::GET, "/health")).await?;
        Ok(())
    }

    async fn get_dishes(&self) -> Result<Vec<Dish>, AppError> {
        let dishes: Vec<Dish> = self.get_json("/dishes").await?;
        tracing::debug!("Carregados {} pratos", dishes.len());
        Ok(dishes)
    }

    async fn place_order(&self, order: &NewOrder) -> Result<(), AppError> {
        self.send_json(Method::POST, "/orders", order).await?;
        Ok(())
    }

    async fn get_today_analytics(&self) -> Result<TodayAnalytics, AppError> {
        self.get_json("/analytics/today").await
    }

    async fn get_analytics_for_date(&self, date: NaiveDate) -> Result<Option<DailyMetrics>, AppError> {
        let path = format!("/analytics/date/{}", date.format("%Y-%m-%d"));
        let response = match self.send(self.request(Method::GET, &path)).await {
            Ok(response) => response,
            Err(AppError::HttpStatus { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // Sem registro: corpo nulo ou sem `total_orders`
        let body = response.bytes().await?;
        let probe: Option<DayProbe> = serde_json::from_slice(&body)?;
        if probe.and_then(|p| p.total_orders).is_none() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, AppError> {
        self.get_json("/ingredients").await
    }

    async fn add_ingredient(&self, ingredient: &NewIngredient) -> Result<i64, AppError> {
        let response = self.send_json(Method::POST, "/ingredients", ingredient).await?;
        let body = response.bytes().await?;
        let created: CreatedBody = serde_json::from_slice(&body)?;
        Ok(created.id)
    }

    async fn deliver_ingredient(&self, id: i64) -> Result<(), AppError> {
        let path = format!("/ingredients/{}/deliver", id);
        self.send(self.request(Method::POST, &path)).await?;
        Ok(())
    }

    async fn update_ingredient(&self, id: i64, update: &IngredientUpdate) -> Result<(), AppError> {
        let path = format!("/ingredients/{}", id);
        self.send_json(Method::PUT, &path, update).await?;
        Ok(())
    }

    async fn delete_ingredient(&self, id: i64) -> Result<(), AppError> {
        let path = format!("/ingredients/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn download_report(&self, date: NaiveDate) -> Result<ReportFile, AppError> {
        let path = format!("/reports/download/{}", date.format("%Y-%m-%d"));
        let response = self.send(self.request(Method::GET, &path)).await?;

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| ReportService::new().default_file_name(date));

        let bytes = response.bytes().await?.to_vec();
        Ok(ReportFile { file_name, bytes })
    }
}

// attachment; filename=food_sales_report_2024-03-10.csv
fn file_name_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
