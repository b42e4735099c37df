use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AppointmentListResponse, AppointmentResponse, BillingSummary, CalendarFocusDate,
    CalendarMonth, ClientListResponse, CreateAppointmentRequest, CreateServiceRequest,
    CurrentDateResponse, DashboardSummary, ErrorResponse, LogEntry, LogResponse, LoginRequest,
    LoginResponse, ServiceListResponse,
    ServiceRecordListResponse, ServiceResponse, UpdateAppointmentRequest,
    UpdateCalendarFocusRequest, UpdateCalendarFocusResponse, UpdateServiceRequest,
};

/// Backend address used by `trunk serve` during development
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client; `FMSS_API_URL` at build time overrides the default base URL
    pub fn new() -> Self {
        match option_env!("FMSS_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url.trim().to_string()),
            _ => Self {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test connection to the backend
    pub async fn test_connection(&self) -> Result<String, String> {
        match Request::get(&self.url("/api/status")).send().await {
            Ok(response) => response
                .text()
                .await
                .map_err(|e| format!("Failed to read status: {}", e)),
            Err(e) => Err(format!("Connection failed: {}", e)),
        }
    }

    // Login

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, String> {
        let builder = Request::post(&self.url("/api/auth/login"))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    // Appointments (Citas)

    pub async fn list_appointments(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        client_name: Option<&str>,
    ) -> Result<AppointmentListResponse, String> {
        let params: Vec<(&str, &str)> = [
            ("start_date", start_date),
            ("end_date", end_date),
            ("client_name", client_name),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();

        let response = Request::get(&self.url("/api/appointments"))
            .query(params)
            .send()
            .await;
        parse(response).await
    }

    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<AppointmentResponse, String> {
        let builder = Request::post(&self.url("/api/appointments"))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        request: &UpdateAppointmentRequest,
    ) -> Result<AppointmentResponse, String> {
        let builder = Request::put(&self.url(&format!("/api/appointments/{}", id)))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<(), String> {
        let response = Request::delete(&self.url(&format!("/api/appointments/{}", id)))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if response.ok() {
            Ok(())
        } else {
            Err(error_message(response).await)
        }
    }

    // Calendar

    /// Get calendar data for a specific month/year
    pub async fn get_calendar_month(&self, month: u32, year: u32) -> Result<CalendarMonth, String> {
        let url = self.url(&format!("/api/calendar/month?month={}&year={}", month, year));
        parse(Request::get(&url).send().await).await
    }

    pub async fn get_current_date(&self) -> Result<CurrentDateResponse, String> {
        parse(Request::get(&self.url("/api/calendar/current-date")).send().await).await
    }

    pub async fn get_focus_date(&self) -> Result<CalendarFocusDate, String> {
        parse(Request::get(&self.url("/api/calendar/focus-date")).send().await).await
    }

    pub async fn set_focus_date(&self, month: u32, year: u32) -> Result<UpdateCalendarFocusResponse, String> {
        let builder = Request::post(&self.url("/api/calendar/focus-date"))
            .json(&UpdateCalendarFocusRequest { month, year })
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    pub async fn navigate_previous_month(&self) -> Result<UpdateCalendarFocusResponse, String> {
        parse(Request::post(&self.url("/api/calendar/focus-date/previous")).send().await).await
    }

    pub async fn navigate_next_month(&self) -> Result<UpdateCalendarFocusResponse, String> {
        parse(Request::post(&self.url("/api/calendar/focus-date/next")).send().await).await
    }

    // Clients (Clientes)

    pub async fn list_clients(&self) -> Result<ClientListResponse, String> {
        parse(Request::get(&self.url("/api/clients")).send().await).await
    }

    // Services (Servicios)

    pub async fn list_services(&self, active_only: bool) -> Result<ServiceListResponse, String> {
        let url = self.url(&format!("/api/services?active_only={}", active_only));
        parse(Request::get(&url).send().await).await
    }

    pub async fn create_service(&self, request: &CreateServiceRequest) -> Result<ServiceResponse, String> {
        let builder = Request::post(&self.url("/api/services"))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    pub async fn update_service(
        &self,
        id: i64,
        request: &UpdateServiceRequest,
    ) -> Result<ServiceResponse, String> {
        let builder = Request::put(&self.url(&format!("/api/services/{}", id)))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }

    pub async fn toggle_service(&self, id: i64) -> Result<ServiceResponse, String> {
        let url = self.url(&format!("/api/services/{}/toggle", id));
        parse(Request::post(&url).send().await).await
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), String> {
        let response = Request::delete(&self.url(&format!("/api/services/{}", id)))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if response.ok() {
            Ok(())
        } else {
            Err(error_message(response).await)
        }
    }

    // History, dashboard and billing

    pub async fn list_history(&self) -> Result<ServiceRecordListResponse, String> {
        parse(Request::get(&self.url("/api/history")).send().await).await
    }

    pub async fn get_dashboard_summary(&self) -> Result<DashboardSummary, String> {
        parse(Request::get(&self.url("/api/dashboard/summary")).send().await).await
    }

    pub async fn get_billing_summary(&self, month: u32, year: u32) -> Result<BillingSummary, String> {
        let url = self.url(&format!("/api/billing/summary?month={}&year={}", month, year));
        parse(Request::get(&url).send().await).await
    }

    // Logging

    pub async fn send_log(&self, entry: &LogEntry) -> Result<LogResponse, String> {
        let builder = Request::post(&self.url("/api/logs"))
            .json(entry)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;
        parse(builder.send().await).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a successful response, or turn a failed one into its error message
async fn parse<T: DeserializeOwned>(
    result: Result<Response, gloo::net::Error>,
) -> Result<T, String> {
    let response = result.map_err(|e| format!("Network error: {}", e))?;
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(error_message(response).await)
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("Request failed with status {}", status),
    }
}
