use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use chrono::Datelike;

/// Confirmation state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    #[default]
    Pending,
}

impl AppointmentStatus {
    /// Value stored in the database and sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
        }
    }

    /// Label shown in the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::Pending => "Pendiente",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown appointment status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for AppointmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "pending" => Ok(AppointmentStatus::Pending),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A scheduled visit for a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Assigned by the data store
    pub id: i64,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM, 24h)
    pub time: String,
    pub client_name: String,
    pub service_name: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub date: String,
    pub time: String,
    pub client_name: String,
    pub service_name: String,
    /// Defaults to pending when omitted
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateAppointmentRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub appointment: Appointment,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

/// A completed service visit kept for history and invoicing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub client_name: String,
    pub service_name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecordListResponse {
    pub records: Vec<ServiceRecord>,
    pub total_revenue: f64,
}

/// An entry of the service catalog (Servicios)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub estimated_duration_minutes: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub estimated_duration_minutes: u32,
    /// Defaults to active when omitted
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub estimated_duration_minutes: Option<u32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub service: Service,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub services: Vec<Service>,
}

/// Contact details the dashboard keeps in browser storage, keyed by client name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientContact {
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Per-client view derived from appointments; never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub name: String,
    pub appointment_count: u32,
    /// Most recent appointment date (YYYY-MM-DD)
    pub last_appointment_date: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientSummary {
    /// Attach locally stored contact info, keeping existing values for blank fields
    pub fn with_contact(mut self, contact: ClientContact) -> Self {
        if let Some(phone) = contact.phone.filter(|p| !p.trim().is_empty()) {
            self.phone = Some(phone);
        }
        if let Some(address) = contact.address.filter(|a| !a.trim().is_empty()) {
            self.address = Some(address);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<ClientSummary>,
}

/// Public view of a dashboard user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
}

/// Login with either the user name or the email in `username`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MockLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockUser {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockLoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<MockUser>,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding day before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding day after the end of the month to complete the last week
    PaddingAfter,
}

/// Represents a calendar month with the appointments of each day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    pub month_name: String,
    pub days: Vec<CalendarDay>,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
}

/// Represents a single cell in the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    /// ISO date for month days
    pub date: Option<String>,
    pub appointments: Vec<Appointment>,
    pub day_type: CalendarDayType,
    pub is_today: bool,
}

/// Represents the current focus date for calendar navigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
        }
    }
}

/// Request to update the calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusRequest {
    pub month: u32,
    pub year: u32,
}

/// Response after updating calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusResponse {
    pub focus_date: CalendarFocusDate,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: u32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}

/// Severity of a dashboard notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemNotice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Figures shown on the dashboard home (Inicio)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardSummary {
    pub appointments_today: u32,
    pub monthly_revenue: f64,
    pub new_clients_this_month: u32,
    /// Month-over-month revenue change in percent; None when last month had no revenue
    pub revenue_growth_percent: Option<f64>,
    pub upcoming_appointments: Vec<Appointment>,
    pub notices: Vec<SystemNotice>,
}

/// Invoicing line for a single client within a month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingLine {
    pub client_name: String,
    pub service_count: u32,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingSummary {
    pub month: u32,
    pub year: u32,
    pub lines: Vec<BillingLine>,
    pub record_count: u32,
    pub total: f64,
}

/// Log line forwarded from the frontend to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogResponse {
    pub success: bool,
}

/// JSON body of every failed API call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
}

/// Spanish month name used across the dashboard
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Enero", 2 => "Febrero", 3 => "Marzo", 4 => "Abril",
        5 => "Mayo", 6 => "Junio", 7 => "Julio", 8 => "Agosto",
        9 => "Septiembre", 10 => "Octubre", 11 => "Noviembre", 12 => "Diciembre",
        _ => "Mes inválido",
    }
}

/// Fields of the appointment form that can be left empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftField {
    Date,
    Time,
    ClientName,
    ServiceName,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Date => "Fecha",
            DraftField::Time => "Hora",
            DraftField::ClientName => "Cliente",
            DraftField::ServiceName => "Servicio",
        }
    }
}

/// Editable appointment form bound to one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppointmentDraft {
    /// Set when editing an existing appointment
    pub id: Option<i64>,
    pub date: String,
    pub time: String,
    pub client_name: String,
    pub service_name: String,
    pub status: AppointmentStatus,
}

impl AppointmentDraft {
    /// Blank form for a new appointment on the given day
    pub fn for_day(year: u32, month: u32, day: u32) -> Self {
        Self {
            date: format!("{:04}-{:02}-{:02}", year, month, day),
            ..Self::default()
        }
    }

    /// Form pre-filled with an existing appointment
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            id: Some(appointment.id),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            client_name: appointment.client_name.clone(),
            service_name: appointment.service_name.clone(),
            status: appointment.status,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Presence checks only; returns every missing field
    pub fn validate(&self) -> Result<(), Vec<DraftField>> {
        let missing: Vec<DraftField> = [
            (DraftField::Date, &self.date),
            (DraftField::Time, &self.time),
            (DraftField::ClientName, &self.client_name),
            (DraftField::ServiceName, &self.service_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    pub fn to_create_request(&self) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            service_name: self.service_name.trim().to_string(),
            status: Some(self.status),
        }
    }

    pub fn to_update_request(&self) -> UpdateAppointmentRequest {
        UpdateAppointmentRequest {
            date: Some(self.date.trim().to_string()),
            time: Some(self.time.trim().to_string()),
            client_name: Some(self.client_name.trim().to_string()),
            service_name: Some(self.service_name.trim().to_string()),
            status: Some(self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_appointment() -> Appointment {
        Appointment {
            id: 7,
            date: "2025-03-14".to_string(),
            time: "10:30".to_string(),
            client_name: "Empresa S.A. de C.V.".to_string(),
            service_name: "Mantenimiento Aire Acondicionado".to_string(),
            status: AppointmentStatus::Confirmed,
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("confirmed".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Confirmed);
        assert_eq!(" Pending ".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Pending);
        assert!("cancelled".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&AppointmentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let parsed: AppointmentStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Pending);
        assert_eq!(AppointmentStatus::Confirmed.label(), "Confirmada");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "Enero");
        assert_eq!(month_name(12), "Diciembre");
        assert_eq!(month_name(0), "Mes inválido");
        assert_eq!(month_name(13), "Mes inválido");
    }

    #[test]
    fn test_draft_for_day_pads_date() {
        let draft = AppointmentDraft::for_day(2025, 3, 5);
        assert_eq!(draft.date, "2025-03-05");
        assert_eq!(draft.status, AppointmentStatus::Pending);
        assert!(!draft.is_edit());
    }

    #[test]
    fn test_draft_validate_reports_all_missing_fields() {
        let mut draft = AppointmentDraft::for_day(2025, 3, 5);
        draft.client_name = "   ".to_string();

        let missing = draft.validate().unwrap_err();
        assert_eq!(
            missing,
            vec![DraftField::Time, DraftField::ClientName, DraftField::ServiceName]
        );
    }

    #[test]
    fn test_draft_from_appointment_round_trips_to_update() {
        let appointment = sample_appointment();
        let draft = AppointmentDraft::from_appointment(&appointment);
        assert!(draft.is_edit());
        assert!(draft.validate().is_ok());

        let update = draft.to_update_request();
        assert_eq!(update.date.as_deref(), Some("2025-03-14"));
        assert_eq!(update.status, Some(AppointmentStatus::Confirmed));
    }

    #[test]
    fn test_draft_create_request_trims_fields() {
        let mut draft = AppointmentDraft::for_day(2025, 3, 5);
        draft.time = " 09:00 ".to_string();
        draft.client_name = " Juan Pérez ".to_string();
        draft.service_name = "Revisión ".to_string();

        let request = draft.to_create_request();
        assert_eq!(request.time, "09:00");
        assert_eq!(request.client_name, "Juan Pérez");
        assert_eq!(request.service_name, "Revisión");
        assert_eq!(request.status, Some(AppointmentStatus::Pending));
    }

    #[test]
    fn test_client_summary_with_contact_ignores_blank_values() {
        let summary = ClientSummary {
            name: "Juan".to_string(),
            appointment_count: 2,
            last_appointment_date: "2025-03-14".to_string(),
            phone: Some("555-0100".to_string()),
            address: None,
        };

        let merged = summary.with_contact(ClientContact {
            phone: Some("  ".to_string()),
            address: Some("Av. Reforma 10".to_string()),
        });

        assert_eq!(merged.phone.as_deref(), Some("555-0100"));
        assert_eq!(merged.address.as_deref(), Some("Av. Reforma 10"));
    }

    #[test]
    fn test_mock_login_response_omits_empty_fields() {
        let response = MockLoginResponse {
            success: false,
            message: "Faltan credenciales".to_string(),
            token: None,
            user: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("token").is_none());
        assert!(json.get("user").is_none());
    }
}
