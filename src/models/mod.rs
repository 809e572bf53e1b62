/// Data models for alerts, incidents, and the request/response surface
pub mod incident;
pub mod requests;
pub mod responses;

pub use incident::{
    DetectionType, DispatchResult, DispatchStatus, Incident, LocationFix, SortOrder, Transport,
};
pub use requests::{
    ActionRequest, AnalyzeAudioRequest, Contact, DetectionData, EmergencyAlertRequest,
    JuryTestRequest, LocationHistoryRequest, LocationQueryRequest, LocationInput, TestSmsRequest,
    UpdateLocationRequest,
};
pub use responses::{AlertResponse, ContactDispatchReport, ResponseStatus};
