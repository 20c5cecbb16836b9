pub mod types;

pub use types::{
    Attachment, ClosingSection, HeaderBlock, IncidentRecord, Locale, MedicalRecord,
    NormalizedEvent, PlanPolicy, RenderPage, RenderPlan, StatementDocument, StatementHeader,
    TimeValue, UserProfile, WeatherSnapshot,
};
