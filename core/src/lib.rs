//! Async gateway client for the academic scheduling API.
//!
//! # Overview
//! Wraps the service's REST surface (courses, instructors, teaching units,
//! calendars, instructor allocation, health) behind one `ScheduleClient`.
//! Every call is one stateless request/response round trip; response bodies
//! come back as parsed JSON, unchanged.
//!
//! # Design
//! - `ClientConfig` (origin, API prefix, timeout, default headers) is fixed
//!   at construction and shared by all endpoint groups.
//! - Endpoint groups only build `HttpRequest` values; `ScheduleClient::execute`
//!   sends them through a `Transport` and is the single place where
//!   failures are normalized into `ApiError`.
//! - `Transport` is the I/O seam: `HttpTransport` (reqwest) in production,
//!   anything recording in tests.
//!
//! ```no_run
//! # async fn run() -> Result<(), agenda_core::ApiError> {
//! use agenda_core::{ClientConfig, Page, Period, ScheduleClient};
//!
//! let client = ScheduleClient::new(ClientConfig::default())?;
//! let courses = client.courses().list(Page::default()).await?;
//! let stats = client.allocation().statistics(Period::month(2025, 3)).await?;
//! # let _ = (courses, stats);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::{parse_response, ScheduleClient};
pub use config::ClientConfig;
pub use error::{normalize, ApiError, ErrorKind, Failure, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{Page, Period};
pub use transport::{HttpTransport, Transport};
pub use types::{
    AllocationUpdate, CalendarGeneration, CalendarUpdate, CourseUpdate, Id, InstructorUpdate,
    NewAllocation, NewCalendar, NewCourse, NewInstructor, NewUnit, UnitUpdate,
};
