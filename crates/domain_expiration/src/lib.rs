//! Expiration Domain
//!
//! Pure, request-scoped computations over already-fetched clients:
//!
//! - **Aggregator** ([`expiration`]): every tracked date of a client and the
//!   representative "nearest" one
//! - **Urgency** ([`urgency`]): day count to Alta / Media / Baja, plus the
//!   overdue state
//! - **Buckets** ([`buckets`]): a rolling 12-month window of expiration
//!   instances for charting
//! - **Listing** ([`listing`]) and **summaries** ([`summary`]) behind the
//!   vencimientos and dashboard endpoints
//!
//! Nothing here reads the clock. Callers pass `today` from a
//! `core_kernel::BusinessCalendar`.

pub mod buckets;
pub mod error;
pub mod expiration;
pub mod listing;
pub mod summary;
pub mod urgency;

pub use buckets::{month_buckets, month_label, BucketEntry, MonthBucket, MESES};
pub use core_kernel::days_until;
pub use error::ExpirationError;
pub use expiration::{
    expirations_of, nearest_expiration, upcoming_expirations, Expiration, ExpirationKind,
    NearestExpiration, UpcomingExpiration,
};
pub use listing::{list_vencimientos, VencimientosQuery};
pub use summary::{dashboard, resumen, DashboardSummary, VencimientosResumen, PROXIMOS_LIMIT};
pub use urgency::{ExpirationStatus, Urgency};
