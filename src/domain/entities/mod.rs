//! # Domain Entities
//!
//! Records mirrored from the backend's JSON shapes. The backend owns every
//! invariant (uniqueness, status transitions, referential integrity); the
//! console only decodes, displays and re-submits these values.
//!
//! ## Tables
//!
//! - **MotherAccount**: managed upstream account hosting invited seats
//! - **InviteRecord**: a user/invite row
//! - **RedemptionCode**: single-use code exchanged for a seat invite
//! - **AuditLogEntry**: admin action trail
//! - **BulkOperationLog**: history of batch operations
//! - **JobRecord**: background job queue entry
//!
//! ## Snapshots
//!
//! - **DashboardStats**, **QuotaSnapshot**, **SkuSummary**

/// Declares a lowercase wire status enum with an `Unknown` fallback so a
/// newer backend status never breaks decoding of a whole table.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
            #[serde(other)]
            Unknown,
        }

        impl $name {
            /// Parse from the wire representation (case-insensitive).
            pub fn parse(s: &str) -> Self {
                match s.to_lowercase().as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Unknown,
                }
            }

            /// Wire representation, also used as the `status` filter value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unknown => "unknown",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

mod audit_log;
mod bulk_operation;
mod code;
mod invite;
mod job;
mod mother;
mod stats;

pub use audit_log::AuditLogEntry;
pub use bulk_operation::BulkOperationLog;
pub use code::{CodeStatus, RedemptionCode};
pub use invite::{InviteRecord, InviteStatus};
pub use job::{JobRecord, JobStatus};
pub use mother::{MotherAccount, MotherStatus};
pub use stats::{DashboardStats, QuotaSnapshot, SkuSummary};
