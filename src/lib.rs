//! Bqshift - plan builder for cross-region BigQuery table transfers
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  table_list/  table-list file → TablePair records            │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      APPLICATION LAYER                       │
//! │  plan/        TransferPlan construction, graph, validation,  │
//! │               manifest emission                              │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    INFRASTRUCTURE LAYER                      │
//! │  provider/    image API clients (gce, mock)                  │
//! │  util/        HTTP timeouts                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`table_list`] | Table-list parsing → `TablePair` records |
//! | [`plan`] | DAG construction, validation, manifest emission |
//! | [`provider`] | Read-only compute image lookups |
//! | [`config`] | TOML config with env overrides |
//! | [`error`] | Error types with fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL
// ═══════════════════════════════════════════════════════════════
pub mod table_list;

// ═══════════════════════════════════════════════════════════════
// APPLICATION LAYER
// ═══════════════════════════════════════════════════════════════
pub mod plan;

// ═══════════════════════════════════════════════════════════════
// INFRASTRUCTURE LAYER
// ═══════════════════════════════════════════════════════════════
pub mod provider;
pub mod util;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

pub use error::{FixSuggestion, ShiftError};

pub use config::{require, ShiftConfig};

pub use table_list::{parse_table_list, read_table_list, TablePair};

pub use plan::{
    build_plan, render, validate_plan, Edge, OrchestratorDefaults, PlanParams, PlanReport,
    StepKind, TransferGraph, TransferPlan, TransferStep, DEFAULT_PLAN_NAME, END_NODE, START_NODE,
};

pub use provider::{create_image_service, GceImageClient, Image, ImageService, MockImageService};
