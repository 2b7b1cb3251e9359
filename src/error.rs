//! Bqshift Error Types with Error Codes
//!
//! Error code ranges:
//! - BQSH-000-009: Table-list errors
//! - BQSH-010-019: Plan/graph errors
//! - BQSH-020-029: Config errors
//! - BQSH-030-039: Image API errors
//! - BQSH-090-099: IO/serde passthrough

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShiftError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
pub enum ShiftError {
    // ═══════════════════════════════════════════
    // TABLE-LIST ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[BQSH-001] Failed to read table list '{path}': {source}")]
    #[diagnostic(
        code(bqshift::table_list_read),
        help("Check the file path exists and is readable")
    )]
    TableListRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[BQSH-002] Malformed table list row at line {line}: expected at least 2 fields, found {found}")]
    #[diagnostic(
        code(bqshift::malformed_row),
        help("Each data row needs 'source_table,dest_table'")
    )]
    MalformedRow { line: usize, found: usize },

    // ═══════════════════════════════════════════
    // PLAN/GRAPH ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[BQSH-010] Cycle detected in transfer plan: {cycle}")]
    #[diagnostic(code(bqshift::cycle_detected))]
    CycleDetected { cycle: String },

    #[error("[BQSH-011] Edge '{from}' → '{to}' references unknown step '{unknown}'")]
    #[diagnostic(code(bqshift::unknown_step))]
    UnknownStep {
        from: String,
        to: String,
        unknown: String,
    },

    #[error("[BQSH-012] Duplicate step id '{id}' in transfer plan")]
    #[diagnostic(
        code(bqshift::duplicate_step),
        help("Remove the duplicate table row; the orchestrator rejects duplicate task ids")
    )]
    DuplicateStep { id: String },

    // ═══════════════════════════════════════════
    // CONFIG ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[BQSH-020] Config error: {reason}")]
    #[diagnostic(code(bqshift::config))]
    ConfigError { reason: String },

    #[error("[BQSH-021] Missing setting '{setting}': pass {flag}, set {env}, or add it to the config file")]
    #[diagnostic(code(bqshift::missing_setting))]
    MissingSetting {
        setting: String,
        flag: String,
        env: String,
    },

    // ═══════════════════════════════════════════
    // IMAGE API ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[BQSH-030] Image API error: {message}")]
    #[diagnostic(code(bqshift::image_api))]
    ImageApi { message: String },

    #[error("[BQSH-031] Unknown image provider: '{name}'")]
    #[diagnostic(code(bqshift::unknown_provider), help("Available: gce, mock"))]
    UnknownProvider { name: String },

    // ═══════════════════════════════════════════
    // IO / SERDE ERRORS (090-099)
    // ═══════════════════════════════════════════
    #[error("[BQSH-090] IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("[BQSH-091] JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("[BQSH-092] YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ShiftError {
    /// Get the error code (e.g., "BQSH-001")
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableListRead { .. } => "BQSH-001",
            Self::MalformedRow { .. } => "BQSH-002",
            Self::CycleDetected { .. } => "BQSH-010",
            Self::UnknownStep { .. } => "BQSH-011",
            Self::DuplicateStep { .. } => "BQSH-012",
            Self::ConfigError { .. } => "BQSH-020",
            Self::MissingSetting { .. } => "BQSH-021",
            Self::ImageApi { .. } => "BQSH-030",
            Self::UnknownProvider { .. } => "BQSH-031",
            Self::IoError(_) => "BQSH-090",
            Self::JsonError(_) => "BQSH-091",
            Self::YamlError(_) => "BQSH-092",
        }
    }
}

impl FixSuggestion for ShiftError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ShiftError::TableListRead { .. } => {
                Some("Check the table-list path exists and is readable")
            }
            ShiftError::MalformedRow { .. } => {
                Some("Each data row needs at least 'source_table,dest_table'")
            }
            ShiftError::CycleDetected { .. } => {
                Some("Remove circular edges from the plan before deploying")
            }
            ShiftError::UnknownStep { .. } => {
                Some("Every edge endpoint must name a step or a sentinel")
            }
            ShiftError::DuplicateStep { .. } => {
                Some("Remove the duplicate table row from the table list")
            }
            ShiftError::ConfigError { .. } => {
                Some("Check ~/.config/bqshift/config.toml for syntax errors")
            }
            ShiftError::MissingSetting { .. } => {
                Some("Run with --help to see the flags and env vars for each setting")
            }
            ShiftError::ImageApi { .. } => {
                Some("Check GCP_ACCESS_TOKEN and that the project/image exists")
            }
            ShiftError::UnknownProvider { .. } => Some("Use 'gce' or 'mock'"),
            ShiftError::IoError(_) => Some("Check file path and permissions"),
            ShiftError::JsonError(_) => Some("Check JSON syntax"),
            ShiftError::YamlError(_) => Some("Check YAML syntax"),
        }
    }
}
