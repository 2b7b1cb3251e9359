//! Manifest emission - serialize a plan for the downstream scheduler

use crate::error::{Result, ShiftError};
use crate::plan::TransferPlan;

/// Render a plan in the requested format (`yaml` or `json`).
pub fn render(plan: &TransferPlan, format: &str) -> Result<String> {
    match format {
        "yaml" => Ok(serde_yaml::to_string(plan)?),
        "json" => Ok(serde_json::to_string_pretty(plan)?),
        other => Err(ShiftError::ConfigError {
            reason: format!("Unknown format: {}. Use 'yaml' or 'json'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, PlanParams};
    use crate::table_list::TablePair;
    use pretty_assertions::assert_eq;

    fn sample_plan() -> TransferPlan {
        build_plan(
            &[TablePair {
                source_table: "proj:ds.src".to_string(),
                dest_table: "proj:ds.dst".to_string(),
            }],
            &PlanParams {
                name: "sample".to_string(),
                source_bucket: "us-staging".to_string(),
                dest_bucket: "eu-staging".to_string(),
            },
        )
    }

    #[test]
    fn test_yaml_round_trip() {
        let plan = sample_plan();
        let yaml = render(&plan, "yaml").unwrap();
        let parsed: TransferPlan = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(plan, parsed);
    }

    #[test]
    fn test_json_round_trip() {
        let plan = sample_plan();
        let json = render(&plan, "json").unwrap();
        let parsed: TransferPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, parsed);
    }

    #[test]
    fn test_yaml_contains_operator_params() {
        let yaml = render(&sample_plan(), "yaml").unwrap();
        assert!(yaml.contains("name: sample"));
        assert!(yaml.contains("proj_ds.src_export"));
        assert!(yaml.contains("gs://us-staging/proj:ds.src-*.avro"));
        assert!(yaml.contains("write_disposition: WRITE_TRUNCATE"));
        assert!(yaml.contains("retry_delay_secs: 300"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = render(&sample_plan(), "toml").unwrap_err();
        assert_eq!(err.code(), "BQSH-020");
        assert!(err.to_string().contains("toml"));
    }
}
