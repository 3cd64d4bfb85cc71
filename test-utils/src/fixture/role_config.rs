//! Role configuration YAML.

/// A configuration using every section, with IDs written both as integers and as
/// quoted strings.
pub const FULL_YAML: &str = r#"
verified_role: 100
default_atc_role: "200"
atc_roles:
  2: 202
  5: "205"
pilot_rating_roles:
  1: 301
pilot_hour_roles:
  10: 401
  50: "405"
  100: 410
settings:
  remove_old_atc_roles: true
  remove_old_pilot_rating_roles: false
  remove_lower_hour_roles: true
  auto_sync_interval: 30
  sync_member_delay_ms: 250
channels:
  schedule: 900
  rules: "901"
"#;
