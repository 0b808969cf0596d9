use serde::Serialize;

/// Declarative feature flag. The environment variable is read when the
/// registry is constructed, not per lookup.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureFlag {
    pub id: &'static str,
    pub env_var: &'static str,
    pub default_enabled: bool,
}

impl FeatureFlag {
    pub const fn new(id: &'static str, env_var: &'static str, default_enabled: bool) -> Self {
        Self {
            id,
            env_var,
            default_enabled,
        }
    }

    pub fn resolve(&self) -> bool {
        match std::env::var(self.env_var) {
            Ok(raw) => parse_flag_value(&raw).unwrap_or(self.default_enabled),
            Err(_) => self.default_enabled,
        }
    }
}

/// Truthy/falsy strings accepted in flag environment variables. Anything
/// else falls back to the flag's declared default.
pub fn parse_flag_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values_parse_true() {
        for raw in ["1", "true", "YES", "On", " enabled ", "Enable"] {
            assert_eq!(parse_flag_value(raw), Some(true), "raw: {:?}", raw);
        }
    }

    #[test]
    fn falsy_values_parse_false() {
        for raw in ["0", "false", "NO", "Off", " disabled ", "Disable"] {
            assert_eq!(parse_flag_value(raw), Some(false), "raw: {:?}", raw);
        }
    }

    #[test]
    fn garbage_is_neither() {
        for raw in ["", "maybe", "2", "truthy", "on!"] {
            assert_eq!(parse_flag_value(raw), None, "raw: {:?}", raw);
        }
    }

    #[test]
    fn unset_env_var_uses_default() {
        let on = FeatureFlag::new("x", "NIMBUS_FLAG_THAT_IS_NEVER_SET", true);
        let off = FeatureFlag::new("x", "NIMBUS_FLAG_THAT_IS_NEVER_SET", false);
        assert!(on.resolve());
        assert!(!off.resolve());
    }
}
