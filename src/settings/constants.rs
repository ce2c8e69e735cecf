/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Shared counter store backing the admission checks
[store]
url = "redis://127.0.0.1:6379"

# Rate limits as "calls/period" strings; period is "s", "m" or "h"
[limits]
# Fallback for namespaces without their own limit
default = "10/s"

# Per-namespace limits
[limits.namespaces]
hubspot = "100/s"
"#;
