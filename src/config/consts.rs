// src/config/consts.rs

// Upstream rankings site
pub const DEFAULT_BASE_URL: &str = "https://meetdirector.online/reports";
pub const RANKINGS_PAGE: &str = "report_rankings_enhanced.php";
pub const ORG_ID: u32 = 1; // South Carolina High School League
pub const DIV_ID: u32 = 2;

// Net config
pub const USER_AGENT: &str = "swimrank/0.3";
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const UPSTREAM_ENV: &str = "SWIMRANK_UPSTREAM";

// Server
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

// Allow-list
pub const DEFAULT_ALLOWLIST: &str = "division2.csv";

// Query limits
pub const MAX_EVENT_LEN: usize = 64;
