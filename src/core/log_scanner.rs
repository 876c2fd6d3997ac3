use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

/// Failure signatures tested against every log line. A line counts as a
/// failure if any signature matches anywhere in it.
const FAIL_SIGNATURES: [&str; 4] = [
    r"(?i)failed login",
    r"(?i)authentication failure",
    r"(?i)invalid user",
    r"(?i)failed password",
];

/// Four dot-separated 1-3 digit groups. Matching is syntactic only; octets
/// are not range-checked, so "999.999.999.999" is accepted.
const IP_TOKEN: &str = r"\d{1,3}(?:\.\d{1,3}){3}";

/// Example lines retained per suspicious IP
const MAX_EXAMPLES: usize = 3;

/// Aggregated failure evidence for one IP within a single scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspiciousIp {
    /// Number of matching lines attributed to this IP
    pub count: u64,
    /// Up to three matching lines verbatim (trimmed), in encounter order
    pub examples: Vec<String>,
}

/// Stateless log scanner that flags IPs with repeated authentication
/// failures.
///
/// Scanning is a pure function of the input text and the configured
/// threshold; the scanner holds no state across calls.
pub struct LogScanner {
    /// Minimum failure count for an IP to be reported
    threshold: u64,
    /// Compiled failure signatures, tested in order
    fail_patterns: Vec<Regex>,
    /// Compiled IPv4-shaped token pattern
    ip_pattern: Regex,
}

impl LogScanner {
    /// Create a new log scanner with the given report threshold
    pub fn new(threshold: u64) -> Self {
        let fail_patterns = FAIL_SIGNATURES
            .iter()
            .map(|pattern| Regex::new(pattern).expect("invalid failure signature pattern"))
            .collect();
        let ip_pattern = Regex::new(IP_TOKEN).expect("invalid IP token pattern");

        Self {
            threshold,
            fail_patterns,
            ip_pattern,
        }
    }

    /// The configured report threshold
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Scan raw log text and return the IPs whose failure count reached the
    /// threshold, each with its count and up to three example lines.
    ///
    /// Malformed or empty input yields an empty mapping, never an error.
    /// Matching lines without an IP-shaped token contribute to no IP.
    pub fn scan(&self, text: &str) -> HashMap<String, SuspiciousIp> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut examples: HashMap<String, Vec<String>> = HashMap::new();

        for line in text.lines() {
            if !self.fail_patterns.iter().any(|p| p.is_match(line)) {
                continue;
            }
            // First IP-shaped token in the line wins
            if let Some(token) = self.ip_pattern.find(line) {
                let ip = token.as_str().to_string();
                *counts.entry(ip.clone()).or_insert(0) += 1;
                let lines = examples.entry(ip).or_default();
                if lines.len() < MAX_EXAMPLES {
                    lines.push(line.trim().to_string());
                }
            }
        }

        let mut suspicious = HashMap::new();
        for (ip, count) in counts {
            if count >= self.threshold {
                let examples = examples.remove(&ip).unwrap_or_default();
                suspicious.insert(ip, SuspiciousIp { count, examples });
            }
        }
        suspicious
    }
}
