//! Human-readable rendering of lookup reports.

use scout_registry::ProviderRegistry;
use scout_scanner::LookupReport;
use std::fmt::Write;

/// Render one report as text, ending with the summary line.
pub fn render_report(report: &LookupReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.email);

    if let Some(error) = &report.error {
        let _ = writeln!(out, "  lookup failed: {error}");
    }

    for account in &report.accounts {
        let _ = write!(out, "  [+] {} ({})", account.provider_name, account.provider_url);
        if let Some(recovery) = &account.recovery_email {
            let _ = write!(out, " recovery: {recovery}");
        }
        if let Some(phone) = &account.phone_number {
            let _ = write!(out, " phone: {phone}");
        }
        out.push('\n');
    }

    if !report.inconclusive.is_empty() {
        let names: Vec<&str> = report.inconclusive.iter().map(|id| id.as_str()).collect();
        let _ = writeln!(out, "  [?] {}", names.join(", "));
    }

    let _ = writeln!(
        out,
        "{} providers checked, {} inconclusive",
        report.providers_checked,
        report.inconclusive.len()
    );
    out
}

/// One line per active provider.
pub fn render_providers(registry: &ProviderRegistry) -> String {
    let mut out = String::new();
    for descriptor in registry.list_providers() {
        let _ = write!(out, "{:<24} {}", descriptor.id(), descriptor.display_domain());
        if descriptor.frequent_rate_limit() {
            out.push_str(" (often rate limited)");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report() -> LookupReport {
        serde_json::from_value(json!({
            "run_id": "0f3c7a52-6a47-4d3e-9a59-2c1f3e0d9b11",
            "email": "a@b.com",
            "started_at": "2026-01-15T10:00:00Z",
            "elapsed_ms": 40,
            "providers_checked": 3,
            "accounts": [{
                "login": "a@b.com",
                "provider_name": "P1",
                "provider_url": "p1.com",
                "recovery_email": "a***@b.com",
                "phone_number": null
            }],
            "inconclusive": ["P3"],
            "error": null
        }))
        .expect("valid report")
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&report());
        assert_eq!(
            text,
            "a@b.com\n  [+] P1 (p1.com) recovery: a***@b.com\n  [?] P3\n3 providers checked, 1 inconclusive\n"
        );
    }

    #[test]
    fn test_render_failed_report() {
        let mut report = report();
        report.accounts.clear();
        report.inconclusive.clear();
        report.providers_checked = 0;
        report.error = Some("shared HTTP context unavailable: no TLS backend".to_string());

        let text = render_report(&report);
        assert!(text.contains("lookup failed: shared HTTP context unavailable"));
        assert!(text.ends_with("0 providers checked, 0 inconclusive\n"));
    }
}
