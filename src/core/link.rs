//! Scheduling link construction for content-pane buttons.

use crate::config::LinkConfig;

/// Build the destination of an action button.
///
/// `name` and `email` are always present and empty so the scheduling page
/// collects them; the sheet (and sub-service, when given) ride along as
/// tagged fields.
pub fn build_action_link(link: &LinkConfig, sheet: &str, sub_service: Option<&str>) -> String {
    let mut params: Vec<(&str, &str)> = vec![
        ("name", ""),
        ("email", ""),
        (link.sheet_field.as_str(), sheet),
    ];
    if let Some(service) = sub_service {
        params.push((link.service_field.as_str(), service));
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let base = link.base_url.trim_end_matches(['?', '&']);
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(base: &str) -> LinkConfig {
        LinkConfig {
            base_url: base.to_string(),
            ..LinkConfig::default()
        }
    }

    #[test]
    fn test_sheet_only_link() {
        let url = build_action_link(&link("https://cal.example/meet"), "CRM management", None);
        assert_eq!(url, "https://cal.example/meet?name=&email=&a1=CRM%20management");
    }

    #[test]
    fn test_sub_service_link() {
        let url = build_action_link(
            &link("https://cal.example/meet"),
            "Lender",
            Some("Loan Pipeline Automation"),
        );
        assert_eq!(
            url,
            "https://cal.example/meet?name=&email=&a1=Lender&a2=Loan%20Pipeline%20Automation"
        );
    }

    #[test]
    fn test_merges_with_existing_query() {
        let url = build_action_link(&link("https://cal.example/meet?month=2025-01"), "A&B", None);
        assert_eq!(url, "https://cal.example/meet?month=2025-01&name=&email=&a1=A%26B");
    }
}
