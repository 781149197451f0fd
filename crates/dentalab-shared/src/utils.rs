//! Utility functions

use uuid::Uuid;

pub fn parse_uuid(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

/// Keeps addresses out of log lines in full.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) if at_pos > 0 => {
            let (local, domain) = email.split_at(at_pos);
            let keep = if local.chars().count() <= 2 { 1 } else { 2 };
            let prefix: String = local.chars().take(keep).collect();
            format!("{}***{}", prefix, domain)
        }
        _ => "***".to_string(),
    }
}

/// Normalized form used for email comparisons.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
