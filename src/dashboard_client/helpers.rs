pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Extensions end up in the URL path; keep anything else out of it.
pub fn sanitize_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}
