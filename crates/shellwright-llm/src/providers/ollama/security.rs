const MAX_ERROR_LEN: usize = 300;

/// Sanitize Ollama API error messages before they reach the console
pub(crate) fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    // Local filesystem layout of the daemon is not useful to the user
    if lower.contains("/home")
        || lower.contains("/root")
        || lower.contains("/var")
        || lower.contains("\\users\\")
    {
        return "An internal error occurred. Please check your Ollama installation.".to_string();
    }

    if lower.contains("model") && (lower.contains("not found") || lower.contains("pull")) {
        return "Model not available. Pull it first with: ollama pull <model>".to_string();
    }

    if error.len() > MAX_ERROR_LEN {
        format!(
            "{}...(truncated)",
            crate::util::truncate_safe(error, MAX_ERROR_LEN)
        )
    } else {
        error.to_string()
    }
}
