use chapterize_core::ChatMessage;

/// Render a window as an explicitly-indexed listing. Indices are global
/// (`offset` + local position) so the detector's returned indices line up
/// across windows.
pub fn format_numbered(window: &[ChatMessage], offset: usize) -> String {
    let mut lines = Vec::with_capacity(window.len());
    for (i, msg) in window.iter().enumerate() {
        lines.push(format!("[{}] {}: {}", offset + i, msg.role, msg.content));
    }
    lines.join("\n")
}

/// The boundary-detection instruction prompt for one window.
pub fn boundary_prompt(window: &[ChatMessage], offset: usize) -> String {
    let formatted = format_numbered(window, offset);
    let last = offset + window.len() - 1;
    format!(
        "Analyze this conversation and identify distinct topic segments. Each message is numbered with its index.\n\
         \n\
         Return a JSON array of objects, each with:\n\
         - \"topic\": short description of the topic (5-10 words max)\n\
         - \"start\": index of the first message in this segment\n\
         - \"end\": index of the last message in this segment\n\
         \n\
         Rules:\n\
         - Segments must be contiguous — no gaps or overlaps\n\
         - The first segment must start at index {offset}\n\
         - The last segment must end at index {last}\n\
         - Every message must belong to exactly one segment\n\
         - Prefer fewer, meaningful segments over many tiny ones\n\
         \n\
         Conversation:\n\
         {formatted}"
    )
}
