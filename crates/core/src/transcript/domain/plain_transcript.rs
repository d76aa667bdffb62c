use super::segment::Segment;

/// Render the plain transcript: one trimmed text line per segment, in
/// segment order, newline-terminated.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        out.push_str(seg.text.trim());
        out.push('\n');
    }
    out
}
