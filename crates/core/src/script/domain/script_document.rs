/// Ordered sequence of host-script command lines.
///
/// Generators append discrete commands; the document is serialized once
/// with [`render`](Self::render) and written to disk by the caller. It is
/// never re-read by this system.
#[derive(Debug, Default)]
pub struct ScriptDocument {
    commands: Vec<String>,
}

impl ScriptDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serialize the payload, one command per line, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = self.commands.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Quote a string as a host-script string literal.
///
/// Backslashes and double quotes are escaped so recognized text cannot
/// break out of the literal.
pub fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Format an RGB triple as a host-script array literal.
pub fn color_literal(rgb: [f64; 3]) -> String {
    format!("[{},{},{}]", rgb[0], rgb[1], rgb[2])
}
