//! ui::banner
//!
//! Fixed texts printed around a run: the mascot speech bubble and the
//! signature under the completion banner.

/// Name shown in the signature.
pub const TEAM: &str = "Refactor-it";

/// Signature printed after the completion banner.
pub fn signature() -> String {
    format!("Coded with \u{2665} by the {} team", TEAM)
}

/// Wrap `message` in a speech bubble spoken by the mascot.
///
/// Multi-line messages keep their line breaks; the bubble is as wide as the
/// longest line.
pub fn speak(message: &str) -> String {
    let lines: Vec<&str> = message.lines().collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(" {}\n", "_".repeat(width + 2)));
    for line in &lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("< {}{} >\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!(" {}\n", "-".repeat(width + 2)));
    out.push_str("        \\   ^__^\n");
    out.push_str("         \\  (oo)\\_______\n");
    out.push_str("            (__)\\       )\\/\\\n");
    out.push_str("                ||----w |\n");
    out.push_str("                ||     ||");
    out
}
