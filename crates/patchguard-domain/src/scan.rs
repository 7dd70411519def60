//! Lightweight class-source scanning.
//!
//! The plugin and preference checks need to know which method a change lands
//! in and whether a changed line touches the class's public surface. A full
//! language parser is out of scope; method boundaries are recognized
//! textually, which is what the upstream diff's `@@` context uses too.

/// Method declarations in `content`: (1-based line number, method name),
/// in file order.
pub fn method_declarations(content: &str) -> Vec<(u32, String)> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            declared_method_name(line).map(|name| (idx as u32 + 1, name))
        })
        .collect()
}

/// The method whose declaration most closely precedes (or is on) `line`.
pub fn enclosing_method(content: &str, line: u32) -> Option<String> {
    method_declarations(content)
        .into_iter()
        .take_while(|(decl_line, _)| *decl_line <= line)
        .last()
        .map(|(_, name)| name)
}

/// Whether a line declares part of the class's public surface: a public or
/// protected method signature, or the constructor.
pub fn touches_public_surface(line: &str) -> bool {
    let Some(name) = declared_method_name(line) else {
        return false;
    };
    if name == "__construct" {
        return true;
    }
    let trimmed = line.trim_start();
    trimmed.starts_with("public") || trimmed.starts_with("protected")
}

fn declared_method_name(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let at = trimmed.find("function ")?;
    // Reject lines where `function` appears mid-expression (closures assigned
    // to variables still count as boundaries in practice; string literals
    // containing the word do not).
    let before = &trimmed[..at];
    if before.contains('"') || before.contains('\'') || before.contains("//") {
        return None;
    }
    let rest = &trimmed[at + "function ".len()..];
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        return None;
    }
    Some(name)
}
