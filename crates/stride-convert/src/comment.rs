//! Comment text normalization.

/// Strips comment markers and reflows the text.
///
/// Lines are trimmed and joined with single spaces; each blank line becomes a
/// `\n` paragraph break.
pub fn process_comment(raw: &str) -> String {
    let body = if let Some(rest) = raw.strip_prefix("//") {
        rest.to_owned()
    } else {
        let inner = raw.strip_suffix("*/").unwrap_or(raw);
        let inner = inner
            .strip_prefix("/**")
            .or_else(|| inner.strip_prefix("/*"))
            .unwrap_or(inner);
        inner
            .split('\n')
            .map(|line| {
                let line = line.trim_start();
                line.strip_prefix('*').unwrap_or(line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    body.trim()
        .split('\n')
        .map(|line| line.trim().to_owned())
        .reduce(|acc, line| {
            let acc = if acc.is_empty() { "\n".to_owned() } else { acc };
            if acc.ends_with('\n') {
                if line.is_empty() {
                    acc + "\n"
                } else {
                    acc + &line
                }
            } else if line.is_empty() {
                acc + "\n"
            } else {
                acc + " " + &line
            }
        })
        .unwrap_or_default()
}

pub fn is_doc_comment(raw: &str) -> bool {
    raw.starts_with("/**")
}
