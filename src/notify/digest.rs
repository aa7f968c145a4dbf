//! Digest message assembled from recent log lines

use serde::Serialize;

pub const DIGEST_TITLE: &str = "GitStarReflector 运行报告";

const DIGEST_HEADER: &str = "运行日志";
const HEADER_WIDTH: usize = 20;

/// Notification payload posted to every server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    pub title: String,
    pub body: String,
    pub format: &'static str,
}

/// Builds the markdown digest; the header line is always present
pub fn compose_digest(lines: &[String]) -> Digest {
    let mut textbox = vec![center(DIGEST_HEADER, HEADER_WIDTH, '-')];
    textbox.extend(lines.iter().cloned());

    Digest {
        title: DIGEST_TITLE.to_string(),
        body: textbox.join("\n"),
        format: "markdown",
    }
}

fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let padding = width - len;
    let left = padding / 2;
    let right = padding - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(right)
    )
}
