use crate::domain::model::SustainableCode;

/// Strips markdown fencing from a completion so only code remains.
///
/// A fence line is any line whose first non-blank characters are ```` ``` ````
/// or `~~~`, with or without a language tag after it. Such lines are dropped
/// wherever they appear; every other line is kept byte-for-byte. The result
/// is trimmed of surrounding whitespace.
pub fn normalize(raw: &str) -> SustainableCode {
    let kept: String = raw
        .split_inclusive('\n')
        .filter(|line| !is_fence_line(line))
        .collect();

    SustainableCode::new(kept.trim())
}

fn is_fence_line(line: &str) -> bool {
    let content = line.trim_start();
    content.starts_with("```") || content.starts_with("~~~")
}
