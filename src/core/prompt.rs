use crate::domain::model::{Prompt, SourceText};
use std::path::Path;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a sustainable coding expert that optimizes code to reduce environmental impact.";

const ROLE: &str = "Role: You are a highly experienced software engineer specializing in \
sustainable and efficient coding practices.";

const TASK: &str = "Task: Analyze the following code snippet and identify potential areas where \
it could be improved to reduce resource consumption (CPU, memory, energy), and minimize \
environmental impact.";

const OUTPUT_RULES: &str = "Please provide ONLY the revised code without any explanations or \
comments. The output should directly replace the original code file.";

/// Renders the review prompt for a source file. Pure: the same input always
/// yields the same prompt.
pub fn build_prompt(source: &SourceText) -> Prompt {
    let language = language_tag(source.path());

    Prompt::new(format!(
        "{ROLE}\n\n{TASK}\n\nCODE:\n```{language}\n{code}\n```\n\n{OUTPUT_RULES}\n",
        code = source.content,
    ))
}

/// Code-block label for a file, based on its extension.
pub fn language_tag(path: &Path) -> String {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return String::new();
    };

    let extension = extension.to_ascii_lowercase();
    let tag = match extension.as_str() {
        "py" | "pyw" => "python",
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        _ => return extension,
    };
    tag.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_source_verbatim() {
        let source = SourceText::new("app.py", "print(\"hello\")\n\n# keep me");
        let prompt = build_prompt(&source);

        assert!(prompt
            .as_str()
            .contains("```python\nprint(\"hello\")\n\n# keep me\n```"));
        assert!(prompt.as_str().starts_with("Role: You are a highly experienced"));
        assert!(prompt.as_str().contains("reduce resource consumption (CPU, memory, energy)"));
        assert!(prompt.as_str().contains("provide ONLY the revised code"));
    }

    #[test]
    fn test_prompt_is_pure() {
        let source = SourceText::new("lib.rs", "fn main() {}");
        assert_eq!(build_prompt(&source), build_prompt(&source.clone()));
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag(Path::new("a/b/script.py")), "python");
        assert_eq!(language_tag(Path::new("main.RS")), "rust");
        assert_eq!(language_tag(Path::new("query.lua")), "lua");
        assert_eq!(language_tag(Path::new("Makefile")), "");
    }

    #[test]
    fn test_prompt_without_extension_uses_bare_fence() {
        let source = SourceText::new("Makefile", "all:\n\techo hi");
        let prompt = build_prompt(&source);
        assert!(prompt.as_str().contains("CODE:\n```\nall:\n\techo hi\n```"));
    }
}
