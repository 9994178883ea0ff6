//! # Language definitions
//!
//! Just enough about a language to classify words: reserved words, comment
//! and string delimiters, and which characters are operators.
use log::debug;
use serde::{Deserialize, Serialize};

fn default_quotes() -> String {
    String::from("\"'")
}

fn default_operators() -> String {
    String::from("+-*/%=<>!&|^~?:")
}

fn default_separators() -> String {
    String::from("(){}[];,.@")
}

/// The lexical shape of one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDef {
    /// The name, e.g. `java`
    pub name: String,
    /// File extensions (without the dot)
    pub extensions: Vec<String>,
    /// Reserved words
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Start of a comment that runs to the end of the line
    #[serde(default)]
    pub line_comment: Option<String>,
    /// Start and end of a block comment
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
    /// Characters that open (and close) a string literal
    #[serde(default = "default_quotes")]
    pub quotes: String,
    /// Operator characters
    #[serde(default = "default_operators")]
    pub operators: String,
    /// Separator characters
    #[serde(default = "default_separators")]
    pub separators: String,
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "var", "true", "false", "null",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| String::from(*w)).collect()
}

impl LanguageDef {
    /// Java
    pub fn java() -> Self {
        Self {
            name: String::from("java"),
            extensions: vec![String::from("java")],
            keywords: words(JAVA_KEYWORDS),
            line_comment: Some(String::from("//")),
            block_comment: Some((String::from("/*"), String::from("*/"))),
            quotes: default_quotes(),
            operators: default_operators(),
            separators: default_separators(),
        }
    }

    /// Python
    pub fn python() -> Self {
        Self {
            name: String::from("python"),
            extensions: vec![String::from("py")],
            keywords: words(PYTHON_KEYWORDS),
            line_comment: Some(String::from("#")),
            block_comment: None,
            quotes: default_quotes(),
            operators: default_operators(),
            separators: default_separators(),
        }
    }

    /// Brainfuck: the eight commands are operators, everything else is text
    pub fn brainfuck() -> Self {
        Self {
            name: String::from("brainfuck"),
            extensions: vec![String::from("bf")],
            keywords: Vec::new(),
            line_comment: None,
            block_comment: None,
            quotes: String::new(),
            operators: String::from("+-<>.,[]"),
            separators: String::new(),
        }
    }

    /// Whether files with this extension are written in this language
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A list of known languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Languages(pub Vec<LanguageDef>);

impl Default for Languages {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Languages {
    /// The languages that ship with this crate
    pub fn builtin() -> Self {
        Languages(vec![
            LanguageDef::java(),
            LanguageDef::brainfuck(),
            LanguageDef::python(),
        ])
    }

    /// Find the first language that claims a file extension
    pub fn by_extension(&self, ext: &str) -> Option<&LanguageDef> {
        let found = self.0.iter().find(|l| l.matches_extension(ext));
        debug!(
            "Language for .{}: {:?}",
            ext,
            found.map(|l| l.name.as_str())
        );
        found
    }

    /// Find a language by name
    pub fn by_name(&self, name: &str) -> Option<&LanguageDef> {
        self.0.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::{LanguageDef, Languages};

    #[test]
    fn test_by_extension() {
        let langs = Languages::builtin();
        assert_eq!(langs.by_extension("JAVA").map(|l| &l.name[..]), Some("java"));
        assert_eq!(langs.by_extension("py").map(|l| &l.name[..]), Some("python"));
        assert_eq!(langs.by_extension("rs"), None);
        assert_eq!(langs.by_name("BrainFuck"), Some(&LanguageDef::brainfuck()));
    }

    #[test]
    fn test_ron_defaults() {
        let def: LanguageDef =
            ron::from_str(r#"(name: "lua", extensions: ["lua"], line_comment: Some("--"))"#)
                .unwrap();
        assert!(def.keywords.is_empty());
        assert_eq!(def.quotes, "\"'");
        assert_eq!(def.block_comment, None);
    }
}
