//! Makefile model and line classifier.
//!
//! GNU Make has no formal grammar, so lines are classified with an ordered set
//! of patterns. Assignment patterns are tried before the rule pattern, and the
//! rule pattern refuses a `:` directly followed by `=`, which keeps `A := b`
//! from being read as a rule for target `A`.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::scanner::MakefileScanner;
use crate::error::{CheckmakeError, Result};

/// Target list, then everything after the colon. The optional tail must not
/// start with `=` so assignments like `A := b` never match.
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.%/\-$(){}\s]+)\s*:(\s*[^=].*)?$").unwrap());

/// `:=`, `::=` and `:::=`
static SIMPLE_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)\s*:{1,3}=\s*(.*)").unwrap());

static EXPANDED_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)\s*=\s*(.*)").unwrap());

/// `?=`, `!=` and `+=`
static OTHER_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)\s*([?!+]=)\s*(.*)").unwrap());

/// Dot-prefixed built-in targets such as `.PHONY` or `.DEFAULT_GOAL`.
static SPECIAL_TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.[A-Za-z_]+)\s*:(.*)").unwrap());

/// A parsed Makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Makefile {
    pub file_name: String,
    /// Rules in source order, special targets included.
    pub rules: Vec<Rule>,
    /// Variable assignments in source order.
    pub variables: Vec<Variable>,
}

impl Makefile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }
}

/// A rule: target(s), prerequisites and recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// Raw target text. Can hold several space-separated names, patterns or
    /// variable references.
    pub target: String,
    pub dependencies: Vec<String>,
    /// Recipe lines. An inline recipe (`target: deps ; cmd`) comes first.
    pub body: Vec<String>,
    pub file_name: String,
    /// Line of the rule header.
    pub line_number: usize,
}

impl Rule {
    /// Special targets start with a dot (`.PHONY`, `.DEFAULT_GOAL`, ...).
    pub fn is_special(&self) -> bool {
        self.target.starts_with('.')
    }
}

/// A variable assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// Right-hand side, trimmed and unexpanded.
    pub assignment: String,
    /// `true` for immediate assignments (`:=`, `::=`, `:::=`, `!=`).
    ///
    /// `+=` is reported as deferred. Whether it really is depends on how the
    /// variable was first defined, which is not tracked.
    pub simply_expanded: bool,
    /// Reserved for built-in variables; never set by the parser.
    pub special_variable: bool,
    pub file_name: String,
    pub line_number: usize,
}

/// Parse the Makefile at `path`.
///
/// Only I/O problems are errors. Lines that cannot be classified are logged
/// at debug level and skipped.
pub fn parse(path: impl AsRef<Path>) -> Result<Makefile> {
    let path = path.as_ref();
    let scanner = MakefileScanner::open(path)?;
    parse_lines(scanner).map_err(|e| CheckmakeError::io(path, e))
}

/// Parse Makefile content that is already in memory.
pub fn parse_source(file_name: &str, source: &str) -> io::Result<Makefile> {
    parse_reader(file_name, source.as_bytes())
}

/// Parse Makefile content from any buffered reader.
pub fn parse_reader<R: BufRead>(file_name: &str, reader: R) -> io::Result<Makefile> {
    parse_lines(MakefileScanner::new(file_name, reader)?)
}

fn parse_lines<R: BufRead>(mut scanner: MakefileScanner<R>) -> io::Result<Makefile> {
    let mut makefile = Makefile::new(scanner.file_name());

    loop {
        if scanner.text().starts_with('#') {
            scanner.scan()?;
        } else if scanner.text().starts_with('.') {
            if let Some(rule) =
                parse_special_target(scanner.text(), &makefile.file_name, scanner.line_number())
            {
                makefile.rules.push(rule);
            }
            scanner.scan()?;
        } else {
            parse_rule_or_variable(&mut scanner, &mut makefile)?;
        }

        if scanner.finished() {
            return Ok(makefile);
        }
    }
}

fn parse_special_target(line: &str, file_name: &str, line_number: usize) -> Option<Rule> {
    let caps = SPECIAL_TARGET_RE.captures(line)?;
    Some(Rule {
        target: caps[1].trim().to_string(),
        dependencies: caps[2].split_whitespace().map(String::from).collect(),
        body: Vec::new(),
        file_name: file_name.to_string(),
        line_number,
    })
}

/// Classify the current line as a variable or a rule. Rules also consume their
/// recipe, so on return the scanner sits on the first unconsumed line.
fn parse_rule_or_variable<R: BufRead>(
    scanner: &mut MakefileScanner<R>,
    makefile: &mut Makefile,
) -> io::Result<()> {
    let line = scanner.text().to_string();
    let line_number = scanner.line_number();

    if let Some(variable) = parse_assignment(&line, &makefile.file_name, line_number) {
        makefile.variables.push(variable);
        return scanner.scan();
    }

    if let Some(caps) = RULE_RE.captures(&line) {
        let tail = caps.get(2).map_or("", |m| m.as_str()).trim();
        let (raw_dependencies, inline_recipe) = split_inline_recipe(tail);

        let mut body: Vec<String> = inline_recipe.into_iter().map(String::from).collect();

        scanner.scan()?;
        while let Some(command) = recipe_line(scanner.text()) {
            body.push(command);
            scanner.scan()?;
        }

        makefile.rules.push(Rule {
            target: caps[1].trim().to_string(),
            dependencies: raw_dependencies
                .split_whitespace()
                .map(String::from)
                .collect(),
            body,
            file_name: makefile.file_name.clone(),
            line_number,
        });
        return Ok(());
    }

    let unmatched = Unmatched::of(&line);
    if unmatched == Unmatched::Ambiguous {
        debug!(
            "Ambiguous line detected: {:?} (could be variable or rule)",
            line
        );
    }
    if unmatched != Unmatched::Blank {
        debug!("Unable to match line '{}' to a Rule or Variable", line);
    }
    scanner.scan()
}

/// A line that is neither an assignment nor a rule header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unmatched {
    Blank,
    /// Holds both `:` and `=`, e.g. an assignment to a computed name.
    Ambiguous,
    Unknown,
}

impl Unmatched {
    fn of(line: &str) -> Self {
        if line.trim().is_empty() {
            Self::Blank
        } else if line.contains(':') && line.contains('=') {
            Self::Ambiguous
        } else {
            Self::Unknown
        }
    }
}

fn parse_assignment(line: &str, file_name: &str, line_number: usize) -> Option<Variable> {
    let variable = |name: &str, assignment: &str, simply_expanded: bool| Variable {
        name: name.trim().to_string(),
        assignment: assignment.trim().to_string(),
        simply_expanded,
        special_variable: false,
        file_name: file_name.to_string(),
        line_number,
    };

    if let Some(caps) = SIMPLE_VARIABLE_RE.captures(line) {
        return Some(variable(&caps[1], &caps[2], true));
    }
    if let Some(caps) = EXPANDED_VARIABLE_RE.captures(line) {
        return Some(variable(&caps[1], &caps[2], false));
    }
    if let Some(caps) = OTHER_VARIABLE_RE.captures(line) {
        // Only the shell assignment is evaluated immediately
        return Some(variable(&caps[1], &caps[3], &caps[2] == "!="));
    }
    None
}

/// Split `deps ; recipe` on the first `;` that is not escaped with a backslash.
fn split_inline_recipe(tail: &str) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (idx, ch) in tail.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            ';' if !escaped => {
                let recipe = tail[idx + 1..].trim();
                let recipe = (!recipe.is_empty()).then_some(recipe);
                return (tail[..idx].trim(), recipe);
            }
            _ => escaped = false,
        }
    }
    (tail, None)
}

/// Recipe lines start with at least one tab.
fn recipe_line(line: &str) -> Option<String> {
    line.starts_with('\t').then(|| line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_str(source: &str) -> Makefile {
        parse_source("test.mk", source).unwrap()
    }

    fn targets(makefile: &Makefile) -> Vec<&str> {
        makefile.rules.iter().map(|r| r.target.as_str()).collect()
    }

    #[test]
    fn test_parse_simple_makefile() {
        let source = "\
# comment
expanded = \"$(simple)\"
simple := \"foo\"

clean:
\trm bar
\trm foo

foo: bar
\ttouch foo
";
        let makefile = parse_str(source);
        assert_eq!(makefile.file_name, "test.mk");
        assert_eq!(makefile.rules.len(), 2);
        assert_eq!(makefile.variables.len(), 2);

        let clean = &makefile.rules[0];
        assert_eq!(clean.target, "clean");
        assert_eq!(clean.body, vec!["rm bar", "rm foo"]);
        assert_eq!(clean.line_number, 5);
        assert_eq!(clean.file_name, "test.mk");

        let foo = &makefile.rules[1];
        assert_eq!(foo.dependencies, vec!["bar"]);
        assert_eq!(foo.body, vec!["touch foo"]);
        assert_eq!(foo.line_number, 9);

        assert_eq!(makefile.variables[0].name, "expanded");
        assert_eq!(makefile.variables[0].assignment, "\"$(simple)\"");
        assert!(!makefile.variables[0].simply_expanded);
        assert!(!makefile.variables[0].special_variable);
        assert_eq!(makefile.variables[0].line_number, 2);
        assert_eq!(makefile.variables[1].name, "simple");
        assert!(makefile.variables[1].simply_expanded);
    }

    #[test]
    fn test_special_targets_become_rules() {
        let makefile = parse_str(".PHONY: all clean test\n.DEFAULT_GOAL: all\n");
        assert_eq!(targets(&makefile), vec![".PHONY", ".DEFAULT_GOAL"]);
        assert_eq!(makefile.rules[0].dependencies, vec!["all", "clean", "test"]);
        assert_eq!(makefile.rules[0].line_number, 1);
        assert_eq!(makefile.rules[1].dependencies, vec!["all"]);
        assert_eq!(makefile.rules[1].line_number, 2);
        assert!(makefile.rules.iter().all(|r| r.body.is_empty()));
    }

    #[test]
    fn test_unmatched_dot_lines_are_skipped() {
        let makefile = parse_str(".c.o:\n.SILENT\n");
        assert!(makefile.rules.is_empty());
        assert!(makefile.variables.is_empty());
    }

    #[test]
    fn test_conditionals_do_not_become_rules() {
        let source = "
ifeq ($(OS), Windows_NT)
MKDIR := $(shell which mkdir.exe)
else
MKDIR := mkdir
endif
";
        let makefile = parse_str(source);
        assert!(makefile.rules.is_empty());
        assert_eq!(makefile.variables.len(), 2);
        assert!(makefile.variables.iter().all(|v| v.name == "MKDIR"));
    }

    #[test]
    fn test_build_rule_with_variable_dependency() {
        let makefile = parse_str("\nbuild: clean ${BUILD_DIR}\n\t@echo building...\n");
        assert_eq!(makefile.rules.len(), 1);
        let build = &makefile.rules[0];
        assert_eq!(build.target, "build");
        assert_eq!(build.dependencies, vec!["clean", "${BUILD_DIR}"]);
        assert_eq!(build.body[0], "@echo building...");
        assert_eq!(build.line_number, 2);
    }

    #[test]
    fn test_pattern_and_phony_rules() {
        let makefile = parse_str("%.o: %.c\n\t@echo compiling\n.PHONY: all clean\n");
        assert_eq!(targets(&makefile), vec!["%.o", ".PHONY"]);
        assert_eq!(makefile.rules[0].body, vec!["@echo compiling"]);
    }

    #[test]
    fn test_targets_with_special_chars() {
        let source = "\
target_with_underscores:
\techo \"underscore\"
target-with-hyphens  :
\techo \"hyphen\"
file.ext:
\ttouch $@
$(DIR_VAR):
\techo \"dir var\"
${DIR_VAR}/subdir:
\techo \"subdir rule\"
";
        let makefile = parse_str(source);
        assert_eq!(
            targets(&makefile),
            vec![
                "target_with_underscores",
                "target-with-hyphens",
                "file.ext",
                "$(DIR_VAR)",
                "${DIR_VAR}/subdir",
            ]
        );
    }

    #[test]
    fn test_multiple_targets() {
        let makefile = parse_str("target1 target2 : dep\n\techo \"build both\"\n");
        assert_eq!(makefile.rules.len(), 1);
        assert_eq!(makefile.rules[0].target, "target1 target2");
        assert_eq!(makefile.rules[0].dependencies, vec!["dep"]);
    }

    #[test]
    fn test_inline_recipe() {
        let source = "inline: dep ; echo \"one-line recipe\"\nno_deps:; echo \"no deps\"\n";
        let makefile = parse_str(source);
        assert_eq!(makefile.rules[0].target, "inline");
        assert_eq!(makefile.rules[0].dependencies, vec!["dep"]);
        assert_eq!(makefile.rules[0].body, vec!["echo \"one-line recipe\""]);

        assert_eq!(makefile.rules[1].target, "no_deps");
        assert!(makefile.rules[1].dependencies.is_empty());
        assert_eq!(makefile.rules[1].body, vec!["echo \"no deps\""]);
    }

    #[test]
    fn test_inline_recipe_followed_by_body() {
        let source = "t1 t2 : dep1 dep2 ; echo \"combo build\"\n\t@echo \"more lines\"\n";
        let makefile = parse_str(source);
        let rule = &makefile.rules[0];
        assert_eq!(rule.target, "t1 t2");
        assert_eq!(rule.dependencies, vec!["dep1", "dep2"]);
        assert_eq!(
            rule.body,
            vec!["echo \"combo build\"", "@echo \"more lines\""]
        );
    }

    #[test]
    fn test_empty_inline_recipe_is_dropped() {
        let makefile = parse_str("target: dep ;\n");
        assert_eq!(makefile.rules[0].dependencies, vec!["dep"]);
        assert!(makefile.rules[0].body.is_empty());
    }

    #[test]
    fn test_escaped_semicolon_stays_in_dependencies() {
        let makefile = parse_str("target: a\\;b ; cmd\n");
        assert_eq!(makefile.rules[0].dependencies, vec!["a\\;b"]);
        assert_eq!(makefile.rules[0].body, vec!["cmd"]);
    }

    #[test]
    fn test_rule_with_equals_in_prerequisites() {
        let makefile = parse_str("target: prerequisite = value\n\t@echo \"rule with equals\"\n");
        assert_eq!(makefile.rules.len(), 1);
        let rule = &makefile.rules[0];
        assert_eq!(rule.dependencies, vec!["prerequisite", "=", "value"]);
        assert_eq!(rule.body, vec!["@echo \"rule with equals\""]);
        assert!(makefile.variables.is_empty());
    }

    #[test]
    fn test_other_variable_assignments() {
        let makefile = parse_str(
            "CONDITIONAL ?= default-value\nSHELL_VAR != shell command\nAPPEND_VAR += more stuff\n",
        );
        let vars = &makefile.variables;
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0].assignment, "default-value");
        assert!(!vars[0].simply_expanded, "?= is deferred");
        assert_eq!(vars[1].assignment, "shell command");
        assert!(vars[1].simply_expanded, "!= is immediate");
        assert_eq!(vars[2].assignment, "more stuff");
        assert!(!vars[2].simply_expanded, "+= defaults to deferred");
    }

    #[test]
    fn test_assignments_are_never_rules() {
        let source = "\
EXTENSION := .exe
VAR ?= foo
APPEND += bar
SHELL != echo hi
X ::= 1
Y :::= 2
";
        let makefile = parse_str(source);
        assert!(makefile.rules.is_empty());
        let names: Vec<&str> = makefile.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["EXTENSION", "VAR", "APPEND", "SHELL", "X", "Y"]);
        assert!(makefile.variables[4].simply_expanded);
        assert!(makefile.variables[5].simply_expanded);
    }

    #[test]
    fn test_body_stops_at_first_untabbed_line() {
        let makefile = parse_str("a:\n\tone\n\t\ttwo\n    three\nb:\n");
        assert_eq!(makefile.rules[0].body, vec!["one", "two"]);
        assert_eq!(targets(&makefile), vec!["a", "b"]);
        assert_eq!(makefile.rules[1].line_number, 5);
    }

    #[test]
    fn test_unknown_lines_are_skipped() {
        let makefile = parse_str("thisisnotarule\n\n   \ninclude other.mk\n");
        assert!(makefile.rules.is_empty());
        assert!(makefile.variables.is_empty());
    }

    #[test]
    fn test_unmatched_line_kinds() {
        assert_eq!(Unmatched::of("  \t"), Unmatched::Blank);
        assert_eq!(Unmatched::of("$(X) := y"), Unmatched::Ambiguous);
        assert_eq!(Unmatched::of("include other.mk"), Unmatched::Unknown);
    }

    #[test]
    fn test_ambiguous_line_is_skipped() {
        let makefile = parse_str("$(X) := y\nall:\n");
        assert!(makefile.variables.is_empty());
        assert_eq!(targets(&makefile), vec!["all"]);
        assert_eq!(makefile.rules[0].line_number, 2);
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let makefile = parse_str("# all: foo\n# X := 1\n");
        assert!(makefile.rules.is_empty());
        assert!(makefile.variables.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let source = "A := 1\nall: a b ; x\n\ty\n.PHONY: all\n";
        assert_eq!(parse_str(source), parse_str(source));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "all: build\nbuild:\n\tcargo build\n").unwrap();

        let makefile = parse(file.path()).unwrap();
        assert_eq!(makefile.file_name, file.path().display().to_string());
        assert_eq!(targets(&makefile), vec!["all", "build"]);
        assert_eq!(makefile.rules[1].file_name, makefile.file_name);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse("/definitely/not/here/Makefile").unwrap_err();
        assert!(matches!(err, CheckmakeError::Io { .. }));
    }
}
