use checkmake::parser::parse_source;
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,11}"
}

fn operator() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("="),
        Just(":="),
        Just("::="),
        Just(":::="),
        Just("?="),
        Just("+="),
        Just("!="),
    ]
}

proptest! {
    #[test]
    fn parser_never_panics_under_random_inputs(source in ".{0,200}") {
        let _ = parse_source("fuzz.mk", &source);
    }

    #[test]
    fn parsing_is_idempotent(source in "([a-z:=;#.\t ]{0,20}\n){0,15}") {
        let first = parse_source("Makefile", &source).unwrap();
        let second = parse_source("Makefile", &source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn assignments_are_never_rules(var in name(), op in operator(), value in "[a-z :]{0,20}") {
        let line = format!("{var} {op} {value}\n");
        let makefile = parse_source("Makefile", &line).unwrap();

        prop_assert!(makefile.rules.is_empty());
        prop_assert_eq!(makefile.variables.len(), 1);
        prop_assert_eq!(&makefile.variables[0].name, &var);
        prop_assert_eq!(&makefile.variables[0].assignment, value.trim());

        let immediate = matches!(op, ":=" | "::=" | ":::=" | "!=");
        prop_assert_eq!(makefile.variables[0].simply_expanded, immediate);
    }

    #[test]
    fn tab_indented_lines_become_the_body(
        target in name(),
        commands in prop::collection::vec("[a-z][a-z -]{0,15}", 0..10),
        tabs in 1usize..3,
    ) {
        let mut source = format!("{target}:\n");
        for command in &commands {
            source.push_str(&"\t".repeat(tabs));
            source.push_str(command);
            source.push('\n');
        }
        source.push_str("next:\n");

        let makefile = parse_source("Makefile", &source).unwrap();
        prop_assert_eq!(makefile.rules.len(), 2);

        let expected: Vec<String> = commands.iter().map(|c| c.trim().to_string()).collect();
        prop_assert_eq!(&makefile.rules[0].body, &expected);
        prop_assert_eq!(makefile.rules[1].line_number, commands.len() + 2);
    }

    #[test]
    fn inline_recipe_comes_first(
        target in name(),
        deps in prop::collection::vec(name(), 0..4),
        inline in "[a-z][a-z ]{0,10}",
        more in "[a-z][a-z ]{0,10}",
    ) {
        let source = format!("{target}: {} ; {inline}\n\t{more}\n", deps.join(" "));
        let makefile = parse_source("Makefile", &source).unwrap();

        prop_assert_eq!(makefile.rules.len(), 1);
        prop_assert_eq!(&makefile.rules[0].dependencies, &deps);
        prop_assert_eq!(
            &makefile.rules[0].body,
            &vec![inline.trim().to_string(), more.trim().to_string()]
        );
    }
}
