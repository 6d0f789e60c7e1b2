use std::io::Write;

use prettytable::{Row, Table, format};

use crate::config::{CheckmakeConfig, ConfigProvider};
use crate::error::Result;
use crate::rules::RuleRegistry;
use crate::validator::resolve_severity;

const DESCRIPTION_WIDTH: usize = 60;

/// Print every registered rule with its effective severity and description.
pub fn handle_list_rules(
    registry: &RuleRegistry,
    config: &CheckmakeConfig,
    writer: &mut dyn Write,
) -> Result<()> {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::from(["NAME", "SEVERITY", "DESCRIPTION"]));

    for rule in registry.rules_sorted() {
        let rule_config = config.rule_config(rule.name());
        let description = rule.description(&rule_config);
        table.add_row(Row::from([
            rule.name().to_string(),
            resolve_severity(rule, &rule_config).to_string(),
            textwrap::fill(&description, DESCRIPTION_WIDTH),
        ]));
    }

    write!(writer, "{}", table)?;
    Ok(())
}
