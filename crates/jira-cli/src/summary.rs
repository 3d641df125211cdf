use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use jira_cli::types::{RunSummary, ValidateResult};
use jira_rules::RuleSet;

pub fn print_summary(result: &ValidateResult) {
    println!("Config: {}", result.config.display());
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("{}", totals_table(&result.summary));
    if !result.summary.error_counts.is_empty() {
        println!("{}", errors_table(&result.summary));
    }
}

pub fn print_rules(rules: &RuleSet) {
    println!("{}", rules_table(rules));
}

fn totals_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Batches"),
        header_cell("Records"),
        header_cell("With errors"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.batches),
        Cell::new(summary.records),
        count_cell(summary.records_with_errors, Color::Red),
        count_cell(summary.total_errors(), Color::Red),
    ]);
    table
}

fn errors_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Error"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (message, count) in summary.ranked_errors() {
        table.add_row(vec![Cell::new(message), count_cell(count, Color::Yellow)]);
    }
    table
}

fn rules_table(rules: &RuleSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Applies when"),
        header_cell("Validators"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in rules.iter().enumerate() {
        let validators: Vec<String> = rule.validators.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&rule.name).add_attribute(Attribute::Bold),
            Cell::new(&rule.predicate),
            Cell::new(validators.join("\n")),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_rules::Validator;
    use jira_rules::predicate::{always, type_is};

    #[test]
    fn test_rules_table_lists_every_rule() {
        let rules = RuleSet::builder()
            .rule("bugs", type_is("Bug"), vec![Validator::AssigneeNotEmpty])
            .rule("all", always(), vec![Validator::PriorityNotNull])
            .build();
        let mut table = rules_table(&rules);
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(rendered.contains("bugs"));
        assert!(rendered.contains("type == 'Bug'"));
        assert!(rendered.contains("priority_not_null"));
        assert_eq!(table.row_iter().count(), 2);
    }

    #[test]
    fn test_errors_table_ranks_messages() {
        let mut summary = RunSummary::default();
        summary.error_counts.insert("Rare.".into(), 1);
        summary.error_counts.insert("Common.".into(), 5);
        let mut table = errors_table(&summary);
        table.force_no_tty();
        let rendered = table.to_string();
        let common = rendered.find("Common.").unwrap();
        let rare = rendered.find("Rare.").unwrap();
        assert!(common < rare);
    }
}
