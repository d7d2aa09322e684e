use anyhow::Result;
use clap::Subcommand;
use pocketbook_core::{Budget, KeyValueStore, MoneyFormat, SENTINEL_CATEGORY};

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List registered categories
    List,

    /// Register a new category
    Add {
        /// Category name (case-sensitive)
        name: String,
    },

    /// Delete a category; its transactions move to "Other"
    Remove {
        name: String,
    },
}

pub fn run(
    cmd: CategoryCommand,
    budget: &mut Budget<impl KeyValueStore>,
    money: &MoneyFormat,
) -> Result<()> {
    match cmd {
        CategoryCommand::List => {
            print!("{}", category_lines(budget, money));
            Ok(())
        }
        CategoryCommand::Add { name } => add(budget, &name),
        CategoryCommand::Remove { name } => remove(budget, &name),
    }
}

/// One line per registered category with its usage and spending.
fn category_lines(budget: &Budget<impl KeyValueStore>, money: &MoneyFormat) -> String {
    let by_category = budget.expense_by_category();
    let mut out = String::new();
    for name in budget.categories().names() {
        let used = budget
            .transactions()
            .iter()
            .filter(|t| &t.category == name)
            .count();
        let marker = if name == SENTINEL_CATEGORY { " (protected)" } else { "" };
        let line = match by_category.get(name) {
            Some(spent) => format!(
                "{name}{marker}: {used} transactions, {} spent\n",
                money.amount(*spent)
            ),
            None => format!("{name}{marker}: {used} transactions\n"),
        };
        out.push_str(&line);
    }
    out
}

fn add(budget: &mut Budget<impl KeyValueStore>, name: &str) -> Result<()> {
    let name = budget.add_category(name)?;
    println!("Added category '{name}'");
    Ok(())
}

fn remove(budget: &mut Budget<impl KeyValueStore>, name: &str) -> Result<()> {
    if !budget.categories().contains(name) {
        println!("No category named '{name}'");
        return Ok(());
    }
    let moved = budget.remove_category(name)?;
    println!("Deleted category '{name}'");
    if moved > 0 {
        println!("Moved {moved} transaction(s) to '{SENTINEL_CATEGORY}'");
    }
    Ok(())
}
