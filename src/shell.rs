//! Line commands for the interactive inventory session and how results are
//! printed.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::domain::{Product, ProductId};
use crate::inventory::{format_price, FieldErrors, Locale, SortMode};

pub const HELP: &str = "\
commands:
  list                                  show products for the current search and sort
  search <text>                         filter by name (empty clears)
  sort <default|price-asc|price-desc|stock-asc|stock-desc>
  add <name> | <price digits> | <stock> add a product
  edit <id> | [name] | [price digits] | [stock]
                                        edit a product; blank fields keep their value
  delete <id>                           ask to delete a product
  yes / no                              confirm or cancel a pending delete
  help                                  show this text
  quit                                  leave";

pub const EMPTY_PRODUCTS: &str = "no products found";
pub const EMPTY_ABILITIES: &str = "no ability found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Sort(SortMode),
    Add {
        name: String,
        price: String,
        stock: String,
    },
    Edit {
        id: ProductId,
        name: Option<String>,
        price: Option<String>,
        stock: Option<String>,
    },
    Delete(ProductId),
    Confirm,
    Cancel,
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<ProductId, String> {
    raw.trim()
        .parse()
        .map(ProductId)
        .map_err(|_| format!("'{}' is not a product id", raw.trim()))
}

fn optional(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "list" | "ls" => Ok(ShellCommand::List),
            "search" => Ok(ShellCommand::Search(rest.trim().to_string())),
            "sort" => rest.trim().parse().map(ShellCommand::Sort),
            "add" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                match fields.as_slice() {
                    [name, price, stock] => Ok(ShellCommand::Add {
                        name: name.to_string(),
                        price: price.to_string(),
                        stock: stock.to_string(),
                    }),
                    _ => Err("usage: add <name> | <price digits> | <stock>".to_string()),
                }
            }
            "edit" => {
                let mut fields = rest.split('|');
                let id = parse_id(fields.next().unwrap_or_default())?;
                let command = ShellCommand::Edit {
                    id,
                    name: optional(fields.next()),
                    price: optional(fields.next()),
                    stock: optional(fields.next()),
                };
                match fields.next() {
                    Some(_) => Err("usage: edit <id> | [name] | [price digits] | [stock]".to_string()),
                    None => Ok(command),
                }
            }
            "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
            "yes" | "y" => Ok(ShellCommand::Confirm),
            "no" | "n" => Ok(ShellCommand::Cancel),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "" => Err("type 'help' for commands".to_string()),
            other => Err(format!("unknown command '{other}'; type 'help'")),
        }
    }
}

/// One line per product, or the empty-state message.
pub fn render_products(rows: &[Product], locale: Locale) -> String {
    if rows.is_empty() {
        return EMPTY_PRODUCTS.to_string();
    }
    let width = rows.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for product in rows {
        let _ = writeln!(
            out,
            "#{:<3} {:<width$}  {:>16}  stock {}",
            product.id,
            product.name,
            format_price(product.price, locale),
            product.stock,
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("  {field}: {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}
