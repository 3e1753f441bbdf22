//! # CLI Interface
//!
//! Command-line arguments for `expense-client` (clap derive) and the plain
//! text rendering of what the commands return.
//!
//! Every run signs in, executes one command and signs out again.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared::{format_currency, format_money, format_percent, ExpenseCard, Summary};

use crate::services::api::{CardDraft, CardFilters};

/// Personal expense organizer client.
///
/// Talks to the expense API: balance, expense cards and the summary zone.
#[derive(Parser, Debug)]
#[command(name = "expense-client", version, propagate_version = true)]
pub struct Cli {
    /// Account username.
    #[arg(long, short = 'u', env = "EXPENSES_USERNAME")]
    pub username: Option<String>,

    /// Account password.
    #[arg(long, short = 'p', env = "EXPENSES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API origin, overriding `EXPENSES_API_URL`.
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the zone, total expenses and percentage of the balance.
    Summary,
    /// List expense cards.
    Cards(FilterArgs),
    /// Show one card.
    Card {
        id: i64,
    },
    /// Show the balance, or set it with `balance set <value>`.
    Balance {
        #[command(subcommand)]
        action: Option<BalanceAction>,
    },
    /// Create a card.
    Add(NewCardArgs),
    /// Change fields of an existing card.
    Edit {
        id: i64,
        #[command(flatten)]
        changes: CardChanges,
    },
    /// Delete a card.
    Delete {
        id: i64,
    },
    /// Download the spreadsheet export.
    Export {
        /// Destination file.
        #[arg(default_value = "financas.xlsx")]
        file: PathBuf,
    },
    /// Create the account, then show the summary.
    Register,
}

#[derive(Subcommand, Debug)]
pub enum BalanceAction {
    /// Set the net balance (`2500`, `2500,00` or `2500.00`).
    Set {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only cards with this status (`pendente`, `pago`).
    #[arg(long)]
    pub status: Option<String>,

    /// Only cards of this expense type (`casa`, `saude`, ...).
    #[arg(long = "type")]
    pub expense_type: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> CardFilters {
        CardFilters {
            status: self.status.clone(),
            expense_type: self.expense_type.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct NewCardArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    /// 1 is the most urgent.
    #[arg(long)]
    pub urgency: String,

    #[arg(long = "type")]
    pub expense_type: String,

    #[arg(long, allow_hyphen_values = true)]
    pub value: String,

    /// Due date, `YYYY-MM-DD`.
    #[arg(long)]
    pub due: String,

    #[arg(long, default_value = "pendente")]
    pub status: String,
}

impl NewCardArgs {
    pub fn to_draft(&self) -> CardDraft {
        CardDraft {
            title: self.title.clone(),
            urgency: self.urgency.clone(),
            expense_type: self.expense_type.clone(),
            value: self.value.clone(),
            due_date: self.due.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CardChanges {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub urgency: Option<String>,
    #[arg(long = "type")]
    pub expense_type: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl CardChanges {
    /// Overlay the given fields on a draft of the current card
    pub fn apply(&self, mut draft: CardDraft) -> CardDraft {
        let fields = [
            (&self.title, &mut draft.title),
            (&self.urgency, &mut draft.urgency),
            (&self.expense_type, &mut draft.expense_type),
            (&self.value, &mut draft.value),
            (&self.due, &mut draft.due_date),
            (&self.status, &mut draft.status),
        ];
        for (change, field) in fields {
            if let Some(value) = change {
                *field = value.clone();
            }
        }
        draft
    }
}

pub fn render_summary(summary: &Summary) -> String {
    let mut lines = vec![format!("Situação:         {}", summary.zone.badge())];
    if let Some(balance) = summary.net_balance {
        lines.push(format!("Saldo líquido:    {}", format_currency(balance)));
    }
    lines.push(format!(
        "Total despesas:   {}",
        format_currency(summary.total_expenses)
    ));
    lines.push(format!(
        "% do saldo:       {}",
        format_percent(summary.total_percentage)
    ));
    lines.push(format!("Despesas:         {}", summary.cards_count));
    lines.join("\n")
}

pub fn render_card_row(card: &ExpenseCard) -> String {
    format!(
        "#{:<4} {:<28} {:>2}  {:<12} {:>14} {:>8}  {}  {}",
        card.id,
        card.display_title(),
        card.urgency,
        card.expense_type.label(),
        format_money(card.value),
        format_percent(card.percentage.unwrap_or(0.0)),
        card.due_date.format("%Y-%m-%d"),
        card.status,
    )
}

pub fn render_cards(cards: &[ExpenseCard]) -> String {
    if cards.is_empty() {
        return "Nenhuma despesa cadastrada.".to_string();
    }
    cards
        .iter()
        .map(render_card_row)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;
    use shared::{CardStatus, ExpenseType, Zone};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_balance_set_negative() {
        let cli =
            Cli::try_parse_from(["expense-client", "-u", "ana", "balance", "set", "-1"]).unwrap();
        match cli.command {
            Commands::Balance {
                action: Some(BalanceAction::Set { value }),
            } => assert_eq!(value, "-1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_card_changes_overlay() {
        let draft = CardDraft {
            title: "Luz".to_string(),
            urgency: "2".to_string(),
            expense_type: "casa".to_string(),
            value: "120".to_string(),
            due_date: "2025-03-10".to_string(),
            status: "pendente".to_string(),
        };
        let changes = CardChanges {
            status: Some("pago".to_string()),
            ..CardChanges::default()
        };

        let updated = changes.apply(draft.clone());

        assert_eq!(updated.status, "pago");
        assert_eq!(updated.value, draft.value);
    }

    #[test]
    fn test_render_summary() {
        let summary = Summary {
            zone: Zone::Vermelho,
            total_expenses: 1250.5,
            total_percentage: 85.0,
            cards_count: 3,
            net_balance: None,
        };
        let text = render_summary(&summary);
        assert!(text.contains("VERMELHO"));
        assert!(text.contains("R$ 1.250,50"));
        assert!(text.contains("85.00%"));
        assert!(!text.contains("Saldo"));
    }

    #[test]
    fn test_render_cards() {
        assert_eq!(render_cards(&[]), "Nenhuma despesa cadastrada.");

        let card = ExpenseCard {
            id: 7,
            title: "  ".to_string(),
            urgency: 1,
            expense_type: ExpenseType::Saude,
            value: 1500.0,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            status: CardStatus::Pago,
            percentage: None,
        };
        let row = render_card_row(&card);
        assert!(row.contains("(sem título)"));
        assert!(row.contains("Saúde"));
        assert!(row.contains("1.500,00"));
        assert!(row.contains("0.00%"));
        assert!(row.ends_with("pago"));
    }
}
