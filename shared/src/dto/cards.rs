use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Casa,
    Faculdade,
    Saude,
    Lazer,
    Alimentacao,
    Transporte,
    Outros,
}

impl ExpenseType {
    /// All categories in the order the API documents them
    pub fn all() -> &'static [ExpenseType] {
        &[
            ExpenseType::Casa,
            ExpenseType::Faculdade,
            ExpenseType::Saude,
            ExpenseType::Lazer,
            ExpenseType::Alimentacao,
            ExpenseType::Transporte,
            ExpenseType::Outros,
        ]
    }

    /// Wire identifier (`casa`, `saude`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Casa => "casa",
            ExpenseType::Faculdade => "faculdade",
            ExpenseType::Saude => "saude",
            ExpenseType::Lazer => "lazer",
            ExpenseType::Alimentacao => "alimentacao",
            ExpenseType::Transporte => "transporte",
            ExpenseType::Outros => "outros",
        }
    }

    /// Human-readable label for lists and forms
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Casa => "Casa",
            ExpenseType::Faculdade => "Faculdade",
            ExpenseType::Saude => "Saúde",
            ExpenseType::Lazer => "Lazer",
            ExpenseType::Alimentacao => "Alimentação",
            ExpenseType::Transporte => "Transporte",
            ExpenseType::Outros => "Outros",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ExpenseType::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| format!("unknown expense type: {}", s))
    }
}

/// Payment status of a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    #[default]
    Pendente,
    Pago,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Pendente => "pendente",
            CardStatus::Pago => "pago",
            CardStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Ok(CardStatus::Pendente),
            "pago" => Ok(CardStatus::Pago),
            _ => Err(format!("unknown card status: {}", s)),
        }
    }
}

/// Server-computed traffic-light rating of expenses against the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Verde,
    Amarelo,
    Vermelho,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Verde => "verde",
            Zone::Amarelo => "amarelo",
            Zone::Vermelho => "vermelho",
        }
    }

    /// Badge text (`VERDE`, `AMARELO`, `VERMELHO`)
    pub fn badge(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expense record as stored by the server.
///
/// `percentage` is computed by the server against the current balance and is
/// never derived locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseCard {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub urgency: i32,
    pub expense_type: ExpenseType,
    pub value: f64,
    pub due_date: NaiveDate,
    pub status: CardStatus,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl ExpenseCard {
    /// Title for display, with a placeholder for untitled cards
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "(sem título)"
        } else {
            title
        }
    }
}

/// Body for `POST /cards` and `PATCH /cards/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardPayload {
    pub title: String,
    pub urgency: i32,
    pub expense_type: ExpenseType,
    pub value: f64,
    pub due_date: NaiveDate,
    pub status: CardStatus,
}

/// Aggregate view returned by `GET /cards/summary`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub zone: Zone,
    pub total_expenses: f64,
    pub total_percentage: f64,
    pub cards_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_balance: Option<f64>,
}
