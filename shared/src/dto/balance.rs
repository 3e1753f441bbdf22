use serde::{Deserialize, Serialize};

/// Net balance as returned by `GET /balance` and `PUT /balance`.
///
/// The server record also carries `id` and `user_id`; they are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub net_balance: f64,
}

/// `PUT /balance` request body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BalanceUpdate {
    pub net_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_ignores_record_fields() {
        let balance: Balance =
            serde_json::from_str(r#"{"id": 1, "user_id": 4, "net_balance": 3200.5}"#).unwrap();
        assert_eq!(balance.net_balance, 3200.5);
    }
}
