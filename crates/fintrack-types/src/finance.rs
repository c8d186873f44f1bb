use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Accounts

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Bank {
    pub id: String,
    pub name: String,
    pub code: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub account_number: String,
    pub account_name: String,
    pub account_type: String,
    pub is_primary: bool,
    pub is_active: bool,
    pub bank_id: String,
    pub user_id: String,
    // Backend spelling.
    pub current_balence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateAccountReq {
    pub account_number: String,
    pub account_name: String,
    pub account_type: String,
    pub is_primary: bool,
    pub bank_id: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateAccountReq {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balence: Option<f64>,
}

// Transactions

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxnType {
    Debit,
    Credit,
    Subscription,
    Investment,
    Income,
    Refund,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub account_number: String,
    pub account_type: String,
    pub account_name: String,
    pub to_account_id: Option<String>,
    pub to_account_number: String,
    pub to_account_name: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    #[serde(rename = "type")]
    pub txn_type: Option<TxnType>,
    pub amount: f64,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub sms_id: Option<String>,
    pub sms_message: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub is_recurring: bool,
    pub is_excluded: Option<bool>,
    pub is_cash: Option<bool>,
    pub deleted_at: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateTxnReq {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub txn_type: Option<TxnType>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SoftDeleteTxnsReq {
    pub ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub merchant_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParsedTxnRes {
    pub amount: f64,
    pub account_num: Option<String>,
    pub category_id: Option<String>,
    pub merchant_id: Option<String>,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_date: Option<String>,
    pub transaction_time: Option<String>,
    pub transaction_type: Option<String>,
    pub transaction_amount: Option<f64>,
}

// SMS ingestion

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmsLog {
    pub id: String,
    pub user_id: String,
    pub sender: String,
    pub raw_message: String,
    pub received_at: Option<String>,
    pub parsing_status: String,
    pub error_message: Option<String>,
    pub retry_count: u8,
    pub llm_parsed: bool,
    pub llm_parsed_attempted: bool,
    pub llm_response: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_retry_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateSmsReq {
    pub sender: String,
    pub raw_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

// Investment goals

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<String>,
    pub status: String,
    pub priority: u8,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub achieved_at: Option<String>,
}

impl Goal {
    /// Share of the target already saved, clamped to 0..=100.
    pub fn progress_pct(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateGoalReq {
    pub name: String,
    pub target_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
    pub target_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateGoalReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GoalFilter {
    pub status: Option<String>,
    pub target_date_before: Option<String>,
    pub target_date_after: Option<String>,
    pub target_amount_less_than: Option<f64>,
    pub target_amount_greater_than: Option<f64>,
    pub priority: Option<u8>,
    pub created_at_before: Option<String>,
    pub created_at_after: Option<String>,
}

// Reconciliation

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParsedStatementRow {
    pub upload_id: String,
    pub account_id: String,
    pub txn_date: Option<String>,
    pub description: Option<String>,
    pub amount: u32,
    #[serde(rename = "type")]
    pub txn_type: Option<TxnType>,
    pub reference_number: Option<String>,
    pub raw_row_hash: Option<String>,
    pub row_number: u32,
    pub is_duplicate: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Bank statement file plus the metadata the reconciliation upload expects.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementUpload {
    pub statement: Vec<u8>,
    pub content_type: Option<String>,
    pub statement_period_start: String,
    pub statement_period_end: String,
    pub account_id: String,
    pub user_id: String,
    pub file_name: String,
}

// Static reference data

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StaticBank {
    pub id: String,
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Merchant {
    pub id: String,
    pub name: String,
}

// Users

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthUser {
    pub email: String,
    pub lifetime_income: Option<f64>,
    pub lifetime_expense: Option<f64>,
    pub use_llm_parsing: Option<bool>,
    pub llm_parse_credits: Option<i32>,
    pub is_active: Option<bool>,
    pub database_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub transaction_image_parse_attempt: u32,
    pub transaction_image_parse_success: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct User {
    pub email: String,
    pub is_active: bool,
    pub clerk_id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub lifetime_expense: f64,
    pub lifetime_income: f64,
    // Backend spelling.
    pub user_llm_parsing: bool,
    pub database_url: String,
    pub transaction_image_parse_attempt: u32,
    pub transaction_image_parse_success: u32,
    pub api_key: String,
    pub qr_string: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateUserReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_llm_parsing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_expense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_income: Option<f64>,
}

// System

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthCheckResult {
    pub status: String,
    pub response_time: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: Option<String>,
    pub environment: Option<String>,
    pub checks: BTreeMap<String, HealthCheckResult>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_tolerates_omitted_fields() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id": "t1", "account_id": "a1", "type": "DEBIT", "amount": 12.5}"#,
        )
        .expect("sparse transaction decodes");
        assert_eq!(txn.txn_type, Some(TxnType::Debit));
        assert!(txn.category_id.is_none());
        assert!(!txn.is_recurring);
    }

    #[test]
    fn update_requests_skip_unset_fields() {
        let req = UpdateAccountReq {
            account_id: "a1".into(),
            account_name: Some("Savings".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&req).expect("serializes");
        assert_eq!(
            value,
            serde_json::json!({"account_id": "a1", "account_name": "Savings"})
        );
    }

    #[test]
    fn goal_progress_is_clamped() {
        let goal = Goal {
            target_amount: 1000.0,
            current_amount: 1500.0,
            ..Default::default()
        };
        assert_eq!(goal.progress_pct(), 100.0);

        let empty = Goal::default();
        assert_eq!(empty.progress_pct(), 0.0);
    }
}
