//! Per-endpoint stubs. Each one only builds a descriptor and hands it to the dispatcher;
//! the `*_request` builders are public so callers can dispatch them with cancellation.

pub mod accounts;
pub mod auth;
pub mod investments;
pub mod reconciliation;
pub mod sms;
pub mod statics;
pub mod system;
pub mod transactions;
pub mod users;

pub use accounts::AccountService;
pub use auth::AuthService;
pub use investments::InvestmentService;
pub use reconciliation::ReconciliationService;
pub use sms::SmsService;
pub use statics::StaticService;
pub use system::SystemService;
pub use transactions::TransactionService;
pub use users::UserService;

use crate::client::ApiClient;

pub(crate) const AUTH_ERRORS: &[(u16, &str)] = &[(401, "Unauthorized"), (500, "Internal Server Error")];

pub(crate) const WRITE_ERRORS: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (500, "Internal Server Error"),
];

pub(crate) const LOOKUP_ERRORS: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (404, "Not Found"),
    (500, "Internal Server Error"),
];

impl ApiClient {
    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn investments(&self) -> InvestmentService<'_> {
        InvestmentService::new(self)
    }

    pub fn reconciliation(&self) -> ReconciliationService<'_> {
        ReconciliationService::new(self)
    }

    pub fn sms(&self) -> SmsService<'_> {
        SmsService::new(self)
    }

    pub fn statics(&self) -> StaticService<'_> {
        StaticService::new(self)
    }

    pub fn system(&self) -> SystemService<'_> {
        SystemService::new(self)
    }

    pub fn transactions(&self) -> TransactionService<'_> {
        TransactionService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }
}
