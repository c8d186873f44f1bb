use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fintrack_types::{
    Account, AuthUser, Category, CreateAccountReq, CreateGoalReq, CreateSmsReq, CreateTxnReq, Goal,
    GoalFilter, Merchant, SmsLog, SoftDeleteTxnsReq, StaticBank, Transaction, TransactionFilter,
    UpdateAccountReq, UpdateGoalReq, UpdateUserReq, User,
};
use serde::Serialize;

use crate::middleware::auth::{AppState, RequestClient};
use crate::routes::ApiFailure;

type ApiResult<T> = Result<Json<T>, ApiFailure>;

#[derive(Serialize)]
pub struct Overview {
    pub user: AuthUser,
    pub accounts: Vec<Account>,
    pub goals: Vec<Goal>,
}

#[derive(Serialize)]
pub struct ReferenceData {
    pub banks: Vec<StaticBank>,
    pub categories: Vec<Category>,
    pub merchants: Vec<Merchant>,
}

/// Data endpoints backing the dashboard pages. Every handler dispatches through a client
/// bound to the caller's own session.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_overview))
        .route(
            "/dashboard/accounts",
            get(list_accounts).post(create_account).put(update_account),
        )
        .route("/dashboard/accounts/:account_id", get(get_account))
        .route(
            "/dashboard/transactions",
            get(list_transactions)
                .post(create_transaction)
                .delete(delete_transactions),
        )
        .route("/dashboard/sms", get(list_sms).post(create_sms))
        .route("/dashboard/sms/:id", get(get_sms))
        .route("/dashboard/investments", get(list_goals).post(create_goal))
        .route("/dashboard/investments/:id", get(get_goal).put(update_goal))
        .route("/dashboard/reference", get(get_reference))
        .route("/dashboard/profile", get(get_profile).put(update_profile))
}

async fn get_overview(RequestClient(client): RequestClient) -> ApiResult<Overview> {
    let filter = GoalFilter::default();
    let auth = client.auth();
    let accounts = client.accounts();
    let investments = client.investments();
    let (user, accounts, goals) =
        tokio::try_join!(auth.user(), accounts.list(), investments.list(&filter))?;

    Ok(Json(Overview {
        user,
        accounts,
        goals,
    }))
}

async fn list_accounts(RequestClient(client): RequestClient) -> ApiResult<Vec<Account>> {
    Ok(Json(client.accounts().list().await?))
}

async fn get_account(
    RequestClient(client): RequestClient,
    Path(accountId): Path<String>,
) -> ApiResult<Account> {
    Ok(Json(client.accounts().get(&accountId).await?))
}

async fn create_account(
    RequestClient(client): RequestClient,
    Json(body): Json<CreateAccountReq>,
) -> Result<(StatusCode, Json<Account>), ApiFailure> {
    let account = client.accounts().create(&body).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn update_account(
    RequestClient(client): RequestClient,
    Json(body): Json<UpdateAccountReq>,
) -> ApiResult<Account> {
    Ok(Json(client.accounts().update(&body).await?))
}

async fn list_transactions(
    RequestClient(client): RequestClient,
    Query(filter): Query<TransactionFilter>,
) -> ApiResult<Vec<Transaction>> {
    Ok(Json(client.transactions().list(&filter).await?))
}

async fn create_transaction(
    RequestClient(client): RequestClient,
    Json(body): Json<CreateTxnReq>,
) -> Result<(StatusCode, Json<Transaction>), ApiFailure> {
    let transaction = client.transactions().create(&body).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn delete_transactions(
    RequestClient(client): RequestClient,
    Json(body): Json<SoftDeleteTxnsReq>,
) -> Result<StatusCode, ApiFailure> {
    client.transactions().delete(&body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_sms(RequestClient(client): RequestClient) -> ApiResult<Vec<SmsLog>> {
    Ok(Json(client.sms().list().await?))
}

async fn get_sms(RequestClient(client): RequestClient, Path(id): Path<String>) -> ApiResult<SmsLog> {
    Ok(Json(client.sms().get(&id).await?))
}

async fn create_sms(
    RequestClient(client): RequestClient,
    Json(body): Json<CreateSmsReq>,
) -> Result<(StatusCode, Json<SmsLog>), ApiFailure> {
    let sms = client.sms().create(&body).await?;
    Ok((StatusCode::CREATED, Json(sms)))
}

async fn list_goals(
    RequestClient(client): RequestClient,
    Query(filter): Query<GoalFilter>,
) -> ApiResult<Vec<Goal>> {
    Ok(Json(client.investments().list(&filter).await?))
}

async fn get_goal(RequestClient(client): RequestClient, Path(id): Path<String>) -> ApiResult<Goal> {
    Ok(Json(client.investments().get(&id).await?))
}

async fn create_goal(
    RequestClient(client): RequestClient,
    Json(body): Json<CreateGoalReq>,
) -> Result<(StatusCode, Json<Goal>), ApiFailure> {
    let goal = client.investments().create(&body).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    RequestClient(client): RequestClient,
    Path(id): Path<String>,
    Json(body): Json<UpdateGoalReq>,
) -> ApiResult<Goal> {
    Ok(Json(client.investments().update(&id, &body).await?))
}

async fn get_reference(RequestClient(client): RequestClient) -> ApiResult<ReferenceData> {
    let statics = client.statics();
    let (banks, categories, merchants) =
        tokio::try_join!(statics.banks(), statics.categories(), statics.merchants())?;

    Ok(Json(ReferenceData {
        banks,
        categories,
        merchants,
    }))
}

async fn get_profile(RequestClient(client): RequestClient) -> ApiResult<AuthUser> {
    Ok(Json(client.auth().user().await?))
}

async fn update_profile(
    RequestClient(client): RequestClient,
    Json(body): Json<UpdateUserReq>,
) -> ApiResult<User> {
    Ok(Json(client.users().update(&body).await?))
}
