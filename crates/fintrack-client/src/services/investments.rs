use fintrack_types::{CreateGoalReq, Goal, GoalFilter, UpdateGoalReq};

use super::{LOOKUP_ERRORS, WRITE_ERRORS};
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct InvestmentService<'a> {
    client: &'a ApiClient,
}

impl<'a> InvestmentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request(filter: &GoalFilter) -> RequestDescriptor {
        RequestDescriptor::get("/investment/goal")
            .query("status", filter.status.as_deref())
            .query("target_date_before", filter.target_date_before.as_deref())
            .query("target_date_after", filter.target_date_after.as_deref())
            .query("target_amount_less_than", filter.target_amount_less_than)
            .query("target_amount_greater_than", filter.target_amount_greater_than)
            .query("priority", filter.priority)
            .query("created_at_before", filter.created_at_before.as_deref())
            .query("created_at_after", filter.created_at_after.as_deref())
            .errors(WRITE_ERRORS)
    }

    pub fn get_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::get("/investment/goal/{id}")
            .path_param("id", id)
            .errors(LOOKUP_ERRORS)
    }

    pub fn create_request(goal: &CreateGoalReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::post("/investment/goal")
            .json(goal)?
            .errors(WRITE_ERRORS))
    }

    pub fn update_request(id: &str, goal: &UpdateGoalReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::put("/investment/goal/{id}")
            .path_param("id", id)
            .json(goal)?
            .errors(LOOKUP_ERRORS))
    }

    pub async fn list(&self, filter: &GoalFilter) -> Result<Vec<Goal>, ApiError> {
        self.client.execute(Self::list_request(filter)).await
    }

    pub async fn get(&self, id: &str) -> Result<Goal, ApiError> {
        self.client.execute(Self::get_request(id)).await
    }

    pub async fn create(&self, goal: &CreateGoalReq) -> Result<Goal, ApiError> {
        self.client.execute(Self::create_request(goal)?).await
    }

    pub async fn update(&self, id: &str, goal: &UpdateGoalReq) -> Result<Goal, ApiError> {
        self.client.execute(Self::update_request(id, goal)?).await
    }
}
