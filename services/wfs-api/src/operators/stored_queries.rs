use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::{params, ErrorSet, WfsError, WfsResult};
use wfs_protocol::{
    DescribeStoredQueriesRequest, DescribeStoredQueriesResponse, ListStoredQueriesRequest,
    ListStoredQueriesResponse,
};

use super::checks::{check_service, check_version};
use super::Operation;
use crate::dao::{DescribeStoredQueriesDao, ListStoredQueriesDao};

pub struct ListStoredQueriesOperator {
    dao: Arc<dyn ListStoredQueriesDao>,
}

impl ListStoredQueriesOperator {
    pub fn new(dao: Arc<dyn ListStoredQueriesDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl Operation for ListStoredQueriesOperator {
    type Request = ListStoredQueriesRequest;
    type Response = ListStoredQueriesResponse;

    fn check_parameters(&self, request: &ListStoredQueriesRequest, errors: &mut ErrorSet) {
        errors.check(check_service(&request.service));
        errors.check(check_version(&request.version));
    }

    async fn perform(&self, request: ListStoredQueriesRequest) -> WfsResult<ListStoredQueriesResponse> {
        self.dao.list_stored_queries(&request).await
    }
}

/// DescribeStoredQueries. No stored query exists, so naming any id is an error.
pub struct DescribeStoredQueriesOperator {
    dao: Arc<dyn DescribeStoredQueriesDao>,
}

impl DescribeStoredQueriesOperator {
    pub fn new(dao: Arc<dyn DescribeStoredQueriesDao>) -> Self {
        Self { dao }
    }
}

fn check_no_stored_query_ids(request: &DescribeStoredQueriesRequest) -> WfsResult<()> {
    if request.stored_query_ids.is_empty() {
        return Ok(());
    }
    let ids: Vec<&str> = request.stored_query_ids.iter().map(String::as_str).collect();
    Err(WfsError::invalid_parameter(
        params::STORED_QUERY_ID,
        format!("Unknown stored query id(s): {}", ids.join(", ")),
    ))
}

#[async_trait]
impl Operation for DescribeStoredQueriesOperator {
    type Request = DescribeStoredQueriesRequest;
    type Response = DescribeStoredQueriesResponse;

    fn check_parameters(&self, request: &DescribeStoredQueriesRequest, errors: &mut ErrorSet) {
        errors.check(check_service(&request.service));
        errors.check(check_version(&request.version));
        errors.check(check_no_stored_query_ids(request));
    }

    async fn perform(
        &self,
        request: DescribeStoredQueriesRequest,
    ) -> WfsResult<DescribeStoredQueriesResponse> {
        self.dao.describe_stored_queries(&request).await
    }
}
