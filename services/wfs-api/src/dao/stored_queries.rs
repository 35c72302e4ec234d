//! Stored queries: none exist in this deployment.

use async_trait::async_trait;
use wfs_common::WfsResult;
use wfs_protocol::{
    DescribeStoredQueriesRequest, DescribeStoredQueriesResponse, ListStoredQueriesRequest,
    ListStoredQueriesResponse,
};

use super::{DescribeStoredQueriesDao, ListStoredQueriesDao};

/// A stored-query store with no entries.
#[derive(Debug, Default)]
pub struct EmptyStoredQueryDao;

#[async_trait]
impl ListStoredQueriesDao for EmptyStoredQueryDao {
    async fn list_stored_queries(
        &self,
        _request: &ListStoredQueriesRequest,
    ) -> WfsResult<ListStoredQueriesResponse> {
        Ok(ListStoredQueriesResponse::empty())
    }
}

#[async_trait]
impl DescribeStoredQueriesDao for EmptyStoredQueryDao {
    async fn describe_stored_queries(
        &self,
        _request: &DescribeStoredQueriesRequest,
    ) -> WfsResult<DescribeStoredQueriesResponse> {
        Ok(DescribeStoredQueriesResponse::empty())
    }
}
