use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::entities::RouteRequest;
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    /// Forwards `request` to the directions provider and hands back its
    /// reply untouched.
    async fn find_route(&self, request: RouteRequest) -> Result<Value, Error>;
}

pub trait API: RouteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
