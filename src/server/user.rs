//! gRPC handler for the `user.User` service.

use std::sync::Arc;

use mall_client::proto::user_server::User as UserRpcService;
use mall_client::proto::{IdRequest, UserRequest, UserResponse};
use tonic::{Request, Response, Status};
use tracing::warn;

use crate::error::Error;
use crate::logic::UserLogic;
use crate::svc::ServiceContext;

/// Server-side implementation of the `User` RPC service.
pub struct UserService {
    svc: Arc<ServiceContext>,
}

impl UserService {
    pub fn new(svc: Arc<ServiceContext>) -> Self {
        Self { svc }
    }
}

#[tonic::async_trait]
impl UserRpcService for UserService {
    #[tracing::instrument(name = "user.get_user", skip_all, fields(id = %request.get_ref().id))]
    async fn get_user(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let logic = UserLogic::new(Arc::clone(&self.svc));
        Ok(Response::new(logic.get_user(request.get_ref())))
    }

    #[tracing::instrument(name = "user.save_user", skip_all, fields(name = %request.get_ref().name))]
    async fn save_user(
        &self,
        request: Request<UserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let request = request.into_inner();
        if request.name.is_empty() {
            return Err(Error::validation("name must not be empty").into());
        }

        let logic = UserLogic::new(Arc::clone(&self.svc));
        let response = logic.save_user(request).await.map_err(|e| {
            warn!(error = %e, "SaveUser failed");
            Status::from(e)
        })?;

        Ok(Response::new(response))
    }
}
