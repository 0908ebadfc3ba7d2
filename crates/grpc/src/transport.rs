use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use {
    edgecloud_service_traits::{Connection, ServiceError, ServiceResult},
    tonic::{
        Code, Request, Status,
        client::Grpc,
        codec::ProstCodec,
        codegen::http::uri::PathAndQuery,
        transport::{Channel, Endpoint},
    },
    tracing::debug,
};

/// Address and dial settings for one backend.
#[derive(Debug, Clone)]
pub struct BackendEndpoint {
    address: String,
    connect_timeout: Duration,
}

impl BackendEndpoint {
    #[must_use]
    pub fn new(address: &str, connect_timeout: Duration) -> Self {
        Self {
            address: normalize_address(address),
            connect_timeout,
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Dial a fresh channel. The returned connection shares the channel slot
    /// with the transport, so closing it makes further calls fail.
    pub(crate) async fn connect(&self) -> ServiceResult<(Transport, Box<dyn Connection>)> {
        let endpoint = Endpoint::from_shared(self.address.clone())
            .map_err(|e| ServiceError::unavailable(&self.address, e))?
            .connect_timeout(self.connect_timeout);
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ServiceError::unavailable(&self.address, e))?;
        debug!(address = %self.address, "opened backend channel");

        let slot = Arc::new(Mutex::new(Some(channel)));
        let transport = Transport {
            address: self.address.clone(),
            slot: Arc::clone(&slot),
        };
        let connection = GrpcConnection {
            address: self.address.clone(),
            slot,
        };
        Ok((transport, Box::new(connection)))
    }
}

/// Prefix `http://` when the configured address carries no scheme
/// (`tenant:50051` style addresses are the common case).
#[must_use]
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

type ChannelSlot = Arc<Mutex<Option<Channel>>>;

struct GrpcConnection {
    address: String,
    slot: ChannelSlot,
}

impl Connection for GrpcConnection {
    fn close(&self) {
        let channel = self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        if channel.is_some() {
            debug!(address = %self.address, "closed backend channel");
        }
    }
}

pub(crate) struct Transport {
    address: String,
    slot: ChannelSlot,
}

impl Transport {
    fn channel(&self) -> ServiceResult<Channel> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| ServiceError::unavailable(&self.address, "channel already closed"))
    }

    pub(crate) async fn unary<Req, Resp>(
        &self,
        method: &'static str,
        request: Req,
    ) -> ServiceResult<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = Grpc::new(self.channel()?);
        grpc.ready()
            .await
            .map_err(|e| ServiceError::unavailable(&self.address, e))?;

        debug!(address = %self.address, method, "backend call");
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = grpc
            .unary(Request::new(request), PathAndQuery::from_static(method), codec)
            .await
            .map_err(status_error)?;
        Ok(response.into_inner())
    }
}

fn status_error(status: Status) -> ServiceError {
    match status.code() {
        Code::Cancelled => ServiceError::Cancelled,
        code => ServiceError::status(format!("{code:?}"), status.message()),
    }
}
