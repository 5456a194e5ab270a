//! The request orchestrator.

use serde::de::DeserializeOwned;
use tracing::{debug, field, Instrument, Span};

use crate::{
    HttpTransport, JsonDecoder, PayloadDecoder, RequestBuilder, RequestError, RequestId,
    ResourceDescriptor, ResponseValidator, StructuredDecoder,
};

/// Runs descriptors through the pipeline: build, send, validate, decode.
///
/// Holds nothing but its decoder, so one client can serve any number of
/// concurrent calls. Each call owns its request and response exclusively.
///
/// ```no_run
/// # use network::{Endpoint, HttpTransport, NetworkClient, RequestError};
/// # #[derive(serde::Deserialize)] struct User { id: u64, name: String }
/// # async fn demo<T: HttpTransport>(transport: &T) -> Result<(), RequestError<T::Error>> {
/// let client = NetworkClient::new();
/// let user: User = client
///     .request(transport, &Endpoint::get("api.example.com", "/users/7"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkClient<D = JsonDecoder> {
    decoder: PayloadDecoder<D>,
}

impl NetworkClient<JsonDecoder> {
    /// Creates a client that decodes JSON bodies.
    pub fn new() -> Self {
        Self::with_decoder(JsonDecoder)
    }
}

impl<D> NetworkClient<D>
where
    D: StructuredDecoder,
{
    /// Creates a client that decodes bodies with `decoder`.
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder: PayloadDecoder::new(decoder),
        }
    }

    /// Requests the resource `descriptor` describes and decodes it into `T`.
    ///
    /// The steps run strictly in order and none is retried: either a fully
    /// decoded `T` comes back, or exactly one error.
    ///
    /// # Errors
    ///
    /// - [`crate::NetworkError::BadRequest`] if the descriptor has no address.
    /// - [`RequestError::Transport`] with the transport's fault, unchanged.
    /// - [`crate::NetworkError::InvalidStatusCode`] if the status is outside
    ///   `200..=300`.
    /// - [`crate::NetworkError::DecodingError`] if the body does not fit `T`.
    pub async fn request<T, Tr, R>(
        &self,
        transport: &Tr,
        descriptor: &R,
    ) -> Result<T, RequestError<Tr::Error>>
    where
        T: DeserializeOwned,
        Tr: HttpTransport + ?Sized,
        R: ResourceDescriptor + ?Sized,
    {
        let request_id = RequestId::new_random();
        let span = tracing::debug_span!(
            "network.request",
            request_id = %request_id,
            method = descriptor.method().name(),
            address = field::Empty,
        );

        async move {
            let request = RequestBuilder::build(descriptor)?;
            Span::current().record("address", field::display(request.address()));
            debug!("dispatching request");

            let response = transport
                .send(request)
                .await
                .map_err(RequestError::Transport)?;
            debug!(status = response.status(), bytes = response.body().len(), "received response");

            ResponseValidator::validate(&response)?;
            let value = self.decoder.decode::<T>(response.body())?;
            Ok::<T, RequestError<Tr::Error>>(value)
        }
        .instrument(span)
        .await
    }
}
