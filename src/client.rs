//! HTTP client for the remote order blob store.
//!
//! The remote backend is an opaque addressable JSON resource: `fetch`
//! GETs the whole order array, `replace` PUTs it back. Both async and
//! blocking variants are generated behind feature flags.

/// Path of the order blob under the configured base URL.
const ORDERS_PATH: &str = "/orders.json";

/// Generates a remote blob client (async or blocking) with builder,
/// methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Bearer token for blob store authentication.
            token: Option<String>,
            /// Base URL of the blob store.
            base_url: Option<String>,
        }

        impl $builder {
            /// Sets the access token for blob store authentication.
            #[inline]
            #[must_use]
            pub fn token<T: Into<String>>(mut self, token: T) -> Self {
                self.token = Some(token.into());
                self
            }

            /// Sets the base URL of the blob store.
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`ChangeMoneyError::Config`] if the token or
            /// base URL is missing, or [`ChangeMoneyError::Http`] if
            /// the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let token = self
                    .token
                    .ok_or(ChangeMoneyError::Config("remote access token is required"))?;
                let base_url = self
                    .base_url
                    .ok_or(ChangeMoneyError::Config("remote base URL is required"))?;
                tracing::debug!(base_url = %base_url, "building remote client");
                let http = <$http_type>::builder().build()?;

                Ok($client {
                    http,
                    token: SecretString::from(token),
                    base_url,
                })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// Bearer access token.
            token: SecretString,
            /// Blob store base URL.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    token: None,
                    base_url: None,
                }
            }

            /// Returns the full URL of the order blob.
            fn resource_url(&self) -> String {
                format!("{}{ORDERS_PATH}", self.base_url)
            }

            /// Fetches the whole order sequence from the blob store.
            ///
            /// A missing blob (HTTP 404) reads as the empty sequence.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server
            /// returns another non-success status, or the body cannot
            /// be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn fetch(&self) -> Result<Vec<Order>> {
                let url = self.resource_url();
                tracing::debug!(url = %url, "fetching remote order blob");
                let response: $resp_type = self
                    .http
                    .get(&url)
                    .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
                    .send()
                    $( .$await_ext )?
                    ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status == reqwest::StatusCode::NOT_FOUND {
                    // Blob not created yet — an empty store, not a failure.
                    return Ok(Vec::new());
                }
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(ChangeMoneyError::from)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "blob store error");
                    Err(ChangeMoneyError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }

            /// Replaces the whole order sequence in the blob store.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server
            /// returns a non-success status.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn replace(&self, orders: &[Order]) -> Result<()> {
                let url = self.resource_url();
                tracing::debug!(url = %url, count = orders.len(), "replacing remote order blob");
                let response: $resp_type = self
                    .http
                    .put(&url)
                    .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
                    .header(CONTENT_TYPE, "application/json")
                    .json(orders)
                    .send()
                    $( .$await_ext )?
                    ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    Ok(())
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "blob store error");
                    Err(ChangeMoneyError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the remote order blob store.

    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use secrecy::{ExposeSecret, SecretString};

    use super::ORDERS_PATH;
    use crate::error::{ChangeMoneyError, Result};
    use crate::models::Order;

    define_client! {
        client_name: RemoteClient,
        builder_name: RemoteClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the remote order blob store.\n\nUse [`RemoteClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`RemoteClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the remote order blob
    //! store.

    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use secrecy::{ExposeSecret, SecretString};

    use super::ORDERS_PATH;
    use crate::error::{ChangeMoneyError, Result};
    use crate::models::Order;

    define_client! {
        client_name: RemoteBlockingClient,
        builder_name: RemoteBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the remote order blob store.\n\nUse [`RemoteBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`RemoteBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{RemoteClient, RemoteClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{RemoteBlockingClient, RemoteBlockingClientBuilder};
