//! GraphQL collaborators for the rodney system.
//!
//! [`GraphqlClient`] implements both [`rodney_dispatch::RecordSource`] and
//! [`rodney_dispatch::MutationExecutor`] against a monday-style GraphQL API.
//! Every value travels in the request's `variables` object; query documents
//! are static.

pub mod client;
pub mod graphql;

pub use client::GraphqlClient;
pub use graphql::GraphqlRequest;
