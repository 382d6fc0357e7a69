//! Publish/subscribe dispatch of bar events for candlewick.
//!
//! - [`Hub`] - Keyed publish/subscribe with set semantics
//! - [`Subscriber`] - Callback trait (implemented for closures)
//! - [`HubSink`] - [`EventSink`](candlewick_aggregate::EventSink) publishing on a [`BarHub`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod hub;
mod sink;

pub use hub::{Hub, SharedSubscriber, Subscriber, SubscriberError, subscriber};
pub use sink::{BarHub, BarTopic, HubSink};
