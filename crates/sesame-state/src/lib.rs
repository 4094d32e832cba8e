//! Observable state for sesame.
//!
//! Both the session and the preference layer are built on [`Store`]: a
//! value behind a lock plus a list of listeners that run synchronously,
//! in subscription order, after every mutation.
//!
//! ```text
//!  caller ──update(f)──► Store<T> ──(prev, next)──► listener 1
//!                            │                  └──► listener 2
//!                            └─ lock released before listeners run
//! ```
//!
//! Subscribing returns a [`Subscription`]; dropping it detaches the listener.

mod store;
mod subscription;

pub use store::Store;
pub use subscription::Subscription;
