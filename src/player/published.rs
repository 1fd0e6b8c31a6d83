// SPDX-License-Identifier: MPL-2.0
//! Last-value observable built on a `tokio::sync::watch` channel.

use tokio::sync::watch;

/// A value with subscribers.
///
/// The current value is always cached: a new subscriber sees it right away,
/// and subscribers that fall behind only ever see the latest value. Setting
/// the value never blocks and works with no subscriber at all.
#[derive(Debug)]
pub struct Published<T> {
    sender: watch::Sender<T>,
}

impl<T> Published<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            sender: watch::Sender::new(initial),
        }
    }

    /// Returns a receiver whose current value is the cached one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Runs `f` on the cached value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }
}

impl<T: Clone> Published<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: PartialEq> Published<T> {
    /// Replaces the value; subscribers are only notified if it changed.
    ///
    /// Returns true if the value changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}
