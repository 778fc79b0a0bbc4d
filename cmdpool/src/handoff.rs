//! Rendezvous channel: a send completes only once a receiver has taken the value.
//!
//! A sender that stops waiting (its `send` future is dropped) withdraws the
//! value, and the receiver skips it instead of delivering it.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

struct Parcel<T> {
    value: T,
    taken: oneshot::Sender<()>,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("handoff receiver dropped")]
pub struct Closed;

pub struct Sender<T> {
    inner: mpsc::Sender<Parcel<T>>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct Receiver<T> {
    inner: mpsc::Receiver<Parcel<T>>,
}

pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (Sender { inner: tx }, Receiver { inner: rx })
}

impl<T> Sender<T> {
    pub async fn send(&self, value: T) -> Result<(), Closed> {
        let (taken, taken_rx) = oneshot::channel();
        self.inner
            .send(Parcel { value, taken })
            .await
            .map_err(|_| Closed)?;
        taken_rx.await.map_err(|_| Closed)
    }
}

impl<T> Receiver<T> {
    /// Take the next value. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<T> {
        while let Some(Parcel { value, taken }) = self.inner.recv().await {
            if taken.send(()).is_ok() {
                return Some(value);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn send_waits_for_receiver() {
        let (tx, mut rx) = channel();
        let sender = tokio::spawn(async move { tx.send(7).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!sender.is_finished());
        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(sender.await.expect("sender panicked"), Ok(()));
    }

    #[tokio::test]
    async fn withdrawn_values_are_skipped() {
        let (tx, mut rx) = channel();
        // gives up before anyone receives
        let withdrawn = timeout(Duration::from_millis(20), tx.send(1)).await;
        assert!(withdrawn.is_err());
        let delivered = tokio::spawn(async move { tx.send(2).await });
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(delivered.await.expect("sender panicked"), Ok(()));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn send_fails_once_receiver_is_gone() {
        let (tx, rx) = channel::<u8>();
        drop(rx);
        assert_eq!(tx.send(1).await, Err(Closed));
    }
}
