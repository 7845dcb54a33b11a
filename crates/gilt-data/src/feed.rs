//! Cart-change driven repricing.

use gilt_commerce::cart::CartLine;
use gilt_commerce::ids::UserId;
use tokio::sync::{mpsc, watch};

use crate::quote::{Quote, QuoteService};
use crate::source::{EntitlementSource, PromotionSource};

/// A cart mutation reported by the UI layer.
#[derive(Debug, Clone)]
pub enum CartEvent {
    /// The cart contents changed; reprice these lines.
    Updated {
        user: Option<UserId>,
        lines: Vec<CartLine>,
    },
    /// The cart was emptied.
    Cleared,
}

/// Repricing loop driven by explicit cart-change events.
///
/// Every event triggers one engine run and publishes the result on a watch
/// channel, which keeps only the newest value: a quote for a later cart
/// state always supersedes an earlier one, with no merging of partial
/// results.
pub struct QuoteFeed;

impl QuoteFeed {
    /// Spawn the loop and hand back the quote channel.
    ///
    /// `clock` supplies the reference instant per event; pass
    /// [`current_timestamp`](crate::quote::current_timestamp) outside tests.
    /// The loop ends when the event sender or every quote receiver is
    /// dropped.
    pub fn spawn<P, E, C>(
        service: QuoteService<P, E>,
        mut events: mpsc::Receiver<CartEvent>,
        clock: C,
    ) -> watch::Receiver<Quote>
    where
        P: PromotionSource + 'static,
        E: EntitlementSource + 'static,
        C: Fn() -> i64 + Send + 'static,
    {
        let (tx, rx) = watch::channel(Quote::empty(service.currency()));
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let (user, lines) = match event {
                    CartEvent::Updated { user, lines } => (user, lines),
                    CartEvent::Cleared => (None, Vec::new()),
                };
                match service.quote(user.as_ref(), &lines, clock()).await {
                    Ok(quote) => {
                        if tx.send(quote).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "cart repricing failed");
                    }
                }
            }
        });
        rx
    }
}
