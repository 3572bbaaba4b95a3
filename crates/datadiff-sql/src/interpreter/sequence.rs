use crate::Element;

use datadiff_core::{Error, Response, Result};
use std::{fmt, future::Future, pin::Pin};
use tokio::sync::{mpsc, oneshot};

pub(super) type Producer = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

type Start = Box<dyn FnOnce(Statements) -> Producer + Send + 'static>;

/// A lazily produced list of statements that must run in order on one
/// connection.
///
/// The producer is an async block that receives a [`Statements`] handle. Each
/// call to [`Statements::exec`] hands one element to the interpreter and
/// resolves to the result of executing it, so later statements can depend on
/// earlier results.
///
/// ```ignore
/// let seq = Sequence::new(|stmts| async move {
///     let name = "tmp_ids";
///     stmts.exec(format!("CREATE TEMPORARY TABLE {name} AS SELECT id FROM a")).await?;
///     stmts.exec(format!("SELECT count(*) FROM {name}")).await?;
///     Ok(())
/// });
/// ```
pub struct Sequence {
    start: Start,
}

/// Handle used by a sequence's producer to submit statements.
pub struct Statements {
    tx: mpsc::Sender<Request>,
}

/// One statement sent from the producer, with the channel for its result.
pub(super) struct Request {
    pub(super) element: Element<'static>,
    pub(super) reply: oneshot::Sender<Response>,
}

impl Sequence {
    pub fn new<F, Fut>(producer: F) -> Sequence
    where
        F: FnOnce(Statements) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Sequence {
            start: Box::new(move |statements| Box::pin(producer(statements))),
        }
    }

    /// Build a sequence from statements that do not depend on each other's
    /// results.
    pub fn from_statements<I>(elements: I) -> Sequence
    where
        I: IntoIterator + Send + 'static,
        I::IntoIter: Send,
        I::Item: Into<Element<'static>> + Send,
    {
        Sequence::new(move |statements| async move {
            for element in elements {
                statements.exec(element).await?;
            }
            Ok(())
        })
    }

    pub(super) fn start(self, capacity: usize) -> (Producer, mpsc::Receiver<Request>) {
        let (tx, rx) = mpsc::channel(capacity);
        ((self.start)(Statements { tx }), rx)
    }
}

impl Statements {
    /// Submit a statement and wait for the result of executing it.
    pub async fn exec(&self, element: impl Into<Element<'static>>) -> Result<Response> {
        let (reply, response) = oneshot::channel();

        self.tx
            .send(Request {
                element: element.into(),
                reply,
            })
            .await
            .map_err(|_| Error::interpreter("statement submitted after the interpreter was dropped"))?;

        response
            .await
            .map_err(|_| Error::interpreter("interpreter dropped before supplying a result"))
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}

impl fmt::Debug for Statements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statements").finish_non_exhaustive()
    }
}
