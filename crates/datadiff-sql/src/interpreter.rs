mod sequence;
use sequence::Request;
pub use sequence::{Sequence, Statements};

use crate::{Compiled, Compiler, Executor};

use async_recursion::async_recursion;
use datadiff_core::{Error, Response, Result};
use std::{fmt, mem};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

/// Drives a [`Sequence`] one statement at a time.
///
/// Each advance compiles the next statement produced by the sequence and
/// hands it to the caller, who executes it on a live connection and passes
/// the result back with [`resume`](Self::resume). The sequence receives that
/// result and decides what to produce next.
///
/// The interpreter keeps the compiler it was created by and is bound to the
/// thread driving it.
pub struct ThreadLocalInterpreter {
    compiler: Compiler,

    producer: ProducerState,

    /// Statements submitted by the producer
    requests: Option<mpsc::Receiver<Request>>,

    /// Reply channel of the statement last yielded
    pending: Option<oneshot::Sender<Response>>,

    state: State,
}

/// Where an interpreter is in its request/reply cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Ready to pull the next statement from the sequence
    AwaitingElement,

    /// A statement was yielded; its result has not been supplied yet
    Yielding,

    /// The sequence is exhausted
    Done,
}

enum ProducerState {
    /// Not started until the first advance
    Idle(Sequence),

    Running(JoinHandle<Result<()>>),

    Finished,
}

impl ThreadLocalInterpreter {
    pub(crate) fn new(compiler: Compiler, sequence: Sequence) -> ThreadLocalInterpreter {
        ThreadLocalInterpreter {
            compiler,
            producer: ProducerState::Idle(sequence),
            requests: None,
            pending: None,
            state: State::AwaitingElement,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Pull and compile the next statement.
    ///
    /// The first advance spawns the sequence's producer, so it must be called
    /// from within a Tokio runtime.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted. A nested sequence
    /// is returned as [`Compiled::Interpreter`] for the caller to drive.
    pub async fn next(&mut self) -> Result<Option<Compiled>> {
        match self.state {
            State::AwaitingElement => {}
            State::Yielding => {
                return Err(Error::interpreter(
                    "advanced before the result of the previous statement was supplied",
                ))
            }
            State::Done => return Ok(None),
        }

        self.start();

        let request = match self.requests.as_mut() {
            Some(requests) => requests.recv().await,
            None => None,
        };

        let Some(Request { element, reply }) = request else {
            return self.finish().await.map(|()| None);
        };

        match self.compiler.compile(element) {
            Ok(compiled) => {
                if let Compiled::Sql(sql) = &compiled {
                    tracing::debug!(%sql, "yielding statement");
                }

                self.pending = Some(reply);
                self.state = State::Yielding;
                Ok(Some(compiled))
            }
            Err(err) => {
                self.stop();
                Err(err)
            }
        }
    }

    /// Supply the result of the statement last yielded.
    pub fn resume(&mut self, response: Response) -> Result<()> {
        match self.state {
            State::Yielding => {}
            State::AwaitingElement => {
                return Err(Error::interpreter("resumed before a statement was yielded"))
            }
            State::Done => {
                return Err(Error::interpreter(
                    "resumed after the statement sequence was exhausted",
                ))
            }
        }

        if let Some(reply) = self.pending.take() {
            // The producer may have stopped waiting; the next advance reports
            // how it ended.
            let _ = reply.send(response);
        }

        self.state = State::AwaitingElement;
        Ok(())
    }

    /// Execute every statement of the sequence on `executor`, in order.
    ///
    /// Nested sequences run on the same executor. Returns the result of the
    /// last statement executed.
    #[async_recursion(?Send)]
    pub async fn run<E: Executor>(mut self, executor: &mut E) -> Result<Response> {
        let mut last = Response::count(0);

        while let Some(compiled) = self.next().await? {
            let response = match compiled {
                Compiled::Sql(sql) => executor.exec(&sql).await?,
                Compiled::Interpreter(nested) => nested.run(executor).await?,
            };

            last = response.clone();
            self.resume(response)?;
        }

        Ok(last)
    }

    fn start(&mut self) {
        match mem::replace(&mut self.producer, ProducerState::Finished) {
            ProducerState::Idle(sequence) => {
                let capacity = self.compiler.config().effective_channel_capacity();
                let (producer, requests) = sequence.start(capacity);
                self.producer = ProducerState::Running(tokio::spawn(producer));
                self.requests = Some(requests);
            }
            producer => self.producer = producer,
        }
    }

    /// Called once the request channel closes. Reports how the producer ended.
    async fn finish(&mut self) -> Result<()> {
        self.state = State::Done;
        self.requests = None;

        let ProducerState::Running(handle) = mem::replace(&mut self.producer, ProducerState::Finished)
        else {
            return Ok(());
        };

        tracing::debug!("statement sequence exhausted");

        match handle.await {
            Ok(res) => res,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(Error::interpreter(format!("statement sequence was cancelled: {err}"))),
        }
    }

    fn stop(&mut self) {
        self.state = State::Done;
        self.requests = None;
        self.pending = None;

        if let ProducerState::Running(handle) = mem::replace(&mut self.producer, ProducerState::Finished) {
            handle.abort();
        }
    }
}

impl Drop for ThreadLocalInterpreter {
    fn drop(&mut self) {
        if let ProducerState::Running(handle) = &self.producer {
            if !handle.is_finished() {
                tracing::warn!("interpreter dropped before its statement sequence finished");
                handle.abort();
            }
        }
    }
}

impl fmt::Debug for ThreadLocalInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadLocalInterpreter")
            .field("compiler", &self.compiler)
            .field("state", &self.state)
            .finish()
    }
}
