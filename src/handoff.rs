//! The rendezvous channel pair that carries values between a caller and a
//! coroutine body.
//!
//! Both channels have zero capacity: a send blocks until the other side is
//! receiving. Resume inputs flow caller → body over the resume channel;
//! yielded values and the final outcome flow body → caller over the yield
//! channel. Closing the resume channel (dropping its only sender) is how the
//! caller side tells a parked body to unwind.

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;

/// A message on the yield channel.
#[derive(Debug)]
pub(crate) enum Handoff<Y, R> {
    /// The body is parked at a yield point.
    Yielded(Y),
    /// The body returned; this is the last message.
    Returned(R),
    /// The body unwound; the cause is recorded in the shared state. This is
    /// the last message.
    Faulted,
}

impl<Y, R> Handoff<Y, R> {
    pub(crate) fn is_final(&self) -> bool {
        !matches!(self, Handoff::Yielded(_))
    }
}

/// The caller's ends: sends resume inputs, receives handoffs.
#[derive(Debug)]
pub(crate) struct CallerEnd<I, Y, R> {
    resume_tx: Option<Sender<I>>,
    yield_rx: Receiver<Handoff<Y, R>>,
}

/// The body's ends: receives resume inputs, sends handoffs.
#[derive(Debug)]
pub(crate) struct BodyEnd<I, Y, R> {
    resume_rx: Receiver<I>,
    yield_tx: Sender<Handoff<Y, R>>,
}

/// Creates both rendezvous channels and splits them between the two sides.
pub(crate) fn pair<I, Y, R>() -> (CallerEnd<I, Y, R>, BodyEnd<I, Y, R>) {
    let (resume_tx, resume_rx) = bounded(0);
    let (yield_tx, yield_rx) = bounded(0);
    (
        CallerEnd {
            resume_tx: Some(resume_tx),
            yield_rx,
        },
        BodyEnd {
            resume_rx,
            yield_tx,
        },
    )
}

impl<I, Y, R> CallerEnd<I, Y, R> {
    /// Hands `input` to the parked body. Blocks until the body takes it.
    ///
    /// Fails if the resume channel was closed or the body is gone.
    pub(crate) fn send_resume(&self, input: I) -> Result<(), I> {
        match &self.resume_tx {
            Some(tx) => tx.send(input).map_err(|err| err.into_inner()),
            None => Err(input),
        }
    }

    /// Closes the resume channel. A body blocked waiting for input wakes up
    /// and observes the closure.
    pub(crate) fn close(&mut self) {
        self.resume_tx = None;
    }

    /// Blocks until the body hands something over. `None` means the body is
    /// gone without a final handoff.
    pub(crate) fn wait(&self) -> Option<Handoff<Y, R>> {
        self.yield_rx.recv().ok()
    }
}

impl<I, Y, R> BodyEnd<I, Y, R> {
    /// Hands `handoff` to the caller. Blocks until the caller takes it.
    ///
    /// Fails if every caller handle is gone.
    pub(crate) fn offer(
        &self,
        handoff: Handoff<Y, R>,
    ) -> Result<(), Handoff<Y, R>> {
        self.yield_tx.send(handoff).map_err(|err| err.into_inner())
    }

    /// Blocks until the caller resumes. `None` means the resume channel was
    /// closed.
    pub(crate) fn wait_resume(&self) -> Option<I> {
        self.resume_rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn values_cross_in_order() {
        let (caller, body) = pair::<i32, i32, &str>();
        let worker = thread::spawn(move || {
            let mut total = 0;
            while let Some(n) = body.wait_resume() {
                total += n;
                if body.offer(Handoff::Yielded(total)).is_err() {
                    break;
                }
            }
            let _ = body.offer(Handoff::Returned("closed"));
        });
        for (n, expected) in [(1, 1), (2, 3), (3, 6)] {
            assert!(caller.send_resume(n).is_ok());
            assert!(matches!(caller.wait(), Some(Handoff::Yielded(t)) if t == expected));
        }
        let mut caller = caller;
        caller.close();
        let last = caller.wait();
        assert!(matches!(last, Some(Handoff::Returned("closed"))));
        assert!(last.is_some_and(|h| h.is_final()));
        assert_eq!(caller.send_resume(4), Err(4));
        worker.join().unwrap();
    }

    #[test]
    fn wait_reports_missing_body() {
        let (caller, body) = pair::<(), (), ()>();
        drop(body);
        assert!(caller.wait().is_none());
        assert_eq!(caller.send_resume(()), Err(()));
    }
}
