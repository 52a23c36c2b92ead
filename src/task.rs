use crate::error::WorkflowError;
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tokio::runtime::Handle;

pub enum TaskPoll<T> {
    Running,
    Done(T),
    /// The task went away without sending, e.g. it panicked.
    Lost,
}

/// One background request whose single result is drained by the UI thread.
pub struct Pending<T> {
    receiver: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(handle: &Handle, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (sender, receiver) = channel();
        handle.spawn(async move {
            // The form may have been dropped; nobody is listening then.
            let _ = sender.send(future.await);
        });
        Self { receiver }
    }

    pub fn poll(&self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(value) => TaskPoll::Done(value),
            Err(TryRecvError::Empty) => TaskPoll::Running,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}

/// Takes the result out of `slot` once its task has finished, emptying the slot.
pub fn take_finished<T: Send + 'static>(
    slot: &mut Option<Pending<T>>,
) -> Option<Result<T, WorkflowError>> {
    let result = match slot.as_ref()?.poll() {
        TaskPoll::Running => return None,
        TaskPoll::Done(value) => Ok(value),
        TaskPoll::Lost => Err(WorkflowError::TaskLost),
    };
    *slot = None;
    Some(result)
}
