use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use log::debug;

use super::{
    SyncRequest,
    TaskResult,
};
use crate::remote::RemoteSync;

/// Runs backend requests on worker threads and hands the results back to the
/// UI thread, which drains them once per frame.
pub struct TaskManager {
    remote: Arc<dyn RemoteSync>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new(remote: Arc<dyn RemoteSync>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { remote, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    pub fn submit(&self, request: SyncRequest) {
        let sender = self.sender.clone();
        let remote = Arc::clone(&self.remote);

        debug!("Submitting {:?}", request.operation());
        thread::spawn(move || {
            let result = request.execute(remote.as_ref());
            let _ = sender.send(result);
        });
    }

    pub fn submit_all(&self, requests: impl IntoIterator<Item = SyncRequest>) {
        for request in requests {
            self.submit(request);
        }
    }
}
