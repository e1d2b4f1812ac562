use super::partition::Partition;

/// Receives the freshly derived partition after each successful board change.
///
/// Exactly one notification is sent per successful operation; rejected
/// assignments send none.
pub trait PartitionObserver: Send {
    fn partition_changed(&mut self, partition: &Partition);
}

impl<F> PartitionObserver for F
where
    F: FnMut(&Partition) + Send,
{
    fn partition_changed(&mut self, partition: &Partition) {
        self(partition)
    }
}
