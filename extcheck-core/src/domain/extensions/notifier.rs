use extcheck_contracts::ExtensionBroadcast;

/// Outbound side of the change topic.
///
/// `publish` is called after the owning transaction committed. It must not
/// block and must not fail the caller; delivery is best effort.
pub trait ChangeNotifier: Send + Sync {
    fn publish(&self, message: ExtensionBroadcast);
}
